//! Runs a stream of settings lines and messages through a machine.

use std::io::{BufRead, Write};

use crate::error::{EnigmaError, Result};
use crate::machine::{Machine, Observer};
use crate::settings::{is_settings_line, Settings};

const GROUP: usize = 5;

/// Splits `msg` into space separated groups of five; the last group may be
/// shorter.
pub fn format_groups(msg: &str) -> String {
	let mut out = String::with_capacity(msg.len() + msg.len() / GROUP);
	for (i, c) in msg.chars().enumerate() {
		if i > 0 && i % GROUP == 0 {
			out.push(' ');
		}
		out.push(c);
	}
	out
}

/// Reads `input` line by line. Settings lines reconfigure `machine`, blank
/// lines are echoed, and any other line has its whitespace removed and is
/// converted and written in groups of five. Every output line ends in CRLF.
pub fn process<R, W, O>(machine: &mut Machine, input: R, mut output: W, observer: &mut O) -> Result<()>
where
	R: BufRead,
	W: Write,
	O: Observer + ?Sized,
{
	let mut configured = false;
	for line in input.lines() {
		let line = line?;
		if is_settings_line(&line) {
			Settings::parse(&line, machine.num_slots())?.apply(machine)?;
			configured = true;
			continue;
		}
		if !configured {
			return Err(EnigmaError::Settings("input must begin with a settings line".to_string()));
		}

		let msg: String = line.chars().filter(|c| !c.is_whitespace()).collect();
		let converted = machine.convert_str_with(&msg, observer)?;
		write!(output, "{}\r\n", format_groups(&converted))?;
	}
	output.flush()?;
	Ok(())
}
