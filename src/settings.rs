//! Settings lines: `* B Beta III IV I AXLE [rings] [(HQ) (EX) ...]`.

use log::debug;

use crate::error::{EnigmaError, Result};
use crate::machine::Machine;
use crate::permutation::Permutation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	pub rotors:		Vec<String>,	// reflector first
	pub positions:	String,
	pub rings:		String,			// empty when not given
	pub plugboard:	String,			// cycle notation, may be empty
}

pub fn is_settings_line(line: &str) -> bool {
	line.trim_start().starts_with('*')
}

fn settings_err<T>(msg: String) -> Result<T> {
	Err(EnigmaError::Settings(msg))
}

impl Settings {
	/// Splits a settings line for a machine with `num_slots` slots.
	pub fn parse(line: &str, num_slots: usize) -> Result<Settings> {
		let rest = match line.trim_start().strip_prefix('*') {
			Some(rest) => rest,
			None => return settings_err(format!("\"{}\" does not begin with '*'", line)),
		};
		let mut tokens = rest.split_whitespace().peekable();

		let rotors = tokens
			.by_ref()
			.take(num_slots)
			.take_while(|t| !t.starts_with('('))
			.map(str::to_string)
			.collect::<Vec<_>>();
		if rotors.len() != num_slots {
			return settings_err(format!("expected {} rotor names in \"{}\"", num_slots, line));
		}

		let positions = match tokens.next() {
			Some(t) if !t.starts_with('(') => t.to_string(),
			_ => return settings_err(format!("missing rotor positions in \"{}\"", line)),
		};
		let rings = tokens
			.next_if(|t| !t.starts_with('('))
			.unwrap_or_default()
			.to_string();
		let plugboard = tokens.collect::<Vec<_>>().join(" ");

		Ok(Settings { rotors, positions, rings, plugboard })
	}

	/// Inserts the rotors, then sets positions, rings and plugboard.
	pub fn apply(&self, machine: &mut Machine) -> Result<()> {
		machine.insert_rotors(self.rotors.as_slice())?;
		machine.set_positions(&self.positions)?;
		machine.set_ring_offsets(&self.rings)?;
		let plugboard = Permutation::new(&self.plugboard, machine.alphabet().clone())?;
		machine.set_plugboard(plugboard);
		debug!("machine at {}", machine.positions());
		Ok(())
	}
}
