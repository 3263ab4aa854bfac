//! Rotor machine simulator front end.
//!
//! Usage: enigma [--verbose] CONFIG [INPUT [OUTPUT]]

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use enigma::{process as run_messages, read_config, LogObserver};

#[derive(Parser)]
#[command(name = "enigma", version, about = "Encrypt and decrypt messages on a configurable rotor machine")]
struct Args {
	/// Log every keypress: rotor windows, plugboard and output
	#[arg(long)]
	verbose: bool,

	/// Machine description file
	config: PathBuf,

	/// Messages to process (default: standard input)
	input: Option<PathBuf>,

	/// Where processed messages go (default: standard output)
	output: Option<PathBuf>,
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
	let input: Box<dyn BufRead> = match path {
		Some(p) => {
			let f = File::open(p).with_context(|| format!("could not open {}", p.display()))?;
			Box::new(BufReader::new(f))
		}
		None => Box::new(io::stdin().lock()),
	};
	Ok(input)
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
	let output: Box<dyn Write> = match path {
		Some(p) => {
			let f = File::create(p).with_context(|| format!("could not open {}", p.display()))?;
			Box::new(BufWriter::new(f))
		}
		None => Box::new(io::stdout().lock()),
	};
	Ok(output)
}

fn run(args: &Args) -> Result<()> {
	let text = fs::read_to_string(&args.config)
		.with_context(|| format!("could not open {}", args.config.display()))?;
	let mut machine = read_config(&text)?;
	debug!("read {} rotors from {}", machine.catalog().len(), args.config.display());

	let input = open_input(args.input.as_deref())?;
	let mut output = open_output(args.output.as_deref())?;

	if args.verbose {
		run_messages(&mut machine, input, &mut output, &mut LogObserver)?;
	} else {
		run_messages(&mut machine, input, &mut output, &mut ())?;
	}
	Ok(())
}

fn main() {
	let args = Args::parse();

	let level = if args.verbose { "info" } else { "warn" };
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

	process::exit(match run(&args) {
		Ok(()) => 0,
		Err(e) => {
			let _ = writeln!(io::stderr(), "Error: {:#}", e);
			1
		}
	});
}
