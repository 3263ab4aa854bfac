//! Machine description files.
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ
//! 5 3
//! I     MQ  (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//! Beta  N   (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B     R   (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
//!           (RX) (SZ) (TV)
//! ```
//!
//! The alphabet, the slot and pawl counts, then one record per rotor: name,
//! type (`R` reflector, `N` fixed, `M` moving followed by its notches) and
//! the cycles of its wiring. Layout is free; only token order matters.

use std::sync::Arc;

use log::debug;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

fn config_err<T>(msg: String) -> Result<T> {
	Err(EnigmaError::Config(msg))
}

fn count(token: Option<&str>, what: &str) -> Result<usize> {
	match token {
		Some(t) => t
			.parse()
			.map_err(|_| EnigmaError::Config(format!("{} must be a number, found \"{}\"", what, t))),
		None => config_err(format!("missing {}", what)),
	}
}

/// Builds a machine from a description, with no rotors inserted and an
/// identity plugboard.
pub fn read_config(text: &str) -> Result<Machine> {
	let mut tokens = text.split_whitespace().peekable();

	let alphabet = match tokens.next() {
		Some(t) => Arc::new(Alphabet::new(t)?),
		None => return config_err("missing alphabet".to_string()),
	};
	let slots = count(tokens.next(), "number of rotor slots")?;
	let pawls = count(tokens.next(), "number of pawls")?;

	let mut catalog: Vec<Rotor> = Vec::new();
	while let Some(name) = tokens.next() {
		if name.starts_with('(') {
			return config_err(format!("expected a rotor name, found \"{}\"", name));
		}
		if catalog.iter().any(|r| r.name() == name) {
			return config_err(format!("rotor {} is described twice", name));
		}
		let kind = match tokens.next() {
			Some(k) if !k.starts_with('(') => k,
			_ => return config_err(format!("rotor {} has no type", name)),
		};

		let mut cycles = String::new();
		while let Some(t) = tokens.next_if(|t| t.starts_with('(')) {
			cycles.push_str(t);
			cycles.push(' ');
		}
		let wiring = Permutation::new(&cycles, alphabet.clone())?;

		let mut chars = kind.chars();
		let rotor = match (chars.next(), chars.as_str()) {
			(Some('R'), "") => Rotor::reflector(name, wiring)?,
			(Some('N'), "") => Rotor::fixed(name, wiring),
			(Some('M'), notches) => Rotor::moving(name, wiring, notches)?,
			_ => return config_err(format!("rotor {} has unknown type \"{}\"", name, kind)),
		};
		catalog.push(rotor);
	}

	debug!("configured {} rotors over alphabet {}", catalog.len(), alphabet);
	Machine::new(alphabet, slots, pawls, catalog)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rotor::RotorKind;

	const SMALL: &str = "ABCD 2 1
		R  R   (AB)(CD)
		M  MAC (AC) (BD)
		F  N
	";

	#[test]
	fn reads_every_kind() {
		let m = read_config(SMALL).unwrap();
		assert_eq!(m.alphabet().size(), 4);
		assert_eq!(m.num_slots(), 2);
		assert_eq!(m.pawls(), 1);

		let kinds: Vec<_> = m.catalog().iter().map(|r| (r.name(), r.kind().clone())).collect();
		assert_eq!(
			kinds,
			vec![
				("R", RotorKind::Reflector),
				("M", RotorKind::Moving { notches: vec!['A', 'C'] }),
				("F", RotorKind::Fixed),
			]
		);
		assert_eq!(m.catalog()[1].wiring().to_string(), "(AC) (BD)");
		assert!(m.rotor(0).is_none());
	}

	#[test]
	fn moving_rotor_may_have_no_notch() {
		let m = read_config("AB 2 1 R R (AB) M M").unwrap();
		assert_eq!(m.catalog()[1].kind(), &RotorKind::Moving { notches: vec![] });
	}

	#[test]
	fn cycles_may_span_lines() {
		let m = read_config("ABCDEF 2 1\nR R (AB)\n   (CD)\n (EF)\nM M (ABC)").unwrap();
		assert!(m.catalog()[0].wiring().derangement());
	}

	#[test]
	fn bad_descriptions() {
		let bad = [
			"",
			"ABCD",
			"ABCD two 1",
			"ABCD 2",
			"ABCD 2 1 R",
			"ABCD 2 1 R (AB)(CD)",
			"ABCD 2 1 R X (AB)(CD)",
			"ABCD 2 1 R R (AB)(CD) R N",
			"ABCD 2 1 (AB)",
		];
		for text in bad {
			assert!(
				matches!(read_config(text), Err(EnigmaError::Config(_))),
				"accepted {:?}",
				text
			);
		}
	}

	#[test]
	fn wiring_faults_surface() {
		assert!(matches!(
			read_config("ABCD 2 1 R R (AB)"),
			Err(EnigmaError::NotADerangement(_))
		));
		assert!(matches!(
			read_config("ABCD 2 1 M MZ (AB)"),
			Err(EnigmaError::UnknownSymbol('Z'))
		));
		assert!(matches!(
			read_config("ABCD 2 1 R R (AB)(CA)"),
			Err(EnigmaError::MalformedCycles(_))
		));
		assert!(matches!(
			read_config("ABCD 2 2 R R (AB)(CD)"),
			Err(EnigmaError::BadGeometry { .. })
		));
	}
}
