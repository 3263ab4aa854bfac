use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
	/// Turns the signal back; sits in slot 0 and never moves.
	Reflector,
	/// Occupies a slot but never rotates.
	Fixed,
	/// Steps under a pawl; engages its left neighbour at any of `notches`.
	Moving { notches: Vec<char> },
}

/// A wired rotor. The wiring is shared between copies, the rotational state
/// (`position`, `ring`) belongs to each copy.
#[derive(Debug, Clone)]
pub struct Rotor {
	name:		String,
	kind:		RotorKind,
	wiring:		Arc<Permutation>,
	position:	usize,
	ring:		usize,
}

impl Rotor {
	pub fn reflector(name: &str, wiring: Permutation) -> Result<Rotor> {
		if !wiring.derangement() {
			return Err(EnigmaError::NotADerangement(name.to_string()));
		}
		Ok(Rotor::build(name, RotorKind::Reflector, wiring))
	}

	pub fn fixed(name: &str, wiring: Permutation) -> Rotor {
		Rotor::build(name, RotorKind::Fixed, wiring)
	}

	pub fn moving(name: &str, wiring: Permutation, notches: &str) -> Result<Rotor> {
		let notches = notches.chars().collect::<Vec<_>>();
		for &c in &notches {
			wiring.alphabet().to_index(c)?;
		}
		Ok(Rotor::build(name, RotorKind::Moving { notches }, wiring))
	}

	fn build(name: &str, kind: RotorKind, wiring: Permutation) -> Rotor {
		Rotor {
			name:		name.to_string(),
			kind,
			wiring:		Arc::new(wiring),
			position:	0,
			ring:		0,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn kind(&self) -> &RotorKind {
		&self.kind
	}

	pub fn wiring(&self) -> &Permutation {
		&self.wiring
	}

	pub fn alphabet(&self) -> &Alphabet {
		self.wiring.alphabet()
	}

	pub fn size(&self) -> usize {
		self.wiring.size()
	}

	pub fn rotates(&self) -> bool {
		matches!(self.kind, RotorKind::Moving { .. })
	}

	pub fn reflecting(&self) -> bool {
		self.kind == RotorKind::Reflector
	}

	pub fn position(&self) -> usize {
		self.position
	}

	pub fn ring_offset(&self) -> usize {
		self.ring
	}

	/// Sets the rotational position; out-of-range values wrap.
	pub fn set_position(&mut self, posn: isize) -> Result<()> {
		self.position = self.settle(posn)?;
		Ok(())
	}

	pub fn set_position_symbol(&mut self, c: char) -> Result<()> {
		let posn = self.alphabet().to_index(c)?;
		self.set_position(posn as isize)
	}

	pub fn set_ring_offset(&mut self, ring: isize) -> Result<()> {
		self.ring = self.settle(ring)?;
		Ok(())
	}

	pub fn set_ring_offset_symbol(&mut self, c: char) -> Result<()> {
		let ring = self.alphabet().to_index(c)?;
		self.set_ring_offset(ring as isize)
	}

	// A reflector only accepts its origin.
	fn settle(&self, setting: isize) -> Result<usize> {
		let setting = self.wiring.wrap(setting);
		if self.reflecting() && setting != 0 {
			return Err(EnigmaError::ReflectorPosition(self.name.clone()));
		}
		Ok(setting)
	}

	/// True iff the symbol in the window is one of the notches.
	pub fn at_notch(&self) -> bool {
		match &self.kind {
			RotorKind::Moving { notches } => self
				.alphabet()
				.to_symbol(self.position)
				.map(|c| notches.contains(&c))
				.unwrap_or(false),
			_ => false,
		}
	}

	pub fn advance(&mut self) -> Result<()> {
		if !self.rotates() {
			return Err(EnigmaError::IllegalAdvance(self.name.clone()));
		}
		self.position = self.wiring.wrap(self.position as isize + 1);
		Ok(())
	}

	// Contact offset seen by the wiring: position less ring setting.
	fn shift(&self) -> isize {
		self.position as isize - self.ring as isize
	}

	/// Signal entering from the right-hand (keyboard) side.
	pub fn convert_forward(&self, p: usize) -> usize {
		if self.reflecting() {
			return self.wiring.permute(p as isize);
		}
		let d = self.shift();
		let image = self.wiring.permute(p as isize + d);
		self.wiring.wrap(image as isize - d)
	}

	/// Signal returning from the reflector side.
	pub fn convert_backward(&self, e: usize) -> usize {
		if self.reflecting() {
			return self.wiring.invert(e as isize);
		}
		let d = self.shift();
		let image = self.wiring.invert(e as isize + d);
		self.wiring.wrap(image as isize - d)
	}
}
