use std::sync::Arc;

use log::{debug, info};

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// One converted character, as seen by an [`Observer`].
pub struct Trace<'a> {
	pub machine:	&'a Machine,
	pub input:		usize,
	pub plugged:	usize,		// input after the plugboard
	pub output:		usize,
}

/// Receives every conversion the machine performs, after stepping.
pub trait Observer {
	fn observe(&mut self, trace: &Trace<'_>);
}

impl Observer for () {
	fn observe(&mut self, _: &Trace<'_>) {}
}

/// Writes `[windows] in -> plugged -> out` through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
	fn observe(&mut self, t: &Trace<'_>) {
		let alpha = t.machine.alphabet();
		let sym = |i: usize| alpha.to_symbol(i).unwrap_or('?');
		info!(
			"[{}] {} -> {} -> {}",
			t.machine.positions(),
			sym(t.input),
			sym(t.plugged),
			sym(t.output)
		);
	}
}

/// A rotor machine: `num_slots` rotor slots (slot 0 holds the reflector,
/// the last slot the fast rotor), `pawls` of which may rotate, and a
/// plugboard on the keyboard side.
#[derive(Debug, Clone)]
pub struct Machine {
	alphabet:	Arc<Alphabet>,
	num_slots:	usize,
	pawls:		usize,
	catalog:	Vec<Rotor>,		// templates, never mutated
	rotors:		Vec<Rotor>,		// current arrangement, empty until inserted
	plugboard:	Permutation,
}

impl Machine {
	pub fn new(alphabet: Arc<Alphabet>, num_slots: usize, pawls: usize, catalog: Vec<Rotor>) -> Result<Machine> {
		if num_slots < 2 || pawls >= num_slots {
			return Err(EnigmaError::BadGeometry { slots: num_slots, pawls });
		}
		let plugboard = Permutation::identity(alphabet.clone());
		Ok(Machine {
			alphabet,
			num_slots,
			pawls,
			catalog,
			rotors: Vec::with_capacity(num_slots),
			plugboard,
		})
	}

	pub fn alphabet(&self) -> &Arc<Alphabet> {
		&self.alphabet
	}

	pub fn num_slots(&self) -> usize {
		self.num_slots
	}

	pub fn pawls(&self) -> usize {
		self.pawls
	}

	pub fn catalog(&self) -> &[Rotor] {
		&self.catalog
	}

	/// Occupant of slot `k`, if rotors have been inserted.
	pub fn rotor(&self, k: usize) -> Option<&Rotor> {
		self.rotors.get(k)
	}

	pub fn plugboard(&self) -> &Permutation {
		&self.plugboard
	}

	/// Fills the slots, left to right, with fresh copies of the named
	/// catalog rotors at their origin. `names[0]` must name a reflector.
	/// The previous arrangement survives any failure.
	pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
		if names.len() != self.num_slots {
			return Err(EnigmaError::WrongRotorCount {
				expected: self.num_slots,
				found: names.len(),
			});
		}

		let mut rotors: Vec<Rotor> = Vec::with_capacity(self.num_slots);
		for (slot, name) in names.iter().enumerate() {
			let name: &str = name.as_ref();
			if rotors.iter().any(|r| r.name() == name) {
				return Err(EnigmaError::DuplicateRotor(name.to_string()));
			}
			let rotor = self
				.catalog
				.iter()
				.find(|r| r.name() == name)
				.ok_or_else(|| EnigmaError::UnknownRotor(name.to_string()))?;

			if slot == 0 && !rotor.reflecting() {
				return Err(EnigmaError::NotAReflector(name.to_string()));
			}
			if slot != 0 && rotor.reflecting() {
				return Err(EnigmaError::MisplacedReflector { name: name.to_string(), slot });
			}
			rotors.push(rotor.clone());
		}

		let count = rotors.iter().filter(|r| r.rotates()).count();
		if count > self.pawls {
			return Err(EnigmaError::TooManyRotatingRotors { count, pawls: self.pawls });
		}

		debug!(
			"inserted rotors {}",
			rotors.iter().map(Rotor::name).collect::<Vec<_>>().join(" ")
		);
		self.rotors = rotors;
		Ok(())
	}

	// Parses a per-slot setting string for slots 1.. into indices.
	fn slot_setting(&self, setting: &str) -> Result<Vec<usize>> {
		if self.rotors.is_empty() {
			return Err(EnigmaError::NoRotors);
		}
		let expected = self.num_slots - 1;
		if setting.chars().count() != expected {
			return Err(EnigmaError::BadSettingLength { setting: setting.to_string(), expected });
		}
		setting.chars().map(|c| self.alphabet.to_index(c)).collect()
	}

	/// Sets the window positions of slots 1.. from `setting`, leftmost
	/// first. `setting` holds exactly `num_slots() - 1` symbols.
	pub fn set_positions(&mut self, setting: &str) -> Result<()> {
		let posns = self.slot_setting(setting)?;
		for (rotor, p) in self.rotors[1..].iter_mut().zip(posns) {
			rotor.set_position(p as isize)?;
		}
		debug!("positions set to {}", setting);
		Ok(())
	}

	/// Same shape as [`set_positions`](Machine::set_positions). An empty
	/// string puts every ring at the first symbol.
	pub fn set_ring_offsets(&mut self, setting: &str) -> Result<()> {
		let rings = if setting.is_empty() {
			if self.rotors.is_empty() {
				return Err(EnigmaError::NoRotors);
			}
			vec![0; self.num_slots - 1]
		} else {
			self.slot_setting(setting)?
		};
		for (rotor, r) in self.rotors[1..].iter_mut().zip(rings) {
			rotor.set_ring_offset(r as isize)?;
		}
		debug!("ring offsets set to {:?}", setting);
		Ok(())
	}

	pub fn set_plugboard(&mut self, plugboard: Permutation) {
		debug!("plugboard set to {}", plugboard);
		self.plugboard = plugboard;
	}

	/// Current window symbols of slots 1.., leftmost first.
	pub fn positions(&self) -> String {
		self.rotors
			.iter()
			.skip(1)
			.map(|r| self.alphabet.to_symbol(r.position()).unwrap_or('?'))
			.collect()
	}

	/// Steps the rotors for one keypress. Every notch test reads the
	/// positions from before the keypress; the marked rotors then all
	/// advance together.
	fn advance_rotors(&mut self) -> Result<()> {
		let last = self.rotors.len() - 1;
		let mut turns = vec![false; self.rotors.len()];

		// the fast rotor always steps
		turns[last] = self.rotors[last].rotates();

		for i in (1..=last).rev() {
			let (left, this) = (&self.rotors[i - 1], &self.rotors[i]);
			if !this.rotates() {
				continue;
			}
			if this.at_notch() && left.rotates() {
				turns[i] = true;
				turns[i - 1] = true;
			}
		}

		for (rotor, _) in self.rotors.iter_mut().zip(turns).filter(|(_, t)| *t) {
			rotor.advance()?;
		}
		Ok(())
	}

	// Rotors right to left, reflector, then back out left to right.
	fn apply_rotors(&self, c: usize) -> usize {
		let inward = self.rotors[1..].iter().rev().fold(c, |c, r| r.convert_forward(c));
		self.rotors.iter().fold(inward, |c, r| r.convert_backward(c))
	}

	/// Converts the index `c` after first stepping the rotors.
	pub fn convert(&mut self, c: usize) -> Result<usize> {
		self.convert_with(c, &mut ())
	}

	pub fn convert_with<O: Observer + ?Sized>(&mut self, c: usize, observer: &mut O) -> Result<usize> {
		if self.rotors.is_empty() {
			return Err(EnigmaError::NoRotors);
		}
		self.advance_rotors()?;

		let plugged = self.plugboard.permute(c as isize);
		let output = self.plugboard.permute(self.apply_rotors(plugged) as isize);

		observer.observe(&Trace { machine: &*self, input: c, plugged, output });
		Ok(output)
	}

	pub fn convert_symbol(&mut self, c: char) -> Result<char> {
		let i = self.alphabet.to_index(c)?;
		let o = self.convert(i)?;
		self.alphabet.to_symbol(o)
	}

	/// Converts `msg` one symbol at a time, stepping before each.
	pub fn convert_str(&mut self, msg: &str) -> Result<String> {
		self.convert_str_with(msg, &mut ())
	}

	pub fn convert_str_with<O: Observer + ?Sized>(&mut self, msg: &str, observer: &mut O) -> Result<String> {
		let mut result = String::with_capacity(msg.len());
		for c in msg.chars() {
			let i = self.alphabet.to_index(c)?;
			let o = self.convert_with(i, observer)?;
			result.push(self.alphabet.to_symbol(o)?);
		}
		Ok(result)
	}
}
