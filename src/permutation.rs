use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};

/// A permutation of an alphabet's indices, written in cycle notation such as
/// `"(AELT) (BKNW) (S)"`. Symbols not named in any cycle map to themselves.
///
/// The notation is parsed once into successor and predecessor tables, so
/// `permute` and `invert` are plain lookups.
#[derive(Debug, Clone)]
pub struct Permutation {
	alphabet:	Arc<Alphabet>,
	cycles:		Vec<Vec<usize>>,
	forward:	Vec<usize>,		// forward[i] is the image of i
	backward:	Vec<usize>,		// backward[forward[i]] == i
	charted:	Vec<bool>,		// i appears in some cycle
}

impl Permutation {
	pub fn identity(alphabet: Arc<Alphabet>) -> Permutation {
		let n = alphabet.size();
		Permutation {
			alphabet,
			cycles:		Vec::new(),
			forward:	(0..n).collect(),
			backward:	(0..n).collect(),
			charted:	vec![false; n],
		}
	}

	/// Parses `cycles`. Whitespace between and inside groups is ignored.
	pub fn new(cycles: &str, alphabet: Arc<Alphabet>) -> Result<Permutation> {
		let mut perm = Permutation::identity(alphabet);

		let mut current: Option<Vec<usize>> = None;
		for c in cycles.chars() {
			if c.is_whitespace() {
				continue;
			}
			match (c, current.as_mut()) {
				('(', None) => current = Some(Vec::new()),
				('(', Some(_)) => {
					return Err(EnigmaError::MalformedCycles(format!("nested '(' in \"{}\"", cycles)));
				}
				(')', Some(_)) => {
					if let Some(cycle) = current.take() {
						perm.add_indices(cycle, cycles)?;
					}
				}
				(_, None) => {
					return Err(EnigmaError::MalformedCycles(format!("'{}' outside a cycle in \"{}\"", c, cycles)));
				}
				(_, Some(cycle)) => cycle.push(perm.alphabet.to_index(c)?),
			}
		}

		if current.is_some() {
			return Err(EnigmaError::MalformedCycles(format!("unclosed '(' in \"{}\"", cycles)));
		}
		Ok(perm)
	}

	/// Adds the cycle c0 -> c1 -> ... -> cm -> c0, where `cycle` is the bare
	/// symbols c0c1...cm. Only meant for building a permutation up before use.
	pub fn add_cycle(&mut self, cycle: &str) -> Result<()> {
		let indices = cycle
			.chars()
			.filter(|c| !c.is_whitespace())
			.map(|c| self.alphabet.to_index(c))
			.collect::<Result<Vec<_>>>()?;
		self.add_indices(indices, cycle)
	}

	fn add_indices(&mut self, cycle: Vec<usize>, source: &str) -> Result<()> {
		if cycle.is_empty() {
			return Err(EnigmaError::MalformedCycles(format!("empty cycle in \"{}\"", source)));
		}
		for (j, &p) in cycle.iter().enumerate() {
			if self.charted[p] || cycle[..j].contains(&p) {
				let c = self.alphabet.to_symbol(p)?;
				return Err(EnigmaError::MalformedCycles(format!("'{}' repeated in \"{}\"", c, source)));
			}
		}

		for (j, &p) in cycle.iter().enumerate() {
			let next = cycle[(j + 1) % cycle.len()];
			self.forward[p] = next;
			self.backward[next] = p;
			self.charted[p] = true;
		}
		self.cycles.push(cycle);
		Ok(())
	}

	pub fn size(&self) -> usize {
		self.alphabet.size()
	}

	pub fn alphabet(&self) -> &Arc<Alphabet> {
		&self.alphabet
	}

	/// Reduces `p` into `0..size()`; negative values wrap from the top.
	pub fn wrap(&self, p: isize) -> usize {
		p.rem_euclid(self.size() as isize) as usize
	}

	pub fn permute(&self, p: isize) -> usize {
		self.forward[self.wrap(p)]
	}

	pub fn invert(&self, c: isize) -> usize {
		self.backward[self.wrap(c)]
	}

	pub fn permute_symbol(&self, p: char) -> Result<char> {
		let i = self.alphabet.to_index(p)?;
		self.alphabet.to_symbol(self.forward[i])
	}

	pub fn invert_symbol(&self, c: char) -> Result<char> {
		let i = self.alphabet.to_index(c)?;
		self.alphabet.to_symbol(self.backward[i])
	}

	/// True iff no symbol maps to itself: every symbol sits in a cycle of
	/// length two or more.
	pub fn derangement(&self) -> bool {
		self.forward.iter().enumerate().all(|(i, &p)| i != p)
	}

	pub fn cycles(&self) -> &[Vec<usize>] {
		&self.cycles
	}
}

impl fmt::Display for Permutation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (k, cycle) in self.cycles.iter().enumerate() {
			if k > 0 {
				f.write_str(" ")?;
			}
			f.write_str("(")?;
			for &p in cycle {
				let c = self.alphabet.to_symbol(p).map_err(|_| fmt::Error)?;
				write!(f, "{}", c)?;
			}
			f.write_str(")")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const NAVAL_I: &str = "(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)";

	fn upper() -> Arc<Alphabet> {
		Arc::new(Alphabet::default())
	}

	fn check_perm(alpha: &str, cycles: &str, from: &str, to: &str) {
		let alphabet = Arc::new(Alphabet::new(alpha).unwrap());
		let perm = Permutation::new(cycles, alphabet.clone()).unwrap();
		assert_eq!(perm.size(), from.chars().count());
		for (c, e) in from.chars().zip(to.chars()) {
			assert_eq!(perm.permute_symbol(c).unwrap(), e, "wrong translation of '{}'", c);
			assert_eq!(perm.invert_symbol(e).unwrap(), c, "wrong inverse of '{}'", e);
			let ci = alphabet.to_index(c).unwrap();
			let ei = alphabet.to_index(e).unwrap();
			assert_eq!(perm.permute(ci as isize), ei);
			assert_eq!(perm.invert(ei as isize), ci);
		}
	}

	#[test]
	fn identity_maps_everything_to_itself() {
		check_perm(
			"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
			"",
			"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
			"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
		);
	}

	#[test]
	fn naval_rotor_i() {
		check_perm(
			"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
			NAVAL_I,
			"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
			"EKMFLGDQVZNTOWYHXUSPAIBRCJ",
		);
	}

	#[test]
	fn uncharted_symbols_are_fixed() {
		check_perm("ABCDE", "(BD)", "ABCDE", "ADCBE");
	}

	#[test]
	fn odd_alphabet_and_spacing() {
		check_perm("x+1_z", " ( x1 )(+ z _) ", "x+1_z", "1zx+_");
	}

	#[test]
	fn permute_and_invert_are_inverse() {
		let perm = Permutation::new(NAVAL_I, upper()).unwrap();
		for i in 0..26 {
			assert_eq!(perm.invert(perm.permute(i) as isize), i as usize);
			assert_eq!(perm.permute(perm.invert(i) as isize), i as usize);
		}
	}

	#[test]
	fn indices_are_wrapped() {
		let perm = Permutation::new("(ABC)", Arc::new(Alphabet::new("ABCD").unwrap())).unwrap();
		assert_eq!(perm.wrap(-1), 3);
		assert_eq!(perm.wrap(-9), 3);
		assert_eq!(perm.wrap(9), 1);
		assert_eq!(perm.permute(4), 1);
		assert_eq!(perm.permute(-2), 0);
		assert_eq!(perm.invert(-4), 2);
	}

	#[test]
	fn derangement_needs_full_coverage() {
		let alpha = Arc::new(Alphabet::new("ABCD").unwrap());
		assert!(Permutation::new("(AB)(CD)", alpha.clone()).unwrap().derangement());
		assert!(Permutation::new("(ABCD)", alpha.clone()).unwrap().derangement());
		assert!(!Permutation::new("(ABC)", alpha.clone()).unwrap().derangement());
		assert!(!Permutation::new("(ABC)(D)", alpha.clone()).unwrap().derangement());
		assert!(!Permutation::identity(alpha).derangement());
	}

	#[test]
	fn malformed_notation_is_rejected() {
		let alpha = upper();
		for bad in ["(AB", "AB)", "(A(B))", "(ABA)", "(AB)(BC)", "()", "X(AB)"] {
			assert!(
				matches!(Permutation::new(bad, alpha.clone()), Err(EnigmaError::MalformedCycles(_))),
				"accepted \"{}\"",
				bad
			);
		}
		assert!(matches!(
			Permutation::new("(A3)", alpha),
			Err(EnigmaError::UnknownSymbol('3'))
		));
	}

	#[test]
	fn cycles_can_be_added_before_use() {
		let mut perm = Permutation::identity(upper());
		perm.add_cycle("AB").unwrap();
		perm.add_cycle("CDE").unwrap();
		assert_eq!(perm.permute_symbol('E').unwrap(), 'C');
		assert_eq!(perm.invert_symbol('A').unwrap(), 'B');
		assert!(matches!(perm.add_cycle("EF"), Err(EnigmaError::MalformedCycles(_))));
	}

	#[test]
	fn displays_canonical_cycles() {
		let perm = Permutation::new(" (AE)(BN)  (CK) ", upper()).unwrap();
		assert_eq!(perm.to_string(), "(AE) (BN) (CK)");
		assert_eq!(perm.cycles().len(), 3);
	}
}
