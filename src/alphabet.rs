use std::collections::HashMap;
use std::fmt;

use crate::error::{EnigmaError, Result};

/// Symbols the text formats use as punctuation.
const RESERVED: [char; 3] = ['(', ')', '*'];

/// An ordered, duplicate-free set of symbols. The k-th symbol has index k.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
	symbols:	Vec<char>,
	index:		HashMap<char, usize>,
}

impl Alphabet {
	pub fn new(chars: &str) -> Result<Alphabet> {
		let symbols: Vec<char> = chars.chars().collect();
		if symbols.is_empty() {
			return Err(EnigmaError::EmptyAlphabet);
		}

		let mut index = HashMap::with_capacity(symbols.len());
		for (i, &c) in symbols.iter().enumerate() {
			if c.is_whitespace() || RESERVED.contains(&c) {
				return Err(EnigmaError::ReservedSymbol(c));
			}
			if index.insert(c, i).is_some() {
				return Err(EnigmaError::DuplicateSymbol(c));
			}
		}

		Ok(Alphabet { symbols, index })
	}

	pub fn size(&self) -> usize {
		self.symbols.len()
	}

	pub fn contains(&self, c: char) -> bool {
		self.index.contains_key(&c)
	}

	pub fn to_index(&self, c: char) -> Result<usize> {
		self.index.get(&c).copied().ok_or(EnigmaError::UnknownSymbol(c))
	}

	pub fn to_symbol(&self, index: usize) -> Result<char> {
		self.symbols.get(index).copied().ok_or(EnigmaError::IndexOutOfRange {
			index,
			size: self.size(),
		})
	}

	pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
		self.symbols.iter().copied()
	}
}

impl Default for Alphabet {
	/// The upper-case Latin letters.
	fn default() -> Alphabet {
		let symbols: Vec<char> = ('A'..='Z').collect();
		let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
		Alphabet { symbols, index }
	}
}

impl fmt::Display for Alphabet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for c in &self.symbols {
			write!(f, "{}", c)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn index_and_symbol_are_inverse() {
		let alpha = Alphabet::new("QWERTY").unwrap();
		assert_eq!(alpha.size(), 6);
		for i in 0..alpha.size() {
			assert_eq!(alpha.to_index(alpha.to_symbol(i).unwrap()).unwrap(), i);
		}
		assert_eq!(alpha.to_index('E').unwrap(), 2);
		assert!(alpha.contains('Y'));
		assert!(!alpha.contains('A'));
	}

	#[test]
	fn default_is_latin_uppercase() {
		let alpha = Alphabet::default();
		assert_eq!(alpha.size(), 26);
		assert_eq!(alpha.to_symbol(25).unwrap(), 'Z');
		assert_eq!(alpha, Alphabet::new("ABCDEFGHIJKLMNOPQRSTUVWXYZ").unwrap());
	}

	#[test]
	fn lookups_outside_the_alphabet_fail() {
		let alpha = Alphabet::new("ABCD").unwrap();
		assert!(matches!(alpha.to_index('Z'), Err(EnigmaError::UnknownSymbol('Z'))));
		assert!(matches!(
			alpha.to_symbol(4),
			Err(EnigmaError::IndexOutOfRange { index: 4, size: 4 })
		));
	}

	#[test]
	fn rejects_bad_symbol_sets() {
		assert!(matches!(Alphabet::new(""), Err(EnigmaError::EmptyAlphabet)));
		assert!(matches!(Alphabet::new("ABCA"), Err(EnigmaError::DuplicateSymbol('A'))));
		assert!(matches!(Alphabet::new("AB(C"), Err(EnigmaError::ReservedSymbol('('))));
		assert!(matches!(Alphabet::new("AB C"), Err(EnigmaError::ReservedSymbol(' '))));
	}

	#[test]
	fn displays_in_order() {
		assert_eq!(Alphabet::new("a1b2").unwrap().to_string(), "a1b2");
	}
}
