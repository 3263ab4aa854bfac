//! Faults raised by the machine and its text readers.

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EnigmaError>;

#[derive(Debug, Error)]
pub enum EnigmaError {
	#[error("alphabet must contain at least one symbol")]
	EmptyAlphabet,

	#[error("symbol '{0}' appears twice in the alphabet")]
	DuplicateSymbol(char),

	#[error("symbol '{0}' is reserved and cannot be part of an alphabet")]
	ReservedSymbol(char),

	#[error("symbol '{0}' is not in the alphabet")]
	UnknownSymbol(char),

	#[error("index {index} is out of range for an alphabet of {size} symbols")]
	IndexOutOfRange { index: usize, size: usize },

	#[error("malformed cycles: {0}")]
	MalformedCycles(String),

	#[error("reflector {0} must not map any symbol to itself")]
	NotADerangement(String),

	#[error("reflector {0} is fixed at its origin")]
	ReflectorPosition(String),

	#[error("rotor {0} does not rotate")]
	IllegalAdvance(String),

	#[error("a machine needs at least 2 slots and fewer pawls than slots (got {slots} slots, {pawls} pawls)")]
	BadGeometry { slots: usize, pawls: usize },

	#[error("no rotor named {0}")]
	UnknownRotor(String),

	#[error("rotor {0} is named more than once")]
	DuplicateRotor(String),

	#[error("rotor {0} in the first slot is not a reflector")]
	NotAReflector(String),

	#[error("reflector {name} can only sit in the first slot (found in slot {slot})")]
	MisplacedReflector { name: String, slot: usize },

	#[error("{count} rotating rotors exceed the {pawls} pawls available")]
	TooManyRotatingRotors { count: usize, pawls: usize },

	#[error("expected {expected} rotor names, got {found}")]
	WrongRotorCount { expected: usize, found: usize },

	#[error("setting \"{setting}\" must be {expected} symbols long")]
	BadSettingLength { setting: String, expected: usize },

	#[error("no rotors have been inserted")]
	NoRotors,

	#[error("configuration: {0}")]
	Config(String),

	#[error("settings: {0}")]
	Settings(String),

	#[error(transparent)]
	Io(#[from] io::Error),
}
