//! Rotor cipher machine simulator.
//!
//! A machine is an alphabet, a reflector, a stack of fixed and moving
//! rotors and a plugboard. Each keypress first steps the rotors (including
//! the double step of a middle rotor sitting at its notch), then sends the
//! signal through the plugboard, in through the rotors, off the reflector,
//! back out and through the plugboard again.
//!
//! ```
//! use std::sync::Arc;
//! use enigma::{Alphabet, Machine, Permutation, Rotor};
//!
//! let alpha = Arc::new(Alphabet::new("ABCD")?);
//! let catalog = vec![
//! 	Rotor::reflector("R", Permutation::new("(AB)(CD)", alpha.clone())?)?,
//! 	Rotor::moving("M", Permutation::new("(AC)(BD)", alpha.clone())?, "A")?,
//! ];
//! let mut machine = Machine::new(alpha, 2, 1, catalog)?;
//! machine.insert_rotors(&["R", "M"])?;
//! machine.set_positions("A")?;
//! assert_eq!(machine.convert_str("AB")?, "BA");
//! # Ok::<(), enigma::EnigmaError>(())
//! ```

pub mod alphabet;
pub mod config;
pub mod error;
pub mod machine;
pub mod message;
pub mod permutation;
pub mod rotor;
pub mod settings;

pub use alphabet::Alphabet;
pub use config::read_config;
pub use error::{EnigmaError, Result};
pub use machine::{LogObserver, Machine, Observer, Trace};
pub use message::{format_groups, process};
pub use permutation::Permutation;
pub use rotor::{Rotor, RotorKind};
pub use settings::Settings;
