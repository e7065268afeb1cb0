//! Four-state logic values as they appear in Verilog literals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single 4-state logic value.
///
/// Behavioral multiplexer bodies are truth tables over these values: `0` and
/// `1` in the case patterns and `z` on the default branch.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Logic {
    /// Logic low (0).
    Zero = 0,
    /// Logic high (1).
    One = 1,
    /// Unknown or uninitialized.
    X = 2,
    /// High-impedance (tri-state).
    Z = 3,
}

impl Logic {
    /// Converts a character to a [`Logic`] value.
    ///
    /// Accepts '0', '1', 'x'/'X', and 'z'/'Z'.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Logic::Zero),
            '1' => Some(Logic::One),
            'x' | 'X' => Some(Logic::X),
            'z' | 'Z' => Some(Logic::Z),
            _ => None,
        }
    }

    /// Returns the driven value for a boolean.
    pub fn from_bool(b: bool) -> Self {
        if b {
            Logic::One
        } else {
            Logic::Zero
        }
    }

    /// Returns the character used in a Verilog based literal (`4'b10z0`).
    pub fn as_char(self) -> char {
        match self {
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::X => 'x',
            Logic::Z => 'z',
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Formats a bit vector as a sized Verilog binary literal, MSB first as given.
///
/// ```
/// use weft_common::logic::{verilog_literal, Logic};
/// assert_eq!(verilog_literal(&[Logic::One, Logic::Zero]), "2'b10");
/// ```
pub fn verilog_literal(bits: &[Logic]) -> String {
    let mut out = format!("{}'b", bits.len());
    out.extend(bits.iter().map(|b| b.as_char()));
    out
}
