use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tree::error::ModelError;

/// One binary digit of history.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    Zero,
    One,
}

impl Symbol {
    /// Slot of this symbol in per-symbol arrays (`0` or `1`).
    pub fn index(self) -> usize {
        match self {
            Symbol::Zero => 0,
            Symbol::One => 1,
        }
    }

    pub fn is_one(self) -> bool {
        self == Symbol::One
    }
}

impl From<bool> for Symbol {
    fn from(bit: bool) -> Self {
        if bit { Symbol::One } else { Symbol::Zero }
    }
}

impl From<Symbol> for u8 {
    fn from(symbol: Symbol) -> Self {
        symbol.index() as u8
    }
}

impl TryFrom<u8> for Symbol {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Symbol::Zero),
            1 => Ok(Symbol::One),
            _ => Err(ModelError::InvalidSymbol { value }),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}
