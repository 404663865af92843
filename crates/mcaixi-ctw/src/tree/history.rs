use crate::tree::{error::ModelError, symbol::Symbol};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Append-only record of every symbol the tree has seen, most recent last.
pub(crate) struct History {
    symbols: Vec<Symbol>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    pub fn extend(&mut self, symbols: &[Symbol]) {
        self.symbols.extend_from_slice(symbols);
    }

    /// Drop the `count` most recent symbols.
    pub fn truncate_by(&mut self, count: usize) -> Result<(), ModelError> {
        let available = self.symbols.len();
        if count > available {
            return Err(ModelError::RevertBeyondHistory {
                requested: count,
                available,
            });
        }
        self.symbols.truncate(available - count);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Symbol> {
        self.symbols.pop()
    }

    /// Symbol `offset` places back from the end (`0` is the most recent).
    pub fn recent(&self, offset: usize) -> Option<Symbol> {
        let len = self.symbols.len();
        if offset >= len {
            None
        } else {
            Some(self.symbols[len - 1 - offset])
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }
}
