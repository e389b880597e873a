//! Volatile in-memory store.

use crate::error::StoreError;
use crate::store::TripleStore;
use crate::types::{Knowledge, Pattern, Proposition};

/// In-memory triple store
///
/// All statements live in an ordered set; queries scan it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    statements: Knowledge,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `seed`.
    pub fn with_seed(seed: &Knowledge) -> Self {
        Self {
            statements: seed.clone(),
        }
    }
}

impl TripleStore for MemoryStore {
    fn size(&self) -> Result<usize, StoreError> {
        Ok(self.statements.len())
    }

    fn query(&self, pattern: &Pattern) -> Result<Vec<Proposition>, StoreError> {
        Ok(self.statements.matching(pattern))
    }

    fn insert(&mut self, statements: &Knowledge) -> Result<(), StoreError> {
        self.statements.extend_from(statements);
        Ok(())
    }

    fn remove(&mut self, pattern: &Pattern) -> Result<(), StoreError> {
        for proposition in self.statements.matching(pattern) {
            self.statements.remove(&proposition);
        }
        Ok(())
    }

    fn difference(&mut self, other: &Knowledge) -> Result<(), StoreError> {
        for proposition in other {
            self.statements.remove(proposition);
        }
        Ok(())
    }

    fn release(&mut self) -> Result<(), StoreError> {
        self.statements = Knowledge::new();
        Ok(())
    }

    fn statements(&self) -> Result<Knowledge, StoreError> {
        Ok(self.statements.clone())
    }
}
