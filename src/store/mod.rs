//! Triple Store
//!
//! Capability interface for the statement stores that back frames, plus the
//! in-memory, sled-backed and inference-enabled variants. Frame code depends
//! only on [`TripleStore`]; factories pick the variant.

pub mod inference;
pub mod memory;
pub mod persistence;

pub use inference::{InferencePolicy, InferenceStore};
pub use memory::MemoryStore;
pub use persistence::SledStore;

use crate::error::StoreError;
use crate::types::{Knowledge, Pattern, Proposition, Term};
use crate::vocab::RDF_TYPE;

/// Set-semantics statement store with wildcard pattern queries
pub trait TripleStore: Send + Sync {
    /// Number of statements held.
    fn size(&self) -> Result<usize, StoreError>;

    /// Statements matching `pattern`.
    fn query(&self, pattern: &Pattern) -> Result<Vec<Proposition>, StoreError>;

    /// Add statements; already-present statements are no-ops.
    fn insert(&mut self, statements: &Knowledge) -> Result<(), StoreError>;

    /// Remove every statement matching `pattern`.
    fn remove(&mut self, pattern: &Pattern) -> Result<(), StoreError>;

    /// Remove exactly the given statements.
    fn difference(&mut self, other: &Knowledge) -> Result<(), StoreError>;

    /// Release all resources held by this store.
    fn release(&mut self) -> Result<(), StoreError>;

    /// Union a read-only set of statements into this store.
    fn union(&mut self, other: &Knowledge) -> Result<(), StoreError> {
        self.insert(other)
    }

    /// Read-only snapshot of the whole store.
    fn statements(&self) -> Result<Knowledge, StoreError> {
        Ok(self.query(&Pattern::any())?.into_iter().collect())
    }

    /// True when `uri` appears as a subject or a resource object.
    fn contains_resource(&self, uri: &str) -> Result<bool, StoreError> {
        if !self.query(&Pattern::any().with_subject(uri))?.is_empty() {
            return Ok(true);
        }
        Ok(!self
            .query(&Pattern::any().with_object(Term::resource(uri)))?
            .is_empty())
    }

    /// True when `uri` carries at least one `rdf:type` assertion.
    fn contains_typed_resource(&self, uri: &str) -> Result<bool, StoreError> {
        Ok(!self
            .query(&Pattern::any().with_subject(uri).with_predicate(RDF_TYPE))?
            .is_empty())
    }
}
