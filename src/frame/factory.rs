//! Frame factories
//!
//! A factory materializes the store behind a new frame: it picks the
//! back-end (memory or sled), the inference policy, and loads the optional
//! seed knowledge.

use crate::error::{FrameError, StoreError};
use crate::frame::Frame;
use crate::store::{InferencePolicy, InferenceStore, MemoryStore, SledStore, TripleStore};
use crate::types::Knowledge;
use std::path::Path;
use tracing::warn;

/// Creates frames for a manager.
pub trait FrameFactory: Send + Sync {
    /// Create a frame identified by `uri`, seeded with `seed` when given.
    fn create_frame(&self, uri: &str, seed: Option<&Knowledge>) -> Result<Frame, FrameError>;
}

fn seeded<S: TripleStore + 'static>(
    mut store: InferenceStore<S>,
    seed: Option<&Knowledge>,
) -> Result<Box<dyn TripleStore>, FrameError> {
    if let Some(seed) = seed {
        store.union(seed)?;
    }
    Ok(Box::new(store))
}

/// Produces volatile in-memory frames
#[derive(Debug, Clone, Copy, Default)]
pub struct MemFrameFactory {
    policy: InferencePolicy,
}

impl MemFrameFactory {
    /// Factory with the default (RDFS) inference policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: InferencePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> InferencePolicy {
        self.policy
    }
}

impl FrameFactory for MemFrameFactory {
    fn create_frame(&self, uri: &str, seed: Option<&Knowledge>) -> Result<Frame, FrameError> {
        let store = seeded(InferenceStore::new(MemoryStore::new(), self.policy), seed)?;
        Frame::new(uri, store)
    }
}

/// Produces frames persisted in a shared sled database
pub struct SledFrameFactory {
    db: sled::Db,
    policy: InferencePolicy,
}

impl SledFrameFactory {
    /// Open (or create) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P, policy: InferencePolicy) -> Result<Self, FrameError> {
        let path = path.as_ref();
        let db = sled::open(path).map_err(|e| {
            StoreError::Backend(format!("Failed to open sled database at {:?}: {}", path, e))
        })?;
        Ok(Self { db, policy })
    }

    pub fn db(&self) -> &sled::Db {
        &self.db
    }
}

impl FrameFactory for SledFrameFactory {
    fn create_frame(&self, uri: &str, seed: Option<&Knowledge>) -> Result<Frame, FrameError> {
        let (store, stale) = SledStore::create(&self.db, uri)?;
        if stale > 0 {
            warn!(frame_uri = uri, stale, "Discarded statements left in a reused frame tree");
        }
        let store = seeded(InferenceStore::new(store, self.policy), seed)?;
        Frame::new(uri, store)
    }
}
