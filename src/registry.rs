//! Frame registry: the shared map of live frames under one manager.

use crate::frame::Frame;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Default)]
struct RegistryState {
    frames: HashMap<String, Arc<Frame>>,
    /// URIs of removed frames; never reissued.
    retired: HashSet<String>,
}

/// Registry of frames keyed by URI
///
/// A single lock guards both the live map and the retired set so readers
/// always observe a consistent snapshot.
#[derive(Default)]
pub struct FrameRegistry {
    state: RwLock<RegistryState>,
}

impl FrameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a live frame.
    pub fn get(&self, uri: &str) -> Option<Arc<Frame>> {
        self.state.read().frames.get(uri).cloned()
    }

    /// True when `uri` is live or was retired.
    pub fn is_taken(&self, uri: &str) -> bool {
        let state = self.state.read();
        state.frames.contains_key(uri) || state.retired.contains(uri)
    }

    /// Register a frame under its URI.
    ///
    /// Returns false (and leaves the registry untouched) if the URI is
    /// already live or retired.
    pub fn register(&self, frame: Arc<Frame>) -> bool {
        let mut state = self.state.write();
        let uri = frame.uri().to_string();
        if state.frames.contains_key(&uri) || state.retired.contains(&uri) {
            return false;
        }
        state.frames.insert(uri, frame);
        true
    }

    /// Remove a frame and retire its URI.
    pub fn unregister(&self, uri: &str) -> Option<Arc<Frame>> {
        let mut state = self.state.write();
        let frame = state.frames.remove(uri)?;
        state.retired.insert(uri.to_string());
        Some(frame)
    }

    /// Snapshot of all live frames.
    pub fn list_all(&self) -> Vec<Arc<Frame>> {
        self.state.read().frames.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.state.read().frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
