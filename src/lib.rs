//! Semframe: Composable Knowledge Frames
//!
//! Frames are small, URI-identified knowledge graphs of typed entities
//! ("sems") and the propositions relating them. A frame owns its statements
//! and can bind (union in) or unbind (subtract) the current knowledge of
//! other frames managed by the same [`FrameManager`].

pub mod config;
pub mod error;
pub mod frame;
pub mod logging;
pub mod manager;
pub mod registry;
pub mod store;
pub mod types;
pub mod uri;
pub mod vocab;

pub use error::{FrameError, StoreError};
pub use frame::{Frame, FrameFactory, MemFrameFactory, Sem, SledFrameFactory, SmallWorldResolver};
pub use manager::FrameManager;
pub use store::{InferencePolicy, TripleStore};
pub use types::{Knowledge, Pattern, Proposition, Term};
