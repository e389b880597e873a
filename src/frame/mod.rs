//! Knowledge Frames
//!
//! A frame is a URI-identified graph of sems and the propositions between
//! them. It owns exactly one [`TripleStore`]. Knowledge of other frames can
//! be bound into it (unioned) and later unbound (subtracted); bound content
//! is indistinguishable from owned content at the storage level.
//!
//! Every mutating operation holds the frame's write lock for its whole
//! duration and returns the store size delta it caused.

pub mod factory;
pub mod sem;

pub use factory::{FrameFactory, MemFrameFactory, SledFrameFactory};
pub use sem::Sem;

use crate::error::{FrameError, StoreError};
use crate::registry::FrameRegistry;
use crate::store::TripleStore;
use crate::types::{Knowledge, Pattern, Proposition, Term};
use crate::uri::{validate_uri, MonotonicUriGenerator, UriGenerator};
use crate::vocab::{DEFAULT_LANG, RDFS_COMMENT, RDFS_LABEL, RDF_TYPE};
use parking_lot::RwLock;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock, Weak};
use tracing::debug;

/// Resolves a "small world" query against a frame's knowledge.
///
/// No query syntax is imposed; frames without a resolver answer every
/// query with an empty result.
pub trait SmallWorldResolver: Send + Sync {
    fn resolve(&self, knowledge: &Knowledge, query: &str) -> Result<Vec<Proposition>, FrameError>;
}

/// Knowledge frame
pub struct Frame {
    uri: String,
    /// `None` once the frame has been removed from its manager.
    store: RwLock<Option<Box<dyn TripleStore>>>,
    /// Lookup-only handle to the manager's registry, set exactly once.
    registry: OnceLock<Weak<FrameRegistry>>,
    resolver: RwLock<Option<Arc<dyn SmallWorldResolver>>>,
    uri_generator: Arc<dyn UriGenerator>,
}

impl Frame {
    /// Wrap a store as a frame identified by `uri`.
    ///
    /// Meant for [`FrameFactory`] implementations; frames in use come from
    /// [`FrameManager::create_frame`](crate::FrameManager::create_frame),
    /// which attaches the registry. An unattached frame resolves no peers:
    /// `bind_knowledge` and `unbind_knowledge` return 0.
    pub fn new(uri: impl Into<String>, store: Box<dyn TripleStore>) -> Result<Self, FrameError> {
        let uri = uri.into();
        validate_uri(&uri, "frame")?;
        Ok(Self {
            uri,
            store: RwLock::new(Some(store)),
            registry: OnceLock::new(),
            resolver: RwLock::new(None),
            uri_generator: Arc::new(MonotonicUriGenerator::new()),
        })
    }

    /// Use a specific generator for sem URIs.
    pub fn with_uri_generator(mut self, generator: Arc<dyn UriGenerator>) -> Self {
        self.uri_generator = generator;
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Attach the registry used to resolve peer frames.
    ///
    /// Fails with `InvalidState` if a registry was already attached.
    pub fn attach_registry(&self, registry: Weak<FrameRegistry>) -> Result<(), FrameError> {
        self.registry.set(registry).map_err(|_| {
            FrameError::InvalidState(format!(
                "Frame registry should be attached only once: {}",
                self.uri
            ))
        })
    }

    pub fn is_attached(&self) -> bool {
        self.registry.get().is_some()
    }

    pub fn set_small_world_resolver(&self, resolver: Arc<dyn SmallWorldResolver>) {
        *self.resolver.write() = Some(resolver);
    }

    /// True once the owning manager has removed this frame.
    pub fn is_released(&self) -> bool {
        self.store.read().is_none()
    }

    /// Count of all statements, including bound content.
    pub fn size(&self) -> Result<usize, FrameError> {
        self.with_store(|store| store.size())
    }

    /// Snapshot of every statement in this frame.
    pub fn knowledge(&self) -> Result<Knowledge, FrameError> {
        self.with_store(|store| store.statements())
    }

    /// True iff this frame holds a taxonomy type assertion for `sem_uri`.
    ///
    /// A URI that only appears in relations, without a type, is not known.
    pub fn knows(&self, sem_uri: &str) -> Result<bool, FrameError> {
        if sem_uri.is_empty() {
            return Ok(false);
        }
        self.with_store(|store| store.contains_typed_resource(sem_uri))
    }

    /// Sem handle for `sem_uri`, if this frame knows it.
    pub fn find(&self, sem_uri: &str) -> Result<Option<Sem>, FrameError> {
        if sem_uri.is_empty() {
            return Ok(None);
        }
        self.with_store(|store| {
            if !store.contains_typed_resource(sem_uri)? {
                return Ok(None);
            }
            let described = store.query(&Pattern::any().with_subject(sem_uri))?;
            Ok(Some(Sem::from_statements(sem_uri, &described)))
        })
    }

    /// Statements with the sem as subject, then statements with it as object.
    ///
    /// A self-referencing statement therefore appears twice.
    pub fn resolve_sem(&self, sem_uri: &str) -> Result<Vec<Proposition>, FrameError> {
        if sem_uri.is_empty() {
            return Ok(Vec::new());
        }
        self.with_store(|store| {
            if !store.contains_typed_resource(sem_uri)? {
                return Ok(Vec::new());
            }
            let mut small_world = store.query(&Pattern::any().with_subject(sem_uri))?;
            small_world.extend(store.query(&Pattern::any().with_object(Term::resource(sem_uri)))?);
            Ok(small_world)
        })
    }

    /// Resolve a small-world query through the configured resolver.
    pub fn resolve_small_world(&self, query: &str) -> Result<Vec<Proposition>, FrameError> {
        let resolver = self.resolver.read().clone();
        match resolver {
            Some(resolver) => {
                let knowledge = self.knowledge()?;
                resolver.resolve(&knowledge, query)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Create a new sem typed `type_uri`, with a label and a comment.
    ///
    /// The sem URI is generated under this frame's URI. `lang` defaults to
    /// `"en"`.
    pub fn create_sem(
        &self,
        type_uri: &str,
        label: &str,
        comment: &str,
        lang: Option<&str>,
    ) -> Result<String, FrameError> {
        validate_uri(type_uri, "type")?;
        let lang = lang.filter(|l| !l.is_empty()).unwrap_or(DEFAULT_LANG);
        let sem_uri = self.uri_generator.generate(&self.uri);

        let statements: Knowledge = [
            Proposition::relation(sem_uri.as_str(), RDF_TYPE, type_uri),
            Proposition::new(sem_uri.as_str(), RDFS_LABEL, Term::literal(label, Some(lang))),
            Proposition::new(sem_uri.as_str(), RDFS_COMMENT, Term::literal(comment, Some(lang))),
        ]
        .into_iter()
        .collect();

        self.with_store_mut(|store| store.insert(&statements).map_err(FrameError::from))?;
        debug!(frame_uri = %self.uri, sem_uri = %sem_uri, type_uri, "Created sem");
        Ok(sem_uri)
    }

    /// Remove every statement with the sem as subject.
    ///
    /// Statements naming the sem only as object are kept.
    pub fn drop_sem(&self, sem_uri: &str) -> Result<usize, FrameError> {
        if sem_uri.is_empty() {
            return Ok(0);
        }
        let dropped = self.with_store_mut(|store| {
            if !store.contains_typed_resource(sem_uri)? {
                return Ok(0);
            }
            shrink(store, |s| s.remove(&Pattern::any().with_subject(sem_uri)))
        })?;
        debug!(frame_uri = %self.uri, sem_uri, dropped, "Dropped sem");
        Ok(dropped)
    }

    /// Import a set of propositions; returns the net number learned.
    pub fn learn(&self, knowledge: &Knowledge) -> Result<usize, FrameError> {
        let learned = self.with_store_mut(|store| grow(store, |s| s.union(knowledge)))?;
        debug!(frame_uri = %self.uri, submitted = knowledge.len(), learned, "Learned knowledge");
        Ok(learned)
    }

    /// Assert one relation between two resources.
    ///
    /// The result may exceed one when inference derives more statements.
    pub fn learn_statement(
        &self,
        subject_uri: &str,
        predicate_uri: &str,
        object_uri: &str,
    ) -> Result<usize, FrameError> {
        validate_uri(subject_uri, "subject")?;
        validate_uri(predicate_uri, "predicate")?;
        validate_uri(object_uri, "object")?;

        let statement: Knowledge = [Proposition::relation(subject_uri, predicate_uri, object_uri)]
            .into_iter()
            .collect();
        let learned = self.with_store_mut(|store| grow(store, |s| s.insert(&statement)))?;
        debug!(frame_uri = %self.uri, subject_uri, predicate_uri, object_uri, learned, "Learned statement");
        Ok(learned)
    }

    /// Remove exactly the given propositions; returns the net number forgotten.
    pub fn forget(&self, knowledge: &Knowledge) -> Result<usize, FrameError> {
        let forgotten = self.with_store_mut(|store| shrink(store, |s| s.difference(knowledge)))?;
        debug!(frame_uri = %self.uri, submitted = knowledge.len(), forgotten, "Forgot knowledge");
        Ok(forgotten)
    }

    /// Remove every statement matching the given positions; `None` is a
    /// wildcard.
    ///
    /// A subject or object this frame does not know matches nothing.
    pub fn forget_matching(
        &self,
        subject_uri: Option<&str>,
        predicate_uri: Option<&str>,
        object_uri: Option<&str>,
    ) -> Result<usize, FrameError> {
        let forgotten = self.with_store_mut(|store| {
            for uri in [subject_uri, object_uri].into_iter().flatten() {
                if !store.contains_typed_resource(uri)? {
                    return Ok(0);
                }
            }
            let pattern = Pattern {
                subject: subject_uri.map(str::to_string),
                predicate: predicate_uri.map(str::to_string),
                object: object_uri.map(Term::resource),
            };
            shrink(store, |s| s.remove(&pattern))
        })?;
        debug!(frame_uri = %self.uri, ?subject_uri, ?predicate_uri, ?object_uri, forgotten, "Forgot matching statements");
        Ok(forgotten)
    }

    /// Union another frame's current content into this frame.
    ///
    /// Returns 0 when the other frame cannot be resolved.
    pub fn bind_knowledge(&self, frame_uri: &str) -> Result<usize, FrameError> {
        let Some(other) = self.peer_knowledge(frame_uri)? else {
            debug!(frame_uri = %self.uri, peer_uri = frame_uri, "Bind target not found");
            return Ok(0);
        };
        let bound = self.with_store_mut(|store| grow(store, |s| s.union(&other)))?;
        debug!(frame_uri = %self.uri, peer_uri = frame_uri, bound, "Bound knowledge");
        Ok(bound)
    }

    /// Remove every statement currently held by another frame.
    ///
    /// Diffs against the peer's present content, not what it held at bind
    /// time. Returns 0 when the other frame cannot be resolved.
    pub fn unbind_knowledge(&self, frame_uri: &str) -> Result<usize, FrameError> {
        let Some(other) = self.peer_knowledge(frame_uri)? else {
            debug!(frame_uri = %self.uri, peer_uri = frame_uri, "Unbind target not found");
            return Ok(0);
        };
        let unbound = self.with_store_mut(|store| shrink(store, |s| s.difference(&other)))?;
        debug!(frame_uri = %self.uri, peer_uri = frame_uri, unbound, "Unbound knowledge");
        Ok(unbound)
    }

    /// Release the store. Further operations fail with `InvalidState`.
    pub(crate) fn release(&self) -> Result<(), FrameError> {
        if let Some(mut store) = self.store.write().take() {
            store.release()?;
        }
        Ok(())
    }

    /// Snapshot of a live peer frame, taken under the peer's read lock only.
    fn peer_knowledge(&self, frame_uri: &str) -> Result<Option<Knowledge>, FrameError> {
        let Some(peer) = self
            .registry
            .get()
            .and_then(Weak::upgrade)
            .and_then(|registry| registry.get(frame_uri))
        else {
            return Ok(None);
        };
        let guard = peer.store.read();
        let snapshot = match guard.as_deref() {
            Some(store) => Some(store.statements()?),
            None => None,
        };
        Ok(snapshot)
    }

    fn released(&self) -> FrameError {
        FrameError::InvalidState(format!("Frame has been removed: {}", self.uri))
    }

    fn with_store<T>(
        &self,
        f: impl FnOnce(&dyn TripleStore) -> Result<T, StoreError>,
    ) -> Result<T, FrameError> {
        let guard = self.store.read();
        let store = guard.as_deref().ok_or_else(|| self.released())?;
        Ok(f(store)?)
    }

    fn with_store_mut<T>(
        &self,
        f: impl FnOnce(&mut dyn TripleStore) -> Result<T, FrameError>,
    ) -> Result<T, FrameError> {
        let mut guard = self.store.write();
        let store = guard.as_deref_mut().ok_or_else(|| self.released())?;
        f(store)
    }
}

/// Apply `op` and return how many statements it added.
fn grow(
    store: &mut dyn TripleStore,
    op: impl FnOnce(&mut dyn TripleStore) -> Result<(), StoreError>,
) -> Result<usize, FrameError> {
    let before = store.size()?;
    op(&mut *store)?;
    Ok(store.size()?.saturating_sub(before))
}

/// Apply `op` and return how many statements it removed.
fn shrink(
    store: &mut dyn TripleStore,
    op: impl FnOnce(&mut dyn TripleStore) -> Result<(), StoreError>,
) -> Result<usize, FrameError> {
    let before = store.size()?;
    op(&mut *store)?;
    Ok(before.saturating_sub(store.size()?))
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Eq for Frame {}

impl Hash for Frame {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("uri", &self.uri)
            .field("released", &self.is_released())
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.size() {
            Ok(size) => write!(f, "{} ({})", self.uri, size),
            Err(_) => write!(f, "{} (removed)", self.uri),
        }
    }
}
