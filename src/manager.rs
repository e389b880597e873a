//! Frame Manager
//!
//! Owns the registry of frames under one namespace. Frame URIs are generated
//! as `<namespace>#<number>`; a URI is never issued twice by the same
//! manager, including URIs of frames that have since been removed.

use crate::config::{SemframeConfig, StorageBackend};
use crate::error::FrameError;
use crate::frame::{Frame, FrameFactory, MemFrameFactory, SledFrameFactory, SmallWorldResolver};
use crate::registry::FrameRegistry;
use crate::types::Knowledge;
use crate::uri::{validate_uri, MonotonicUriGenerator, UriGenerator};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Namespace used by managers built without configuration.
pub const DEFAULT_NAMESPACE: &str = "http://semframe.org/vocabulary/1/memframe";

/// Attempts at generating an unused frame URI before giving up.
const MAX_URI_ATTEMPTS: usize = 16;

/// Creates and tracks frames
pub struct FrameManager {
    namespace: String,
    registry: Arc<FrameRegistry>,
    factory: Arc<dyn FrameFactory>,
    uri_generator: Arc<dyn UriGenerator>,
    resolver: Option<Arc<dyn SmallWorldResolver>>,
}

impl Default for FrameManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameManager {
    /// In-memory manager with RDFS inference under [`DEFAULT_NAMESPACE`].
    pub fn new() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            registry: Arc::new(FrameRegistry::new()),
            factory: Arc::new(MemFrameFactory::new()),
            uri_generator: Arc::new(MonotonicUriGenerator::new()),
            resolver: None,
        }
    }

    /// Manager using a specific namespace and factory.
    pub fn with_factory(
        namespace: impl Into<String>,
        factory: Arc<dyn FrameFactory>,
    ) -> Result<Self, FrameError> {
        let namespace = namespace.into();
        validate_uri(&namespace, "namespace")?;
        Ok(Self {
            namespace,
            factory,
            ..Self::new()
        })
    }

    /// Build a manager from configuration.
    pub fn from_config(config: &SemframeConfig) -> Result<Self, FrameError> {
        let policy = config.manager.inference;
        let factory: Arc<dyn FrameFactory> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemFrameFactory::with_policy(policy)),
            StorageBackend::Sled => Arc::new(SledFrameFactory::open(&config.storage.path, policy)?),
        };
        info!(
            namespace = %config.manager.namespace,
            backend = ?config.storage.backend,
            inference = ?policy,
            "Initialized frame manager"
        );
        Self::with_factory(config.manager.namespace.clone(), factory)
    }

    /// Resolver installed on every frame this manager creates.
    pub fn with_resolver(mut self, resolver: Arc<dyn SmallWorldResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_uri_generator(mut self, generator: Arc<dyn UriGenerator>) -> Self {
        self.uri_generator = generator;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Retrieve a frame by URI.
    pub fn get_frame(&self, uri: &str) -> Option<Arc<Frame>> {
        self.registry.get(uri)
    }

    /// Create, wire and register a new frame, optionally seeded.
    pub fn create_frame(&self, seed: Option<&Knowledge>) -> Result<Arc<Frame>, FrameError> {
        let uri = self.fresh_uri()?;
        let frame = self.factory.create_frame(&uri, seed)?;

        if frame.uri() != uri {
            return Err(FrameError::InvalidState(format!(
                "Invalid factory: requested frame {} but got {}",
                uri,
                frame.uri()
            )));
        }
        frame
            .attach_registry(Arc::downgrade(&self.registry))
            .map_err(|_| {
                FrameError::InvalidState(format!(
                    "Invalid factory: frame {} is already wired to a registry",
                    uri
                ))
            })?;
        if let Some(resolver) = &self.resolver {
            frame.set_small_world_resolver(resolver.clone());
        }

        let frame = Arc::new(frame);
        if !self.registry.register(frame.clone()) {
            frame.release()?;
            return Err(FrameError::InvalidState(format!(
                "Frame URI already in use: {}",
                uri
            )));
        }

        info!(frame_uri = %uri, seeded = seed.is_some(), "Created frame");
        Ok(frame)
    }

    /// Forget a frame forever and release its store.
    ///
    /// Frames that bound its knowledge keep what they already hold.
    pub fn remove_frame(&self, uri: &str) -> Result<(), FrameError> {
        let frame = self
            .registry
            .unregister(uri)
            .ok_or_else(|| FrameError::InvalidState(format!("Frame is undefined: {}", uri)))?;
        frame.release()?;
        info!(frame_uri = %uri, "Removed frame");
        Ok(())
    }

    /// Snapshot of the managed frames, in no particular order.
    pub fn list_frames(&self) -> Vec<Arc<Frame>> {
        self.registry.list_all()
    }

    /// Number of managed frames.
    pub fn size(&self) -> usize {
        self.registry.len()
    }

    fn fresh_uri(&self) -> Result<String, FrameError> {
        for _ in 0..MAX_URI_ATTEMPTS {
            let uri = self.uri_generator.generate(&self.namespace);
            if !self.registry.is_taken(&uri) {
                return Ok(uri);
            }
            debug!(frame_uri = %uri, "Generated frame URI already taken, retrying");
        }
        warn!(namespace = %self.namespace, "Could not generate an unused frame URI");
        Err(FrameError::InvalidState(format!(
            "Could not generate an unused frame URI under {}",
            self.namespace
        )))
    }
}

impl fmt::Display for FrameManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.namespace, self.size())
    }
}
