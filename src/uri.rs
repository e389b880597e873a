//! URI generation and validation
//!
//! Generated URIs have the shape `<prefix>#<number>`, where the number is the
//! wall-clock time in milliseconds, bumped forward whenever two calls land in
//! the same millisecond. The counter is process-wide, so every generator
//! instance yields distinct values within one process.

use crate::error::FrameError;
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

/// Produces namespace-unique URIs for a given prefix.
pub trait UriGenerator: Send + Sync {
    fn generate(&self, prefix: &str) -> String;
}

/// Timestamp-based generator with a monotonic tie-breaker
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicUriGenerator;

impl MonotonicUriGenerator {
    pub fn new() -> Self {
        Self
    }

    fn next_value() -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let mut last = LAST_ISSUED.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match LAST_ISSUED.compare_exchange_weak(
                last,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}

impl UriGenerator for MonotonicUriGenerator {
    fn generate(&self, prefix: &str) -> String {
        format!("{}#{}", prefix, Self::next_value())
    }
}

/// Characters that may never appear in an IRI reference.
const FORBIDDEN: &[char] = &['<', '>', '"', '{', '}', '|', '\\', '^', '`'];

/// Check that `uri` is usable as a resource identifier.
///
/// Relative references such as `"T"` are accepted; empty strings,
/// whitespace, control characters and IRI-forbidden delimiters are not.
pub fn validate_uri(uri: &str, what: &str) -> Result<(), FrameError> {
    if uri.is_empty() {
        return Err(FrameError::InvalidArgument(format!("{} URI is empty", what)));
    }
    if let Some(c) = uri
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || FORBIDDEN.contains(c))
    {
        return Err(FrameError::InvalidArgument(format!(
            "{} URI {:?} contains invalid character {:?}",
            what, uri, c
        )));
    }
    Ok(())
}
