//! Shared helpers for integration tests

use semframe::manager::DEFAULT_NAMESPACE;
use semframe::{FrameManager, InferencePolicy, Knowledge, MemFrameFactory, Proposition};
use std::sync::{Arc, Mutex};

/// Serializes tests that touch `SEMFRAME_*` environment variables.
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// In-memory manager without inference, so sizes track exactly what was learned.
pub fn plain_manager() -> FrameManager {
    FrameManager::with_factory(
        DEFAULT_NAMESPACE,
        Arc::new(MemFrameFactory::with_policy(InferencePolicy::None)),
    )
    .unwrap()
}

/// Knowledge made of resource-to-resource relations.
pub fn relations(triples: &[(&str, &str, &str)]) -> Knowledge {
    triples
        .iter()
        .map(|(s, p, o)| Proposition::relation(*s, *p, *o))
        .collect()
}

/// Run `f` with the given environment variables set, restoring them afterwards.
pub fn with_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let previous: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();

    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    let result = f();

    for (key, value) in previous {
        match value {
            Some(value) => std::env::set_var(&key, value),
            None => std::env::remove_var(&key),
        }
    }

    result
}
