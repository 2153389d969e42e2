//! Environment store abstraction.
//!
//! Responsibilities:
//! - Define the `EnvStore` trait the parser writes to and the binder reads.
//! - Provide the process-backed store and an in-memory store.
//!
//! Does NOT handle:
//! - Env file parsing (see parser).
//! - Declarations or required-ness checks (see binder).
//!
//! Invariants:
//! - `ProcessEnv` treats non-unicode values as unset.
//! - `MemoryEnv` clones share one underlying map.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

/// A mutable string-keyed environment the binder resolves against.
pub trait EnvStore {
    /// Current value for `key`, or `None` if unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Set `key` to `value`, replacing any existing value.
    fn set(&self, key: &str, value: &str);
}

/// Store backed by the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set(&self, key: &str, value: &str) {
        // SAFETY: the crate's contract is that stores are populated during
        // single-threaded startup; concurrent mutation of the process
        // environment is unsupported.
        unsafe {
            std::env::set_var(key, value);
        }
    }
}

/// Shared in-memory store for tests and embedders that need an environment
/// isolated from the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnv {
    vars: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryEnv {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.vars
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}
