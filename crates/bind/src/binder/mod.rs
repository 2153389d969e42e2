//! Env binder: declared logical names resolved lazily against a store.
//!
//! Responsibilities:
//! - Accumulate required/optional declarations across bind calls.
//! - Optionally populate the store from an env file before building a view.
//! - Build read-only views that resolve values at read time.
//!
//! Does NOT handle:
//! - Env file grammar (see parser).
//! - Store semantics (see store).
//!
//! Invariants / Assumptions:
//! - A declaration branch that is passed replaces the binder's previous
//!   state for that branch wholesale; an omitted branch is preserved.
//! - A logical name re-declared under the other branch moves branches;
//!   required wins when one call declares a name under both.
//! - Env file loading happens only when explicitly requested via options.
//! - Required-ness is checked at read time, never at bind time, so
//!   environment population after bind but before first read is respected.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::EnvError;
use crate::parser::load_env_file;
use crate::store::{EnvStore, ProcessEnv};

/// Options consumed by [`EnvBinder::bind`].
#[derive(Debug, Clone, Default)]
pub struct BindOptions {
    /// Override the env file location; defaults to `.env` in the current
    /// working directory.
    pub env_file: Option<PathBuf>,
    /// Populate the store from the env file before building the view.
    pub load_env_file: bool,
}

/// One declared logical name: the target variable plus required-ness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    env_var: String,
    required: bool,
}

impl Binding {
    /// Environment-variable name this binding resolves.
    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    /// Whether absence of a value is an error at read time.
    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// Input to a single bind call: the branches to replace plus options.
#[derive(Debug, Clone, Default)]
pub struct Declaration {
    required: Option<BTreeMap<String, String>>,
    optional: Option<BTreeMap<String, String>>,
    options: BindOptions,
}

impl Declaration {
    /// An empty declaration touching neither branch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the binder's required branch with these logical-name to
    /// variable-name mappings.
    pub fn required<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.required = Some(
            vars.into_iter()
                .map(|(name, var)| (name.into(), var.into()))
                .collect(),
        );
        self
    }

    /// Replace the binder's optional branch with these logical-name to
    /// variable-name mappings.
    pub fn optional<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.optional = Some(
            vars.into_iter()
                .map(|(name, var)| (name.into(), var.into()))
                .collect(),
        );
        self
    }

    /// Set the env file options for this bind call.
    pub fn with_options(mut self, options: BindOptions) -> Self {
        self.options = options;
        self
    }
}

/// Binder holding cumulative declaration state across bind calls.
pub struct EnvBinder<S: EnvStore = ProcessEnv> {
    store: S,
    required: BTreeMap<String, String>,
    optional: BTreeMap<String, String>,
}

impl EnvBinder<ProcessEnv> {
    /// Binder over the real process environment.
    pub fn new() -> Self {
        Self::with_store(ProcessEnv)
    }
}

impl Default for EnvBinder<ProcessEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EnvStore + Clone> EnvBinder<S> {
    /// Binder over an explicit store.
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            required: BTreeMap::new(),
            optional: BTreeMap::new(),
        }
    }

    /// Merge a declaration and build a read-only view over the result.
    ///
    /// A branch present in the declaration replaces the binder's previous
    /// state for that branch wholesale; an omitted branch is preserved from
    /// earlier calls, except that a logical name re-declared under the
    /// other branch moves there. Values are not resolved here: the
    /// returned view reads the store lazily, so a required variable may be
    /// populated any time before its first read.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::FileRead`] if `options.load_env_file` is set and
    /// the env file exists but cannot be read.
    pub fn bind(&mut self, declaration: Declaration) -> Result<BoundEnv<S>, EnvError> {
        let Declaration {
            required,
            optional,
            options,
        } = declaration;

        let required_passed = required.is_some();
        let optional_passed = optional.is_some();
        if let Some(required) = required {
            self.required = required;
        }
        if let Some(optional) = optional {
            self.optional = optional;
        }

        // A name re-declared under the other branch moves branches, so the
        // branch declared in this call wins; required wins when both were
        // declared together. Branches stay disjoint after every call.
        let winner_is_required = required_passed || !optional_passed;
        let collisions: Vec<String> = self
            .required
            .keys()
            .filter(|name| self.optional.contains_key(*name))
            .cloned()
            .collect();
        for name in collisions {
            if winner_is_required {
                self.optional.remove(&name);
            } else {
                self.required.remove(&name);
            }
        }

        if options.load_env_file {
            load_env_file(&self.store, options.env_file.as_deref())?;
        }

        let mut bindings = BTreeMap::new();
        for (name, var) in &self.optional {
            bindings.insert(
                name.clone(),
                Binding {
                    env_var: var.clone(),
                    required: false,
                },
            );
        }
        for (name, var) in &self.required {
            bindings.insert(
                name.clone(),
                Binding {
                    env_var: var.clone(),
                    required: true,
                },
            );
        }

        tracing::debug!(
            required = self.required.len(),
            optional = self.optional.len(),
            "built environment bindings"
        );

        Ok(BoundEnv {
            bindings,
            store: self.store.clone(),
        })
    }
}

/// Read-only view of the declared logical names.
///
/// Lookups resolve against the live store at call time, so a view built
/// before the environment is fully populated still observes later writes.
pub struct BoundEnv<S: EnvStore = ProcessEnv> {
    bindings: BTreeMap<String, Binding>,
    store: S,
}

impl<S: EnvStore> BoundEnv<S> {
    /// Resolve a logical name.
    ///
    /// Returns the current value, or `None` when an optional binding is
    /// unset. An optional variable set to the empty string resolves to
    /// `Some("")`; only required bindings treat empty as missing.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Undeclared`] when no declaration ever named
    /// `logical`, and [`EnvError::MissingEnvVar`] when a required binding
    /// is unset or empty.
    pub fn get(&self, logical: &str) -> Result<Option<String>, EnvError> {
        let binding = self
            .bindings
            .get(logical)
            .ok_or_else(|| EnvError::Undeclared(logical.to_string()))?;

        let value = self.store.get(&binding.env_var);
        if binding.required && value.as_deref().is_none_or(str::is_empty) {
            return Err(EnvError::MissingEnvVar(binding.env_var.clone()));
        }

        Ok(value)
    }

    /// Declared logical names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Binding metadata for a logical name, if declared.
    pub fn binding(&self, logical: &str) -> Option<&Binding> {
        self.bindings.get(logical)
    }
}
