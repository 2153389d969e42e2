//! Line parser for flat `KEY=VALUE` env files.
//!
//! Responsibilities:
//! - Parse single lines of the env file grammar into key/value pairs.
//! - Parse whole file contents, later duplicates winning.
//! - Apply parsed entries to an `EnvStore` without overwriting existing keys.
//!
//! Does NOT handle:
//! - Declaring or resolving logical names (see binder).
//! - Multi-file cascades or variable interpolation.
//!
//! Invariants:
//! - Malformed lines and comment lines are skipped, never errors.
//! - A missing env file is a no-op, never an error.
//! - Keys already present in the store always win over file contents.
//! - No parser state survives between lines.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::constants::{COMMENT_MARKERS, DEFAULT_ENV_FILE};
use crate::error::EnvError;
use crate::store::EnvStore;

/// Parse one line of the env file grammar.
///
/// Accepts `identifier = value` where the identifier matches
/// `[A-Za-z_][A-Za-z0-9_]*` and the value is everything after the first
/// `=`, trimmed, with one layer of matching single or double quotes
/// removed. Comment lines (`#` or `//`) and anything else yield `None`.
pub fn parse_line(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim_start();
    if COMMENT_MARKERS.iter().any(|m| trimmed.starts_with(m)) {
        return None;
    }

    let (raw_key, raw_value) = trimmed.split_once('=')?;

    let key = raw_key.trim_end();
    if !is_identifier(key) {
        tracing::debug!(line.len = line.len(), "skipping malformed env file line");
        return None;
    }

    Some((key.to_string(), unquote(raw_value.trim()).to_string()))
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Strip exactly one layer of matching single or double quotes.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parse whole file contents into a key/value map.
///
/// Splits on LF or CRLF, parses every line independently, and merges
/// left-to-right: a later line with the same key overwrites an earlier one.
pub fn parse_str(contents: &str) -> BTreeMap<String, String> {
    let mut entries = BTreeMap::new();
    for line in contents.lines() {
        if let Some((key, value)) = parse_line(line) {
            entries.insert(key, value);
        }
    }
    entries
}

/// Load an env file and apply its entries to the store additively.
///
/// Resolves `env_file` if given, otherwise `.env` in the current working
/// directory. A missing file contributes nothing and is not an error. Keys
/// the store already defines are left untouched, so an externally-supplied
/// environment wins over file contents.
///
/// # Errors
///
/// Returns [`EnvError::FileRead`] if the file exists but cannot be read.
/// The error carries only the path and the I/O error kind, never file
/// contents.
pub fn load_env_file<S: EnvStore>(store: &S, env_file: Option<&Path>) -> Result<(), EnvError> {
    let path = env_file.map_or_else(|| PathBuf::from(DEFAULT_ENV_FILE), Path::to_path_buf);

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "env file not found, nothing to load");
            return Ok(());
        }
        Err(e) => {
            return Err(EnvError::FileRead {
                path,
                kind: e.kind(),
            });
        }
    };

    apply(store, parse_str(&contents));
    Ok(())
}

/// Apply parsed entries to the store; keys already present always win.
fn apply<S: EnvStore>(store: &S, entries: BTreeMap<String, String>) {
    for (key, value) in entries {
        if store.get(&key).is_some() {
            tracing::debug!(key = %key, "variable already set, keeping existing value");
            continue;
        }
        store.set(&key, &value);
    }
}
