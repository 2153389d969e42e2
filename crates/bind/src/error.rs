//! Error types for environment binding and env file loading.
//!
//! Responsibilities:
//! - Define error variants for binder lookups and env file reads.
//!
//! Does NOT handle:
//! - Malformed env file lines (skipped by the parser, never errors).
//! - Missing env files (a no-op in the loader, never an error).
//!
//! Invariants:
//! - `MissingEnvVar` names the environment variable, not the logical name.
//! - `FileRead` never includes file contents; an env file may hold secrets.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the binder and the env file loader.
#[derive(Error, Debug)]
pub enum EnvError {
    /// A required binding resolved to an absent or empty value.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// The logical name was never declared in any bind call.
    #[error("Unknown logical name: {0}")]
    Undeclared(String),

    /// The env file exists but could not be read.
    #[error("Failed to read env file at {path}: {kind}")]
    FileRead { path: PathBuf, kind: ErrorKind },
}
