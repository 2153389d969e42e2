//! Centralized constants for the envbind workspace.

/// Default env file name, resolved against the current working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Markers that introduce a comment line in an env file.
pub const COMMENT_MARKERS: [&str; 2] = ["#", "//"];
