//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect env files and verify required environment variables.
#[derive(Debug, Parser)]
#[command(name = "envbind", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse an env file and print its entries as KEY=VALUE, sorted by key.
    ///
    /// The process environment is not modified. A missing file prints
    /// nothing and succeeds.
    Parse {
        /// File to parse; defaults to .env in the working directory.
        file: Option<PathBuf>,
    },

    /// Verify that the listed variables are set and non-empty.
    Check {
        /// Env file consulted when --load is given.
        #[arg(long)]
        env_file: Option<PathBuf>,

        /// Populate the environment from the env file first (additive:
        /// variables already set keep their values).
        #[arg(long)]
        load: bool,

        /// Environment variable names that must be present.
        #[arg(required = true)]
        vars: Vec<String>,
    },
}
