//! envbind - command-line front end for env file parsing and checking.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Parse env files and print their entries.
//! - Check that required variables are present, with structured exit codes.
//!
//! Does NOT handle:
//! - Parsing or binding logic (see the envbind crate).
//!
//! Invariants:
//! - `parse` never mutates the process environment; only `check --load`
//!   does, and only additively.
//! - Exit code 2 is reserved for missing required variables.

mod args;
mod error;

use std::path::PathBuf;

use anyhow::Context;
use args::{Cli, Command};
use clap::Parser;
use envbind::constants::DEFAULT_ENV_FILE;
use envbind::{EnvStore, ProcessEnv, parser};
use error::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::GeneralError
        }
    };
    std::process::exit(code.as_i32());
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Parse { file } => parse(file),
        Command::Check {
            env_file,
            load,
            vars,
        } => check(env_file, load, &vars),
    }
}

/// Parse an env file and print its entries without touching the environment.
fn parse(file: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    let path = file.unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE));

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "env file not found, nothing to print");
            return Ok(ExitCode::Success);
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("failed to read env file at {}", path.display())));
        }
    };

    for (key, value) in parser::parse_str(&contents) {
        println!("{key}={value}");
    }
    Ok(ExitCode::Success)
}

/// Verify that every listed variable is set and non-empty.
fn check(env_file: Option<PathBuf>, load: bool, vars: &[String]) -> anyhow::Result<ExitCode> {
    let store = ProcessEnv;
    if load {
        parser::load_env_file(&store, env_file.as_deref())
            .context("failed to load env file")?;
    }

    let missing: Vec<&str> = vars
        .iter()
        .filter(|var| store.get(var).is_none_or(|value| value.is_empty()))
        .map(String::as_str)
        .collect();

    if missing.is_empty() {
        return Ok(ExitCode::Success);
    }

    for var in missing {
        eprintln!("missing required environment variable: {var}");
    }
    Ok(ExitCode::MissingVars)
}
