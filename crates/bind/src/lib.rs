//! Declared environment-variable bindings with lazy validation.
//!
//! This crate provides a line parser for flat `KEY=VALUE` env files and a
//! binder that maps caller-facing logical names onto environment-variable
//! names, resolving values lazily at read time. Required names error on
//! access when unset; optional names resolve to `None`.

pub mod binder;
pub mod constants;
mod error;
pub mod parser;
pub mod store;

pub use binder::{BindOptions, Binding, BoundEnv, Declaration, EnvBinder};
pub use error::EnvError;
pub use store::{EnvStore, MemoryEnv, ProcessEnv};
