//! CLI host for the taskbridge provider clients.
//!
//! This crate provides the `taskbridge` command-line interface: it sources
//! tokens from `config.toml` (or `--token`), builds a client through the
//! provider dispatch table and runs one command against it.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod secret;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
