//! Sluice CLI library.
//!
//! Command-line access to the compliance gate: evaluate record batches
//! offline, derive ECB series ids, and inspect the effective configuration.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
