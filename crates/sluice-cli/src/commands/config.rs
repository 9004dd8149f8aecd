//! Config command implementation.

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use sluice_limiter::LimiterRegistry;

/// Execute the config command.
///
/// Limits are checked by building the limiter registry before anything is
/// printed.
pub fn execute_config(config: &Config, formatter: &Formatter) -> Result<()> {
    let registry = LimiterRegistry::from_config(&config.limiters)?;

    match formatter.format() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Table => {
            println!("{}", config.to_toml()?);
            println!("{}", formatter.success(&format!("{} rate limiter(s) configured", registry.len())));
        }
        OutputFormat::Quiet => println!("{}", config.to_toml()?),
    }
    Ok(())
}
