//! Series-id command implementation.

use crate::cli::SeriesIdArgs;
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use sluice_gatekeeper::rules::ecb_derived_series_id;

/// Execute the series-id command.
pub fn execute_series_id(args: SeriesIdArgs, formatter: &Formatter) -> Result<()> {
    println!("{}", render(&args.raw_codes, formatter.format())?);
    Ok(())
}

fn render(raw_codes: &[String], format: OutputFormat) -> Result<String> {
    if let Some(blank) = raw_codes.iter().find(|code| code.trim().is_empty()) {
        return Err(CliError::InvalidInput(format!("Empty series code '{}'", blank)));
    }

    let derived: Vec<String> = raw_codes.iter().map(|code| ecb_derived_series_id(code)).collect();

    match format {
        OutputFormat::Json => {
            let pairs: Vec<serde_json::Value> = raw_codes
                .iter()
                .zip(&derived)
                .map(|(raw, id)| serde_json::json!({ "raw": raw, "series_id": id }))
                .collect();
            Ok(serde_json::to_string_pretty(&pairs)?)
        }
        OutputFormat::Table | OutputFormat::Quiet => Ok(derived.join("\n")),
    }
}
