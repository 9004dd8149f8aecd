//! Evaluate command implementation.

use crate::cli::EvaluateArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use serde::de::DeserializeOwned;
use sluice_domain::{DatasetFlags, LicenseRecord, Record, SourceContext};
use sluice_gatekeeper::{BatchReport, GateConfig, GateEvaluator};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Execute the evaluate command.
pub fn execute_evaluate(args: EvaluateArgs, gate: &GateConfig, formatter: &Formatter) -> Result<()> {
    let report = evaluate(&args, gate)?;
    println!("{}", formatter.format_report(&report)?);
    Ok(())
}

/// Build the source context from the arguments and run the batch through the gate.
fn evaluate(args: &EvaluateArgs, gate: &GateConfig) -> Result<BatchReport> {
    let mut ctx = SourceContext::new(args.source.as_str())?.with_scope(args.scope.into());

    if let Some(path) = &args.license {
        ctx = ctx.with_license(read_json::<LicenseRecord>(path)?);
    }
    if let Some(path) = &args.flags {
        ctx = ctx.with_flags(read_json::<DatasetFlags>(path)?);
    }

    let records = parse_batch(&read_input(&args.batch)?)?;
    tracing::debug!(source = %ctx.source_name, records = records.len(), "Evaluating batch");

    let report = GateEvaluator::new(gate.clone()).evaluate_batch(&ctx, records)?;
    Ok(report)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Read a file, or stdin for `-`.
fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    Ok(fs::read_to_string(path)?)
}

/// Parse a JSON array of record objects.
fn parse_batch(json: &str) -> Result<Vec<Record>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            serde_json::Value::Object(record) => Ok(record),
            other => Err(CliError::InvalidInput(format!(
                "Batch item #{} is not an object: {}",
                index + 1,
                other
            ))),
        })
        .collect()
}
