//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use sluice_domain::Record;
use sluice_gatekeeper::{BatchReport, Disposition, GateDecision};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Records wider than this are cut in table output.
const RECORD_PREVIEW_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Output format in use.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a batch report.
    pub fn format_report(&self, report: &BatchReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_report_json(report),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Quiet => Ok(report.summary()),
        }
    }

    fn format_report_json(&self, report: &BatchReport) -> Result<String> {
        let decisions: Vec<serde_json::Value> = report
            .decisions
            .iter()
            .map(|d| {
                serde_json::json!({
                    "disposition": d.disposition().as_str(),
                    "reasons": d.reasons.iter().map(|r| r.describe()).collect::<Vec<_>>(),
                    "record": d.record,
                })
            })
            .collect();

        let rejected: Vec<serde_json::Value> = report
            .rejected
            .iter()
            .map(|item| {
                serde_json::json!({
                    "index": item.index,
                    "kind": item.error.kind(),
                    "message": item.error.to_string(),
                    "remediable": item.error.is_remediable(),
                })
            })
            .collect();

        let json = serde_json::json!({
            "batch_id": report.batch_id.to_string(),
            "source": report.source_name,
            "decisions": decisions,
            "rejected": rejected,
            "geo_dropped": report.geo_dropped,
        });

        Ok(serde_json::to_string_pretty(&json)?)
    }

    fn format_report_table(&self, report: &BatchReport) -> String {
        let mut out = Vec::new();

        if report.decisions.is_empty() {
            out.push(self.colorize("No records kept.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["#", "Disposition", "Reasons", "Record"]);

            for (row, decision) in report.decisions.iter().enumerate() {
                builder.push_record([
                    (row + 1).to_string(),
                    self.disposition_label(decision),
                    reasons_text(decision),
                    record_preview(&decision.record),
                ]);
            }

            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));
            out.push(table.to_string());
        }

        for item in &report.rejected {
            out.push(self.error(&format!("record #{} rejected: {}", item.index + 1, item.error)));
        }
        if report.geo_dropped > 0 {
            out.push(self.warning(&format!("{} row(s) dropped by the geography filter", report.geo_dropped)));
        }
        out.push(self.info(&report.summary()));

        out.join("\n")
    }

    fn disposition_label(&self, decision: &GateDecision) -> String {
        let disposition = decision.disposition();
        let color = match disposition {
            Disposition::Admit => "green",
            Disposition::ProductionBlocked => "yellow",
            Disposition::Quarantine => "magenta",
            Disposition::Dropped => "red",
        };
        self.colorize(disposition.as_str(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn reasons_text(decision: &GateDecision) -> String {
    if decision.reasons.is_empty() {
        return "-".to_string();
    }
    decision
        .reasons
        .iter()
        .map(|r| r.describe())
        .collect::<Vec<_>>()
        .join("; ")
}

fn record_preview(record: &Record) -> String {
    let text = serde_json::Value::Object(record.clone()).to_string();
    if text.chars().count() <= RECORD_PREVIEW_CHARS {
        return text;
    }
    let cut: String = text.chars().take(RECORD_PREVIEW_CHARS - 1).collect();
    format!("{}…", cut)
}
