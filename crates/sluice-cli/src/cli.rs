//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sluice CLI - Run ingested records through the compliance gate.
#[derive(Debug, Parser)]
#[command(name = "sluice")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SLUICE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (summary only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a batch of records from one source
    Evaluate(EvaluateArgs),

    /// Print the derived identifier for an ECB series code
    SeriesId(SeriesIdArgs),

    /// Print the effective configuration
    Config,
}

/// Arguments for the evaluate command.
#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// Source the batch was fetched from
    #[arg(short, long)]
    pub source: String,

    /// Which extra rules apply to the source
    #[arg(long, value_enum, default_value = "general")]
    pub scope: ScopeArg,

    /// JSON file holding the source's license record
    #[arg(short, long)]
    pub license: Option<PathBuf>,

    /// JSON file holding the dataset flags
    #[arg(long)]
    pub flags: Option<PathBuf>,

    /// JSON array of records ("-" reads stdin)
    pub batch: PathBuf,
}

/// Arguments for the series-id command.
#[derive(Debug, Parser)]
pub struct SeriesIdArgs {
    /// Raw ECB series codes
    #[arg(required = true)]
    pub raw_codes: Vec<String>,
}

/// Source scope options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ScopeArg {
    /// No scope-specific rules
    General,
    /// Rows filtered by geography
    Geo,
    /// Third-party news, metadata only
    News,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ScopeArg> for sluice_domain::SourceScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::General => sluice_domain::SourceScope::General,
            ScopeArg::Geo => sluice_domain::SourceScope::GeoScoped,
            ScopeArg::News => sluice_domain::SourceScope::ThirdPartyNews,
        }
    }
}
