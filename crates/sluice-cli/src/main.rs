//! Sluice CLI - Command-line interface for the Sluice compliance gate.

use clap::Parser;
use sluice_cli::commands;
use sluice_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> sluice_cli::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Evaluate(args) => commands::execute_evaluate(args, &config.gate, &formatter)?,
        Command::SeriesId(args) => commands::execute_series_id(args, &formatter)?,
        Command::Config => commands::execute_config(&config, &formatter)?,
    }

    Ok(())
}
