//! # rampart CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;

/// Rampart assessment toolchain.
///
/// Validates exported assessment documents and renders their statistics,
/// Markdown reports, and CSV exports without a running server.
#[derive(Parser, Debug)]
#[command(name = "rampart", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Check a document against the assessment schema.
    Validate(rampart_cli::validate::ValidateArgs),
    /// Print compliance statistics for a document.
    Stats(rampart_cli::stats::StatsArgs),
    /// Render the Markdown assessment report.
    Report(rampart_cli::report::ReportArgs),
    /// Render the CSV export.
    Csv(rampart_cli::csv::CsvArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over the -v flags when set.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    let result = match &cli.command {
        Commands::Validate(args) => rampart_cli::validate::run(args),
        Commands::Stats(args) => rampart_cli::stats::run(args),
        Commands::Report(args) => rampart_cli::report::run(args),
        Commands::Csv(args) => rampart_cli::csv::run(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
