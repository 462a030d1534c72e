//! rangeup - package.json range upgrader CLI tool
//!
//! Reads the declared ranges of a package.json, compares them with the
//! latest versions from a static registry and rewrites the ranges that
//! fall behind, keeping their notation and the file's formatting.

use clap::Parser;
use rangeup::cli::CliArgs;
use rangeup::orchestrator::Orchestrator;
use rangeup::output::create_formatter;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter
const LOG_ENV: &str = "RANGEUP_LOG";

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("rangeup v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Manifest: {}", args.path.display());
        if args.is_dry_run() {
            eprintln!("Mode: dry-run");
        }
    }

    let orchestrator = Orchestrator::new(&args)?;
    let result = orchestrator.run().await?;

    let output_config = args.output_config();
    let formatter = create_formatter(&output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&result.report, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
