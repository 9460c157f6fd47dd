use anyhow::Result;
use clap::Parser;
use devlink::cli::Cli;
use devlink::commands::{self, Outcome};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "devlink=debug"
    } else {
        "devlink=warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match commands::execute(cli)? {
        Outcome::Success => Ok(ExitCode::SUCCESS),
        Outcome::Failed => Ok(ExitCode::FAILURE),
    }
}
