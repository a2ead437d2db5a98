//! # pkgsync
//!
//! Syncs an organization's GitHub Packages into the Port catalog.
//!
//! This is the entry point for the `pkgsync` binary. It parses the command
//! line, sets up logging, and runs one sync pass. The process exits zero when
//! the pass completes, however many packages were skipped; fatal errors exit
//! non-zero.

use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use pkgsync_core::error::{SyncError, SyncResult};
use pkgsync_core::PackageType;
use tracing::{error, info};

mod output;
mod sync;

use output::errors::ErrorFormatter;
use output::OutputHandler;

/// Sync GitHub Packages metadata into the Port catalog
#[derive(Parser, Debug)]
#[command(name = "pkgsync", version, about = "Sync registry packages into the catalog")]
pub struct Cli {
    /// TOML config file layered under the environment
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Only sync these package types (repeatable)
    #[arg(short = 't', long = "package-type", value_name = "TYPE")]
    pub package_types: Vec<PackageType>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting pkgsync v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Sync aborted: {}", e);
            eprintln!("{}", ErrorFormatter::new().format_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> SyncResult<()> {
    // Single-task runtime; the pipeline never runs two requests at once
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| SyncError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let output = OutputHandler::new();
        sync::execute(cli.config, cli.package_types, &output).await?;
        Ok(())
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "pkgsync={level},pkgsync_config={level},pkgsync_registry={level},pkgsync_catalog={level},pkgsync_sync={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("pkgsync encountered an unexpected error: {}", panic_info);
        eprintln!("pkgsync crashed! This is a bug.");
        eprintln!("Error: {}", panic_info);
    }));
}
