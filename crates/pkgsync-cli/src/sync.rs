//! The sync command: resolve configuration, run the pipeline, print a summary.

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use pkgsync_config::ConfigLayering;
use pkgsync_core::error::SyncResult;
use pkgsync_core::PackageType;
use pkgsync_sync::{SyncPipeline, SyncReport};
use tracing::debug;

use crate::output::OutputHandler;

/// Dotenv file read from the working directory
const DOTENV_FILE: &str = ".env";

/// Run one full sync pass
pub async fn execute(
    config_file: Option<Utf8PathBuf>,
    package_types: Vec<PackageType>,
    output: &OutputHandler,
) -> SyncResult<SyncReport> {
    let env = layered_env(Utf8Path::new(DOTENV_FILE), ConfigLayering::collect_env_overrides())?;
    let layering = ConfigLayering::new()
        .with_file(config_file)
        .with_env(env)
        .with_package_types(package_types);

    run_with(layering, output).await
}

/// Dotenv values with the real environment on top
fn layered_env(dotenv: &Utf8Path, real: HashMap<String, String>) -> SyncResult<HashMap<String, String>> {
    let mut env = ConfigLayering::collect_dotenv_overrides(dotenv)?;
    env.extend(real);
    Ok(env)
}

async fn run_with(layering: ConfigLayering, output: &OutputHandler) -> SyncResult<SyncReport> {
    let (config, sources) = layering.load().await?;
    debug!("Resolved configuration from {:?}: {:?}", sources, config);

    let pipeline = SyncPipeline::connect(&config).await?;
    let report = pipeline.run().await?;

    output.summary(&report);
    Ok(report)
}
