// src/setup/install.rs

//! Fresh installation of the training node.

use std::path::Path;

use tracing::{info, warn};

use crate::errors::Result;

use super::fetcher::RepoFetcher;
use super::python::EnvInstaller;
use super::swap::SwapFile;

/// Wipe and reinstall the node from scratch.
///
/// The caller has already confirmed the destructive part. A failed clone is
/// fatal and propagates; a failed environment install or swap setup is
/// recoverable (reconciliation retries later) and only warns.
pub async fn fresh_install(
    repo_url: &str,
    install_root: &Path,
    fetcher: &dyn RepoFetcher,
    installer: &dyn EnvInstaller,
    swap: &SwapFile,
) -> Result<()> {
    if install_root.exists() {
        info!(install_root = %install_root.display(), "removing existing installation");
        std::fs::remove_dir_all(install_root)?;
    }

    fetcher.fetch(repo_url, install_root).await?;

    if let Err(e) = installer.install().await {
        warn!(error = %e, "environment install failed; reconciliation will retry");
    }

    if let Err(e) = swap.provision().await {
        warn!(error = %e, "swap setup failed; continuing without it");
    }

    info!("fresh install finished");
    Ok(())
}
