// src/setup/fetcher.rs

//! Repository fetcher collaborator.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tokio::process::Command;
use tracing::info;

use crate::errors::{Result, SwarmherdError};

/// Fetches the node repository. Only success or failure is observed; retry
/// policy is the implementation's business.
pub trait RepoFetcher: Send + Sync {
    fn fetch(
        &self,
        url: &str,
        dest: &Path,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send>>;
}

/// Fetches by shelling out to `git clone`.
#[derive(Debug, Default)]
pub struct GitFetcher;

impl RepoFetcher for GitFetcher {
    fn fetch(
        &self,
        url: &str,
        dest: &Path,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> {
        let url = url.to_string();
        let dest: PathBuf = dest.to_path_buf();

        Box::pin(async move {
            info!(url = %url, dest = %dest.display(), "cloning node repository");

            let status = Command::new("git")
                .arg("clone")
                .arg("--depth")
                .arg("1")
                .arg(&url)
                .arg(&dest)
                .status()
                .await
                .map_err(|e| SwarmherdError::CloneFailed(e.to_string()))?;

            if !status.success() {
                return Err(SwarmherdError::CloneFailed(format!(
                    "git clone exited with {status}"
                )));
            }
            Ok(())
        })
    }
}
