// src/setup/swap.rs

//! Swapfile provisioning and removal.
//!
//! The swapfile is the resource the mandatory cleanup action tears down:
//! whatever this tool provisioned, it removes again on the way out.

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::Result;

#[derive(Debug, Clone)]
pub struct SwapFile {
    path: PathBuf,
    size_gb: u64,
}

impl SwapFile {
    pub fn new(path: PathBuf, size_gb: u64) -> Self {
        Self { path, size_gb }
    }

    /// Allocate, format and enable the swapfile.
    ///
    /// A zero size disables swap management; an already-present file is left
    /// alone (a previous run provisioned it and was interrupted before
    /// cleanup).
    pub async fn provision(&self) -> Result<()> {
        if self.size_gb == 0 {
            debug!("swap management disabled");
            return Ok(());
        }
        if self.path.exists() {
            debug!(path = %self.path.display(), "swapfile already present; reusing");
            return Ok(());
        }

        info!(path = %self.path.display(), size_gb = self.size_gb, "provisioning swapfile");

        let size = format!("{}G", self.size_gb);
        run_checked("fallocate", &["-l", &size], &self.path).await?;
        run_checked("chmod", &["600"], &self.path).await?;
        run_checked("mkswap", &[], &self.path).await?;
        run_checked("swapon", &[], &self.path).await?;
        Ok(())
    }

    /// Disable and delete the swapfile. Idempotent.
    pub async fn remove(&self) -> Result<()> {
        if self.size_gb == 0 || !self.path.exists() {
            return Ok(());
        }

        info!(path = %self.path.display(), "removing swapfile");

        // swapoff fails if the file was never enabled; that's fine, the file
        // still gets deleted.
        if let Err(e) = run_checked("swapoff", &[], &self.path).await {
            warn!(error = %e, "swapoff failed; deleting swapfile anyway");
        }
        std::fs::remove_file(&self.path)?;
        Ok(())
    }
}

async fn run_checked(program: &str, args: &[&str], path: &std::path::Path) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .arg(path)
        .status()
        .await
        .with_context(|| format!("running {program}"))?;
    if !status.success() {
        return Err(anyhow!("{program} exited with {status}").into());
    }
    Ok(())
}
