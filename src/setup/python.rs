// src/setup/python.rs

//! Python environment installer collaborator.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use anyhow::{Context, anyhow};
use tokio::process::Command;
use tracing::info;

use crate::errors::Result;

/// Installs the environment the node runs inside. Only success or failure is
/// observed by the caller.
pub trait EnvInstaller: Send + Sync {
    fn install(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send>>;
}

/// Creates a virtual environment with `python3 -m venv` and installs the
/// configured packages with the venv's own `pip`.
#[derive(Debug, Clone)]
pub struct VenvInstaller {
    venv_dir: PathBuf,
    packages: Vec<String>,
}

impl VenvInstaller {
    pub fn new(venv_dir: PathBuf, packages: Vec<String>) -> Self {
        Self { venv_dir, packages }
    }
}

impl EnvInstaller for VenvInstaller {
    fn install(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> {
        let venv_dir = self.venv_dir.clone();
        let packages = self.packages.clone();

        Box::pin(async move {
            info!(venv = %venv_dir.display(), "creating virtual environment");

            let status = Command::new("python3")
                .arg("-m")
                .arg("venv")
                .arg(&venv_dir)
                .status()
                .await
                .context("running python3 -m venv")?;
            if !status.success() {
                return Err(anyhow!("python3 -m venv exited with {status}").into());
            }

            if packages.is_empty() {
                return Ok(());
            }

            info!(count = packages.len(), "installing packages into venv");
            let pip = venv_dir.join("bin").join("pip");
            let status = Command::new(&pip)
                .arg("install")
                .args(&packages)
                .status()
                .await
                .with_context(|| format!("running {}", pip.display()))?;
            if !status.success() {
                return Err(anyhow!("pip install exited with {status}").into());
            }
            Ok(())
        })
    }
}
