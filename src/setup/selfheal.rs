// src/setup/selfheal.rs

//! Self-heal collaborator: fetch and run the maintainer's fix-up script.
//!
//! Deliberately pluggable rather than a hardcoded step in the supervise
//! loop; the core only ever observes the exit status.

use std::future::Future;
use std::pin::Pin;

use anyhow::Context;
use tokio::process::Command;
use tracing::{info, warn};

use crate::errors::Result;

pub trait SelfHeal: Send + Sync {
    /// Run the fix-up once, returning its exit status.
    fn heal(&self) -> Pin<Box<dyn Future<Output = Result<i32>> + Send>>;
}

/// Downloads the fix-up script with `curl` and runs it with no arguments.
#[derive(Debug, Clone)]
pub struct RemoteScriptHeal {
    url: String,
}

impl RemoteScriptHeal {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl SelfHeal for RemoteScriptHeal {
    fn heal(&self) -> Pin<Box<dyn Future<Output = Result<i32>> + Send>> {
        let url = self.url.clone();

        Box::pin(async move {
            let script = std::env::temp_dir().join(format!("swarmherd-fixup-{}.sh", std::process::id()));

            info!(url = %url, "fetching fix-up script");
            let status = Command::new("curl")
                .arg("-fsSL")
                .arg(&url)
                .arg("-o")
                .arg(&script)
                .status()
                .await
                .context("running curl")?;
            if !status.success() {
                return Err(anyhow::anyhow!("curl exited with {status}").into());
            }

            info!(script = %script.display(), "running fix-up script");
            let status = Command::new("bash")
                .arg(&script)
                .status()
                .await
                .context("running fix-up script")?;

            if let Err(e) = std::fs::remove_file(&script) {
                warn!(error = %e, "could not remove downloaded fix-up script");
            }

            Ok(status.code().unwrap_or(-1))
        })
    }
}
