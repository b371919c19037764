// src/setup/reconcile.rs

//! The reconciliation step run between restarts.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use tracing::warn;

use super::fetcher::RepoFetcher;
use super::python::EnvInstaller;

/// Trait abstracting reconciliation so the supervise loop can be tested
/// without touching git or python.
pub trait Reconcile: Send {
    /// Re-verify the installation, repairing what's missing. Never fails:
    /// problems are logged and the next cycle tries again.
    fn reconcile(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send>>;
}

/// Production reconciler: re-fetch the repository if the checkout is gone,
/// reinstall the virtual environment if it is missing.
pub struct NodeReconciler {
    repo_url: String,
    install_root: PathBuf,
    venv_dir: PathBuf,
    fetcher: Arc<dyn RepoFetcher>,
    installer: Arc<dyn EnvInstaller>,
}

impl NodeReconciler {
    pub fn new(
        repo_url: String,
        install_root: PathBuf,
        venv_dir: PathBuf,
        fetcher: Arc<dyn RepoFetcher>,
        installer: Arc<dyn EnvInstaller>,
    ) -> Self {
        Self {
            repo_url,
            install_root,
            venv_dir,
            fetcher,
            installer,
        }
    }
}

impl Reconcile for NodeReconciler {
    fn reconcile(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let repo_url = self.repo_url.clone();
        let install_root = self.install_root.clone();
        let venv_dir = self.venv_dir.clone();
        let fetcher = Arc::clone(&self.fetcher);
        let installer = Arc::clone(&self.installer);

        Box::pin(async move {
            if !install_root.join(".git").is_dir() {
                warn!(
                    install_root = %install_root.display(),
                    "node checkout missing; re-fetching"
                );
                if let Err(e) = fetcher.fetch(&repo_url, &install_root).await {
                    // Recoverable here: the next cycle retries.
                    warn!(error = %e, "re-fetch failed");
                    return;
                }
            }

            if !venv_dir.is_dir() {
                warn!(venv = %venv_dir.display(), "virtual environment missing; reinstalling");
                if let Err(e) = installer.install().await {
                    warn!(error = %e, "environment reinstall failed");
                }
            }
        })
    }
}
