use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot};

use swarmherd::errors::Result;
use swarmherd::exec::{LaunchPlan, LauncherBackend};
use swarmherd::setup::{Cleanup, EnvInstaller, Reconcile, RepoFetcher};
use swarmherd::supervisor::SupervisorEvent;

/// A fake launcher that:
/// - records each launch plan it was handed
/// - immediately reports `ChildExited` with a fixed code.
pub struct FakeLauncher {
    exit_code: i32,
    launches: Arc<Mutex<Vec<LaunchPlan>>>,
}

impl FakeLauncher {
    pub fn new(exit_code: i32, launches: Arc<Mutex<Vec<LaunchPlan>>>) -> Self {
        Self { exit_code, launches }
    }
}

impl LauncherBackend for FakeLauncher {
    fn launch(
        &mut self,
        plan: LaunchPlan,
        _cancel_rx: oneshot::Receiver<()>,
        events: mpsc::Sender<SupervisorEvent>,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let code = self.exit_code;
        let launches = Arc::clone(&self.launches);

        Box::pin(async move {
            {
                let mut guard = launches.lock().unwrap();
                guard.push(plan);
            }
            let _ = events.send(SupervisorEvent::ChildExited { code }).await;
        })
    }
}

/// A reconciler that does nothing but count invocations.
pub struct FakeReconciler {
    pub runs: Arc<Mutex<usize>>,
}

impl FakeReconciler {
    pub fn new(runs: Arc<Mutex<usize>>) -> Self {
        Self { runs }
    }
}

impl Reconcile for FakeReconciler {
    fn reconcile(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let runs = Arc::clone(&self.runs);
        Box::pin(async move {
            *runs.lock().unwrap() += 1;
        })
    }
}

/// A cleanup action that counts how many times it ran.
pub struct CountingCleanup {
    pub runs: Arc<Mutex<usize>>,
}

impl CountingCleanup {
    pub fn new(runs: Arc<Mutex<usize>>) -> Self {
        Self { runs }
    }
}

impl Cleanup for CountingCleanup {
    fn run(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            *self.runs.lock().unwrap() += 1;
        })
    }
}

/// A repo fetcher that records requested clones and optionally fails.
pub struct FakeFetcher {
    pub fetched: Arc<Mutex<Vec<(String, PathBuf)>>>,
    pub fail: bool,
}

impl FakeFetcher {
    pub fn new(fetched: Arc<Mutex<Vec<(String, PathBuf)>>>) -> Self {
        Self { fetched, fail: false }
    }

    pub fn failing(fetched: Arc<Mutex<Vec<(String, PathBuf)>>>) -> Self {
        Self { fetched, fail: true }
    }
}

impl RepoFetcher for FakeFetcher {
    fn fetch(
        &self,
        url: &str,
        dest: &Path,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> {
        let fetched = Arc::clone(&self.fetched);
        let fail = self.fail;
        let url = url.to_string();
        let dest = dest.to_path_buf();

        Box::pin(async move {
            fetched.lock().unwrap().push((url, dest));
            if fail {
                Err(swarmherd::errors::SwarmherdError::CloneFailed(
                    "fake fetcher configured to fail".to_string(),
                ))
            } else {
                Ok(())
            }
        })
    }
}

/// An env installer that records invocations and always succeeds.
pub struct FakeInstaller {
    pub installs: Arc<Mutex<usize>>,
}

impl FakeInstaller {
    pub fn new(installs: Arc<Mutex<usize>>) -> Self {
        Self { installs }
    }
}

impl EnvInstaller for FakeInstaller {
    fn install(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> {
        let installs = Arc::clone(&self.installs);
        Box::pin(async move {
            *installs.lock().unwrap() += 1;
            Ok(())
        })
    }
}
