// src/exec/backend.rs

//! Pluggable launcher backend abstraction.
//!
//! The supervisor runtime talks to a `LauncherBackend` instead of spawning
//! processes directly. This makes it easy to swap in a fake launcher in
//! tests while keeping the production launcher implementation in
//! [`launcher`](crate::exec::launcher).

use std::future::Future;
use std::pin::Pin;

use tokio::sync::{mpsc, oneshot};
use tracing::error;

use crate::exec::launcher::{LaunchOutcome, LaunchPlan, launch_once};
use crate::supervisor::SupervisorEvent;

/// Trait abstracting how the node is launched.
///
/// Production code uses [`ScriptLauncher`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait LauncherBackend: Send {
    /// Launch the node once.
    ///
    /// The returned future is spawned by the runtime so the event loop stays
    /// responsive while the child runs. The implementation reports how the
    /// launch ended by sending a [`SupervisorEvent`] on `events`:
    ///
    /// - exit (any code) → `ChildExited`
    /// - missing script or spawn failure → `LaunchFailed`
    /// - cancelled via `cancel_rx` → nothing; the stop path owns shutdown
    fn launch(
        &mut self,
        plan: LaunchPlan,
        cancel_rx: oneshot::Receiver<()>,
        events: mpsc::Sender<SupervisorEvent>,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>>;
}

/// Real launcher backend used in production.
#[derive(Debug, Default)]
pub struct ScriptLauncher;

impl LauncherBackend for ScriptLauncher {
    fn launch(
        &mut self,
        plan: LaunchPlan,
        cancel_rx: oneshot::Receiver<()>,
        events: mpsc::Sender<SupervisorEvent>,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(async move {
            let event = match launch_once(&plan, cancel_rx).await {
                Ok(LaunchOutcome::Exited(code)) => Some(SupervisorEvent::ChildExited { code }),
                Ok(LaunchOutcome::MissingScript(path)) => {
                    error!(script = %path.display(), "launch script is missing");
                    Some(SupervisorEvent::LaunchFailed)
                }
                Ok(LaunchOutcome::Cancelled) => None,
                Err(e) => {
                    error!(error = %e, "node launch failed");
                    Some(SupervisorEvent::LaunchFailed)
                }
            };
            if let Some(event) = event {
                let _ = events.send(event).await;
            }
        })
    }
}
