// src/supervisor/runtime.rs

use std::fmt;
use std::path::PathBuf;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::config::RecordStore;
use crate::errors::Result;
use crate::exec::{LaunchPlan, LauncherBackend};
use crate::setup::{Cleanup, Reconcile};

use super::core::SupervisorCore;
use super::{SupervisorCommand, SupervisorEvent, SupervisorOptions};

/// Drives the restart state machine in response to `SupervisorEvent`s and
/// delegates actual process launching to a `LauncherBackend`.
///
/// This is a pure IO shell around `SupervisorCore`, which contains all the
/// restart semantics. This struct handles async IO: reading events from the
/// channel, spawning launches and reconciliations, and running cleanup on
/// the way out.
pub struct SupervisorRuntime<L: LauncherBackend> {
    core: SupervisorCore,
    event_rx: mpsc::Receiver<SupervisorEvent>,
    event_tx: mpsc::Sender<SupervisorEvent>,
    launcher: L,
    reconciler: Box<dyn Reconcile>,
    cleanup: Box<dyn Cleanup>,
    store: RecordStore,
    install_root: PathBuf,
    launch_script: PathBuf,
    options: SupervisorOptions,
    /// Cancel handle for the currently running child; `None` when no child
    /// is running (a stop with no child tolerates this).
    cancel_current: Option<oneshot::Sender<()>>,
    cleanup_ran: bool,
}

impl<L: LauncherBackend> fmt::Debug for SupervisorRuntime<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupervisorRuntime")
            .field("core", &self.core)
            .field("install_root", &self.install_root)
            .finish_non_exhaustive()
    }
}

impl<L: LauncherBackend> SupervisorRuntime<L> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        core: SupervisorCore,
        event_rx: mpsc::Receiver<SupervisorEvent>,
        event_tx: mpsc::Sender<SupervisorEvent>,
        launcher: L,
        reconciler: Box<dyn Reconcile>,
        cleanup: Box<dyn Cleanup>,
        store: RecordStore,
        install_root: PathBuf,
        launch_script: PathBuf,
        options: SupervisorOptions,
    ) -> Self {
        Self {
            core,
            event_rx,
            event_tx,
            launcher,
            reconciler,
            cleanup,
            store,
            install_root,
            launch_script,
            options,
            cancel_current: None,
            cleanup_ran: false,
        }
    }

    /// Main supervise loop.
    ///
    /// - Feeds an initial `StartRequested` into the core.
    /// - Consumes `SupervisorEvent`s from `event_rx`.
    /// - Executes commands returned by the core (launch, reconcile, cleanup).
    /// - Exits when the core stops; cleanup is guaranteed to have run by
    ///   then, exactly once.
    pub async fn run(mut self) -> Result<()> {
        info!("supervisor started");

        if !self.handle(SupervisorEvent::StartRequested).await? {
            return self.finish().await;
        }

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("supervisor event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "supervisor received event");

            if !self.handle(event).await? {
                break;
            }
        }

        self.finish().await
    }

    /// Feed one event through the core and execute the resulting commands.
    /// Returns whether the loop should keep running.
    async fn handle(&mut self, event: SupervisorEvent) -> Result<bool> {
        let step = self.core.step(event);

        for command in step.commands {
            self.execute_command(command).await?;
        }

        Ok(step.keep_running)
    }

    async fn finish(&mut self) -> Result<()> {
        // Mandatory cleanup even on abnormal exits (e.g. channel closed
        // without a stop event); the guard keeps it to exactly once.
        self.run_cleanup_once().await;
        info!("supervisor exiting");
        Ok(())
    }

    /// Execute a single command from the core.
    async fn execute_command(&mut self, command: SupervisorCommand) -> Result<()> {
        match command {
            SupervisorCommand::LaunchChild => self.launch_child().await?,
            SupervisorCommand::ReconcileAndBackoff => self.reconcile_and_backoff(),
            SupervisorCommand::RunCleanup => self.stop_and_cleanup().await,
        }
        Ok(())
    }

    /// Read the config record (once per launch) and spawn the node.
    async fn launch_child(&mut self) -> Result<()> {
        let answers = match self.store.try_load() {
            Ok(record) => record.map(|r| r.answer_lines()),
            Err(e) => {
                warn!(error = %e, "could not read config record; launching without answers");
                None
            }
        };

        let plan = LaunchPlan {
            install_root: self.install_root.clone(),
            script: self.launch_script.clone(),
            answers,
        };

        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        self.cancel_current = Some(cancel_tx);

        let fut = self.launcher.launch(plan, cancel_rx, self.event_tx.clone());
        tokio::spawn(fut);
        Ok(())
    }

    /// Verify the installation in the background, then pause for the fixed
    /// backoff and report back. Keeping this off the event loop means a stop
    /// signal is observed immediately instead of after the sleep.
    fn reconcile_and_backoff(&mut self) {
        self.cancel_current = None;

        let fut = self.reconciler.reconcile();
        let tx = self.event_tx.clone();
        let backoff = self.options.backoff;

        tokio::spawn(async move {
            fut.await;
            tokio::time::sleep(backoff).await;
            let _ = tx.send(SupervisorEvent::ReconcileFinished).await;
        });
    }

    /// Stop path: best-effort kill of the tracked child, confirmation to the
    /// user, then the mandatory cleanup action.
    async fn stop_and_cleanup(&mut self) {
        match self.cancel_current.take() {
            Some(cancel) => {
                if cancel.send(()).is_err() {
                    debug!("node already exited while stopping");
                }
            }
            // No child running; nothing to kill.
            None => debug!("stop requested with no running child"),
        }

        info!("stop requested; supervised restarts halted");
        self.run_cleanup_once().await;
    }

    async fn run_cleanup_once(&mut self) {
        if self.cleanup_ran {
            debug!("cleanup already ran; skipping");
            return;
        }
        self.cleanup_ran = true;
        self.cleanup.run().await;
    }
}
