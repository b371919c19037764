// src/supervisor/mod.rs

//! Supervised-restart engine for the training node.
//!
//! This module ties together:
//! - the restart state machine (launch → reconcile → backoff → relaunch)
//! - the main event loop that reacts to:
//!   - child process exits
//!   - launch failures
//!   - finished reconciliation steps
//!   - the stop signal
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use std::time::Duration;

/// Fixed pause between a child exit and the next launch attempt.
///
/// Intentionally constant: the loop retries without a cap and without
/// exponential growth, bounded only by the stop signal.
pub const RESTART_BACKOFF: Duration = Duration::from_secs(1);

/// Supervisor lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    /// Nothing launched yet.
    Idle,
    /// A child process is running (or being spawned).
    Running,
    /// Between launches: verifying the installation, then backing off.
    Reconciling,
    /// Terminal. Entered only via the stop signal.
    Stopped,
}

/// Events flowing into the supervisor from the launcher, the reconciler and
/// the signal listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorEvent {
    /// Kick off the first launch.
    StartRequested,
    /// The child exited with a concrete code. Success and failure are
    /// treated identically for restart purposes.
    ChildExited { code: i32 },
    /// The child could not be started (e.g. missing script).
    LaunchFailed,
    /// Reconciliation and the backoff pause are done.
    ReconcileFinished,
    /// Stop signal observed.
    StopRequested,
}

/// What the IO shell should do next, as decided by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorCommand {
    /// Spawn the node.
    LaunchChild,
    /// Verify the installation, then pause for the fixed backoff.
    ReconcileAndBackoff,
    /// Kill any running child and run the mandatory cleanup action.
    RunCleanup,
}

/// Result of feeding one event into the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    pub commands: Vec<SupervisorCommand>,
    pub keep_running: bool,
}

/// Options for the supervise loop.
#[derive(Debug, Clone, Copy)]
pub struct SupervisorOptions {
    /// Pause between reconciliation and the next launch. Tests shrink this;
    /// production uses [`RESTART_BACKOFF`].
    pub backoff: Duration,
}

impl Default for SupervisorOptions {
    fn default() -> Self {
        Self {
            backoff: RESTART_BACKOFF,
        }
    }
}

pub mod core;
pub mod runtime;

pub use core::SupervisorCore;
pub use runtime::SupervisorRuntime;
