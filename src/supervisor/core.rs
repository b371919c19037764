// src/supervisor/core.rs

//! Pure core restart state machine.
//!
//! This module contains a synchronous, deterministic core that consumes
//! [`SupervisorEvent`]s and produces:
//! - an updated state
//! - a list of "commands" describing what the IO shell should do next
//!
//! The async/IO-heavy shell (`supervisor::runtime::SupervisorRuntime`) is
//! responsible for:
//! - spawning and killing the child process
//! - running reconciliation and sleeping the backoff
//! - handling the stop signal and the cleanup action
//!
//! The core is intended to be extensively unit tested without any Tokio,
//! channels, filesystem, or processes.

use tracing::debug;

use super::{CoreStep, SupervisorCommand, SupervisorEvent, SupervisorState};

/// Pure supervisor state. No channels, no Tokio types, no IO.
#[derive(Debug)]
pub struct SupervisorCore {
    state: SupervisorState,
}

impl SupervisorCore {
    pub fn new() -> Self {
        Self {
            state: SupervisorState::Idle,
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    /// Handle a single event, updating state and returning the resulting
    /// commands for the IO shell.
    pub fn step(&mut self, event: SupervisorEvent) -> CoreStep {
        use SupervisorEvent::*;
        use SupervisorState::*;

        // Stop wins from every state and is the only way to terminate.
        if let StopRequested = event {
            let already_stopped = self.state == Stopped;
            self.state = Stopped;
            return CoreStep {
                // Cleanup runs once; a second stop is a no-op.
                commands: if already_stopped {
                    Vec::new()
                } else {
                    vec![SupervisorCommand::RunCleanup]
                },
                keep_running: false,
            };
        }

        match (self.state, event) {
            (Idle, StartRequested) => {
                self.state = Running;
                self.commands(vec![SupervisorCommand::LaunchChild])
            }

            // Any exit, success or failure, goes through the same
            // reconcile-and-retry cycle.
            (Running, ChildExited { .. }) | (Running, LaunchFailed) => {
                self.state = Reconciling;
                self.commands(vec![SupervisorCommand::ReconcileAndBackoff])
            }

            (Reconciling, ReconcileFinished) => {
                self.state = Running;
                self.commands(vec![SupervisorCommand::LaunchChild])
            }

            (Stopped, event) => {
                debug!(?event, "event after stop; ignoring");
                CoreStep {
                    commands: Vec::new(),
                    keep_running: false,
                }
            }

            (state, event) => {
                debug!(?state, ?event, "unexpected event for state; ignoring");
                self.commands(Vec::new())
            }
        }
    }

    fn commands(&self, commands: Vec<SupervisorCommand>) -> CoreStep {
        CoreStep {
            commands,
            keep_running: true,
        }
    }
}

impl Default for SupervisorCore {
    fn default() -> Self {
        Self::new()
    }
}
