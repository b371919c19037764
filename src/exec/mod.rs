// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the node's launch script
//! using `tokio::process::Command` and reporting back to the supervisor via
//! `SupervisorEvent`s.
//!
//! - [`launcher`] runs a single launch: spawn, pipe answers, wait.
//! - [`backend`] provides the `LauncherBackend` trait and the concrete
//!   `ScriptLauncher` the runtime uses in production, and which tests can
//!   replace with a fake implementation.

pub mod backend;
pub mod launcher;

pub use backend::{LauncherBackend, ScriptLauncher};
pub use launcher::{LaunchOutcome, LaunchPlan, launch_once};
