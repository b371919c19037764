// src/setup/mod.rs

//! Installation glue around the config store and the supervisor.
//!
//! Everything here wraps an external tool (`git`, `python3`, `swapon`,
//! `curl`) behind a trait with a plain success/failure contract, so the
//! supervise loop and the tests never depend on any of them directly.

pub mod cleanup;
pub mod credentials;
pub mod fetcher;
pub mod install;
pub mod python;
pub mod reconcile;
pub mod selfheal;
pub mod swap;

pub use cleanup::{Cleanup, SwapCleanup};
pub use credentials::{delete_credentials, ensure_identity};
pub use fetcher::{GitFetcher, RepoFetcher};
pub use install::fresh_install;
pub use python::{EnvInstaller, VenvInstaller};
pub use reconcile::{NodeReconciler, Reconcile};
pub use selfheal::{RemoteScriptHeal, SelfHeal};
pub use swap::SwapFile;
