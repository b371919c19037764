// src/setup/cleanup.rs

//! The mandatory cleanup action run on termination.

use std::future::Future;
use std::pin::Pin;

use tracing::{info, warn};

use super::swap::SwapFile;

/// Trait abstracting the cleanup action so tests can observe how often it
/// runs without touching real swap.
pub trait Cleanup: Send {
    fn run(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Production cleanup: remove the swapfile this tool provisioned.
#[derive(Debug)]
pub struct SwapCleanup {
    swap: SwapFile,
}

impl SwapCleanup {
    pub fn new(swap: SwapFile) -> Self {
        Self { swap }
    }
}

impl Cleanup for SwapCleanup {
    fn run(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            info!("running cleanup");
            // Recoverable: a leftover swapfile is reused by the next run.
            if let Err(e) = self.swap.remove().await {
                warn!(error = %e, "swap removal failed");
            }
        })
    }
}
