// src/setup/credentials.rs

//! Credential file checks and the credential-reset operation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::{Result, SwarmherdError};

/// The node cannot join the swarm without its identity keypair; a missing
/// one is a fatal setup error.
pub fn ensure_identity(identity_file: &Path) -> Result<()> {
    if identity_file.is_file() {
        return Ok(());
    }
    Err(SwarmherdError::CredentialMissing(identity_file.to_path_buf()))
}

/// Delete the listed credential files. Missing files are skipped; the count
/// of files actually removed is returned.
pub fn delete_credentials(files: &[PathBuf]) -> Result<usize> {
    let mut removed = 0;
    for file in files {
        if !file.is_file() {
            debug!(file = %file.display(), "credential file absent; skipping");
            continue;
        }
        fs::remove_file(file)?;
        info!(file = %file.display(), "credential file removed");
        removed += 1;
    }
    Ok(removed)
}
