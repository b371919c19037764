// src/config/validate.rs

use crate::config::model::Settings;
use crate::errors::{Result, SwarmherdError};

/// Largest swapfile we are willing to provision, in GiB.
const MAX_SWAP_GB: u64 = 512;

pub fn validate(settings: &Settings) -> Result<()> {
    ensure_node_section(settings)?;
    ensure_swap_sane(settings)?;
    Ok(())
}

fn ensure_node_section(settings: &Settings) -> Result<()> {
    if settings.node.repo_url.trim().is_empty() {
        return Err(SwarmherdError::SettingsError(
            "[node].repo_url must not be empty".to_string(),
        ));
    }
    if settings.node.launch_script.trim().is_empty() {
        return Err(SwarmherdError::SettingsError(
            "[node].launch_script must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn ensure_swap_sane(settings: &Settings) -> Result<()> {
    if settings.swap.size_gb > MAX_SWAP_GB {
        return Err(SwarmherdError::SettingsError(format!(
            "[swap].size_gb must be <= {MAX_SWAP_GB} (got {})",
            settings.swap.size_gb
        )));
    }
    Ok(())
}
