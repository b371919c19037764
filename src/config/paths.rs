// src/config/paths.rs

//! Resolved on-disk layout for one run of the tool.

use std::path::PathBuf;

use crate::config::model::Settings;

/// All absolute paths the rest of the crate works with.
#[derive(Debug, Clone)]
pub struct Layout {
    /// `~/.swarmherd` — settings, config record and logs live here.
    pub data_dir: PathBuf,
    /// Where the node repository is cloned.
    pub install_root: PathBuf,
    /// The launch script inside `install_root`.
    pub launch_script: PathBuf,
    /// Virtual environment inside `install_root`.
    pub venv_dir: PathBuf,
    /// Identity keypair inside `install_root`.
    pub identity_file: PathBuf,
    /// Flat key=value config record.
    pub record_path: PathBuf,
    /// Per-run append-only logs.
    pub logs_dir: PathBuf,
    /// Swapfile provisioned for the node.
    pub swap_file: PathBuf,
}

impl Layout {
    /// Resolve every path against the given home directory.
    ///
    /// The caller resolves home itself (and treats an unavailable one as a
    /// fatal error); tests pass a temp directory.
    pub fn rooted_at(home: &std::path::Path, settings: &Settings) -> Self {
        let data_dir = home.join(".swarmherd");
        let install_root = home.join(&settings.node.install_dir);
        Self {
            launch_script: install_root.join(&settings.node.launch_script),
            venv_dir: install_root.join(&settings.python.venv_dir),
            identity_file: install_root.join(&settings.node.identity_file),
            record_path: data_dir.join("launch.conf"),
            logs_dir: data_dir.join("logs"),
            swap_file: data_dir.join("swapfile"),
            data_dir,
            install_root,
        }
    }

    /// Credential files named by the settings, resolved against the install root.
    pub fn credential_files(&self, settings: &Settings) -> Vec<PathBuf> {
        settings
            .node
            .credential_files
            .iter()
            .map(|rel| self.install_root.join(rel))
            .collect()
    }
}
