// src/config/model.rs

//! Tool-level settings, read from `Swarmherd.toml`.
//!
//! These control *where* the node is installed and *how* it is provisioned.
//! They are distinct from the runtime config record (see [`crate::config::record`]),
//! which controls the answers piped to the launched training script.

use serde::Deserialize;

/// Top-level settings file.
///
/// Every section is optional; a missing file yields all defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub node: NodeSettings,
    #[serde(default)]
    pub swap: SwapSettings,
    #[serde(default)]
    pub python: PythonSettings,
}

/// `[node]`: the training node repository and its launch script.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NodeSettings {
    /// Git URL the node is cloned from.
    pub repo_url: String,
    /// Install directory, relative to the user's home.
    pub install_dir: String,
    /// Launch script inside the install directory.
    pub launch_script: String,
    /// Identity keypair the node needs before it can join the swarm.
    pub identity_file: String,
    /// Files removed by the credential-reset menu entry.
    pub credential_files: Vec<String>,
    /// Maintainer-published fix-up script run by the self-heal menu entry.
    pub fixup_url: String,
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            repo_url: "https://github.com/gensyn-ai/rl-swarm.git".to_string(),
            install_dir: "rl-swarm".to_string(),
            launch_script: "run_swarm.sh".to_string(),
            identity_file: "swarm.pem".to_string(),
            credential_files: vec![
                "swarm.pem".to_string(),
                "modal-login/temp-data/userData.json".to_string(),
                "modal-login/temp-data/userApiKey.json".to_string(),
            ],
            fixup_url: "https://raw.githubusercontent.com/gensyn-ai/rl-swarm/main/fixall.sh"
                .to_string(),
        }
    }
}

/// `[swap]`: swapfile provisioned before launching, removed on shutdown.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SwapSettings {
    /// Swapfile size in GiB. Zero disables swap management entirely.
    pub size_gb: u64,
}

impl Default for SwapSettings {
    fn default() -> Self {
        Self { size_gb: 16 }
    }
}

/// `[python]`: virtual environment the node runs inside.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PythonSettings {
    /// Venv directory, relative to the install directory.
    pub venv_dir: String,
    /// Extra packages installed into the venv after creation.
    pub packages: Vec<String>,
}

impl Default for PythonSettings {
    fn default() -> Self {
        Self {
            venv_dir: ".venv".to_string(),
            packages: vec![],
        }
    }
}
