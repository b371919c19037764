// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwarmherdError {
    #[error("Settings error: {0}")]
    SettingsError(String),

    #[error("Home directory is not accessible")]
    HomeDirUnavailable,

    #[error("Required credential file is missing: {0}")]
    CredentialMissing(PathBuf),

    #[error("Cloning the node repository failed: {0}")]
    CloneFailed(String),

    #[error("Config record error: {0}")]
    RecordError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SwarmherdError>;
