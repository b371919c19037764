// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::Settings;
use crate::errors::Result;

/// Load the settings file from a given path.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let settings: Settings = toml::from_str(&contents)?;

    Ok(settings)
}

/// Load the settings file from path and run basic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - A missing file yields the built-in defaults (the tool must work on a
///   fresh machine with nothing configured).
/// - Applies per-section defaults (handled by `serde` + `Default` impls).
/// - Checks basic sanity of the values (see `validate.rs`).
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    let settings = if path.is_file() {
        load_from_path(path)?
    } else {
        Settings::default()
    };
    crate::config::validate::validate(&settings)?;
    Ok(settings)
}

/// Helper to resolve the default settings path.
///
/// `<data_dir>/Swarmherd.toml`; the data dir itself is resolved by
/// [`crate::config::paths::Layout`].
pub fn default_settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("Swarmherd.toml")
}
