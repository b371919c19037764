// src/config/mod.rs

//! Configuration layer: tool settings (TOML) and the runtime config record
//! (flat key=value, see [`record`]).

pub mod loader;
pub mod model;
pub mod paths;
pub mod record;
pub mod validate;

pub use loader::{default_settings_path, load_and_validate};
pub use model::{NodeSettings, PythonSettings, Settings, SwapSettings};
pub use paths::Layout;
pub use record::{ConfigRecord, RecordStore, update_interactive};
