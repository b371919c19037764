#![allow(dead_code)]

use swarmherd::config::{ConfigRecord, Settings};
use swarmherd::types::{ParamBillions, SwarmVariant};

/// Builder for `Settings` to simplify test setup.
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
        }
    }

    pub fn with_repo_url(mut self, url: &str) -> Self {
        self.settings.node.repo_url = url.to_string();
        self
    }

    pub fn with_install_dir(mut self, dir: &str) -> Self {
        self.settings.node.install_dir = dir.to_string();
        self
    }

    pub fn with_launch_script(mut self, script: &str) -> Self {
        self.settings.node.launch_script = script.to_string();
        self
    }

    pub fn with_swap_gb(mut self, size_gb: u64) -> Self {
        self.settings.swap.size_gb = size_gb;
        self
    }

    pub fn with_package(mut self, package: &str) -> Self {
        self.settings.python.packages.push(package.to_string());
        self
    }

    pub fn build(self) -> Settings {
        self.settings
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for a config record with the two user-settable fields set.
pub fn record(variant: SwarmVariant, params: ParamBillions) -> ConfigRecord {
    ConfigRecord {
        swarm_variant: variant,
        parameter_count: params,
        ..ConfigRecord::default()
    }
}
