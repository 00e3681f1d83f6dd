//! Configuration loading and management

mod io;
mod settings;

pub use settings::{ENGINEERING_PROMPTS_ENV, PanelSettings, ServerSettings, default_port};

use serde::{Deserialize, Serialize};

/// Main configuration structure (`~/.kgmode/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Prompt-mode service settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Settings panel and CLI client settings
    #[serde(default)]
    pub panel: PanelSettings,
}

impl Config {
    /// Apply environment overrides using the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides from an arbitrary lookup
    pub fn apply_env_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENGINEERING_PROMPTS_ENV) {
            self.server.use_engineering_prompts = crate::domain::parse_flag(&value);
            self.server.env_override = Some(value);
        }
    }
}

#[cfg(test)]
mod tests;
