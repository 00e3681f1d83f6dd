//! Settings configuration types

use serde::{Deserialize, Serialize};

use crate::domain::{Language, Theme};

/// Environment variable that overrides the configured startup mode
pub const ENGINEERING_PROMPTS_ENV: &str = "KGMODE_USE_ENGINEERING_PROMPTS";

/// Prompt-mode service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Local HTTP port
    /// Default: 9621
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Shared secret required on every request (sent as `X-KGMODE-Token`)
    ///
    /// If empty, the server accepts unauthenticated requests.
    #[serde(default)]
    pub token: String,

    /// Mode the service starts in
    #[serde(default)]
    pub use_engineering_prompts: bool,

    /// Serve the full engineering entity catalog.
    /// When false, engineering mode answers with the short fallback list.
    #[serde(default = "default_true")]
    pub engineering_catalog: bool,

    /// Raw value of the environment override, if one was applied
    #[serde(skip)]
    pub env_override: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            token: String::new(),
            use_engineering_prompts: false,
            engineering_catalog: true,
            env_override: None,
        }
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn token(&self) -> Option<&str> {
        Some(self.token.as_str()).filter(|t| !t.trim().is_empty())
    }
}

/// Settings panel and CLI client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSettings {
    /// Base URL of the prompt-mode service
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Token sent to the service (see `server.token`)
    #[serde(default)]
    pub token: String,

    /// Initial UI language
    #[serde(default)]
    pub language: Language,

    /// Initial color theme
    #[serde(default)]
    pub theme: Theme,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            token: String::new(),
            language: Language::default(),
            theme: Theme::default(),
        }
    }
}

impl PanelSettings {
    pub fn token(&self) -> Option<&str> {
        Some(self.token.as_str()).filter(|t| !t.trim().is_empty())
    }
}

pub fn default_port() -> u16 {
    9621
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_url() -> String {
    format!("http://127.0.0.1:{}", default_port())
}

fn default_true() -> bool {
    true
}
