//! Display preferences held by the settings store

use serde::{Deserialize, Serialize};

/// UI language offered by the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh")]
    Zh,
    #[serde(rename = "fr")]
    Fr,
    #[serde(rename = "ar")]
    Ar,
    #[serde(rename = "zh_TW")]
    ZhTw,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::Zh,
        Language::Fr,
        Language::Ar,
        Language::ZhTw,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
            Language::Fr => "fr",
            Language::Ar => "ar",
            Language::ZhTw => "zh_TW",
        }
    }

    /// Name of the language in itself
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "中文",
            Language::Fr => "Français",
            Language::Ar => "العربية",
            Language::ZhTw => "繁體中文",
        }
    }

    /// Parse a language code (case-insensitive, `-` and `_` are equivalent)
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().to_lowercase() == normalized)
    }
}

/// Color theme of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the operating system preference
    #[default]
    System,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }
}
