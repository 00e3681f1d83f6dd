use serde::{Deserialize, Serialize};

/// Which extraction profile the service is running with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PromptMode {
    /// General-purpose knowledge graph extraction
    #[default]
    General,
    /// Engineering standards and material specifications
    Engineering,
}

impl PromptMode {
    /// Map the wire flag `use_engineering_prompts` to a mode
    pub fn from_flag(use_engineering_prompts: bool) -> Self {
        if use_engineering_prompts {
            PromptMode::Engineering
        } else {
            PromptMode::General
        }
    }

    pub fn is_engineering(&self) -> bool {
        matches!(self, PromptMode::Engineering)
    }

    /// Get the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptMode::General => "general",
            PromptMode::Engineering => "engineering",
        }
    }

    /// Short description shown under the toggle
    pub fn label(&self) -> &'static str {
        match self {
            PromptMode::General => "General knowledge graphs",
            PromptMode::Engineering => "Engineering standards extraction",
        }
    }
}

impl std::fmt::Display for PromptMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PromptMode {
    type Err = String;

    /// Accepts mode names (`general`, `engineering`, `eng`, `gen`) and boolean flags
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" | "gen" | "default" => Ok(PromptMode::General),
            "engineering" | "eng" => Ok(PromptMode::Engineering),
            other if parse_flag(other) => Ok(PromptMode::Engineering),
            "false" | "0" | "no" | "off" => Ok(PromptMode::General),
            other => Err(format!(
                "unknown prompt mode '{}' (expected 'general' or 'engineering')",
                other
            )),
        }
    }
}

/// Parse a boolean-ish flag the way the service reads its environment:
/// `true`, `1` and `yes` (any case) are true, everything else is false.
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

/// Prompt-mode configuration as mirrored by the client
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptModeState {
    pub use_engineering_prompts: bool,
    /// Ordered category labels recognized under the active mode
    pub entity_types: Vec<String>,
}

impl PromptModeState {
    pub fn mode(&self) -> PromptMode {
        PromptMode::from_flag(self.use_engineering_prompts)
    }
}

/// Body of `POST /prompt-mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptModeRequest {
    pub use_engineering_prompts: bool,
}

/// Response of `GET /prompt-mode` and `POST /prompt-mode`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptModeResponse {
    pub use_engineering_prompts: bool,
    #[serde(default)]
    pub entity_types: Vec<String>,
    #[serde(default)]
    pub message: String,
}

impl PromptModeResponse {
    /// The part of the response the client mirrors
    pub fn state(&self) -> PromptModeState {
        PromptModeState {
            use_engineering_prompts: self.use_engineering_prompts,
            entity_types: self.entity_types.clone(),
        }
    }
}

/// Response of `GET /prompt-mode/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptStatus {
    pub mode: PromptMode,
    /// Raw value of the environment override (or the configured default)
    pub environment_variable: String,
    pub config_files_available: PromptSourcesStatus,
    pub active_prompts_loaded: bool,
}

/// Which extraction catalogs the service has available
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptSourcesStatus {
    pub entity_types_config: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_types_count: Option<usize>,
    pub engineering_prompts: bool,
    /// Number of engineering prompt templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_count: Option<usize>,
}
