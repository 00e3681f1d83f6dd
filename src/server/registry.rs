//! Authoritative prompt-mode configuration owned by the service

use crate::config::ServerSettings;
use crate::domain::{
    ENGINEERING_ENTITY_TYPES, ENGINEERING_FALLBACK_ENTITY_TYPES, ENGINEERING_PROMPT_NAMES,
    GENERAL_ENTITY_TYPES, PromptMode, PromptModeResponse, PromptSourcesStatus, PromptStatus,
};

/// Current mode plus the catalogs it can answer with
#[derive(Debug, Clone)]
pub struct PromptModeRegistry {
    mode: PromptMode,
    engineering_catalog: bool,
    /// Mirrors the raw environment flag; rewritten on every switch
    env_value: String,
}

impl PromptModeRegistry {
    pub fn new(mode: PromptMode, engineering_catalog: bool) -> Self {
        Self {
            mode,
            engineering_catalog,
            env_value: mode.is_engineering().to_string(),
        }
    }

    pub fn from_settings(settings: &ServerSettings) -> Self {
        let mut registry = Self::new(
            PromptMode::from_flag(settings.use_engineering_prompts),
            settings.engineering_catalog,
        );
        if let Some(raw) = &settings.env_override {
            registry.env_value = raw.clone();
        }
        registry
    }

    pub fn mode(&self) -> PromptMode {
        self.mode
    }

    /// Entity types of the active mode
    pub fn entity_types(&self) -> Vec<String> {
        let types = match (self.mode, self.engineering_catalog) {
            (PromptMode::General, _) => GENERAL_ENTITY_TYPES,
            (PromptMode::Engineering, true) => ENGINEERING_ENTITY_TYPES,
            (PromptMode::Engineering, false) => ENGINEERING_FALLBACK_ENTITY_TYPES,
        };
        types.iter().map(|t| t.to_string()).collect()
    }

    /// Answer for `GET /prompt-mode`
    pub fn current(&self) -> PromptModeResponse {
        let message = match (self.mode, self.engineering_catalog) {
            (PromptMode::General, _) => "General Knowledge Graph prompt mode active",
            (PromptMode::Engineering, true) => "Engineering Standards prompt mode active",
            (PromptMode::Engineering, false) => "Engineering mode active with fallback entity types",
        };
        self.response(message)
    }

    /// Switch modes and answer for `POST /prompt-mode`.
    /// Extraction pipelines pick the new mode up on their next restart.
    pub fn switch(&mut self, use_engineering_prompts: bool) -> PromptModeResponse {
        self.mode = PromptMode::from_flag(use_engineering_prompts);
        self.env_value = use_engineering_prompts.to_string();

        let message = match (self.mode, self.engineering_catalog) {
            (PromptMode::General, _) => {
                "Switched to General Knowledge Graph mode. Restart server for full effect."
            }
            (PromptMode::Engineering, true) => {
                "Switched to Engineering Standards mode. Restart server for full effect."
            }
            (PromptMode::Engineering, false) => {
                "Switched to Engineering mode with fallback types. Restart server for full effect."
            }
        };
        self.response(message)
    }

    /// Answer for `GET /prompt-mode/status`
    pub fn status(&self) -> PromptStatus {
        let catalog = self.engineering_catalog;
        PromptStatus {
            mode: self.mode,
            environment_variable: self.env_value.clone(),
            config_files_available: PromptSourcesStatus {
                entity_types_config: catalog,
                entity_types_count: catalog.then_some(ENGINEERING_ENTITY_TYPES.len()),
                engineering_prompts: catalog,
                prompt_count: catalog.then_some(ENGINEERING_PROMPT_NAMES.len()),
            },
            active_prompts_loaded: catalog && self.mode.is_engineering(),
        }
    }

    fn response(&self, message: &str) -> PromptModeResponse {
        PromptModeResponse {
            use_engineering_prompts: self.mode.is_engineering(),
            entity_types: self.entity_types(),
            message: message.to_string(),
        }
    }
}

impl Default for PromptModeRegistry {
    fn default() -> Self {
        Self::new(PromptMode::General, true)
    }
}
