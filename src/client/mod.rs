//! Client side of the prompt-mode service.
//!
//! [`PromptModeService`] is the seam the sync controller talks through;
//! [`HttpPromptModeClient`] is the ureq implementation used by the GUI and CLI.

mod http;

#[cfg(test)]
mod tests;

pub use http::{AUTH_HEADER, HttpPromptModeClient};

use crate::domain::PromptModeResponse;

/// Error type for prompt-mode service calls
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("Failed to reach prompt-mode service: {0}")]
    Transport(String),

    #[error("Prompt-mode service returned HTTP {code}: {message}")]
    Status { code: u16, message: String },

    #[error("Failed to decode prompt-mode response: {0}")]
    Decode(String),

    #[error("Prompt-mode request ended without a result")]
    Aborted,
}

/// The remote owner of the authoritative prompt-mode configuration
pub trait PromptModeService: Send + Sync {
    /// Read the current mode and its entity types
    fn get_prompt_mode(&self) -> Result<PromptModeResponse, ServiceError>;

    /// Request a mode change; the response carries the mode actually applied
    fn set_prompt_mode(&self, use_engineering_prompts: bool)
    -> Result<PromptModeResponse, ServiceError>;
}

impl<T: PromptModeService + ?Sized> PromptModeService for std::sync::Arc<T> {
    fn get_prompt_mode(&self) -> Result<PromptModeResponse, ServiceError> {
        (**self).get_prompt_mode()
    }

    fn set_prompt_mode(
        &self,
        use_engineering_prompts: bool,
    ) -> Result<PromptModeResponse, ServiceError> {
        (**self).set_prompt_mode(use_engineering_prompts)
    }
}
