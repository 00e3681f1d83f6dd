//! HTTP client for the prompt-mode service.

use std::time::Duration;

use serde::de::DeserializeOwned;

use super::{PromptModeService, ServiceError};
use crate::domain::{PromptModeRequest, PromptModeResponse, PromptStatus};

pub const AUTH_HEADER: &str = "X-KGMODE-Token";

/// Summarize an error body like `{"error": "...", "details": "..."}`
pub(super) fn format_http_error(code: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("HTTP {code}");
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    let error = value
        .get("error")
        .and_then(|v| v.as_str())
        .unwrap_or("http_error");
    let details = value
        .get("details")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .or_else(|| value.get("message").and_then(|v| v.as_str()).map(String::from));

    match details {
        Some(details) => format!("{error}: {details}"),
        None => error.to_string(),
    }
}

fn map_ureq_error(err: ureq::Error) -> ServiceError {
    match err {
        ureq::Error::Status(code, resp) => {
            let body = resp.into_string().unwrap_or_default();
            ServiceError::Status {
                code,
                message: format_http_error(code, &body),
            }
        }
        other => ServiceError::Transport(other.to_string()),
    }
}

/// Prompt-mode service client over HTTP
#[derive(Clone)]
pub struct HttpPromptModeClient {
    base_url: String,
    token: Option<String>,
    agent: ureq::Agent,
}

impl std::fmt::Debug for HttpPromptModeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPromptModeClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.token.is_some())
            .finish()
    }
}

impl HttpPromptModeClient {
    /// Create a client for the service at `base_url` (e.g. `http://127.0.0.1:9621`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(5))
            .timeout_read(Duration::from_secs(30))
            .build();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            agent,
        }
    }

    /// Send `token` as `X-KGMODE-Token` on every request (blank tokens are ignored)
    pub fn with_token(mut self, token: Option<&str>) -> Self {
        self.token = token
            .filter(|t| !t.trim().is_empty())
            .map(|t| t.to_string());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_auth(&self, mut req: ureq::Request) -> ureq::Request {
        if let Some(token) = &self.token {
            req = req.set(AUTH_HEADER, token);
        }
        req
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let resp = self
            .with_auth(self.agent.get(&self.url(path)))
            .call()
            .map_err(map_ureq_error)?;
        resp.into_json()
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }

    /// Check that the service is up; returns its version string
    pub fn ping(&self) -> Result<String, ServiceError> {
        let value: serde_json::Value = self.get_json("/ping")?;
        Ok(value
            .get("version")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string())
    }

    /// Entity types of the active mode
    pub fn entity_types(&self) -> Result<Vec<String>, ServiceError> {
        self.get_json("/prompt-mode/entity-types")
    }

    /// Detailed prompt configuration status
    pub fn status(&self) -> Result<PromptStatus, ServiceError> {
        self.get_json("/prompt-mode/status")
    }
}

impl PromptModeService for HttpPromptModeClient {
    fn get_prompt_mode(&self) -> Result<PromptModeResponse, ServiceError> {
        self.get_json("/prompt-mode")
    }

    fn set_prompt_mode(
        &self,
        use_engineering_prompts: bool,
    ) -> Result<PromptModeResponse, ServiceError> {
        let resp = self
            .with_auth(self.agent.post(&self.url("/prompt-mode")))
            .send_json(PromptModeRequest {
                use_engineering_prompts,
            })
            .map_err(map_ureq_error)?;
        resp.into_json()
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }
}
