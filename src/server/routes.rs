//! Request routing for the prompt-mode service.
//!
//! Pure functions of (method, path, body, state); the accept loop in `mod.rs`
//! does the socket I/O.

use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use super::ServerState;
use crate::domain::PromptModeRequest;

/// Status code and JSON body to send back
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl RouteResponse {
    fn ok<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(body) => Self { status: 200, body },
            Err(e) => {
                error!("[kgmode:http] Failed to serialize response: {}", e);
                Self::error(500, "serialize", Some(e.to_string()))
            }
        }
    }

    pub(super) fn error(status: u16, error: &str, details: Option<String>) -> Self {
        let body = match details {
            Some(details) => json!({ "error": error, "details": details }),
            None => json!({ "error": error }),
        };
        Self { status, body }
    }
}

/// Dispatch one request
pub fn route(method: &str, path: &str, body: &str, state: &ServerState) -> RouteResponse {
    let path = path.split('?').next().unwrap_or(path);
    let path = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };

    match (method, path) {
        ("GET", "/ping") => RouteResponse {
            status: 200,
            body: json!({
                "status": "ok",
                "version": env!("CARGO_PKG_VERSION"),
            }),
        },
        ("GET", "/prompt-mode") => RouteResponse::ok(&state.read_registry().current()),
        ("POST", "/prompt-mode") => handle_set_prompt_mode(body, state),
        ("GET", "/prompt-mode/entity-types") => {
            RouteResponse::ok(&state.read_registry().entity_types())
        }
        ("GET", "/prompt-mode/status") => RouteResponse::ok(&state.read_registry().status()),
        (_, "/ping" | "/prompt-mode" | "/prompt-mode/entity-types" | "/prompt-mode/status") => {
            RouteResponse::error(405, "method_not_allowed", None)
        }
        _ => RouteResponse::error(404, "not_found", None),
    }
}

fn handle_set_prompt_mode(body: &str, state: &ServerState) -> RouteResponse {
    let req: PromptModeRequest = match serde_json::from_str(body) {
        Ok(req) => req,
        Err(e) => {
            return RouteResponse::error(400, "invalid_json", Some(e.to_string()));
        }
    };

    let response = state.write_registry().switch(req.use_engineering_prompts);
    info!(
        "[kgmode:http] Prompt mode set to {} ({} entity types)",
        if response.use_engineering_prompts {
            "engineering"
        } else {
            "general"
        },
        response.entity_types.len()
    );
    RouteResponse::ok(&response)
}
