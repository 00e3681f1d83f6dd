//! HTTP service that owns the prompt-mode configuration
//!
//! Listens on localhost (default port 9621) and serves:
//! - GET  /ping
//! - GET  /prompt-mode                 current mode and entity types
//! - POST /prompt-mode                 switch mode (`{"use_engineering_prompts": bool}`)
//! - GET  /prompt-mode/entity-types    entity types of the active mode
//! - GET  /prompt-mode/status          catalog availability

mod registry;
mod routes;


pub use registry::PromptModeRegistry;
pub use routes::{RouteResponse, route};

use std::io::Read;
use std::net::SocketAddr;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result, anyhow};
use tiny_http::{Header, Response, Server};
use tracing::{debug, error, info};

use crate::client::AUTH_HEADER;
use crate::config::ServerSettings;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared state of the running service
#[derive(Clone, Default)]
pub struct ServerState {
    registry: Arc<RwLock<PromptModeRegistry>>,
    token: Option<String>,
}

impl ServerState {
    pub fn new(registry: PromptModeRegistry, token: Option<String>) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn from_settings(settings: &ServerSettings) -> Self {
        Self::new(
            PromptModeRegistry::from_settings(settings),
            settings.token().map(String::from),
        )
    }

    pub fn read_registry(&self) -> RwLockReadGuard<'_, PromptModeRegistry> {
        self.registry.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn write_registry(&self) -> RwLockWriteGuard<'_, PromptModeRegistry> {
        self.registry.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether a request carrying `provided` as its token may proceed
    pub fn is_authorized(&self, provided: Option<&str>) -> bool {
        match self.token.as_deref() {
            None => true,
            Some(expected) => provided == Some(expected),
        }
    }
}

/// A bound, not yet running prompt-mode service
pub struct PromptModeServer {
    server: Arc<Server>,
    state: ServerState,
    addr: SocketAddr,
}

impl PromptModeServer {
    /// Bind to `addr` (`host:port`; port 0 picks a free one)
    pub fn bind(addr: &str, state: ServerState) -> Result<Self> {
        let server = Server::http(addr)
            .map_err(|e| anyhow!("Failed to start server on {}: {}", addr, e))?;
        let addr = server
            .server_addr()
            .to_ip()
            .context("Server is not listening on a TCP address")?;

        info!(
            "[kgmode:http] Server listening on http://{} (auth: {})",
            addr,
            if state.token.is_some() {
                "enabled"
            } else {
                "disabled"
            }
        );

        Ok(Self {
            server: Arc::new(server),
            state,
            addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL clients should use
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn state(&self) -> &ServerState {
        &self.state
    }

    /// Serve requests on the current thread until the server is unblocked
    pub fn run(self) {
        serve(&self.server, &self.state);
    }

    /// Serve requests on a background thread
    pub fn spawn(self) -> Result<ServerHandle> {
        let server = Arc::clone(&self.server);
        let state = self.state.clone();
        let thread = thread::Builder::new()
            .name("kgmode-http".to_string())
            .spawn(move || serve(&server, &state))
            .context("Failed to spawn server thread")?;

        Ok(ServerHandle {
            server: self.server,
            addr: self.addr,
            thread: Some(thread),
        })
    }
}

/// Running service; stops when shut down or dropped
pub struct ServerHandle {
    server: Arc<Server>,
    addr: SocketAddr,
    thread: Option<JoinHandle<()>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop accepting requests and wait for the accept loop to exit
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.server.unblock();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("[kgmode:http] Server thread panicked");
            }
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn serve(server: &Server, state: &ServerState) {
    for mut request in server.incoming_requests() {
        let method = request.method().to_string();
        let url = request.url().to_string();
        debug!("[kgmode:http] {} {}", method, url);

        let token = request
            .headers()
            .iter()
            .find(|h| h.field.equiv(AUTH_HEADER))
            .map(|h| h.value.as_str().to_string());
        if !state.is_authorized(token.as_deref()) {
            respond(request, RouteResponse::error(401, "unauthorized", None));
            continue;
        }

        let body = match read_request_body(&mut request) {
            Ok(body) => body,
            Err(response) => {
                respond(request, response);
                continue;
            }
        };

        let response = route(&method, &url, &body, state);
        respond(request, response);
    }
    info!("[kgmode:http] Server stopped");
}

fn read_request_body(request: &mut tiny_http::Request) -> Result<String, RouteResponse> {
    let mut body = String::new();
    let mut reader = request.as_reader().take((MAX_BODY_BYTES + 1) as u64);
    if let Err(e) = reader.read_to_string(&mut body) {
        error!("[kgmode:http] Failed to read body: {}", e);
        return Err(RouteResponse::error(400, "bad_request", Some(e.to_string())));
    }

    if body.len() > MAX_BODY_BYTES {
        return Err(RouteResponse::error(413, "payload_too_large", None));
    }

    Ok(body)
}

fn respond(request: tiny_http::Request, response: RouteResponse) {
    let body = serde_json::to_string(&response.body)
        .unwrap_or_else(|_| "{\"error\":\"serialize\"}".to_string());
    let mut http_response = Response::from_string(body).with_status_code(response.status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        http_response.add_header(header);
    }
    if let Err(e) = request.respond(http_response) {
        debug!("[kgmode:http] Failed to send response: {}", e);
    }
}
