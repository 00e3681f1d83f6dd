//! Shared test utilities for service integration tests

use kgmode::client::HttpPromptModeClient;
use kgmode::server::{PromptModeRegistry, PromptModeServer, ServerHandle, ServerState};

/// Starts a service on a free localhost port
pub fn start_server(registry: PromptModeRegistry, token: Option<&str>) -> ServerHandle {
    let state = ServerState::new(registry, token.map(String::from));
    PromptModeServer::bind("127.0.0.1:0", state)
        .expect("Failed to bind test server")
        .spawn()
        .expect("Failed to spawn test server")
}

/// Client pointed at `server`, optionally authenticated
pub fn client_for(server: &ServerHandle, token: Option<&str>) -> HttpPromptModeClient {
    HttpPromptModeClient::new(server.url()).with_token(token)
}
