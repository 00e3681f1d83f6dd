//! Serve command implementation

use anyhow::Result;
use tracing::info;

use kgmode::config::Config;
use kgmode::server::{PromptModeServer, ServerState};

/// Run the prompt-mode service in the foreground
pub fn serve_command(config: &Config, port: Option<u16>) -> Result<()> {
    let mut settings = config.server.clone();
    if let Some(port) = port {
        settings.port = port;
    }

    let state = ServerState::from_settings(&settings);
    info!(
        "[kgmode:http] Starting in {} mode",
        state.read_registry().mode()
    );

    let server = PromptModeServer::bind(&settings.bind_addr(), state)?;
    println!("Prompt-mode service listening on {}", server.url());
    server.run();

    Ok(())
}
