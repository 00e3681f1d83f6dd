//! GUI runner - launches the settings window

use anyhow::Result;
use eframe::egui;
use tracing::info;

use super::app::SettingsApp;
use crate::client::HttpPromptModeClient;
use crate::config::Config;
use crate::store::{SettingsSnapshot, SettingsStore};

/// Build the store the panel starts from
pub fn initial_store(config: &Config) -> SettingsStore {
    SettingsStore::new(SettingsSnapshot {
        language: config.panel.language,
        theme: config.panel.theme,
        ..SettingsSnapshot::default()
    })
}

/// Run the settings window until it is closed
pub fn run_gui(config: &Config) -> Result<()> {
    let client =
        HttpPromptModeClient::new(config.panel.server_url.as_str()).with_token(config.panel.token());
    info!("[kgmode:gui] Using prompt-mode service at {}", client.base_url());

    let app = SettingsApp::new(client, initial_store(config));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("kgmode")
            .with_inner_size([520.0, 420.0])
            .with_min_inner_size([360.0, 320.0]),
        centered: true,
        ..Default::default()
    };

    eframe::run_native("kgmode", options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))?;

    Ok(())
}
