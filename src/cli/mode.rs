//! Mode command implementation

use anyhow::{Result, bail};
use chrono::Local;
use std::time::Duration;

use kgmode::client::{HttpPromptModeClient, PromptModeService};
use kgmode::config::Config;
use kgmode::domain::{
    ENGINEERING_RELATIONSHIP_TYPES, MAX_VISIBLE_ENTITY_TYPES, PromptMode, visible_entity_types,
};
use kgmode::store::SettingsStore;
use kgmode::sync::PromptModeSync;

/// Longer than the client's read timeout, so the worker always reports first
const UPDATE_WAIT: Duration = Duration::from_secs(40);

fn client(config: &Config) -> HttpPromptModeClient {
    HttpPromptModeClient::new(config.panel.server_url.as_str()).with_token(config.panel.token())
}

fn print_state(use_engineering_prompts: bool, entity_types: &[String]) {
    let mode = PromptMode::from_flag(use_engineering_prompts);
    println!("Prompt mode: {} ({})", mode, mode.label());

    let badges = visible_entity_types(entity_types, MAX_VISIBLE_ENTITY_TYPES);
    if badges.badge_count() == 0 {
        return;
    }
    let mut line = badges.shown.join(", ");
    if let Some(more) = badges.overflow_label() {
        line.push_str(", ");
        line.push_str(&more);
    }
    println!("Entity types: {}", line);
}

/// Show the active prompt mode
pub fn get_command(config: &Config) -> Result<()> {
    let response = client(config).get_prompt_mode()?;
    print_state(response.use_engineering_prompts, &response.entity_types);
    Ok(())
}

/// Switch the prompt mode, reporting the outcome like the settings panel does
pub fn set_command(config: &Config, mode: PromptMode) -> Result<()> {
    let store = SettingsStore::default();
    let mut sync = PromptModeSync::new(client(config), store.clone());

    sync.set_prompt_mode(mode.is_engineering());
    if !sync.poll_timeout(UPDATE_WAIT) {
        bail!("Timed out waiting for the prompt-mode service");
    }

    let mut failed = false;
    for notification in sync.drain_notifications() {
        failed |= notification.is_error();
        println!(
            "[{}] {}",
            notification.created_at.with_timezone(&Local).format("%H:%M:%S"),
            notification
        );
    }
    if failed {
        bail!("Prompt mode was not changed");
    }

    let snapshot = store.snapshot();
    print_state(snapshot.use_engineering_prompts, &snapshot.prompt_mode_entity_types);
    Ok(())
}

/// List every entity type of the active mode, or the engineering relationship catalog
pub fn types_command(config: &Config, relationships: bool) -> Result<()> {
    if relationships {
        for (name, description) in ENGINEERING_RELATIONSHIP_TYPES {
            println!("  {:<18} {}", name, description);
        }
        return Ok(());
    }

    let types = client(config).entity_types()?;
    if types.is_empty() {
        println!("No entity types.");
        return Ok(());
    }
    for entity_type in types {
        println!("  {}", entity_type);
    }
    Ok(())
}

/// Show catalog availability on the service
pub fn status_command(config: &Config) -> Result<()> {
    let status = client(config).status()?;
    let sources = &status.config_files_available;

    println!("Mode:                   {}", status.mode);
    println!("Environment variable:   {}", status.environment_variable);
    println!("Engineering prompts:    {}", yes_no(sources.engineering_prompts));
    println!(
        "Entity types catalog:   {}{}",
        yes_no(sources.entity_types_config),
        count_suffix(sources.entity_types_count)
    );
    println!(
        "Prompt templates:       {}",
        sources
            .prompt_count
            .map_or_else(|| "-".to_string(), |n| n.to_string())
    );
    println!("Active prompts loaded:  {}", yes_no(status.active_prompts_loaded));
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn count_suffix(count: Option<usize>) -> String {
    count.map(|n| format!(" ({} types)", n)).unwrap_or_default()
}
