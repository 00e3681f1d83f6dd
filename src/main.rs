use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use kgmode::PromptMode;
use kgmode::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "kgmode")]
#[command(about = "Switch knowledge-graph extraction between general and engineering prompts")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.kgmode/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the prompt-mode service
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Open the settings panel
    Gui,

    /// Query or switch the prompt mode on a running service
    Mode {
        #[command(subcommand)]
        action: ModeAction,
    },

    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ModeAction {
    /// Show the active mode and its entity types
    Get,
    /// Switch mode
    Set {
        /// `general` or `engineering`
        mode: PromptMode,
    },
    /// List the entity types of the active mode
    Types {
        /// List the engineering relationship types instead
        #[arg(long)]
        relationships: bool,
    },
    /// Show which extraction catalogs the service has
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config_path = Config::resolve_path(cli.config.as_deref());

    let load_config = || Config::load_from(&config_path);

    match cli.command {
        Some(Commands::Init { force }) => cli::init::init_command(&config_path, force)?,
        Some(Commands::Serve { port }) => cli::serve::serve_command(&load_config()?, port)?,
        Some(Commands::Mode { action }) => {
            let config = load_config()?;
            match action {
                ModeAction::Get => cli::mode::get_command(&config)?,
                ModeAction::Set { mode } => cli::mode::set_command(&config, mode)?,
                ModeAction::Types { relationships } => {
                    cli::mode::types_command(&config, relationships)?
                }
                ModeAction::Status => cli::mode::status_command(&config)?,
            }
        }
        Some(Commands::Gui) | None => kgmode::gui::run_gui(&load_config()?)?,
    }

    Ok(())
}
