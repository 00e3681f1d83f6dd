//! Init command implementation

use anyhow::{Result, bail};
use std::path::Path;

use kgmode::config::Config;

/// Write a default configuration file
pub fn init_command(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    Config::default().save_to_file(config_path)?;
    println!("Created: {}", config_path.display());

    Ok(())
}
