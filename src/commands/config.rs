//! Config commands

use tracing::info;

use crate::cli::ConfigCommands;
use crate::config::{Config, KEYS};
use crate::error::Result;

pub fn handle(action: ConfigCommands, profile: Option<&str>) -> Result<()> {
    match action {
        ConfigCommands::Init => {
            let path = Config::config_path(profile)?;
            if path.exists() {
                println!("Configuration already exists at {}", path.display());
                return Ok(());
            }
            Config::default().save(profile)?;
            info!("Wrote {}", path.display());
            println!("Configuration initialized at {}", path.display());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(profile)?;
            config.set(&key, value)?;
            let path = config.save(profile)?;
            info!("Updated {} in {}", key, path.display());
            println!("Set {} successfully", key);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(profile)?;
            let value = config.display_value(&key)?;
            println!("{}: {}", key, value.unwrap_or_else(|| "(not set)".into()));
        }
        ConfigCommands::List => {
            let config = Config::load(profile)?;
            for key in KEYS {
                let value = config.display_value(key)?;
                println!("{}: {}", key, value.unwrap_or_else(|| "(not set)".into()));
            }
        }
    }
    Ok(())
}
