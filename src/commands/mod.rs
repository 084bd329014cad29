//! CLI Commands
//!
//! One handler per verb. Handlers check required inputs, apply defaults,
//! call the API client and print the result.

pub mod config;
pub mod health;
pub mod ips;
pub mod prefixes;
pub mod seed;
pub mod tenants;
pub mod vrfs;

use crate::cli::{Cli, Commands};
use crate::config::{Config, Settings};
use crate::error::{Error, Result};

/// Execute the parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    let profile = cli.profile.as_deref();

    if let Commands::Config { action } = cli.command {
        return config::handle(action, profile);
    }

    let file = Config::load(profile)?;
    let settings = Settings::resolve(cli.base_url, cli.idempotency_key, cli.format, &file);
    let client = settings.client()?;
    let format = settings.format;

    match cli.command {
        Commands::CreateTenant { name } => tenants::create(&client, format, name).await,
        Commands::CreateVrf { tenant_id, name, rd } => {
            vrfs::create(&client, format, tenant_id, name, rd).await
        }
        Commands::CreatePrefix {
            vrf_id,
            cidr,
            status,
            description,
        } => prefixes::create(&client, format, vrf_id, cidr, status, description).await,
        Commands::CarveChildren {
            prefix_id,
            mask,
            count,
        } => prefixes::carve(&client, format, prefix_id, mask, count).await,
        Commands::NextIp { prefix_id } => ips::next(&client, format, prefix_id).await,
        Commands::GetPrefix { prefix_id } => prefixes::get(&client, format, prefix_id).await,
        Commands::FreeSpace { prefix_id, mask } => {
            prefixes::free_space(&client, format, prefix_id, mask).await
        }
        Commands::Seed(args) => seed::handle(&client, format, &args).await,
        Commands::Health => health::handle(&client, format).await,
        Commands::Config { .. } => Ok(()),
    }
}

/// Reject a missing or empty required flag before anything is sent
pub fn require(flag: &str, value: Option<String>) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::Validation(format!("{} is required", flag)))
}
