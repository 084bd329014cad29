//! Tenant commands

use tracing::info;

use super::require;
use crate::client::IpamClient;
use crate::error::Result;
use crate::output::OutputFormat;

pub async fn create(client: &IpamClient, format: OutputFormat, name: Option<String>) -> Result<()> {
    let name = require("--name", name)?;

    let tenant = client.create_tenant(&name).await?;
    info!("Created tenant {}", tenant.id);

    format.print("Tenant created:", &tenant);
    Ok(())
}
