//! VRF commands

use tracing::info;

use super::require;
use crate::client::IpamClient;
use crate::error::Result;
use crate::output::OutputFormat;

pub async fn create(
    client: &IpamClient,
    format: OutputFormat,
    tenant_id: Option<String>,
    name: Option<String>,
    rd: Option<String>,
) -> Result<()> {
    let tenant_id = require("--tenant-id", tenant_id)?;
    let name = require("--name", name)?;

    let vrf = client.create_vrf(&tenant_id, &name, rd.as_deref()).await?;
    info!("Created VRF {} in tenant {}", vrf.id, vrf.tenant_id);

    format.print("VRF created:", &vrf);
    Ok(())
}
