//! IP address commands

use tracing::info;

use super::require;
use crate::client::IpamClient;
use crate::error::Result;
use crate::output::OutputFormat;

pub async fn next(client: &IpamClient, format: OutputFormat, prefix_id: Option<String>) -> Result<()> {
    let prefix_id = require("--prefix-id", prefix_id)?;

    let ip = client.next_ip(&prefix_id).await?;
    info!("Allocated {} in prefix {}", ip.address, prefix_id);

    format.print("Allocated IP:", &ip);
    Ok(())
}
