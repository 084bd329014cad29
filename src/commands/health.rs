//! Health command

use crate::client::IpamClient;
use crate::error::Result;
use crate::output::OutputFormat;

pub async fn handle(client: &IpamClient, format: OutputFormat) -> Result<()> {
    let health = client.health().await?;
    format.print(&format!("{}:", client.base_url()), &health);
    Ok(())
}
