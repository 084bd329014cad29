//! Prefix commands

use tracing::info;

use super::require;
use crate::client::{IpamClient, PrefixStatus};
use crate::error::Result;
use crate::output::OutputFormat;

/// Child prefix length used when none is given
pub const DEFAULT_MASK: u32 = 28;

/// Number of children carved when none is given
pub const DEFAULT_COUNT: u32 = 1;

/// Substitute defaults for a zero mask and a non-positive count
pub fn carve_defaults(mask: u32, count: i64) -> (u32, u32) {
    let mask = if mask == 0 { DEFAULT_MASK } else { mask };
    let count = if count <= 0 {
        DEFAULT_COUNT
    } else {
        u32::try_from(count).unwrap_or(u32::MAX)
    };
    (mask, count)
}

pub async fn create(
    client: &IpamClient,
    format: OutputFormat,
    vrf_id: Option<String>,
    cidr: Option<String>,
    status: PrefixStatus,
    description: String,
) -> Result<()> {
    let vrf_id = require("--vrf-id", vrf_id)?;
    let cidr = require("--cidr", cidr)?;

    let prefix = client
        .create_prefix(&vrf_id, &cidr, status, &description)
        .await?;
    info!("Created prefix {} ({})", prefix.cidr, prefix.id);

    format.print("Prefix created:", &prefix);
    Ok(())
}

pub async fn carve(
    client: &IpamClient,
    format: OutputFormat,
    prefix_id: Option<String>,
    mask: u32,
    count: i64,
) -> Result<()> {
    let prefix_id = require("--prefix-id", prefix_id)?;
    let (mask, count) = carve_defaults(mask, count);

    let children = client.carve_children(&prefix_id, mask, count).await?;
    info!("Carved {} /{} children under {}", children.len(), mask, prefix_id);

    let label = format!("Carved {} children under {}:", children.len(), prefix_id);
    format.print(&label, &children);
    Ok(())
}

pub async fn get(client: &IpamClient, format: OutputFormat, prefix_id: Option<String>) -> Result<()> {
    let prefix_id = require("--prefix-id", prefix_id)?;

    let prefix = client.get_prefix(&prefix_id).await?;
    format.print("Prefix:", &prefix);
    Ok(())
}

pub async fn free_space(
    client: &IpamClient,
    format: OutputFormat,
    prefix_id: Option<String>,
    mask: u32,
) -> Result<()> {
    let prefix_id = require("--prefix-id", prefix_id)?;
    let mask = if mask == 0 { DEFAULT_MASK } else { mask };

    let blocks = client.free_space(&prefix_id, mask).await?;
    let label = format!("{} free /{} blocks in {}:", blocks.len(), mask, prefix_id);
    format.print(&label, &blocks);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carve_defaults() {
        assert_eq!(carve_defaults(0, 0), (28, 1));
        assert_eq!(carve_defaults(0, -5), (28, 1));
        assert_eq!(carve_defaults(26, 4), (26, 4));
        assert_eq!(carve_defaults(30, i64::MAX), (30, u32::MAX));
    }
}
