//! ipamctl
//!
//! Client library and command layer for the IPAM service. The service
//! organizes address space as tenant → VRF → prefix → child prefixes →
//! allocated IP addresses.
//!
//! # Example
//!
//! ```rust,no_run
//! use ipamctl::{IpamClient, PrefixStatus, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = IpamClient::new("http://127.0.0.1:8000", Some("run-42"))?;
//!
//!     let tenant = client.create_tenant("acme").await?;
//!     let vrf = client.create_vrf(&tenant.id, "blue", Some("65000:1")).await?;
//!     let root = client
//!         .create_prefix(&vrf.id, "10.0.0.0/24", PrefixStatus::Active, "")
//!         .await?;
//!     let children = client.carve_children(&root.id, 28, 2).await?;
//!     let ip = client.next_ip(&children[0].id).await?;
//!     println!("{}", ip.address);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use client::{
    AllocatedIp, ApiTime, FreeSpace, Health, IpamClient, Prefix, PrefixStatus, Tenant, Vrf,
};
pub use error::{ApiError, Error, Result};
