//! Request and response types of the IPAM API

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};

use super::time::ApiTime;

/// Carving strategy sent with every carve request
pub const CARVE_STRATEGY: &str = "first-fit";

/// A 2xx response body: a JSON object, or an array of them when `LIST`
pub trait ApiResponse: DeserializeOwned + Default {
    const LIST: bool = false;
}

impl<T: ApiResponse> ApiResponse for Vec<T> {
    const LIST: bool = true;
}

impl ApiResponse for Tenant {}
impl ApiResponse for Vrf {}
impl ApiResponse for Prefix {}
impl ApiResponse for AllocatedIp {}
impl ApiResponse for FreeSpace {}
impl ApiResponse for Health {}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub created_at: ApiTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrf {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    /// Route distinguisher, e.g. `65000:1`
    pub rd: Option<String>,
    pub created_at: ApiTime,
}

/// Lifecycle status of a prefix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PrefixStatus {
    Container,
    #[default]
    Active,
    Reserved,
}

impl PrefixStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixStatus::Container => "container",
            PrefixStatus::Active => "active",
            PrefixStatus::Reserved => "reserved",
        }
    }
}

impl fmt::Display for PrefixStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrefixStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "container" => Ok(PrefixStatus::Container),
            "active" => Ok(PrefixStatus::Active),
            "reserved" => Ok(PrefixStatus::Reserved),
            other => Err(format!("unknown prefix status: {} (container|active|reserved)", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefix {
    pub id: String,
    pub vrf_id: String,
    pub cidr: String,
    /// `None` when the service omitted the field or sent it empty
    #[serde(deserialize_with = "empty_status_as_none")]
    pub status: Option<PrefixStatus>,
    pub description: String,
    pub parent_id: Option<String>,
    pub created_at: ApiTime,
}

fn empty_status_as_none<'de, D>(deserializer: D) -> Result<Option<PrefixStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Result of a next-IP allocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatedIp {
    pub id: String,
    pub address: String,
}

/// An unallocated block inside a prefix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeSpace {
    pub cidr: String,
}

/// Liveness probe response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Health {
    pub ok: bool,
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateTenantParams<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateVrfParams<'a> {
    pub tenant_id: &'a str,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rd: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePrefixParams<'a> {
    pub vrf_id: &'a str,
    pub cidr: &'a str,
    pub status: PrefixStatus,
    pub description: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CarveChildrenParams {
    pub mask: u32,
    pub count: u32,
    pub strategy: &'static str,
}
