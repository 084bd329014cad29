//! Command-line definitions

use clap::{Parser, Subcommand};

use crate::client::PrefixStatus;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "ipamctl")]
#[command(version)]
#[command(about = "CLI for the IPAM service (tenants, VRFs, prefixes, IPs)", long_about = None)]
pub struct Cli {
    /// API base URL
    #[arg(long, global = true, env = "IPAM_BASE_URL")]
    pub base_url: Option<String>,

    /// Idempotency-Key header sent with every mutating request
    #[arg(long = "idem", global = true, env = "IDEMPOTENCY_KEY")]
    pub idempotency_key: Option<String>,

    /// Output format
    #[arg(long, short, global = true)]
    pub format: Option<OutputFormat>,

    /// Profile name from config file
    #[arg(long, short, global = true)]
    pub profile: Option<String>,

    /// Log requests and responses to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a tenant
    CreateTenant {
        /// Tenant name (required)
        #[arg(long)]
        name: Option<String>,
    },
    /// Create a VRF
    CreateVrf {
        /// Tenant UUID (required)
        #[arg(long)]
        tenant_id: Option<String>,
        /// VRF name (required)
        #[arg(long)]
        name: Option<String>,
        /// Route distinguisher, e.g. 65000:1
        #[arg(long)]
        rd: Option<String>,
    },
    /// Create a prefix
    CreatePrefix {
        /// VRF UUID (required)
        #[arg(long)]
        vrf_id: Option<String>,
        /// CIDR, e.g. 10.0.0.0/24 (required)
        #[arg(long)]
        cidr: Option<String>,
        #[arg(long, value_enum, default_value_t = PrefixStatus::Active)]
        status: PrefixStatus,
        /// Description
        #[arg(long = "desc", default_value = "")]
        description: String,
    },
    /// Carve child prefixes under a parent prefix
    CarveChildren {
        /// Parent prefix UUID (required)
        #[arg(long)]
        prefix_id: Option<String>,
        /// New prefix length (0 means 28)
        #[arg(long, default_value_t = 28)]
        mask: u32,
        /// Number of child prefixes (0 or less means 1)
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        count: i64,
    },
    /// Allocate the next IP inside a prefix
    NextIp {
        /// Prefix UUID (required)
        #[arg(long)]
        prefix_id: Option<String>,
    },
    /// Show a prefix
    GetPrefix {
        /// Prefix UUID (required)
        #[arg(long)]
        prefix_id: Option<String>,
    },
    /// List unallocated blocks inside a prefix
    FreeSpace {
        /// Prefix UUID (required)
        #[arg(long)]
        prefix_id: Option<String>,
        /// Length of the free blocks to report
        #[arg(long, default_value_t = 28)]
        mask: u32,
    },
    /// Create a tenant, VRF, prefix, carve children, and allocate an IP
    Seed(SeedArgs),
    /// Check that the service is up
    Health,
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct SeedArgs {
    /// Tenant name
    #[arg(long, default_value = "DemoTenant")]
    pub tenant_name: String,
    /// VRF name
    #[arg(long, default_value = "demo-vrf")]
    pub vrf_name: String,
    /// Route distinguisher (empty to omit)
    #[arg(long, default_value = "65000:1")]
    pub rd: String,
    /// CIDR to create
    #[arg(long, default_value = "10.0.0.0/24")]
    pub cidr: String,
    #[arg(long, value_enum, default_value_t = PrefixStatus::Active)]
    pub status: PrefixStatus,
    /// Child prefix length
    #[arg(long, default_value_t = 28)]
    pub mask: u32,
    /// Number of child prefixes
    #[arg(long, default_value_t = 2)]
    pub count: u32,
}

impl Default for SeedArgs {
    fn default() -> Self {
        Self {
            tenant_name: "DemoTenant".into(),
            vrf_name: "demo-vrf".into(),
            rd: "65000:1".into(),
            cidr: "10.0.0.0/24".into(),
            status: PrefixStatus::Active,
            mask: 28,
            count: 2,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}
