//! ipamctl
//!
//! Command-line interface for the IPAM service.
//!
//! # Usage
//!
//! ```bash
//! ipamctl create-tenant --name acme
//! ipamctl create-vrf --tenant-id <uuid> --name blue --rd 65000:1
//! ipamctl create-prefix --vrf-id <uuid> --cidr 10.0.0.0/24
//! ipamctl carve-children --prefix-id <uuid> --mask 26 --count 4
//! ipamctl next-ip --prefix-id <uuid> --idem retry-1
//! ipamctl seed --format json
//! ```

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ipamctl::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = ipamctl::commands::run(cli).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
