//! Seed workflow
//!
//! Creates a tenant, a VRF, a root prefix, carves children and allocates one
//! address. Calls run strictly in order; the first failure aborts the run and
//! nothing already created is rolled back.

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::cli::SeedArgs;
use crate::client::{AllocatedIp, IpamClient, Prefix, Tenant, Vrf};
use crate::error::Result;
use crate::output::OutputFormat;

/// Description given to the seeded root prefix
pub const SEED_DESCRIPTION: &str = "seed root";

/// A completed step, reported as soon as its call returns
#[derive(Debug, Clone, Copy)]
pub enum SeedStep<'a> {
    Tenant(&'a Tenant),
    Vrf(&'a Vrf),
    Prefix(&'a Prefix),
    Children {
        parent_id: &'a str,
        children: &'a [Prefix],
    },
    Ip {
        prefix_id: &'a str,
        ip: &'a AllocatedIp,
    },
}

/// Everything created by a successful seed run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeedReport {
    pub tenant: Tenant,
    pub vrf: Vrf,
    pub prefix: Prefix,
    pub children: Vec<Prefix>,
    /// Prefix the address was allocated from
    pub ip_prefix_id: String,
    pub ip: AllocatedIp,
}

/// Run the seed workflow, calling `on_step` after each call succeeds
pub async fn run<F>(client: &IpamClient, args: &SeedArgs, mut on_step: F) -> Result<SeedReport>
where
    F: FnMut(SeedStep<'_>),
{
    let tenant = client
        .create_tenant(&args.tenant_name)
        .await
        .map_err(|e| e.in_step("create tenant"))?;
    on_step(SeedStep::Tenant(&tenant));

    let vrf = client
        .create_vrf(&tenant.id, &args.vrf_name, Some(args.rd.as_str()))
        .await
        .map_err(|e| e.in_step("create vrf"))?;
    on_step(SeedStep::Vrf(&vrf));

    let prefix = client
        .create_prefix(&vrf.id, &args.cidr, args.status, SEED_DESCRIPTION)
        .await
        .map_err(|e| e.in_step("create prefix"))?;
    on_step(SeedStep::Prefix(&prefix));

    let children = client
        .carve_children(&prefix.id, args.mask, args.count)
        .await
        .map_err(|e| e.in_step("carve children"))?;
    on_step(SeedStep::Children {
        parent_id: &prefix.id,
        children: &children,
    });

    let ip_prefix_id = children
        .first()
        .map(|child| child.id.clone())
        .unwrap_or_else(|| prefix.id.clone());
    let ip = client
        .next_ip(&ip_prefix_id)
        .await
        .map_err(|e| e.in_step("next ip"))?;
    on_step(SeedStep::Ip {
        prefix_id: &ip_prefix_id,
        ip: &ip,
    });

    info!(
        "Seeded tenant {} with {} children and {}",
        tenant.id,
        children.len(),
        ip.address
    );

    Ok(SeedReport {
        tenant,
        vrf,
        prefix,
        children,
        ip_prefix_id,
        ip,
    })
}

/// Print each step as soon as it completes, so a failed run still shows what
/// was created before the failure
pub async fn handle(client: &IpamClient, format: OutputFormat, args: &SeedArgs) -> Result<()> {
    run(client, args, |step| println!("{}", render_step(format, step))).await?;
    Ok(())
}

/// One completed step in the chosen format. YAML steps are separate documents.
pub fn render_step(format: OutputFormat, step: SeedStep<'_>) -> String {
    let out = match step {
        SeedStep::Tenant(tenant) => format.format(&label("Tenant:"), tenant),
        SeedStep::Vrf(vrf) => format.format(&label("VRF:"), vrf),
        SeedStep::Prefix(prefix) => format.format(&label("Prefix:"), prefix),
        SeedStep::Children { parent_id, children } => {
            let text = format!("Carved {} children under {}:", children.len(), parent_id);
            format.format(&label(&text), &children.to_vec())
        }
        SeedStep::Ip { prefix_id, ip } => {
            let text = format!("Allocated IP in prefix={}:", prefix_id);
            format.format(&label(&text), ip)
        }
    };
    match format {
        OutputFormat::Yaml => format!("---\n{}", out),
        _ => out,
    }
}

fn label(text: &str) -> String {
    text.green().bold().to_string()
}
