//! Output formatting

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::client::{AllocatedIp, FreeSpace, Health, Prefix, Tenant, Vrf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
            .map_err(|_| format!("unknown output format: {} (table|json|yaml)", s))
    }
}

/// Human-readable rendering used by the table format
pub trait Render {
    fn render(&self) -> String;
}

impl OutputFormat {
    /// Print `data`; `label` heads the human-readable form only
    pub fn print<T: Serialize + Render>(&self, label: &str, data: &T) {
        let label = label.green().bold().to_string();
        println!("{}", self.format(&label, data));
    }

    pub fn format<T: Serialize + Render>(&self, label: &str, data: &T) -> String {
        match self {
            OutputFormat::Json => serde_json::to_string_pretty(data).unwrap_or_default(),
            OutputFormat::Yaml => serde_yaml::to_string(data)
                .unwrap_or_default()
                .trim_end()
                .to_string(),
            OutputFormat::Table => {
                let body = data.render();
                if body.contains('\n') {
                    format!("{}\n{}", label, body)
                } else {
                    format!("{} {}", label, body)
                }
            }
        }
    }
}

fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}

impl Render for Tenant {
    fn render(&self) -> String {
        format!("{}  id={}", self.name, self.id)
    }
}

impl Render for Vrf {
    fn render(&self) -> String {
        format!(
            "{}  id={}  tenant={}  rd={}",
            self.name,
            self.id,
            self.tenant_id,
            or_dash(self.rd.as_deref())
        )
    }
}

impl Render for Prefix {
    fn render(&self) -> String {
        let mut line = format!(
            "{}  id={}  vrf={}  status={}",
            self.cidr,
            self.id,
            self.vrf_id,
            self.status.map(|s| s.as_str()).unwrap_or("-")
        );
        if let Some(parent) = self.parent_id.as_deref().filter(|p| !p.is_empty()) {
            line.push_str(&format!("  parent={}", parent));
        }
        line
    }
}

impl Render for AllocatedIp {
    fn render(&self) -> String {
        format!("{} (id={})", self.address, self.id)
    }
}

impl Render for Health {
    fn render(&self) -> String {
        let state = if self.ok { "ok" } else { "unhealthy" };
        state.to_string()
    }
}

#[derive(Tabled)]
struct PrefixRow {
    #[tabled(rename = "CIDR")]
    cidr: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

impl Render for [Prefix] {
    fn render(&self) -> String {
        let rows = self.iter().map(|p| PrefixRow {
            cidr: p.cidr.clone(),
            id: p.id.clone(),
            status: p.status.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
        });
        Table::new(rows).with(Style::psql()).to_string()
    }
}

#[derive(Tabled)]
struct FreeSpaceRow {
    #[tabled(rename = "FREE CIDR")]
    cidr: String,
}

impl Render for [FreeSpace] {
    fn render(&self) -> String {
        let rows = self.iter().map(|f| FreeSpaceRow { cidr: f.cidr.clone() });
        Table::new(rows).with(Style::psql()).to_string()
    }
}

impl<T> Render for Vec<T>
where
    [T]: Render,
{
    fn render(&self) -> String {
        self.as_slice().render()
    }
}
