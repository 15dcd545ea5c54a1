//! `lanmap show` — print collected records or the merged topology.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

use lanmap_core::model::{DeviceFacts, NeighborReport};
use lanmap_core::store::load_json;
use lanmap_graph::{Topology, build_topology};

use crate::output::{Table, kv, section};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowTarget {
    Facts,
    Neighbors,
    Topology,
}

/// Arguments for `lanmap show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// What to display.
    #[arg(value_enum)]
    pub target: ShowTarget,

    /// Device facts JSON from `lanmap collect`.
    #[arg(long, default_value = "device_facts.json")]
    pub facts: PathBuf,

    /// Neighbor reports JSON from `lanmap neighbors`.
    #[arg(long, default_value = "neighbors.json")]
    pub neighbors: PathBuf,
}

/// # Errors
///
/// When an input file cannot be read or parsed.
pub fn run_show(args: &ShowArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.target {
        ShowTarget::Facts => {
            let facts: Vec<DeviceFacts> = load_json(&args.facts)?;
            show_facts(&mut out, &facts)?;
        }
        ShowTarget::Neighbors => {
            let reports: Vec<NeighborReport> = load_json(&args.neighbors)?;
            show_neighbors(&mut out, &reports)?;
        }
        ShowTarget::Topology => {
            let facts: Vec<DeviceFacts> = load_json(&args.facts)?;
            let reports: Vec<NeighborReport> = load_json(&args.neighbors)?;
            show_topology(&mut out, &build_topology(&facts, &reports))?;
        }
    }
    Ok(())
}

fn show_facts(out: &mut dyn Write, facts: &[DeviceFacts]) -> Result<()> {
    for record in facts {
        section(out, &format!("{} ({})", record.host, record.device_type))?;
        kv(out, "hostname", &record.hostname)?;
        kv(out, "model", &record.model)?;
        kv(out, "os_version", &record.os_version)?;
        kv(out, "collected_at", record.collected_at.to_rfc3339())?;
        if !record.errors.is_empty() {
            kv(out, "errors", record.errors.join("; "))?;
        }
        if !record.interfaces.is_empty() {
            let mut table = Table::new(&["INTERFACE", "IP", "STATUS", "PROTOCOL"]);
            for intf in &record.interfaces {
                table.push_row(vec![
                    intf.name.clone(),
                    intf.ip_address.clone(),
                    intf.status.clone(),
                    intf.protocol.clone(),
                ]);
            }
            table.write_to(out)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn show_neighbors(out: &mut dyn Write, reports: &[NeighborReport]) -> Result<()> {
    for report in reports {
        let name = if report.hostname.is_empty() {
            &report.host
        } else {
            &report.hostname
        };
        section(out, &format!("{name} — {} neighbor(s)", report.neighbor_count()))?;
        let mut table = Table::new(&["PROTO", "LOCAL INTF", "REMOTE DEVICE", "REMOTE INTF"]);
        for nbr in &report.cdp_neighbors {
            table.push_row(vec![
                "cdp".to_string(),
                nbr.local_interface.clone(),
                nbr.remote_device.clone(),
                nbr.remote_interface.clone(),
            ]);
        }
        for nbr in &report.lldp_neighbors {
            table.push_row(vec![
                "lldp".to_string(),
                nbr.local_interface.clone(),
                nbr.remote_device.clone(),
                nbr.remote_interface.clone(),
            ]);
        }
        if !table.is_empty() {
            table.write_to(out)?;
        }
        if !report.errors.is_empty() {
            kv(out, "errors", report.errors.join("; "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn show_topology(out: &mut dyn Write, topo: &Topology) -> Result<()> {
    section(out, "Nodes")?;
    let mut nodes = Table::new(&["ID", "HOSTNAME", "TYPE", "MODEL", "MGMT IP"]);
    for node in topo.nodes.values() {
        nodes.push_row(vec![
            node.id.clone(),
            node.hostname.clone(),
            node.device_type.clone(),
            node.model.clone(),
            node.mgmt_ip.clone(),
        ]);
    }
    nodes.write_to(out)?;

    writeln!(out)?;
    section(out, "Edges")?;
    let mut edges = Table::new(&["SOURCE", "INTF", "TARGET", "INTF"]);
    for edge in &topo.edges {
        edges.push_row(vec![
            edge.source.clone(),
            edge.source_intf.clone(),
            edge.target.clone(),
            edge.target_intf.clone(),
        ]);
    }
    edges.write_to(out)?;
    writeln!(out, "\n{} node(s), {} edge(s)", topo.node_count(), topo.edge_count())?;
    Ok(())
}
