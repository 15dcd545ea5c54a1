//! `lanmap diagram` — build the topology and write diagram files.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use petgraph::algo::connected_components;
use tracing::info;

use lanmap_core::model::{DeviceFacts, NeighborReport};
use lanmap_core::store::load_json;
use lanmap_graph::build_topology;

use crate::diagram::{generate_dot, generate_mermaid, render_graphviz};
use crate::output::kv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiagramFormat {
    Mermaid,
    Dot,
    Png,
    Svg,
    Pdf,
}

/// Arguments for `lanmap diagram`.
#[derive(Args, Debug)]
pub struct DiagramArgs {
    /// Device facts JSON from `lanmap collect`.
    #[arg(long, default_value = "device_facts.json")]
    pub facts: PathBuf,

    /// Neighbor reports JSON from `lanmap neighbors`.
    #[arg(long, default_value = "neighbors.json")]
    pub neighbors: PathBuf,

    /// Output directory.
    #[arg(short, long, default_value = "diagrams")]
    pub output: PathBuf,

    /// Formats to produce; repeatable. png/svg/pdf require graphviz.
    #[arg(short, long, value_enum, default_values = ["mermaid", "dot"])]
    pub format: Vec<DiagramFormat>,
}

/// # Errors
///
/// When an input file cannot be read, an output file cannot be written,
/// or a rendered format was requested without graphviz installed.
pub fn run_diagram(args: &DiagramArgs) -> Result<()> {
    let facts: Vec<DeviceFacts> = load_json(&args.facts)?;
    let reports: Vec<NeighborReport> = load_json(&args.neighbors)?;
    let topo = build_topology(&facts, &reports);

    fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let graph = topo.to_petgraph();
    kv(&mut out, "nodes", topo.node_count().to_string())?;
    kv(&mut out, "edges", topo.edge_count().to_string())?;
    kv(&mut out, "components", connected_components(&graph).to_string())?;

    for format in &args.format {
        let path = match format {
            DiagramFormat::Mermaid => {
                let path = args.output.join("topology.mmd");
                fs::write(&path, generate_mermaid(&topo))
                    .with_context(|| format!("writing {}", path.display()))?;
                path
            }
            DiagramFormat::Dot => {
                let path = args.output.join("topology.dot");
                fs::write(&path, generate_dot(&topo))
                    .with_context(|| format!("writing {}", path.display()))?;
                path
            }
            DiagramFormat::Png | DiagramFormat::Svg | DiagramFormat::Pdf => {
                let ext = match format {
                    DiagramFormat::Png => "png",
                    DiagramFormat::Svg => "svg",
                    _ => "pdf",
                };
                render_graphviz(&topo, &args.output.join("topology.dot"), ext)?
            }
        };
        info!(path = %path.display(), "diagram written");
        kv(&mut out, "wrote", path.display().to_string())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lanmap_core::model::NeighborObservation;
    use lanmap_core::store::save_json;

    #[test]
    fn diagram_writes_mermaid_and_dot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let facts_path = dir.path().join("facts.json");
        let neighbors_path = dir.path().join("neighbors.json");

        let facts = vec![DeviceFacts {
            hostname: "core-rtr-01".to_string(),
            model: "ISR4451".to_string(),
            ..DeviceFacts::empty("10.0.0.1", "cisco_ios")
        }];
        let mut report = NeighborReport {
            host: "10.0.0.1".to_string(),
            device_type: "cisco_ios".to_string(),
            hostname: "core-rtr-01".to_string(),
            cdp_neighbors: Vec::new(),
            lldp_neighbors: Vec::new(),
            collected_at: Utc::now(),
            errors: Vec::new(),
        };
        report.cdp_neighbors.push(NeighborObservation {
            remote_device: "dist-sw-01".to_string(),
            local_interface: "Gi0/1".to_string(),
            remote_interface: "Gi1/0/24".to_string(),
            ..NeighborObservation::default()
        });
        save_json(&facts_path, &facts).expect("save facts");
        save_json(&neighbors_path, &vec![report]).expect("save neighbors");

        let out_dir = dir.path().join("diagrams");
        let args = DiagramArgs {
            facts: facts_path,
            neighbors: neighbors_path,
            output: out_dir.clone(),
            format: vec![DiagramFormat::Mermaid, DiagramFormat::Dot],
        };
        run_diagram(&args).expect("run");

        let mmd = fs::read_to_string(out_dir.join("topology.mmd")).expect("mmd");
        assert!(mmd.contains("core_rtr_01"));
        assert!(mmd.contains("dist_sw_01"));
        let dot = fs::read_to_string(out_dir.join("topology.dot")).expect("dot");
        assert!(dot.contains("\"core-rtr-01\" -- \"dist-sw-01\""));
    }
}
