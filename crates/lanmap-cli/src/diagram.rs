//! Diagram generation: Mermaid and Graphviz DOT text from a topology,
//! plus optional rendering through the `dot` binary.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::info;

use lanmap_graph::{Node, Topology};

/// Graphviz shape per device-type tag. Firewalls stand out as octagons;
/// stub nodes with no known type stay plain.
fn dot_shape(device_type: &str) -> &'static str {
    match device_type {
        "paloalto_panos" | "fortinet" | "fortinet_ssh" => "octagon",
        "" => "ellipse",
        _ => "box3d",
    }
}

fn is_firewall(node: &Node) -> bool {
    node.device_type.contains("paloalto") || node.device_type.contains("fortinet")
}

fn dot_escape(text: &str) -> String {
    text.replace('"', "\\\"").replace('\n', "\\n")
}

fn edge_label(source_intf: &str, target_intf: &str) -> String {
    [source_intf, target_intf]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" <-> ")
}

/// Graphviz DOT source for the topology.
#[must_use]
pub fn generate_dot(topo: &Topology) -> String {
    let mut out = String::new();
    out.push_str("graph network_topology {\n");
    out.push_str(
        "    graph [layout=neato, overlap=false, splines=true, bgcolor=\"#f8f9fa\"];\n",
    );
    out.push_str(
        "    node  [style=filled, fillcolor=\"#dce6f1\", fontname=\"Helvetica\", fontsize=10];\n",
    );
    out.push_str("    edge  [fontname=\"Helvetica\", fontsize=8, color=\"#555555\"];\n\n");

    for (id, node) in &topo.nodes {
        let _ = writeln!(
            out,
            "    \"{id}\" [label=\"{}\", shape={}];",
            dot_escape(&node.label()),
            dot_shape(&node.device_type)
        );
    }
    out.push('\n');

    for edge in &topo.edges {
        let _ = writeln!(
            out,
            "    \"{}\" -- \"{}\" [label=\"{}\"];",
            edge.source,
            edge.target,
            dot_escape(&edge_label(&edge.source_intf, &edge.target_intf))
        );
    }
    out.push_str("}\n");
    out
}

/// Mermaid-safe node id.
fn mermaid_id(name: &str) -> String {
    name.replace(['-', '.', '/'], "_")
}

/// Mermaid `graph TD` source for the topology, with router/firewall
/// class styling.
#[must_use]
pub fn generate_mermaid(topo: &Topology) -> String {
    let mut out = String::from("graph TD\n");

    for (id, node) in &topo.nodes {
        let name = if node.hostname.is_empty() {
            id
        } else {
            &node.hostname
        };
        let mut label = name.clone();
        if !node.model.is_empty() {
            let _ = write!(label, "<br/>{}", node.model);
        }
        if !node.os_version.is_empty() {
            let _ = write!(label, "<br/>{}", node.os_version);
        }
        let _ = writeln!(out, "    {}[\"{label}\"]", mermaid_id(id));
    }
    out.push('\n');

    for edge in &topo.edges {
        let src = mermaid_id(&edge.source);
        let tgt = mermaid_id(&edge.target);
        let label = edge_label(&edge.source_intf, &edge.target_intf);
        if label.is_empty() {
            let _ = writeln!(out, "    {src} --- {tgt}");
        } else {
            let _ = writeln!(out, "    {src} -- \"{label}\" --- {tgt}");
        }
    }

    out.push_str("\n    %% Styling\n");
    out.push_str("    classDef router fill:#dce6f1,stroke:#333,stroke-width:1px;\n");
    out.push_str("    classDef firewall fill:#f9d6d5,stroke:#333,stroke-width:1px;\n");

    let mut routers = Vec::new();
    let mut firewalls = Vec::new();
    for (id, node) in &topo.nodes {
        if is_firewall(node) {
            firewalls.push(mermaid_id(id));
        } else {
            routers.push(mermaid_id(id));
        }
    }
    if !routers.is_empty() {
        let _ = writeln!(out, "    class {} router;", routers.join(","));
    }
    if !firewalls.is_empty() {
        let _ = writeln!(out, "    class {} firewall;", firewalls.join(","));
    }

    out
}

/// Render the topology to an image by piping DOT source through the `dot`
/// binary. Returns the output path.
///
/// # Errors
///
/// When `dot` is not installed or exits nonzero.
pub fn render_graphviz(topo: &Topology, dot_path: &Path, format: &str) -> Result<PathBuf> {
    let out_path = dot_path.with_extension(format);
    std::fs::write(dot_path, generate_dot(topo))
        .with_context(|| format!("writing {}", dot_path.display()))?;

    let status = Command::new("dot")
        .arg(format!("-T{format}"))
        .arg(dot_path)
        .arg("-o")
        .arg(&out_path)
        .status()
        .context("running 'dot'; is graphviz installed?")?;
    if !status.success() {
        bail!("dot exited with {status}");
    }
    info!(path = %out_path.display(), "graphviz diagram rendered");
    Ok(out_path)
}
