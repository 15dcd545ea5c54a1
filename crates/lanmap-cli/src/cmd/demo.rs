//! `lanmap demo` — full pipeline on built-in sample data.
//!
//! Writes the sample facts, neighbor reports, topology, and diagrams to
//! the output directory, then prints the Mermaid source for a quick
//! paste into a renderer. No captures or devices needed.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use clap::Args;
use tracing::warn;

use lanmap_core::model::{DeviceFacts, InterfaceStatus, NeighborObservation, NeighborReport};
use lanmap_core::store::save_json;
use lanmap_graph::build_topology;

use crate::diagram::{generate_dot, generate_mermaid, render_graphviz};
use crate::output::{kv, section};

/// Arguments for `lanmap demo`.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Output directory for the generated files.
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,
}

/// # Errors
///
/// When the output directory or its files cannot be written. A missing
/// graphviz binary only skips the PNG render.
pub fn run_demo(args: &DemoArgs) -> Result<()> {
    let facts = sample_facts();
    let reports = sample_reports();

    fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    save_json(&args.output.join("device_facts.json"), &facts)?;
    save_json(&args.output.join("neighbors.json"), &reports)?;

    let topo = build_topology(&facts, &reports);
    save_json(&args.output.join("topology.json"), &topo)?;

    fs::write(args.output.join("topology.mmd"), generate_mermaid(&topo))
        .context("writing topology.mmd")?;
    fs::write(args.output.join("topology.dot"), generate_dot(&topo))
        .context("writing topology.dot")?;
    if let Err(err) = render_graphviz(&topo, &args.output.join("topology.dot"), "png") {
        warn!(%err, "skipping PNG render");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    section(&mut out, "Demo topology")?;
    kv(&mut out, "devices", facts.len().to_string())?;
    kv(&mut out, "nodes", topo.node_count().to_string())?;
    kv(&mut out, "edges", topo.edge_count().to_string())?;
    kv(&mut out, "output", args.output.display().to_string())?;
    writeln!(out, "\nMermaid source (paste into https://mermaid.live):\n")?;
    writeln!(out, "{}", generate_mermaid(&topo))?;
    Ok(())
}

/// Fixed stamp so repeated demo runs diff clean.
fn demo_timestamp() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 21, 12, 0, 0)
        .single()
        .expect("fixed demo timestamp is unambiguous")
}

fn intf(name: &str, ip: &str, status: &str, protocol: &str) -> InterfaceStatus {
    InterfaceStatus {
        name: name.to_string(),
        ip_address: ip.to_string(),
        status: status.to_string(),
        protocol: protocol.to_string(),
    }
}

fn device(
    host: &str,
    device_type: &str,
    hostname: &str,
    model: &str,
    os_version: &str,
    interfaces: Vec<InterfaceStatus>,
) -> DeviceFacts {
    DeviceFacts {
        host: host.to_string(),
        device_type: device_type.to_string(),
        hostname: hostname.to_string(),
        model: model.to_string(),
        os_version: os_version.to_string(),
        interfaces,
        collected_at: demo_timestamp(),
        errors: Vec::new(),
    }
}

fn nbr(remote: &str, mgmt_ip: &str, platform: &str, local: &str, remote_intf: &str) -> NeighborObservation {
    NeighborObservation {
        remote_device: remote.to_string(),
        remote_mgmt_ip: mgmt_ip.to_string(),
        remote_platform: platform.to_string(),
        remote_os_version: String::new(),
        local_interface: local.to_string(),
        remote_interface: remote_intf.to_string(),
    }
}

fn report(
    host: &str,
    device_type: &str,
    hostname: &str,
    cdp: Vec<NeighborObservation>,
    lldp: Vec<NeighborObservation>,
) -> NeighborReport {
    NeighborReport {
        host: host.to_string(),
        device_type: device_type.to_string(),
        hostname: hostname.to_string(),
        cdp_neighbors: cdp,
        lldp_neighbors: lldp,
        collected_at: demo_timestamp(),
        errors: Vec::new(),
    }
}

/// A nine-device campus: core router, two distribution switches, access,
/// two firewalls, a border router, a spine, and a campus switch.
fn sample_facts() -> Vec<DeviceFacts> {
    vec![
        device(
            "10.0.0.1",
            "cisco_ios",
            "core-rtr-01",
            "ISR4451-X",
            "17.03.04",
            vec![
                intf("GigabitEthernet0/0", "10.0.0.1", "up", "up"),
                intf("GigabitEthernet0/1", "10.1.0.1", "up", "up"),
                intf("GigabitEthernet0/2", "10.2.0.1", "up", "up"),
                intf("Loopback0", "1.1.1.1", "up", "up"),
            ],
        ),
        device(
            "10.0.0.2",
            "cisco_nxos",
            "dist-sw-01",
            "Nexus9300",
            "10.3(2)",
            vec![
                intf("Ethernet1/1", "10.1.0.2", "up", ""),
                intf("Ethernet1/2", "10.3.0.1", "up", ""),
                intf("Vlan10", "192.168.10.1", "up", ""),
            ],
        ),
        device(
            "10.0.0.3",
            "cisco_nxos",
            "dist-sw-02",
            "Nexus9300",
            "10.3(2)",
            vec![
                intf("Ethernet1/1", "10.2.0.2", "up", ""),
                intf("Ethernet1/2", "10.4.0.1", "up", ""),
                intf("Vlan20", "192.168.20.1", "up", ""),
            ],
        ),
        device(
            "10.0.0.4",
            "arista_eos",
            "access-sw-01",
            "DCS-7050TX",
            "4.28.3M",
            vec![
                intf("Ethernet1", "10.3.0.2", "up", "up"),
                intf("Ethernet2", "", "up", "up"),
                intf("Management1", "10.0.0.4", "up", "up"),
            ],
        ),
        device(
            "10.0.0.5",
            "paloalto_panos",
            "edge-fw-01",
            "PA-3260",
            "10.2.5",
            vec![
                intf("ethernet1/1", "203.0.113.1/24", "up", ""),
                intf("ethernet1/2", "10.5.0.1/24", "up", ""),
            ],
        ),
        device(
            "10.0.0.6",
            "juniper_junos",
            "border-rtr-01",
            "MX240",
            "21.4R3-S5.4",
            vec![
                intf("ge-0/0/0", "10.6.0.1/30", "up", "up"),
                intf("ge-0/0/1", "10.7.0.1/30", "up", "up"),
                intf("lo0", "6.6.6.6/32", "up", "up"),
            ],
        ),
        device(
            "10.0.0.7",
            "fortinet",
            "branch-fw-01",
            "FortiGate-600E",
            "v7.2.5",
            vec![
                intf("port1", "10.7.0.2", "up", ""),
                intf("port2", "192.168.100.1", "up", ""),
                intf("port3", "", "down", ""),
            ],
        ),
        device(
            "10.0.0.8",
            "sonic_ssh",
            "spine-sw-01",
            "DellEMC-Z9332f-O32",
            "SONiC.4.1.0",
            vec![
                intf("Ethernet0", "10.8.0.1/31", "up", ""),
                intf("Ethernet4", "10.8.0.3/31", "up", ""),
                intf("Loopback0", "10.1.0.32/32", "up", ""),
            ],
        ),
        device(
            "10.0.0.9",
            "extreme_exos",
            "campus-sw-01",
            "X460-48t",
            "31.7.1.4",
            vec![
                intf("1", "10.9.0.1", "up", ""),
                intf("2", "", "up", ""),
                intf("mgmt", "10.0.0.9", "up", ""),
            ],
        ),
    ]
}

fn sample_reports() -> Vec<NeighborReport> {
    vec![
        report(
            "10.0.0.1",
            "cisco_ios",
            "core-rtr-01",
            vec![
                nbr("dist-sw-01", "10.0.0.2", "Nexus9300", "GigabitEthernet0/1", "Ethernet1/1"),
                nbr("dist-sw-02", "10.0.0.3", "Nexus9300", "GigabitEthernet0/2", "Ethernet1/1"),
            ],
            vec![nbr("edge-fw-01", "10.0.0.5", "", "GigabitEthernet0/0", "ethernet1/2")],
        ),
        report(
            "10.0.0.2",
            "cisco_nxos",
            "dist-sw-01",
            vec![
                nbr("core-rtr-01", "10.0.0.1", "ISR4451-X", "Ethernet1/1", "GigabitEthernet0/1"),
                nbr("access-sw-01", "10.0.0.4", "DCS-7050TX", "Ethernet1/2", "Ethernet1"),
            ],
            vec![],
        ),
        report(
            "10.0.0.3",
            "cisco_nxos",
            "dist-sw-02",
            vec![nbr("core-rtr-01", "10.0.0.1", "ISR4451-X", "Ethernet1/1", "GigabitEthernet0/2")],
            vec![],
        ),
        report(
            "10.0.0.6",
            "juniper_junos",
            "border-rtr-01",
            vec![],
            vec![
                nbr("core-rtr-01", "10.0.0.1", "", "ge-0/0/0", "GigabitEthernet0/3"),
                nbr("branch-fw-01", "10.0.0.7", "", "ge-0/0/1", "port1"),
            ],
        ),
        report(
            "10.0.0.8",
            "sonic_ssh",
            "spine-sw-01",
            vec![],
            vec![
                nbr("dist-sw-02", "10.0.0.3", "", "Ethernet0", "Ethernet1/2"),
                nbr("campus-sw-01", "10.0.0.9", "", "Ethernet4", "1"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_data_builds_a_connected_campus() {
        let topo = build_topology(&sample_facts(), &sample_reports());
        // Every device is directly collected, so no stubs appear.
        assert_eq!(topo.node_count(), 9);
        // Reverse observations collapse: 8 distinct links.
        assert_eq!(topo.edge_count(), 8);
        assert_eq!(topo.nodes["core-rtr-01"].model, "ISR4451-X");
    }

    #[test]
    fn demo_writes_all_artifacts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args = DemoArgs {
            output: dir.path().join("out"),
        };
        run_demo(&args).expect("run");
        for name in ["device_facts.json", "neighbors.json", "topology.json", "topology.mmd", "topology.dot"] {
            assert!(args.output.join(name).exists(), "missing {name}");
        }
    }
}
