//! Fortinet FortiOS (FortiGate) output parsing.
//!
//! No CDP. Interface output is `== [port1]` block style with a line-based
//! fallback; LLDP output (`execute lldp info remote-device`) starts each
//! neighbor with an unindented port-name line.

use std::sync::LazyLock;

use regex::Regex;

use super::{VendorParser, capture1, regex, split_before};
use crate::model::{InterfaceStatus, NeighborObservation, VersionInfo};

pub struct FortinetFortios;

static HOSTNAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Hostname:\s*(\S+)"));
static VERSION_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Version:\s*(\S+)\s+(v[\d.]+)"));
static VERSION_ONE_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Version:\s*(\S+)"));
static PLATFORM_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Platform.*?:\s*(\S+)"));

static INTF_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"==\s*\["));
static INTF_NAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"^(\S+?)\]"));
static INTF_IP_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"ip:\s*(\d+\.\d+\.\d+\.\d+)"));
static INTF_STATUS_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"status:\s*(\S+)"));
static INTF_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^(\S+)\s+(\d+\.\d+\.\d+\.\d+)\s+(\S+)"));

static PORT_LINE_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?m)^\S+[ \t]*$"));
static SYSTEM_NAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"System Name:\s*(\S+)"));
static PORT_ID_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Port Id:\s*(\S+)"));
static MGMT_IP_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"Management Address:\s*(\d+\.\d+\.\d+\.\d+)"));
static SYS_DESCR_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?s)System Description:\s*(.+?)(?:\n\s*\n|\z)"));

impl VendorParser for FortinetFortios {
    fn parse_version(&self, output: &str) -> VersionInfo {
        let mut info = VersionInfo::default();

        if let Some(hostname) = capture1(&HOSTNAME_RE, output) {
            info.hostname = hostname;
        }
        // "Version: FortiGate-600E v7.2.5,build1517,230530 (GA.F)"
        if let Some(caps) = VERSION_PAIR_RE.captures(output) {
            info.model = caps[1].to_string();
            info.os_version = caps[2].to_string();
        } else if let Some(model) = capture1(&VERSION_ONE_RE, output) {
            info.model = model;
        }
        // Some firmware adds "Platform Full Name: FortiGate-600E".
        if info.model.is_empty() {
            if let Some(model) = capture1(&PLATFORM_RE, output) {
                info.model = model;
            }
        }

        info
    }

    fn parse_interfaces(&self, output: &str) -> Vec<InterfaceStatus> {
        let mut interfaces = Vec::new();

        for block in INTF_BLOCK_RE.split(output) {
            if block.trim().is_empty() {
                continue;
            }
            let Some(name) = capture1(&INTF_NAME_RE, block) else {
                continue;
            };
            interfaces.push(InterfaceStatus {
                name,
                ip_address: capture1(&INTF_IP_RE, block).unwrap_or_default(),
                status: capture1(&INTF_STATUS_RE, block).unwrap_or_else(|| "unknown".to_string()),
                protocol: String::new(),
            });
        }

        // Simpler firmware prints one interface per line.
        if interfaces.is_empty() {
            for line in output.lines() {
                if let Some(caps) = INTF_LINE_RE.captures(line) {
                    interfaces.push(InterfaceStatus {
                        name: caps[1].to_string(),
                        ip_address: caps[2].to_string(),
                        status: caps[3].to_string(),
                        protocol: String::new(),
                    });
                }
            }
        }

        interfaces
    }

    fn parse_cdp_neighbors(&self, _output: &str) -> Vec<NeighborObservation> {
        Vec::new()
    }

    fn parse_lldp_neighbors(&self, output: &str) -> Vec<NeighborObservation> {
        let mut neighbors = Vec::new();
        for block in split_before(&PORT_LINE_RE, output) {
            if block.trim().is_empty() {
                continue;
            }
            let Some(remote_device) = capture1(&SYSTEM_NAME_RE, block) else {
                continue;
            };
            let mut neighbor = NeighborObservation {
                remote_device,
                ..NeighborObservation::default()
            };
            // The local interface is the unindented first line of the block.
            if let Some(first) = block.trim().lines().next() {
                let first = first.trim();
                if !first.is_empty() && !first.contains(char::is_whitespace) {
                    neighbor.local_interface = first.to_string();
                }
            }
            if let Some(port) = capture1(&PORT_ID_RE, block) {
                neighbor.remote_interface = port;
            }
            if let Some(ip) = capture1(&MGMT_IP_RE, block) {
                neighbor.remote_mgmt_ip = ip;
            }
            if let Some(descr) = capture1(&SYS_DESCR_RE, block) {
                neighbor.remote_platform = descr
                    .trim()
                    .lines()
                    .next()
                    .unwrap_or("")
                    .to_string();
            }
            neighbors.push(neighbor);
        }
        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GET_SYSTEM_STATUS: &str = "\
Version: FortiGate-600E v7.2.5,build1517,230530 (GA.F)
Virus-DB: 91.04403(2023-05-30 12:34)
Serial-Number: FG6H0E0000000000
Hostname: branch-fw-01
Operation Mode: NAT
";

    const GET_SYSTEM_INTERFACE: &str = "\
== [port1]
name: port1   mode: static
ip: 10.7.0.2 255.255.255.252
status: up
== [port2]
name: port2   mode: static
ip: 192.168.100.1 255.255.255.0
status: up
== [port3]
name: port3   mode: static
status: down
";

    const LLDP_REMOTE_DEVICE: &str = "\
port1
  Chassis Id: 00:1c:57:aa:bb:06
  System Name: border-rtr-01
  System Description: Juniper Networks, Inc. mx240
  Port Id: ge-0/0/1
  Management Address: 10.0.0.6
";

    #[test]
    fn status_line_yields_model_and_version() {
        let info = FortinetFortios.parse_version(GET_SYSTEM_STATUS);
        assert_eq!(info.hostname, "branch-fw-01");
        assert_eq!(info.model, "FortiGate-600E");
        assert_eq!(info.os_version, "v7.2.5");
    }

    #[test]
    fn version_falls_back_to_platform_full_name() {
        let info =
            FortinetFortios.parse_version("Platform Full Name: FortiGate-100F\nHostname: fw\n");
        assert_eq!(info.model, "FortiGate-100F");
        assert_eq!(info.os_version, "");
    }

    #[test]
    fn interfaces_parse_bracket_blocks() {
        let interfaces = FortinetFortios.parse_interfaces(GET_SYSTEM_INTERFACE);
        assert_eq!(interfaces.len(), 3);
        assert_eq!(interfaces[0].name, "port1");
        assert_eq!(interfaces[0].ip_address, "10.7.0.2");
        assert_eq!(interfaces[0].status, "up");
        assert_eq!(interfaces[2].name, "port3");
        assert_eq!(interfaces[2].ip_address, "");
        assert_eq!(interfaces[2].status, "down");
    }

    #[test]
    fn interfaces_fall_back_to_plain_lines() {
        let interfaces = FortinetFortios.parse_interfaces("wan1 203.0.113.9 up\n");
        assert_eq!(interfaces.len(), 1);
        assert_eq!(interfaces[0].name, "wan1");
        assert_eq!(interfaces[0].status, "up");
    }

    #[test]
    fn lldp_block_starts_with_local_port() {
        let neighbors = FortinetFortios.parse_lldp_neighbors(LLDP_REMOTE_DEVICE);
        assert_eq!(neighbors.len(), 1);
        let nbr = &neighbors[0];
        assert_eq!(nbr.local_interface, "port1");
        assert_eq!(nbr.remote_device, "border-rtr-01");
        assert_eq!(nbr.remote_interface, "ge-0/0/1");
        assert_eq!(nbr.remote_mgmt_ip, "10.0.0.6");
        assert_eq!(nbr.remote_platform, "Juniper Networks, Inc. mx240");
    }

    #[test]
    fn cdp_is_always_empty() {
        assert!(FortinetFortios.parse_cdp_neighbors("anything").is_empty());
    }
}
