//! Cisco NX-OS (Nexus) output parsing.
//!
//! Same dashed-separator block structure as IOS for neighbor detail, but
//! different field labels (`Device name:`, `Mgmt address:`, `Local Port id:`).

use std::sync::LazyLock;

use regex::Regex;

use super::{VendorParser, capture1, regex, starts_with_ipv4};
use crate::model::{InterfaceStatus, NeighborObservation, VersionInfo};

pub struct CiscoNxos;

static HOSTNAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Device name:\s*(\S+)"));
static NXOS_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)NXOS.*?version\s+(\S+)"));
static SYSTEM_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)system:\s+version\s+(\S+)"));
static HARDWARE_MODEL_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)Hardware\n\s+cisco\s+(\S+)"));
static CHASSIS_MODEL_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)cisco\s+(Nexus[\w\s]+?)\s+Chassis"));

static BLOCK_SEP_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"-{10,}"));
static DEVICE_ID_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Device ID:\s*(\S+)"));
static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)(?:IPv4 Address|Mgmt address):\s*(\S+)"));
static PLATFORM_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Platform:\s*([^,\n]+)"));
static INTF_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"Interface:\s*(\S+),\s*Port ID.*?:\s*(\S+)"));

static SYSTEM_NAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"System Name:\s*(\S+)"));
static MGMT_IP_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?s)Management Address.*?:\s*(\d+\.\d+\.\d+\.\d+)"));
static PORT_ID_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Port id:\s*(\S+)"));
static LOCAL_PORT_ID_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Local Port id:\s*(\S+)"));

impl VendorParser for CiscoNxos {
    fn parse_version(&self, output: &str) -> VersionInfo {
        let mut info = VersionInfo::default();

        if let Some(hostname) = capture1(&HOSTNAME_RE, output) {
            info.hostname = hostname;
        }
        if let Some(version) = capture1(&NXOS_VERSION_RE, output)
            .or_else(|| capture1(&SYSTEM_VERSION_RE, output))
        {
            info.os_version = version;
        }
        if let Some(model) = capture1(&HARDWARE_MODEL_RE, output)
            .or_else(|| capture1(&CHASSIS_MODEL_RE, output))
        {
            info.model = model;
        }

        info
    }

    fn parse_interfaces(&self, output: &str) -> Vec<InterfaceStatus> {
        let mut interfaces = Vec::new();
        for line in output.lines() {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                continue;
            }
            let name = parts[0];
            if name.eq_ignore_ascii_case("interface") || name.eq_ignore_ascii_case("ip") {
                continue;
            }
            interfaces.push(InterfaceStatus {
                name: name.to_string(),
                ip_address: if starts_with_ipv4(parts[1]) {
                    parts[1].to_string()
                } else {
                    String::new()
                },
                status: parts[2].to_string(),
                protocol: String::new(),
            });
        }
        interfaces
    }

    fn parse_cdp_neighbors(&self, output: &str) -> Vec<NeighborObservation> {
        let mut neighbors = Vec::new();
        for block in BLOCK_SEP_RE.split(output) {
            if block.trim().is_empty() {
                continue;
            }
            let Some(remote_device) = capture1(&DEVICE_ID_RE, block) else {
                continue;
            };
            let mut neighbor = NeighborObservation {
                remote_device,
                ..NeighborObservation::default()
            };
            if let Some(ip) = capture1(&ADDRESS_RE, block) {
                neighbor.remote_mgmt_ip = ip;
            }
            if let Some(platform) = capture1(&PLATFORM_RE, block) {
                neighbor.remote_platform = platform.trim().to_string();
            }
            if let Some(caps) = INTF_PAIR_RE.captures(block) {
                neighbor.local_interface = caps[1].to_string();
                neighbor.remote_interface = caps[2].to_string();
            }
            neighbors.push(neighbor);
        }
        neighbors
    }

    fn parse_lldp_neighbors(&self, output: &str) -> Vec<NeighborObservation> {
        let mut neighbors = Vec::new();
        for block in BLOCK_SEP_RE.split(output) {
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
            if let Some(ip) = capture1(&MGMT_IP_RE, block) {
                neighbor.remote_mgmt_ip = ip;
            }
            // "Local Port id" also matches the bare "Port id" pattern, so
            // the remote side must exclude lines prefixed with "Local".
            for caps in PORT_ID_RE.captures_iter(block) {
                let start = caps.get(0).map_or(0, |m| m.start());
                let is_local = block[..start].ends_with("Local ");
                if is_local {
                    neighbor.local_interface = caps[1].to_string();
                } else if neighbor.remote_interface.is_empty() {
                    neighbor.remote_interface = caps[1].to_string();
                }
            }
            if neighbor.local_interface.is_empty() {
                if let Some(local) = capture1(&LOCAL_PORT_ID_RE, block) {
                    neighbor.local_interface = local;
                }
            }
            neighbors.push(neighbor);
        }
        neighbors
    }
}
