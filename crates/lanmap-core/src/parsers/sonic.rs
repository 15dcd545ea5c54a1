//! SONiC (Software for Open Networking in the Cloud) output parsing.
//!
//! No CDP. LLDP parsing handles lldpctl-style `Interface:` blocks first
//! and falls back to the brief table when no block yielded a record.
//! Interface rows are recognized by name prefix (Ethernet, Loopback, ...)
//! because SONiC tables vary by command and firmware.

use std::sync::LazyLock;

use regex::Regex;

use super::{VendorParser, capture1, regex, split_before, starts_with_ipv4};
use crate::model::{InterfaceStatus, NeighborObservation, VersionInfo};

pub struct Sonic;

static HOSTNAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)Hostname:\s*(\S+)"));
static SONIC_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)SONiC Software Version:\s*(\S+)"));
static SOFTWARE_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)Software Version:\s*(\S+)"));
static HWSKU_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)HwSKU:\s*(\S+)"));
static PLATFORM_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)Platform:\s*(\S+)"));

static INTF_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)^(Ethernet|Loopback|Vlan|PortChannel|Management)\d*"));

static INTF_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Interface:\s+\S+"));
static INTF_LOCAL_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Interface:\s+(\S+)"));
static SYS_NAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"SysName:\s*(\S+)"));
static PORT_ID_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"PortID:\s*(?:ifname\s+)?(\S+)"));
static MGMT_IP_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"MgmtIP:\s*(\d+\.\d+\.\d+\.\d+)"));
static SYS_DESCR_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?s)SysDescr:\s*(.+?)(?:\n\s*\n|\z)"));
static TABLE_INTF_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)^(Ethernet|PortChannel)"));

const STATUS_WORDS: &[&str] = &["up", "down", "up/up", "up/down", "down/down"];

impl VendorParser for Sonic {
    fn parse_version(&self, output: &str) -> VersionInfo {
        let mut info = VersionInfo::default();

        if let Some(hostname) = capture1(&HOSTNAME_RE, output) {
            info.hostname = hostname;
        }
        if let Some(version) = capture1(&SONIC_VERSION_RE, output)
            .or_else(|| capture1(&SOFTWARE_VERSION_RE, output))
        {
            info.os_version = version;
        }
        if let Some(model) =
            capture1(&HWSKU_RE, output).or_else(|| capture1(&PLATFORM_RE, output))
        {
            info.model = model;
        }

        info
    }

    fn parse_interfaces(&self, output: &str) -> Vec<InterfaceStatus> {
        let mut interfaces = Vec::new();
        for line in output.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('-') {
                continue;
            }
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                continue;
            }
            let name = parts[0];
            if !INTF_NAME_RE.is_match(name) {
                continue;
            }

            let ip = parts[1..]
                .iter()
                .find(|p| starts_with_ipv4(p))
                .copied()
                .unwrap_or("");
            let status = parts[1..]
                .iter()
                .find(|p| STATUS_WORDS.contains(&p.to_lowercase().as_str()))
                .copied()
                .unwrap_or("unknown");

            interfaces.push(InterfaceStatus {
                name: name.to_string(),
                ip_address: ip.to_string(),
                status: status.to_string(),
                protocol: String::new(),
            });
        }
        interfaces
    }

    fn parse_cdp_neighbors(&self, _output: &str) -> Vec<NeighborObservation> {
        Vec::new()
    }

    fn parse_lldp_neighbors(&self, output: &str) -> Vec<NeighborObservation> {
        let mut neighbors = Vec::new();

        for block in split_before(&INTF_HEAD_RE, output) {
            if block.trim().is_empty() {
                continue;
            }
            let Some(remote_device) = capture1(&SYS_NAME_RE, block) else {
                continue;
            };
            let mut neighbor = NeighborObservation {
                remote_device,
                ..NeighborObservation::default()
            };
            if let Some(local) = capture1(&INTF_LOCAL_RE, block) {
                neighbor.local_interface = local.trim_end_matches(',').to_string();
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

        // Brief table: "Ethernet0    spine-01    Ethernet4    Ethernet4"
        if neighbors.is_empty() {
            for line in output.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('-') {
                    continue;
                }
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() >= 3 && TABLE_INTF_RE.is_match(parts[0]) {
                    neighbors.push(NeighborObservation {
                        remote_device: parts[1].to_string(),
                        local_interface: parts[0].to_string(),
                        remote_interface: parts[2].to_string(),
                        ..NeighborObservation::default()
                    });
                }
            }
        }

        neighbors
    }
}
