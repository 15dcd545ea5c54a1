//! Cisco IOS / IOS-XE output parsing.
//!
//! Neighbor detail output separates entries with dashed rule lines, so both
//! CDP and LLDP parsing split on `----------` runs and extract fields per
//! block.

use std::sync::LazyLock;

use regex::Regex;

use super::{VendorParser, capture1, regex};
use crate::model::{InterfaceStatus, NeighborObservation, VersionInfo};

pub struct CiscoIos;

static HOSTNAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"(\S+)\s+uptime is"));
static OS_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)Cisco IOS.*?Version\s+(\S+)"));
static MODEL_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"[Cc]isco\s+([\w\-/]+)\s+.*?processor"));
static MODEL_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Model [Nn]umber\s*:\s*(\S+)"));

static BLOCK_SEP_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"-{10,}"));
static DEVICE_ID_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Device ID:\s*(\S+)"));
static IP_ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"IP address:\s*(\S+)"));
static PLATFORM_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Platform:\s*(.+?),"));
static INTF_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"Interface:\s*(\S+),\s*Port ID.*?:\s*(\S+)"));
static CDP_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?s)Version\s*:\s*\n(.+?)(?:\n\n|\z)"));

static SYSTEM_NAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"System Name:\s*(\S+)"));
static MGMT_IP_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?s)Management Addresses?.*?IP:\s*(\S+)"));
static SYS_DESCR_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?s)System Description:\s*\n(.+?)(?:\n\n|\z)"));
static LOCAL_INTF_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Local Intf:\s*(\S+)"));
static PORT_ID_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Port id:\s*(\S+)"));

impl VendorParser for CiscoIos {
    fn parse_version(&self, output: &str) -> VersionInfo {
        let mut info = VersionInfo::default();

        if let Some(hostname) = capture1(&HOSTNAME_RE, output) {
            info.hostname = hostname;
        }
        // e.g. "15.7(3)M6" or "17.03.04", sometimes with a trailing comma
        if let Some(version) = capture1(&OS_VERSION_RE, output) {
            info.os_version = version.trim_end_matches(',').to_string();
        }
        if let Some(model) =
            capture1(&MODEL_RE, output).or_else(|| capture1(&MODEL_NUMBER_RE, output))
        {
            info.model = model;
        }

        info
    }

    fn parse_interfaces(&self, output: &str) -> Vec<InterfaceStatus> {
        // `show ip interface brief`: Interface, IP-Address, OK?, Method,
        // Status, Protocol
        let mut interfaces = Vec::new();
        for line in output.lines() {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 6 {
                continue;
            }
            let name = parts[0];
            if name.eq_ignore_ascii_case("interface") {
                continue;
            }
            interfaces.push(InterfaceStatus {
                name: name.to_string(),
                ip_address: if parts[1] == "unassigned" {
                    String::new()
                } else {
                    parts[1].to_string()
                },
                status: parts[4].to_string(),
                protocol: parts[5].to_string(),
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
            if let Some(ip) = capture1(&IP_ADDRESS_RE, block) {
                neighbor.remote_mgmt_ip = ip;
            }
            if let Some(platform) = capture1(&PLATFORM_RE, block) {
                neighbor.remote_platform = platform.trim().to_string();
            }
            if let Some(caps) = INTF_PAIR_RE.captures(block) {
                neighbor.local_interface = caps[1].to_string();
                neighbor.remote_interface = caps[2].to_string();
            }
            if let Some(version) = capture1(&CDP_VERSION_RE, block) {
                neighbor.remote_os_version = version.trim().to_string();
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
            if let Some(descr) = capture1(&SYS_DESCR_RE, block) {
                neighbor.remote_platform = descr.trim().to_string();
            }
            if let Some(local) = capture1(&LOCAL_INTF_RE, block) {
                neighbor.local_interface = local;
            }
            if let Some(port) = capture1(&PORT_ID_RE, block) {
                neighbor.remote_interface = port;
            }
            neighbors.push(neighbor);
        }
        neighbors
    }
}
