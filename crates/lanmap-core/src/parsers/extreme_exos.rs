//! Extreme Networks ExtremeXOS (EXOS) output parsing.
//!
//! Neighbor detail output groups entries under `LLDP Port N` / `CDP Port N`
//! headings. Interface output is heuristic line parsing because EXOS mixes
//! several table layouts (`show ipconfig`, `show ports`).

use std::sync::LazyLock;

use regex::Regex;

use super::{VendorParser, capture1, regex, split_before, starts_with_ipv4};
use crate::model::{InterfaceStatus, NeighborObservation, VersionInfo};

pub struct ExtremeExos;

static SYSNAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)SysName\s*:\s*(\S+)"));
static SYSTEM_NAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)System Name\s*:\s*(\S+)"));
static EXOS_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)ExtremeXOS\s+version\s+(\S+)"));
static IMG_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"IMG:\s*(\S+)"));
static SWITCH_LINE_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Switch\s*:\s*(.+)"));
static MODEL_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?i)(Summit\s+\S+|X\d+\S*|VSP-\S+|ExtremeSwitching\s+\S+)")
});
static SYSTEM_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)System Type\s*:\s*(\S+)"));

static LLDP_PORT_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"LLDP Port\s+"));
static LLDP_PORT_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"LLDP Port\s+(\S+)"));
static QUOTED_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r#"System Name:\s*"?([^"\s]+)"?"#));
static PORT_ID_RE: LazyLock<Regex> = LazyLock::new(|| regex(r#"Port ID[^:]*:\s*"?([^"\s]+)"?"#));
static MGMT_IP_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"Management Address:\s*(\d+\.\d+\.\d+\.\d+)"));
static SYS_DESCR_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r#"(?m)System Description:\s*"?(.+?)"?\s*$"#));

static CDP_PORT_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"CDP Port\s+"));
static CDP_PORT_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"CDP Port\s+(\S+)"));
static DEVICE_ID_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Device ID:\s*(\S+)"));
static CDP_INTF_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Interface:\s*(\S+)"));
static CDP_PLATFORM_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Platform:\s*(.+)"));
static CDP_IP_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"IP Address:\s*(\d+\.\d+\.\d+\.\d+)"));

const UP_WORDS: &[&str] = &["active", "enabled", "up", "a", "e", "r"];
const DOWN_WORDS: &[&str] = &["inactive", "disabled", "down", "d"];

impl VendorParser for ExtremeExos {
    fn parse_version(&self, output: &str) -> VersionInfo {
        let mut info = VersionInfo::default();

        if let Some(hostname) =
            capture1(&SYSNAME_RE, output).or_else(|| capture1(&SYSTEM_NAME_RE, output))
        {
            info.hostname = hostname;
        }
        if let Some(version) =
            capture1(&EXOS_VERSION_RE, output).or_else(|| capture1(&IMG_RE, output))
        {
            info.os_version = version;
        }
        if let Some(switch_line) = capture1(&SWITCH_LINE_RE, output) {
            let switch_line = switch_line.trim();
            info.model = capture1(&MODEL_TOKEN_RE, switch_line).unwrap_or_else(|| {
                switch_line
                    .split_whitespace()
                    .next()
                    .unwrap_or("")
                    .to_string()
            });
        }
        if info.model.is_empty() {
            if let Some(model) = capture1(&SYSTEM_TYPE_RE, output) {
                info.model = model;
            }
        }

        info
    }

    fn parse_interfaces(&self, output: &str) -> Vec<InterfaceStatus> {
        let mut interfaces = Vec::new();
        for line in output.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('-') || line.starts_with('=') {
                continue;
            }
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                continue;
            }
            let name = parts[0];
            if name.eq_ignore_ascii_case("port")
                || name.eq_ignore_ascii_case("interface")
                || name.eq_ignore_ascii_case("vlan")
            {
                continue;
            }

            let ip = parts[1..]
                .iter()
                .find(|p| starts_with_ipv4(p))
                .copied()
                .unwrap_or("");
            let mut status = "unknown";
            for part in &parts {
                let lower = part.to_lowercase();
                if UP_WORDS.contains(&lower.as_str()) {
                    status = "up";
                    break;
                }
                if DOWN_WORDS.contains(&lower.as_str()) {
                    status = "down";
                    break;
                }
            }

            interfaces.push(InterfaceStatus {
                name: name.to_string(),
                ip_address: ip.to_string(),
                status: status.to_string(),
                protocol: String::new(),
            });
        }
        interfaces
    }

    fn parse_cdp_neighbors(&self, output: &str) -> Vec<NeighborObservation> {
        let mut neighbors = Vec::new();
        for block in split_before(&CDP_PORT_HEAD_RE, output) {
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
            if let Some(port) = capture1(&CDP_PORT_RE, block) {
                neighbor.local_interface = port;
            }
            if let Some(intf) = capture1(&CDP_INTF_RE, block) {
                neighbor.remote_interface = intf;
            }
            if let Some(platform) = capture1(&CDP_PLATFORM_RE, block) {
                neighbor.remote_platform = platform.trim().to_string();
            }
            if let Some(ip) = capture1(&CDP_IP_RE, block) {
                neighbor.remote_mgmt_ip = ip;
            }
            neighbors.push(neighbor);
        }
        neighbors
    }

    fn parse_lldp_neighbors(&self, output: &str) -> Vec<NeighborObservation> {
        let mut neighbors = Vec::new();
        for block in split_before(&LLDP_PORT_HEAD_RE, output) {
            if block.trim().is_empty() {
                continue;
            }
            let Some(remote_device) = capture1(&QUOTED_NAME_RE, block) else {
                continue;
            };
            let mut neighbor = NeighborObservation {
                remote_device,
                ..NeighborObservation::default()
            };
            if let Some(port) = capture1(&LLDP_PORT_RE, block) {
                neighbor.local_interface = port;
            }
            if let Some(port_id) = capture1(&PORT_ID_RE, block) {
                neighbor.remote_interface = port_id;
            }
            if let Some(ip) = capture1(&MGMT_IP_RE, block) {
                neighbor.remote_mgmt_ip = ip;
            }
            if let Some(descr) = capture1(&SYS_DESCR_RE, block) {
                neighbor.remote_platform = descr.trim().to_string();
            }
            neighbors.push(neighbor);
        }
        neighbors
    }
}
