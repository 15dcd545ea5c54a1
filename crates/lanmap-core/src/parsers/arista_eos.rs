//! Arista EOS output parsing.
//!
//! EOS is LLDP-only in practice; `parse_cdp_neighbors` returns an empty
//! sequence unconditionally. LLDP detail output groups fields per local
//! interface, so segmentation splits on the `Interface ` headings.

use std::sync::LazyLock;

use regex::Regex;

use super::{VendorParser, capture1, regex, starts_with_ipv4};
use crate::model::{InterfaceStatus, NeighborObservation, VersionInfo};

pub struct AristaEos;

static MODEL_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Arista\s+([\w\-]+)"));
static OS_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Software image version:\s*(\S+)"));
static HOSTNAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Hostname:\s*(\S+)"));

static INTF_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Interface\s+"));
static LEADING_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"^(\S+)"));
static SYSTEM_NAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r#"(?m)System Name:\s*"?(\S+?)"?$"#));
static MGMT_IP_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?s)Management Address.*?:\s*(\d+\.\d+\.\d+\.\d+)"));
static PORT_ID_RE: LazyLock<Regex> = LazyLock::new(|| regex(r#"(?m)Port ID\s*:\s*"?(\S+?)"?$"#));

impl VendorParser for AristaEos {
    fn parse_version(&self, output: &str) -> VersionInfo {
        let mut info = VersionInfo::default();

        if let Some(model) = capture1(&MODEL_RE, output) {
            info.model = model;
        }
        if let Some(version) = capture1(&OS_VERSION_RE, output) {
            info.os_version = version;
        }
        if let Some(hostname) = capture1(&HOSTNAME_RE, output) {
            info.hostname = hostname;
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
            if name.eq_ignore_ascii_case("interface") {
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
                protocol: parts.get(3).copied().unwrap_or("").to_string(),
            });
        }
        interfaces
    }

    fn parse_cdp_neighbors(&self, _output: &str) -> Vec<NeighborObservation> {
        Vec::new()
    }

    fn parse_lldp_neighbors(&self, output: &str) -> Vec<NeighborObservation> {
        let mut neighbors = Vec::new();
        for block in INTF_SPLIT_RE.split(output) {
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
            // The local interface is the token right after the split point.
            if let Some(local) = capture1(&LEADING_TOKEN_RE, block) {
                neighbor.local_interface = local.trim_end_matches(',').to_string();
            }
            if let Some(ip) = capture1(&MGMT_IP_RE, block) {
                neighbor.remote_mgmt_ip = ip;
            }
            if let Some(port) = capture1(&PORT_ID_RE, block) {
                neighbor.remote_interface = port;
            }
            neighbors.push(neighbor);
        }
        neighbors
    }
}
