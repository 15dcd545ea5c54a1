//! Palo Alto PAN-OS output parsing.
//!
//! PAN-OS has no CDP. LLDP output repeats a `Local Interface:` heading per
//! neighbor, so segmentation slices the text at those headings.

use std::sync::LazyLock;

use regex::Regex;

use super::{VendorParser, capture1, regex, split_before};
use crate::model::{InterfaceStatus, NeighborObservation, VersionInfo};

pub struct PaloaltoPanos;

static HOSTNAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"hostname:\s*(\S+)"));
static MODEL_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"model:\s*(\S+)"));
static SW_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"sw-version:\s*(\S+)"));

static INTF_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^(\S+)\s+(\d+\.\d+\.\d+\.\d+(?:/\d+)?)\s+(\S+)"));
static INTF_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)^(ethernet|ae|loopback|tunnel|vlan)\S*"));

static LOCAL_INTF_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Local Interface:"));
static LOCAL_INTF_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Local Interface:\s*(\S+)"));
static SYSTEM_NAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Remote System Name:\s*(\S+)"));
static PORT_ID_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Remote Port ID:\s*(\S+)"));
static MGMT_IP_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?s)Remote Management Address.*?:\s*(\d+\.\d+\.\d+\.\d+)"));

impl VendorParser for PaloaltoPanos {
    fn parse_version(&self, output: &str) -> VersionInfo {
        let mut info = VersionInfo::default();

        if let Some(hostname) = capture1(&HOSTNAME_RE, output) {
            info.hostname = hostname;
        }
        if let Some(model) = capture1(&MODEL_RE, output) {
            info.model = model;
        }
        if let Some(version) = capture1(&SW_VERSION_RE, output) {
            info.os_version = version;
        }

        info
    }

    fn parse_interfaces(&self, output: &str) -> Vec<InterfaceStatus> {
        // "ethernet1/1  10.0.0.1/24  up" with addressless rows mixed in.
        let mut interfaces = Vec::new();
        for line in output.lines() {
            if let Some(caps) = INTF_LINE_RE.captures(line) {
                interfaces.push(InterfaceStatus {
                    name: caps[1].to_string(),
                    ip_address: caps[2].to_string(),
                    status: caps[3].to_string(),
                    protocol: String::new(),
                });
            } else if INTF_NAME_RE.is_match(line) {
                let parts: Vec<&str> = line.split_whitespace().collect();
                interfaces.push(InterfaceStatus {
                    name: parts[0].to_string(),
                    ip_address: String::new(),
                    status: parts.get(1).copied().unwrap_or("unknown").to_string(),
                    protocol: String::new(),
                });
            }
        }
        interfaces
    }

    fn parse_cdp_neighbors(&self, _output: &str) -> Vec<NeighborObservation> {
        Vec::new()
    }

    fn parse_lldp_neighbors(&self, output: &str) -> Vec<NeighborObservation> {
        let mut neighbors = Vec::new();
        for block in split_before(&LOCAL_INTF_HEAD_RE, output) {
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
            if let Some(local) = capture1(&LOCAL_INTF_RE, block) {
                neighbor.local_interface = local;
            }
            if let Some(port) = capture1(&PORT_ID_RE, block) {
                neighbor.remote_interface = port;
            }
            if let Some(ip) = capture1(&MGMT_IP_RE, block) {
                neighbor.remote_mgmt_ip = ip;
            }
            neighbors.push(neighbor);
        }
        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW_SYSTEM_INFO: &str = "\
hostname: edge-fw-01
ip-address: 10.0.0.5
netmask: 255.255.255.0
model: PA-3260
serial: 013201003xxx
sw-version: 10.2.5
app-version: 8700-7700
";

    const SHOW_INTERFACE_ALL: &str = "\
total configured hardware interfaces: 3
name                    id    speed/duplex/state
ethernet1/1  203.0.113.1/24  up
ethernet1/2  10.5.0.1/24  up
ethernet1/3 down
tunnel.1 up
";

    const SHOW_LLDP_ALL: &str = "\
Local Interface: ethernet1/2
Remote Chassis ID: 00:1c:57:aa:bb:01
Remote Port ID: GigabitEthernet0/0
Remote System Name: core-rtr-01
Remote Management Address: 10.0.0.1

Local Interface: ethernet1/3
Remote Chassis ID: 00:1c:57:aa:bb:09
Remote Port ID: Ethernet12
Remote System Name: dmz-sw-01
";

    #[test]
    fn system_info_yields_all_fields() {
        let info = PaloaltoPanos.parse_version(SHOW_SYSTEM_INFO);
        assert_eq!(info.hostname, "edge-fw-01");
        assert_eq!(info.model, "PA-3260");
        assert_eq!(info.os_version, "10.2.5");
    }

    #[test]
    fn interfaces_mix_addressed_and_addressless_rows() {
        let interfaces = PaloaltoPanos.parse_interfaces(SHOW_INTERFACE_ALL);
        assert_eq!(interfaces.len(), 4);
        assert_eq!(interfaces[0].name, "ethernet1/1");
        assert_eq!(interfaces[0].ip_address, "203.0.113.1/24");
        assert_eq!(interfaces[0].status, "up");
        assert_eq!(interfaces[2].name, "ethernet1/3");
        assert_eq!(interfaces[2].ip_address, "");
        assert_eq!(interfaces[2].status, "down");
        assert_eq!(interfaces[3].name, "tunnel.1");
    }

    #[test]
    fn lldp_splits_on_local_interface_headings() {
        let neighbors = PaloaltoPanos.parse_lldp_neighbors(SHOW_LLDP_ALL);
        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[0].local_interface, "ethernet1/2");
        assert_eq!(neighbors[0].remote_device, "core-rtr-01");
        assert_eq!(neighbors[0].remote_interface, "GigabitEthernet0/0");
        assert_eq!(neighbors[0].remote_mgmt_ip, "10.0.0.1");
        assert_eq!(neighbors[1].remote_device, "dmz-sw-01");
        assert_eq!(neighbors[1].remote_mgmt_ip, "");
    }

    #[test]
    fn cdp_is_always_empty() {
        assert!(PaloaltoPanos.parse_cdp_neighbors("anything").is_empty());
    }
}
