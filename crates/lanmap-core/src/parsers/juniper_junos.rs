//! Juniper JunOS output parsing.
//!
//! JunOS has no native CDP. LLDP parsing tries per-neighbor blocks
//! (detail output, blank-line separated) first, then falls back to the
//! brief table format when no block yielded a record.

use std::sync::LazyLock;

use regex::Regex;

use super::{VendorParser, capture1, regex, starts_with_ipv4};
use crate::model::{InterfaceStatus, NeighborObservation, VersionInfo};

pub struct JuniperJunos;

static HOSTNAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Hostname:\s*(\S+)"));
static MODEL_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Model:\s*(\S+)"));
static JUNOS_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Junos:\s*(\S+)"));
static JUNOS_BOOT_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"JUNOS.*?\[(\S+?)\]"));
static JUNOS_RELEASE_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)Junos.*?Release\s+(\S+)"));

static BLANK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"\n\s*\n"));
static SYSTEM_NAME_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"System [Nn]ame\s*:\s*(\S+)"));
static LOCAL_INTF_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Local Interface\s*:\s*(\S+)"));
static LOCAL_PORT_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"Local Port\s*:\s*(\S+)"));
static REMOTE_PORT_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?:Port ID|Remote Port)\s*:\s*(\S+)"));
static MGMT_IP_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?s)Management Address.*?:\s*(\d+\.\d+\.\d+\.\d+)"));
static SYS_DESCR_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?s)System Description\s*:\s*(.+?)(?:\n\n|\z)"));
static TABLE_INTF_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)^[gxae]"));

impl VendorParser for JuniperJunos {
    fn parse_version(&self, output: &str) -> VersionInfo {
        let mut info = VersionInfo::default();

        if let Some(hostname) = capture1(&HOSTNAME_RE, output) {
            info.hostname = hostname;
        }
        // e.g. "Model: mx240", "Model: ex4300-48t"
        if let Some(model) = capture1(&MODEL_RE, output) {
            info.model = model;
        }
        // "Junos: 21.4R3-S5.4", "JUNOS Base OS boot [21.2R3-S3.5]",
        // or older "... Release 12.3R12 ..." banners.
        if let Some(version) = capture1(&JUNOS_RE, output)
            .or_else(|| capture1(&JUNOS_BOOT_RE, output))
            .or_else(|| capture1(&JUNOS_RELEASE_RE, output))
        {
            info.os_version = version;
        }

        info
    }

    fn parse_interfaces(&self, output: &str) -> Vec<InterfaceStatus> {
        // `show interfaces terse`:
        //   ge-0/0/0                up    up
        //   ge-0/0/0.0              up    up   inet     10.0.0.1/24
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
            if name.to_lowercase().contains("admin") && line.to_lowercase().contains("link") {
                continue;
            }

            let ip = parts[3..]
                .iter()
                .find(|p| starts_with_ipv4(p))
                .copied()
                .unwrap_or("");

            interfaces.push(InterfaceStatus {
                name: name.to_string(),
                ip_address: ip.to_string(),
                status: parts[1].to_string(),
                protocol: parts[2].to_string(),
            });
        }
        interfaces
    }

    fn parse_cdp_neighbors(&self, _output: &str) -> Vec<NeighborObservation> {
        Vec::new()
    }

    fn parse_lldp_neighbors(&self, output: &str) -> Vec<NeighborObservation> {
        let mut neighbors = Vec::new();

        for block in BLANK_LINE_RE.split(output) {
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
            if let Some(local) =
                capture1(&LOCAL_INTF_RE, block).or_else(|| capture1(&LOCAL_PORT_RE, block))
            {
                neighbor.local_interface = local;
            }
            if let Some(port) = capture1(&REMOTE_PORT_RE, block) {
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

        // Brief table: "ge-0/0/0  001c.57aa.bb01  ge-0/0/3  120  core-rtr-01"
        if neighbors.is_empty() {
            for line in output.lines() {
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() >= 4 && TABLE_INTF_RE.is_match(parts[0]) {
                    // Columns: Local Interface, Parent, Chassis Id,
                    // Port info, System Name — system name last.
                    let (remote_device, remote_interface) = if parts.len() >= 5 {
                        (parts[parts.len() - 1], parts[parts.len() - 2])
                    } else {
                        (parts[parts.len() - 1], "")
                    };
                    if remote_device.is_empty() {
                        continue;
                    }
                    neighbors.push(NeighborObservation {
                        remote_device: remote_device.to_string(),
                        local_interface: parts[0].to_string(),
                        remote_interface: remote_interface.to_string(),
                        ..NeighborObservation::default()
                    });
                }
            }
        }

        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW_VERSION: &str = "\
Hostname: border-rtr-01
Model: mx240
Junos: 21.4R3-S5.4
JUNOS OS Kernel 64-bit  [20230209.ee54ef6_builder_stable_11]
";

    const SHOW_INTERFACES_TERSE: &str = "\
Interface               Admin Link Proto    Local                 Remote
ge-0/0/0                up    up
ge-0/0/0.0              up    up   inet     10.6.0.1/30
ge-0/0/1                up    down
lo0                     up    up
lo0.0                   up    up   inet     6.6.6.6/32
";

    const SHOW_LLDP_DETAIL: &str = "\
LLDP Neighbor Information:
Local Interface    : ge-0/0/0
Parent Interface   : -
Chassis Id         : 00:1c:57:aa:bb:01
Port ID            : Gi0/3
System Name        : core-rtr-01
Management Address : 10.0.0.1
System Description : Cisco IOS Software, ISR Software

Local Interface    : ge-0/0/1
Chassis Id         : 00:1c:57:aa:bb:07
Port ID            : port1
System Name        : branch-fw-01
";

    const SHOW_LLDP_BRIEF: &str = "\
Local Interface    Parent Interface    Chassis Id          Port info          System Name
ge-0/0/0           -                   00:1c:57:aa:bb:01   Gi0/3              core-rtr-01
ge-0/0/1           -                   00:1c:57:aa:bb:07   port1              branch-fw-01
";

    #[test]
    fn version_prefers_the_junos_label() {
        let info = JuniperJunos.parse_version(SHOW_VERSION);
        assert_eq!(info.hostname, "border-rtr-01");
        assert_eq!(info.model, "mx240");
        assert_eq!(info.os_version, "21.4R3-S5.4");
    }

    #[test]
    fn version_falls_back_to_boot_banner() {
        let info = JuniperJunos.parse_version("JUNOS Base OS boot [21.2R3-S3.5]\n");
        assert_eq!(info.os_version, "21.2R3-S3.5");
    }

    #[test]
    fn terse_interfaces_pick_up_inet_addresses() {
        let interfaces = JuniperJunos.parse_interfaces(SHOW_INTERFACES_TERSE);
        assert_eq!(interfaces.len(), 5);
        assert_eq!(interfaces[0].name, "ge-0/0/0");
        assert_eq!(interfaces[0].ip_address, "");
        assert_eq!(interfaces[1].ip_address, "10.6.0.1/30");
        assert_eq!(interfaces[2].status, "up");
        assert_eq!(interfaces[2].protocol, "down");
        assert_eq!(interfaces[4].ip_address, "6.6.6.6/32");
    }

    #[test]
    fn lldp_detail_blocks_parse_independently() {
        let neighbors = JuniperJunos.parse_lldp_neighbors(SHOW_LLDP_DETAIL);
        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[0].remote_device, "core-rtr-01");
        assert_eq!(neighbors[0].local_interface, "ge-0/0/0");
        assert_eq!(neighbors[0].remote_interface, "Gi0/3");
        assert_eq!(neighbors[0].remote_mgmt_ip, "10.0.0.1");
        assert_eq!(neighbors[1].remote_device, "branch-fw-01");
        assert_eq!(neighbors[1].remote_interface, "port1");
    }

    #[test]
    fn lldp_falls_back_to_brief_table() {
        let neighbors = JuniperJunos.parse_lldp_neighbors(SHOW_LLDP_BRIEF);
        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[0].local_interface, "ge-0/0/0");
        assert_eq!(neighbors[0].remote_device, "core-rtr-01");
        assert_eq!(neighbors[1].remote_device, "branch-fw-01");
    }

    #[test]
    fn cdp_is_always_empty() {
        assert!(JuniperJunos.parse_cdp_neighbors("anything").is_empty());
    }
}
