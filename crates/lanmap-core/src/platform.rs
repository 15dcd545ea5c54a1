//! Vendor format registry: device-type tag → command set + parser.
//!
//! Everything here is `'static` configuration built into the binary. The
//! tables are immutable and safe under concurrent reads; there is no
//! runtime registration.

use crate::error::PlatformError;
use crate::parsers::{self, VendorParser};

/// The fixed probe commands for one platform family.
///
/// An empty string means "this platform has no such command — skip the
/// probe". That is a contract, not an error: e.g. JunOS has no native CDP.
#[derive(Debug, Clone, Copy)]
pub struct CommandSet {
    pub version: &'static str,
    pub interfaces: &'static str,
    pub cdp_neighbors: &'static str,
    pub lldp_neighbors: &'static str,
}

/// A supported platform family.
///
/// One variant per parser implementation; several device-type tags may
/// alias to the same family (see [`Platform::from_tag`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    CiscoIos,
    CiscoNxos,
    AristaEos,
    PaloaltoPanos,
    JuniperJunos,
    FortinetFortios,
    Sonic,
    ExtremeExos,
}

/// Tag → family alias table. Sorted by tag so `supported_tags` is stable.
const TAG_TABLE: &[(&str, Platform)] = &[
    ("arista_eos", Platform::AristaEos),
    ("cisco_ios", Platform::CiscoIos),
    ("cisco_ios_telnet", Platform::CiscoIos),
    ("cisco_nxos", Platform::CiscoNxos),
    ("cisco_nxos_ssh", Platform::CiscoNxos),
    ("cisco_xe", Platform::CiscoIos),
    ("extreme", Platform::ExtremeExos),
    ("extreme_exos", Platform::ExtremeExos),
    ("extreme_nos", Platform::ExtremeExos),
    ("fortinet", Platform::FortinetFortios),
    ("fortinet_ssh", Platform::FortinetFortios),
    ("juniper", Platform::JuniperJunos),
    ("juniper_junos", Platform::JuniperJunos),
    // SONiC runs on Linux, so generic linux prompts map to its parser.
    ("linux", Platform::Sonic),
    ("paloalto_panos", Platform::PaloaltoPanos),
    ("sonic_ssh", Platform::Sonic),
];

impl Platform {
    /// Resolve a device-type tag, normalizing known aliases.
    ///
    /// # Errors
    ///
    /// [`PlatformError::Unsupported`] carrying the full supported-tag list
    /// when the tag is unknown.
    pub fn from_tag(device_type: &str) -> Result<Self, PlatformError> {
        TAG_TABLE
            .iter()
            .find(|(tag, _)| *tag == device_type)
            .map(|(_, platform)| *platform)
            .ok_or_else(|| PlatformError::Unsupported {
                device_type: device_type.to_string(),
                supported: Self::supported_tags().to_vec(),
            })
    }

    /// All recognized device-type tags, sorted.
    #[must_use]
    pub fn supported_tags() -> &'static [&'static str] {
        const TAGS: &[&str] = &[
            "arista_eos",
            "cisco_ios",
            "cisco_ios_telnet",
            "cisco_nxos",
            "cisco_nxos_ssh",
            "cisco_xe",
            "extreme",
            "extreme_exos",
            "extreme_nos",
            "fortinet",
            "fortinet_ssh",
            "juniper",
            "juniper_junos",
            "linux",
            "paloalto_panos",
            "sonic_ssh",
        ];
        TAGS
    }

    /// Canonical tag for this family.
    #[must_use]
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::CiscoIos => "cisco_ios",
            Self::CiscoNxos => "cisco_nxos",
            Self::AristaEos => "arista_eos",
            Self::PaloaltoPanos => "paloalto_panos",
            Self::JuniperJunos => "juniper_junos",
            Self::FortinetFortios => "fortinet",
            Self::Sonic => "sonic_ssh",
            Self::ExtremeExos => "extreme_exos",
        }
    }

    /// The probe command set for this family.
    #[must_use]
    pub const fn commands(self) -> CommandSet {
        match self {
            Self::CiscoIos => CommandSet {
                version: "show version",
                interfaces: "show ip interface brief",
                cdp_neighbors: "show cdp neighbors detail",
                lldp_neighbors: "show lldp neighbors detail",
            },
            Self::CiscoNxos => CommandSet {
                version: "show version",
                interfaces: "show ip interface brief vrf all",
                cdp_neighbors: "show cdp neighbors detail",
                lldp_neighbors: "show lldp neighbors detail",
            },
            Self::AristaEos => CommandSet {
                version: "show version",
                interfaces: "show ip interface brief",
                cdp_neighbors: "show cdp neighbors detail",
                lldp_neighbors: "show lldp neighbors detail",
            },
            Self::PaloaltoPanos => CommandSet {
                version: "show system info",
                interfaces: "show interface all",
                cdp_neighbors: "",
                lldp_neighbors: "show lldp neighbors all",
            },
            Self::JuniperJunos => CommandSet {
                version: "show version",
                interfaces: "show interfaces terse",
                cdp_neighbors: "",
                lldp_neighbors: "show lldp neighbors",
            },
            Self::FortinetFortios => CommandSet {
                version: "get system status",
                interfaces: "get system interface physical",
                cdp_neighbors: "",
                lldp_neighbors: "execute lldp info remote-device",
            },
            Self::Sonic => CommandSet {
                version: "show version",
                interfaces: "show ip interface",
                cdp_neighbors: "",
                lldp_neighbors: "show lldp neighbors",
            },
            Self::ExtremeExos => CommandSet {
                version: "show version",
                interfaces: "show ipconfig",
                cdp_neighbors: "show cdp neighbors detail",
                lldp_neighbors: "show lldp neighbors detailed",
            },
        }
    }

    /// The vendor parser for this family.
    #[must_use]
    pub fn parser(self) -> &'static dyn VendorParser {
        match self {
            Self::CiscoIos => &parsers::cisco_ios::CiscoIos,
            Self::CiscoNxos => &parsers::cisco_nxos::CiscoNxos,
            Self::AristaEos => &parsers::arista_eos::AristaEos,
            Self::PaloaltoPanos => &parsers::paloalto_panos::PaloaltoPanos,
            Self::JuniperJunos => &parsers::juniper_junos::JuniperJunos,
            Self::FortinetFortios => &parsers::fortinet_fortios::FortinetFortios,
            Self::Sonic => &parsers::sonic::Sonic,
            Self::ExtremeExos => &parsers::extreme_exos::ExtremeExos,
        }
    }
}
