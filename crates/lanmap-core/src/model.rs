//! Structured records produced by the vendor parsers and the collector.
//!
//! Field names are the wire format: the JSON files written by `collect` /
//! `neighbors` and read by `diagram` serialize these structs with serde
//! defaults (no renames), so externally produced records with the same
//! field names interoperate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity fields extracted from a platform's version command.
///
/// Every field is independently optional and defaults to empty; a parser
/// never omits one. `parse_version` is a total function — arbitrary input
/// yields (possibly all-empty) output, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub os_version: String,
}

/// One row from an interface summary command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceStatus {
    pub name: String,
    /// Empty when unassigned; may carry a CIDR suffix on some platforms.
    #[serde(default)]
    pub ip_address: String,
    /// Admin status column, vendor wording preserved.
    #[serde(default)]
    pub status: String,
    /// Link/protocol status column; empty where the platform has none.
    #[serde(default)]
    pub protocol: String,
}

/// A single CDP or LLDP neighbor entry.
///
/// Parsers discard entries without an extractable `remote_device`; an
/// observation with an empty remote identity is never emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborObservation {
    pub remote_device: String,
    #[serde(default)]
    pub remote_mgmt_ip: String,
    #[serde(default)]
    pub remote_platform: String,
    #[serde(default)]
    pub remote_os_version: String,
    #[serde(default)]
    pub local_interface: String,
    #[serde(default)]
    pub remote_interface: String,
}

/// Baseline facts collected from one device.
///
/// Immutable once produced. `errors` accumulates per-step diagnostics in
/// probe order; a record with errors is still usable downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceFacts {
    pub host: String,
    pub device_type: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub os_version: String,
    #[serde(default)]
    pub interfaces: Vec<InterfaceStatus>,
    pub collected_at: DateTime<Utc>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl DeviceFacts {
    /// An empty record stamped now; the collector fills it in step by step.
    #[must_use]
    pub fn empty(host: &str, device_type: &str) -> Self {
        Self {
            host: host.to_string(),
            device_type: device_type.to_string(),
            hostname: String::new(),
            model: String::new(),
            os_version: String::new(),
            interfaces: Vec::new(),
            collected_at: Utc::now(),
            errors: Vec::new(),
        }
    }
}

/// CDP + LLDP neighbor data collected from one device.
///
/// The two protocol sequences are kept separate and concatenated (CDP
/// first) only at topology-build time; no deduplication happens here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborReport {
    pub host: String,
    pub device_type: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub cdp_neighbors: Vec<NeighborObservation>,
    #[serde(default)]
    pub lldp_neighbors: Vec<NeighborObservation>,
    pub collected_at: DateTime<Utc>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl NeighborReport {
    /// An empty report stamped now.
    #[must_use]
    pub fn empty(host: &str, device_type: &str) -> Self {
        Self {
            host: host.to_string(),
            device_type: device_type.to_string(),
            hostname: String::new(),
            cdp_neighbors: Vec::new(),
            lldp_neighbors: Vec::new(),
            collected_at: Utc::now(),
            errors: Vec::new(),
        }
    }

    /// Total neighbor entries across both protocols.
    #[must_use]
    pub fn neighbor_count(&self) -> usize {
        self.cdp_neighbors.len() + self.lldp_neighbors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_facts_json_field_names() {
        let facts = DeviceFacts::empty("10.0.0.1", "cisco_ios");
        let value = serde_json::to_value(&facts).expect("serialize");
        for key in [
            "host",
            "device_type",
            "hostname",
            "model",
            "os_version",
            "interfaces",
            "collected_at",
            "errors",
        ] {
            assert!(value.get(key).is_some(), "missing field {key}");
        }
    }

    #[test]
    fn neighbor_report_roundtrip_with_partial_fields() {
        // Externally produced records may omit defaulted fields entirely.
        let json = r#"{
            "host": "10.0.0.2",
            "device_type": "cisco_nxos",
            "cdp_neighbors": [{"remote_device": "core-rtr-01"}],
            "collected_at": "2026-02-21T12:00:00Z"
        }"#;
        let report: NeighborReport = serde_json::from_str(json).expect("deserialize");
        assert_eq!(report.hostname, "");
        assert_eq!(report.neighbor_count(), 1);
        assert_eq!(report.cdp_neighbors[0].remote_device, "core-rtr-01");
        assert_eq!(report.cdp_neighbors[0].remote_interface, "");
        assert!(report.lldp_neighbors.is_empty());
        assert!(report.errors.is_empty());
    }
}
