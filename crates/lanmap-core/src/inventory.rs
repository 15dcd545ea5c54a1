//! YAML inventory loading.
//!
//! Format:
//!
//! ```yaml
//! defaults:
//!   username: netops
//!   password: secret
//!   device_type: cisco_ios
//! devices:
//!   - host: 10.0.0.1
//!   - host: 10.0.0.5
//!     device_type: paloalto_panos
//!     port: 2222
//! ```
//!
//! Per-device fields fall back to the `defaults` block, then to built-in
//! defaults (device_type `cisco_ios`, port 22, timeout 30s). Only `host`
//! is required.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::transport::DeviceCredentials;

#[derive(Debug, Default, Deserialize)]
struct RawInventory {
    #[serde(default)]
    defaults: RawDefaults,
    #[serde(default)]
    devices: Vec<RawDevice>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDefaults {
    username: Option<String>,
    password: Option<String>,
    device_type: Option<String>,
    port: Option<u16>,
    secret: Option<String>,
    timeout: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawDevice {
    host: String,
    username: Option<String>,
    password: Option<String>,
    device_type: Option<String>,
    port: Option<u16>,
    secret: Option<String>,
    timeout: Option<u64>,
}

/// Load an inventory file into per-device credentials, inventory order
/// preserved.
///
/// # Errors
///
/// When the file cannot be read or is not valid inventory YAML.
pub fn load_inventory(path: &Path) -> Result<Vec<DeviceCredentials>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading inventory {}", path.display()))?;
    let raw: RawInventory = serde_yaml::from_str(&text)
        .with_context(|| format!("parsing inventory {}", path.display()))?;

    let defaults = raw.defaults;
    let devices: Vec<DeviceCredentials> = raw
        .devices
        .into_iter()
        .map(|dev| DeviceCredentials {
            host: dev.host,
            username: dev
                .username
                .or_else(|| defaults.username.clone())
                .unwrap_or_default(),
            password: dev
                .password
                .or_else(|| defaults.password.clone())
                .unwrap_or_default(),
            device_type: dev
                .device_type
                .or_else(|| defaults.device_type.clone())
                .unwrap_or_else(|| "cisco_ios".to_string()),
            port: dev.port.or(defaults.port).unwrap_or(22),
            secret: dev
                .secret
                .or_else(|| defaults.secret.clone())
                .unwrap_or_default(),
            timeout: dev.timeout.or(defaults.timeout).unwrap_or(30),
        })
        .collect();

    info!(path = %path.display(), devices = devices.len(), "inventory loaded");
    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_inventory(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(text.as_bytes()).expect("write");
        file
    }

    #[test]
    fn devices_inherit_defaults() {
        let file = write_inventory(
            "defaults:\n  username: netops\n  password: hunter2\n  device_type: cisco_nxos\n\
             devices:\n  - host: 10.0.0.1\n  - host: 10.0.0.2\n    device_type: juniper_junos\n    port: 2222\n",
        );
        let devices = load_inventory(file.path()).expect("load");
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].host, "10.0.0.1");
        assert_eq!(devices[0].username, "netops");
        assert_eq!(devices[0].device_type, "cisco_nxos");
        assert_eq!(devices[0].port, 22);
        assert_eq!(devices[0].timeout, 30);
        assert_eq!(devices[1].device_type, "juniper_junos");
        assert_eq!(devices[1].port, 2222);
        assert_eq!(devices[1].password, "hunter2");
    }

    #[test]
    fn bare_hosts_get_builtin_defaults() {
        let file = write_inventory("devices:\n  - host: sw1.example.com\n");
        let devices = load_inventory(file.path()).expect("load");
        assert_eq!(devices[0].device_type, "cisco_ios");
        assert_eq!(devices[0].username, "");
        assert_eq!(devices[0].port, 22);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_inventory(Path::new("/nonexistent/inventory.yml")).expect_err("must fail");
        assert!(err.to_string().contains("inventory"));
    }

    #[test]
    fn host_is_required() {
        let file = write_inventory("devices:\n  - device_type: cisco_ios\n");
        assert!(load_inventory(file.path()).is_err());
    }
}
