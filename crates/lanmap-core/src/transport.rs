//! Transport seam: "send a CLI command, get text back".
//!
//! The collector only ever talks to [`Transport`] and [`Session`], so the
//! probe logic is independent of how output is obtained. The shipped
//! implementation is [`ReplayTransport`], which reads pre-recorded command
//! output from a capture directory; a live SSH transport would slot in
//! behind the same traits.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::TransportError;

/// Everything needed to reach one device.
#[derive(Debug, Clone)]
pub struct DeviceCredentials {
    pub host: String,
    pub username: String,
    pub password: String,
    pub device_type: String,
    pub port: u16,
    /// Enable/privilege secret; empty when unused.
    pub secret: String,
    /// Per-command timeout in seconds.
    pub timeout: u64,
}

impl DeviceCredentials {
    /// Credentials for a host with the defaults an inventory would apply.
    #[must_use]
    pub fn for_host(host: &str, device_type: &str) -> Self {
        Self {
            host: host.to_string(),
            username: String::new(),
            password: String::new(),
            device_type: device_type.to_string(),
            port: 22,
            secret: String::new(),
            timeout: 30,
        }
    }
}

/// Opens sessions to devices.
pub trait Transport: Sync {
    /// Connect and authenticate.
    ///
    /// # Errors
    ///
    /// [`TransportError::Connection`] / [`TransportError::Authentication`]
    /// when the device cannot be reached; the caller records one
    /// `connection:` error and runs no probes.
    fn open(&self, creds: &DeviceCredentials) -> Result<Box<dyn Session>, TransportError>;
}

/// An open channel to one device. Dropping it closes the channel.
pub trait Session {
    /// Run one command and return its full text output.
    ///
    /// # Errors
    ///
    /// [`TransportError`] when the command cannot be executed; the output
    /// itself is never inspected here.
    fn send(&mut self, command: &str) -> Result<String, TransportError>;
}

// ---------------------------------------------------------------------------
// Capture replay
// ---------------------------------------------------------------------------

/// File name for a recorded command: lowercase, with every run of
/// non-alphanumeric characters collapsed to a single underscore.
/// `show ip interface brief` → `show_ip_interface_brief.txt`.
#[must_use]
pub fn command_slug(command: &str) -> String {
    let mut slug = String::with_capacity(command.len());
    let mut last_was_sep = false;
    for ch in command.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.extend(ch.to_lowercase());
            last_was_sep = false;
        } else if !last_was_sep && !slug.is_empty() {
            slug.push('_');
            last_was_sep = true;
        }
    }
    if slug.ends_with('_') {
        slug.pop();
    }
    slug
}

/// Replays captured command output from `<root>/<host>/<slug>.txt`.
#[derive(Debug, Clone)]
pub struct ReplayTransport {
    root: PathBuf,
}

impl ReplayTransport {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Transport for ReplayTransport {
    fn open(&self, creds: &DeviceCredentials) -> Result<Box<dyn Session>, TransportError> {
        let dir = self.root.join(&creds.host);
        if !dir.is_dir() {
            return Err(TransportError::Connection(format!(
                "no capture directory for {} at {}",
                creds.host,
                dir.display()
            )));
        }
        debug!(host = %creds.host, dir = %dir.display(), "replay session open");
        Ok(Box::new(ReplaySession { dir }))
    }
}

struct ReplaySession {
    dir: PathBuf,
}

impl Session for ReplaySession {
    fn send(&mut self, command: &str) -> Result<String, TransportError> {
        let path = self.dir.join(format!("{}.txt", command_slug(command)));
        read_capture(&path, command)
    }
}

fn read_capture(path: &Path, command: &str) -> Result<String, TransportError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(TransportError::Command(
            format!("no capture for '{command}' at {}", path.display()),
        )),
        Err(err) => Err(TransportError::Io(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_separator_runs() {
        assert_eq!(command_slug("show ip interface brief"), "show_ip_interface_brief");
        assert_eq!(command_slug("show  version"), "show_version");
        assert_eq!(
            command_slug("execute lldp info remote-device"),
            "execute_lldp_info_remote_device"
        );
        assert_eq!(command_slug("Show Version"), "show_version");
    }

    #[test]
    fn replay_reads_captures_by_slug() {
        let root = tempfile::tempdir().expect("tempdir");
        let host_dir = root.path().join("10.0.0.1");
        fs::create_dir_all(&host_dir).expect("mkdir");
        fs::write(host_dir.join("show_version.txt"), "Cisco IOS XE\n").expect("write");

        let transport = ReplayTransport::new(root.path());
        let creds = DeviceCredentials::for_host("10.0.0.1", "cisco_ios");
        let mut session = transport.open(&creds).expect("open");

        let output = session.send("show version").expect("send");
        assert_eq!(output, "Cisco IOS XE\n");

        let err = session.send("show cdp neighbors detail").expect_err("missing capture");
        assert!(matches!(err, TransportError::Command(_)));
    }

    #[test]
    fn replay_rejects_unknown_hosts() {
        let root = tempfile::tempdir().expect("tempdir");
        let transport = ReplayTransport::new(root.path());
        let creds = DeviceCredentials::for_host("10.9.9.9", "cisco_ios");
        let err = match transport.open(&creds) {
            Ok(_) => panic!("no such host"),
            Err(err) => err,
        };
        assert!(matches!(err, TransportError::Connection(_)));
    }
}
