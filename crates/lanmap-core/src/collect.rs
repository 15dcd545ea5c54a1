//! Probe sequencing: drive the command set for one device and assemble
//! its records.
//!
//! Failure isolation is the whole point of this module. An unknown
//! device-type tag or a failed connection still yields a record for the
//! device, carrying the error; a failed probe step records its error and
//! the remaining steps run. A batch of N devices always produces N
//! records, in inventory order.

use std::panic;
use std::thread;

use tracing::{debug, instrument, warn};

use crate::model::{DeviceFacts, NeighborReport};
use crate::platform::Platform;
use crate::transport::{DeviceCredentials, Session, Transport};

/// Collect identity and interface facts from one device.
#[instrument(skip(transport), fields(host = %creds.host))]
#[must_use]
pub fn collect_device_facts(transport: &dyn Transport, creds: &DeviceCredentials) -> DeviceFacts {
    let mut facts = DeviceFacts::empty(&creds.host, &creds.device_type);

    let platform = match Platform::from_tag(&creds.device_type) {
        Ok(platform) => platform,
        Err(err) => {
            warn!(%err, "unsupported platform");
            facts.errors.push(format!("platform: {err}"));
            return facts;
        }
    };

    let mut session = match transport.open(creds) {
        Ok(session) => session,
        Err(err) => {
            warn!(%err, "connection failed");
            facts.errors.push(format!("connection: {err}"));
            return facts;
        }
    };

    let commands = platform.commands();
    let parser = platform.parser();

    if let Some(output) = probe(&mut *session, commands.version, "version", &mut facts.errors) {
        let version = parser.parse_version(&output);
        facts.hostname = version.hostname;
        facts.model = version.model;
        facts.os_version = version.os_version;
    }
    if let Some(output) = probe(&mut *session, commands.interfaces, "interfaces", &mut facts.errors)
    {
        facts.interfaces = parser.parse_interfaces(&output);
    }

    debug!(
        hostname = %facts.hostname,
        interfaces = facts.interfaces.len(),
        errors = facts.errors.len(),
        "facts collected"
    );
    facts
}

/// Collect CDP and LLDP neighbor tables from one device.
#[instrument(skip(transport), fields(host = %creds.host))]
#[must_use]
pub fn collect_neighbors(transport: &dyn Transport, creds: &DeviceCredentials) -> NeighborReport {
    let mut report = NeighborReport::empty(&creds.host, &creds.device_type);

    let platform = match Platform::from_tag(&creds.device_type) {
        Ok(platform) => platform,
        Err(err) => {
            warn!(%err, "unsupported platform");
            report.errors.push(format!("platform: {err}"));
            return report;
        }
    };

    let mut session = match transport.open(creds) {
        Ok(session) => session,
        Err(err) => {
            warn!(%err, "connection failed");
            report.errors.push(format!("connection: {err}"));
            return report;
        }
    };

    let commands = platform.commands();
    let parser = platform.parser();

    // Hostname makes the report self-identifying for the topology builder.
    if let Some(output) = probe(&mut *session, commands.version, "version", &mut report.errors) {
        report.hostname = parser.parse_version(&output).hostname;
    }
    if let Some(output) = probe(&mut *session, commands.cdp_neighbors, "cdp", &mut report.errors) {
        report.cdp_neighbors = parser.parse_cdp_neighbors(&output);
    }
    if let Some(output) = probe(&mut *session, commands.lldp_neighbors, "lldp", &mut report.errors)
    {
        report.lldp_neighbors = parser.parse_lldp_neighbors(&output);
    }

    debug!(
        hostname = %report.hostname,
        neighbors = report.neighbor_count(),
        errors = report.errors.len(),
        "neighbors collected"
    );
    report
}

/// Run one probe step. Empty command means the platform has no such probe;
/// skip silently. A transport error is recorded under the step name and
/// yields `None`.
fn probe(
    session: &mut dyn Session,
    command: &str,
    step: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    if command.is_empty() {
        return None;
    }
    match session.send(command) {
        Ok(output) => Some(output),
        Err(err) => {
            warn!(step, %err, "probe failed");
            errors.push(format!("{step}: {err}"));
            None
        }
    }
}

/// Collect facts from every device, at most `workers` devices in flight.
/// Results come back in inventory order.
#[instrument(skip_all, fields(devices = devices.len(), workers))]
#[must_use]
pub fn collect_facts_batch(
    transport: &dyn Transport,
    devices: &[DeviceCredentials],
    workers: usize,
) -> Vec<DeviceFacts> {
    run_batch(transport, devices, workers, collect_device_facts)
}

/// Collect neighbor reports from every device, at most `workers` devices
/// in flight. Results come back in inventory order.
#[instrument(skip_all, fields(devices = devices.len(), workers))]
#[must_use]
pub fn collect_neighbors_batch(
    transport: &dyn Transport,
    devices: &[DeviceCredentials],
    workers: usize,
) -> Vec<NeighborReport> {
    run_batch(transport, devices, workers, collect_neighbors)
}

fn run_batch<T, F>(
    transport: &dyn Transport,
    devices: &[DeviceCredentials],
    workers: usize,
    collect_one: F,
) -> Vec<T>
where
    T: Send,
    F: Fn(&dyn Transport, &DeviceCredentials) -> T + Sync,
{
    if devices.is_empty() {
        return Vec::new();
    }
    let workers = workers.clamp(1, devices.len());
    let chunk_size = devices.len().div_ceil(workers);

    thread::scope(|scope| {
        let handles: Vec<_> = devices
            .chunks(chunk_size)
            .map(|chunk| {
                let collect_one = &collect_one;
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|creds| collect_one(transport, creds))
                        .collect::<Vec<T>>()
                })
            })
            .collect();

        // Chunks are contiguous, so concatenation restores inventory order.
        let mut results = Vec::with_capacity(devices.len());
        for handle in handles {
            match handle.join() {
                Ok(chunk) => results.extend(chunk),
                Err(payload) => panic::resume_unwind(payload),
            }
        }
        results
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use std::fs;

    /// Transport whose sessions fail a fixed set of commands.
    struct FlakyTransport {
        refuse_connect: bool,
        fail_commands: Vec<&'static str>,
        outputs: Vec<(&'static str, &'static str)>,
    }

    struct FlakySession {
        fail_commands: Vec<&'static str>,
        outputs: Vec<(&'static str, &'static str)>,
    }

    impl Transport for FlakyTransport {
        fn open(&self, _creds: &DeviceCredentials) -> Result<Box<dyn Session>, TransportError> {
            if self.refuse_connect {
                return Err(TransportError::Connection("connection refused".to_string()));
            }
            Ok(Box::new(FlakySession {
                fail_commands: self.fail_commands.clone(),
                outputs: self.outputs.clone(),
            }))
        }
    }

    impl Session for FlakySession {
        fn send(&mut self, command: &str) -> Result<String, TransportError> {
            if self.fail_commands.contains(&command) {
                return Err(TransportError::Timeout(format!("'{command}' timed out")));
            }
            Ok(self
                .outputs
                .iter()
                .find(|(cmd, _)| *cmd == command)
                .map_or_else(String::new, |(_, out)| (*out).to_string()))
        }
    }

    const IOS_VERSION: &str = "\
core-rtr-01 uptime is 2 weeks
Cisco IOS XE Software, Version 17.06.05
";

    #[test]
    fn unknown_platform_yields_record_with_error() {
        let transport = FlakyTransport {
            refuse_connect: false,
            fail_commands: vec![],
            outputs: vec![],
        };
        let creds = DeviceCredentials::for_host("10.0.0.1", "mikrotik_routeros");
        let facts = collect_device_facts(&transport, &creds);

        assert_eq!(facts.host, "10.0.0.1");
        assert_eq!(facts.errors.len(), 1);
        assert!(facts.errors[0].starts_with("platform: "));
        assert!(facts.interfaces.is_empty());
    }

    #[test]
    fn connection_failure_records_one_error() {
        let transport = FlakyTransport {
            refuse_connect: true,
            fail_commands: vec![],
            outputs: vec![],
        };
        let creds = DeviceCredentials::for_host("10.0.0.1", "cisco_ios");
        let report = collect_neighbors(&transport, &creds);

        assert_eq!(report.errors, vec!["connection: connection failed: connection refused"]);
        assert_eq!(report.neighbor_count(), 0);
    }

    #[test]
    fn failed_step_does_not_stop_later_steps() {
        let transport = FlakyTransport {
            refuse_connect: false,
            fail_commands: vec!["show ip interface brief"],
            outputs: vec![("show version", IOS_VERSION)],
        };
        let creds = DeviceCredentials::for_host("10.0.0.1", "cisco_ios");
        let facts = collect_device_facts(&transport, &creds);

        // The version step before the failure still landed.
        assert_eq!(facts.hostname, "core-rtr-01");
        assert_eq!(facts.errors.len(), 1);
        assert!(facts.errors[0].starts_with("interfaces: "));
    }

    #[test]
    fn cdp_probe_is_skipped_where_unsupported() {
        // JunOS has no CDP command; a session that would fail every command
        // must still only record version and lldp step errors.
        let transport = FlakyTransport {
            refuse_connect: false,
            fail_commands: vec!["show version", "show lldp neighbors"],
            outputs: vec![],
        };
        let creds = DeviceCredentials::for_host("10.0.0.6", "juniper_junos");
        let report = collect_neighbors(&transport, &creds);

        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].starts_with("version: "));
        assert!(report.errors[1].starts_with("lldp: "));
    }

    #[test]
    fn batch_preserves_inventory_order() {
        let transport = FlakyTransport {
            refuse_connect: false,
            fail_commands: vec![],
            outputs: vec![("show version", IOS_VERSION)],
        };
        let devices: Vec<DeviceCredentials> = (1..=7)
            .map(|i| DeviceCredentials::for_host(&format!("10.0.0.{i}"), "cisco_ios"))
            .collect();

        let results = collect_facts_batch(&transport, &devices, 3);
        assert_eq!(results.len(), 7);
        for (creds, facts) in devices.iter().zip(&results) {
            assert_eq!(facts.host, creds.host);
        }
    }

    #[test]
    fn batch_against_replay_captures() {
        let root = tempfile::tempdir().expect("tempdir");
        let host_dir = root.path().join("10.0.0.1");
        fs::create_dir_all(&host_dir).expect("mkdir");
        fs::write(host_dir.join("show_version.txt"), IOS_VERSION).expect("write");
        fs::write(
            host_dir.join("show_ip_interface_brief.txt"),
            "Interface    IP-Address    OK? Method Status    Protocol\n\
             GigabitEthernet0/0  10.0.0.1  YES NVRAM  up  up\n",
        )
        .expect("write");

        let transport = crate::transport::ReplayTransport::new(root.path());
        let devices = vec![
            DeviceCredentials::for_host("10.0.0.1", "cisco_ios"),
            // No capture directory: connection error, record still present.
            DeviceCredentials::for_host("10.0.0.2", "cisco_ios"),
        ];

        let results = collect_facts_batch(&transport, &devices, 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].hostname, "core-rtr-01");
        assert_eq!(results[0].interfaces.len(), 1);
        assert!(results[1].errors[0].starts_with("connection: "));
    }
}
