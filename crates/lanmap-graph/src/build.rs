//! Merge device facts and neighbor reports into one topology.

use std::collections::HashMap;

use tracing::{debug, instrument, warn};

use lanmap_core::model::{DeviceFacts, NeighborObservation, NeighborReport};

use crate::topology::{Edge, Node, Topology, canonical_id};

/// Build the canonical topology.
///
/// Directly collected facts are merged first, so their node fields take
/// precedence over anything a neighbor observation reports about the same
/// device. Within each report, CDP observations precede LLDP, and the
/// unordered edge set keeps the first direction seen.
///
/// The result depends only on input content and order; rebuilding from the
/// same slices yields an identical topology.
#[instrument(skip_all, fields(facts = facts.len(), reports = reports.len()))]
#[must_use]
pub fn build_topology(facts: &[DeviceFacts], reports: &[NeighborReport]) -> Topology {
    let mut topo = Topology::default();

    // Directly observed devices first: richest fields, first-seen wins.
    let mut host_to_id: HashMap<&str, String> = HashMap::new();
    for record in facts {
        let id = canonical_id(pick_name(&record.hostname, &record.host));
        if id.is_empty() {
            warn!(host = %record.host, "facts record with no usable identity");
            continue;
        }
        host_to_id.insert(record.host.as_str(), id.clone());
        topo.add_node(Node {
            id,
            hostname: record.hostname.clone(),
            device_type: record.device_type.clone(),
            model: record.model.clone(),
            os_version: record.os_version.clone(),
            mgmt_ip: record.host.clone(),
        });
    }

    for report in reports {
        // Resolve the local endpoint: the report's own hostname, then the
        // hostname facts recorded for that management address, then the
        // address itself.
        let local_id = if report.hostname.is_empty() {
            host_to_id
                .get(report.host.as_str())
                .cloned()
                .unwrap_or_else(|| canonical_id(&report.host))
        } else {
            canonical_id(&report.hostname)
        };
        if local_id.is_empty() {
            warn!(host = %report.host, "neighbor report with no usable identity");
            continue;
        }
        if !topo.contains(&local_id) {
            topo.add_node(Node {
                id: local_id.clone(),
                hostname: report.hostname.clone(),
                device_type: report.device_type.clone(),
                mgmt_ip: report.host.clone(),
                ..Node::default()
            });
        }

        for observation in report.cdp_neighbors.iter().chain(&report.lldp_neighbors) {
            merge_observation(&mut topo, &local_id, observation);
        }
    }

    debug!(nodes = topo.node_count(), edges = topo.edge_count(), "topology built");
    topo
}

fn merge_observation(topo: &mut Topology, local_id: &str, observation: &NeighborObservation) {
    let remote_id = canonical_id(&observation.remote_device);
    if remote_id.is_empty() {
        return;
    }

    // Stub node for a device we never probed directly.
    topo.add_node(Node {
        id: remote_id.clone(),
        model: observation.remote_platform.clone(),
        os_version: observation.remote_os_version.clone(),
        mgmt_ip: observation.remote_mgmt_ip.clone(),
        ..Node::default()
    });

    topo.add_edge(Edge {
        source: local_id.to_string(),
        target: remote_id,
        source_intf: observation.local_interface.clone(),
        target_intf: observation.remote_interface.clone(),
    });
}

fn pick_name<'a>(hostname: &'a str, host: &'a str) -> &'a str {
    if hostname.is_empty() { host } else { hostname }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lanmap_core::model::{DeviceFacts, NeighborObservation, NeighborReport};

    fn facts(host: &str, hostname: &str, model: &str) -> DeviceFacts {
        DeviceFacts {
            host: host.to_string(),
            device_type: "cisco_ios".to_string(),
            hostname: hostname.to_string(),
            model: model.to_string(),
            os_version: String::new(),
            interfaces: Vec::new(),
            collected_at: Utc::now(),
            errors: Vec::new(),
        }
    }

    fn observation(remote: &str, local_intf: &str, remote_intf: &str) -> NeighborObservation {
        NeighborObservation {
            remote_device: remote.to_string(),
            local_interface: local_intf.to_string(),
            remote_interface: remote_intf.to_string(),
            ..NeighborObservation::default()
        }
    }

    fn report(host: &str, hostname: &str) -> NeighborReport {
        NeighborReport {
            host: host.to_string(),
            device_type: "cisco_ios".to_string(),
            hostname: hostname.to_string(),
            cdp_neighbors: Vec::new(),
            lldp_neighbors: Vec::new(),
            collected_at: Utc::now(),
            errors: Vec::new(),
        }
    }

    #[test]
    fn fqdn_and_case_variants_collapse_to_one_node() {
        let all_facts = vec![facts("10.0.0.1", "core-RTR-01.example.com", "ISR4451")];
        let mut rpt = report("10.0.0.2", "dist-sw-01");
        rpt.cdp_neighbors.push(observation("CORE-rtr-01", "Gi1/0/1", "Gi0/1"));

        let topo = build_topology(&all_facts, &[rpt]);
        assert_eq!(topo.node_count(), 2);
        let node = &topo.nodes["core-rtr-01"];
        // Direct facts won over the stub observation.
        assert_eq!(node.model, "ISR4451");
        assert_eq!(node.mgmt_ip, "10.0.0.1");
    }

    #[test]
    fn cross_protocol_duplicates_merge_to_one_edge() {
        let mut rpt_a = report("10.0.0.1", "a");
        rpt_a.cdp_neighbors.push(observation("b", "Gi0/1", "Gi0/2"));
        rpt_a.lldp_neighbors.push(observation("b", "Gi0/1", "Gi0/2"));
        let mut rpt_b = report("10.0.0.2", "b");
        rpt_b.lldp_neighbors.push(observation("a", "Gi0/2", "Gi0/1"));

        let topo = build_topology(&[], &[rpt_a, rpt_b]);
        assert_eq!(topo.node_count(), 2);
        assert_eq!(topo.edge_count(), 1);
        assert_eq!(topo.edges[0].source, "a");
        assert_eq!(topo.edges[0].source_intf, "Gi0/1");
    }

    #[test]
    fn report_without_hostname_resolves_through_facts() {
        let all_facts = vec![facts("10.0.0.1", "core-rtr-01", "ISR4451")];
        let mut rpt = report("10.0.0.1", "");
        rpt.cdp_neighbors.push(observation("dist-sw-01", "Gi0/1", "Gi1/0/1"));

        let topo = build_topology(&all_facts, &[rpt]);
        assert_eq!(topo.edges[0].source, "core-rtr-01");
    }

    #[test]
    fn stub_nodes_carry_observed_fields() {
        let mut rpt = report("10.0.0.1", "a");
        rpt.lldp_neighbors.push(NeighborObservation {
            remote_device: "edge-fw-01".to_string(),
            remote_platform: "PA-3260".to_string(),
            remote_mgmt_ip: "10.0.0.5".to_string(),
            ..NeighborObservation::default()
        });

        let topo = build_topology(&[], &[rpt]);
        let stub = &topo.nodes["edge-fw-01"];
        assert_eq!(stub.model, "PA-3260");
        assert_eq!(stub.mgmt_ip, "10.0.0.5");
        assert_eq!(stub.hostname, "");
    }

    #[test]
    fn first_facts_record_wins_on_identity_collision() {
        let all_facts = vec![
            facts("10.0.0.1", "core-rtr-01.example.com", "ISR4451"),
            facts("10.0.0.99", "CORE-RTR-01", "C8300"),
        ];
        let topo = build_topology(&all_facts, &[]);
        assert_eq!(topo.node_count(), 1);
        assert_eq!(topo.nodes["core-rtr-01"].model, "ISR4451");
        assert_eq!(topo.nodes["core-rtr-01"].mgmt_ip, "10.0.0.1");
    }

    #[test]
    fn build_is_idempotent_under_doubled_input() {
        let all_facts = vec![
            facts("10.0.0.1", "a", "m1"),
            facts("10.0.0.2", "b", "m2"),
        ];
        let mut rpt = report("10.0.0.1", "a");
        rpt.cdp_neighbors.push(observation("b", "Gi0/1", "Gi0/2"));
        let reports = vec![rpt.clone(), rpt];

        let once = build_topology(&all_facts, &reports[..1]);
        let twice = build_topology(&all_facts, &reports);
        assert_eq!(once.node_count(), twice.node_count());
        assert_eq!(once.edge_count(), twice.edge_count());
        assert_eq!(once.edges, twice.edges);
    }

    #[test]
    fn empty_remote_identities_never_become_nodes() {
        let mut rpt = report("10.0.0.1", "a");
        rpt.lldp_neighbors.push(observation("  ", "Gi0/1", "x"));

        let topo = build_topology(&[], &[rpt]);
        assert_eq!(topo.node_count(), 1);
        assert_eq!(topo.edge_count(), 0);
    }
}
