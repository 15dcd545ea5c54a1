//! The canonical topology: nodes keyed by canonical id, unordered unique
//! edges.

use std::collections::{BTreeMap, HashSet};

use petgraph::graph::UnGraph;
use serde::Serialize;

/// Canonical device identity.
///
/// Trims, lowercases, and strips everything from the first `.` on, so
/// `CORE-rtr-01` and `core-rtr-01.example.com` collapse to the same id.
/// Idempotent.
#[must_use]
pub fn canonical_id(raw: &str) -> String {
    let stem = raw.split('.').next().unwrap_or(raw);
    stem.trim().to_lowercase()
}

/// One device in the topology. Fields other than `id` may be empty for
/// stub nodes known only from a neighbor observation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: String,
    pub hostname: String,
    pub device_type: String,
    pub model: String,
    pub os_version: String,
    pub mgmt_ip: String,
}

impl Node {
    /// Display label for diagrams: hostname with model and OS version
    /// appended when known.
    #[must_use]
    pub fn label(&self) -> String {
        let name = if self.hostname.is_empty() {
            &self.id
        } else {
            &self.hostname
        };
        let mut label = name.clone();
        if !self.model.is_empty() {
            label.push('\n');
            label.push_str(&self.model);
        }
        if !self.os_version.is_empty() {
            label.push('\n');
            label.push_str(&self.os_version);
        }
        label
    }
}

/// One link. `source`/`target` are canonical node ids; the pair is unique
/// regardless of direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub source_intf: String,
    pub target_intf: String,
}

/// The merged network graph. Built once by [`crate::build_topology`],
/// then read-only.
#[derive(Debug, Default, Serialize)]
pub struct Topology {
    /// Keyed by canonical id; BTreeMap keeps serialization stable.
    pub nodes: BTreeMap<String, Node>,
    pub edges: Vec<Edge>,
    #[serde(skip)]
    seen_pairs: HashSet<(String, String)>,
}

impl Topology {
    /// Insert a node under its canonical id. The first insertion for an id
    /// wins; later calls for the same id are no-ops.
    pub fn add_node(&mut self, node: Node) {
        debug_assert_eq!(node.id, canonical_id(&node.id));
        self.nodes.entry(node.id.clone()).or_insert(node);
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Insert an edge between two canonical ids. The unordered endpoint
    /// pair is unique; a duplicate in either direction is dropped and the
    /// first direction's interface annotations are kept.
    pub fn add_edge(&mut self, edge: Edge) {
        let key = if edge.source <= edge.target {
            (edge.source.clone(), edge.target.clone())
        } else {
            (edge.target.clone(), edge.source.clone())
        };
        if self.seen_pairs.insert(key) {
            self.edges.push(edge);
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Export to a petgraph undirected graph for algorithm consumers.
    /// Node weights are canonical ids, edge weights the interface pair.
    #[must_use]
    pub fn to_petgraph(&self) -> UnGraph<String, (String, String)> {
        let mut graph = UnGraph::new_undirected();
        let mut indices = BTreeMap::new();
        for id in self.nodes.keys() {
            indices.insert(id.clone(), graph.add_node(id.clone()));
        }
        for edge in &self.edges {
            if let (Some(&a), Some(&b)) = (indices.get(&edge.source), indices.get(&edge.target)) {
                graph.add_edge(a, b, (edge.source_intf.clone(), edge.target_intf.clone()));
            }
        }
        graph
    }
}
