//! lanmap-graph: canonical topology model and builder.
//!
//! Consumes the `DeviceFacts` / `NeighborReport` records produced by
//! `lanmap-core` and merges them into one deduplicated [`Topology`]:
//! canonical node identities, unordered unique edges. The build is
//! deterministic, idempotent, and commutative in its inputs aside from
//! first-seen field precedence.

pub mod build;
pub mod topology;

pub use build::build_topology;
pub use topology::{Edge, Node, Topology, canonical_id};
