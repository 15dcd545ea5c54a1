//! lanmap-core: data model, vendor parsers, and collection engine.
//!
//! The crate is organized around one pipeline:
//!
//! 1. [`platform`] resolves a device-type tag to its probe command set and
//!    vendor parser.
//! 2. [`transport`] abstracts "send a CLI command, get text back".
//! 3. [`parsers`] turn that text into the structured records in [`model`].
//! 4. [`collect`] drives the probe sequence per device, isolating failures
//!    so a batch of N devices always yields N records.
//!
//! Topology construction lives in the `lanmap-graph` crate; this crate only
//! produces its inputs.
//!
//! # Conventions
//!
//! - **Errors**: typed [`error`] variants at the transport/platform seams,
//!   `anyhow::Result` at I/O boundaries.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod collect;
pub mod error;
pub mod inventory;
pub mod model;
pub mod parsers;
pub mod platform;
pub mod store;
pub mod transport;

pub use error::{PlatformError, TransportError};
pub use model::{DeviceFacts, InterfaceStatus, NeighborObservation, NeighborReport, VersionInfo};
pub use platform::{CommandSet, Platform};
pub use transport::{DeviceCredentials, Session, Transport};
