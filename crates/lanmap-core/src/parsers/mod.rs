//! Vendor parsers: raw CLI text → structured records.
//!
//! One implementation per platform family, all satisfying [`VendorParser`].
//! Vendor formats differ in block structure and delimiters, so each parser
//! owns its own segmentation strategy, but every implementation emits the
//! identical record shapes — downstream code never branches on vendor.
//!
//! # Contracts
//!
//! - `parse_version` is total: arbitrary input yields all three fields,
//!   defaulted to empty, and never fails.
//! - `parse_interfaces` preserves source order and skips non-data lines
//!   silently; an entry needs at least a name.
//! - Neighbor parsers discard observations without an extractable remote
//!   identity. Platforms lacking a protocol return an empty `Vec`
//!   unconditionally — that is the contract, not an error.

pub mod arista_eos;
pub mod cisco_ios;
pub mod cisco_nxos;
pub mod extreme_exos;
pub mod fortinet_fortios;
pub mod juniper_junos;
pub mod paloalto_panos;
pub mod sonic;

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{InterfaceStatus, NeighborObservation, VersionInfo};

/// The capability set every platform family implements.
pub trait VendorParser: Sync {
    /// Extract hostname, model, and OS version from the version command.
    fn parse_version(&self, output: &str) -> VersionInfo;

    /// Parse the interface summary command into ordered rows.
    fn parse_interfaces(&self, output: &str) -> Vec<InterfaceStatus>;

    /// Parse CDP neighbor detail output.
    fn parse_cdp_neighbors(&self, output: &str) -> Vec<NeighborObservation>;

    /// Parse LLDP neighbor detail output.
    fn parse_lldp_neighbors(&self, output: &str) -> Vec<NeighborObservation>;
}

/// Compile a static pattern. Only for patterns written in this crate.
pub(crate) fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern must compile")
}

/// First capture group of the first match, trimmed of nothing.
pub(crate) fn capture1(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Split `text` into segments starting at each match of `re`, keeping the
/// delimiter at the head of its segment (the lookahead-split idiom). The
/// prefix before the first match is returned as its own segment.
pub(crate) fn split_before<'a>(re: &Regex, text: &'a str) -> Vec<&'a str> {
    let starts: Vec<usize> = re.find_iter(text).map(|m| m.start()).collect();
    if starts.is_empty() {
        return vec![text];
    }
    let mut segments = Vec::with_capacity(starts.len() + 1);
    segments.push(&text[..starts[0]]);
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        segments.push(&text[start..end]);
    }
    segments
}

static IPV4_PREFIX: LazyLock<Regex> = LazyLock::new(|| regex(r"^\d+\.\d+\.\d+\.\d+"));

/// True when the token starts with a dotted-quad address.
pub(crate) fn starts_with_ipv4(token: &str) -> bool {
    IPV4_PREFIX.is_match(token)
}
