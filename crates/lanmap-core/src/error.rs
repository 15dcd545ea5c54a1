//! Error taxonomy for the collection pipeline.
//!
//! Three tiers, with strictly local blast radius:
//!
//! - [`PlatformError::Unsupported`] — fatal for that device, the batch
//!   continues.
//! - A [`TransportError`] from `Transport::open` — fatal for that device's
//!   whole probe sequence; the device still yields a record with a single
//!   `connection:` error and no parser is invoked.
//! - A [`TransportError`] from `Session::send` — one probe step failed; it
//!   is recorded under the step name and the remaining steps run.
//!
//! Malformed-but-present command output is never an error: parsers are
//! total and degrade to empty fields.

use thiserror::Error;

/// Failure talking to a device.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("command failed: {0}")]
    Command(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure resolving a device-type tag in the format registry.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("unsupported device_type '{device_type}'; supported: {}", supported.join(", "))]
    Unsupported {
        device_type: String,
        supported: Vec<&'static str>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_platform_lists_alternatives() {
        let err = PlatformError::Unsupported {
            device_type: "vyos".to_string(),
            supported: vec!["arista_eos", "cisco_ios"],
        };
        let text = err.to_string();
        assert!(text.contains("'vyos'"));
        assert!(text.contains("arista_eos, cisco_ios"));
    }
}
