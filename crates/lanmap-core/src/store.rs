//! JSON persistence for hand-off files between pipeline stages.
//!
//! `collect` and `neighbors` write these files; `diagram` and `show` read
//! them back. Pretty-printed so the files stay reviewable in diffs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

/// Write `value` as pretty JSON, creating parent directories as needed.
///
/// # Errors
///
/// When the parent directory cannot be created or the file cannot be
/// written.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(value).context("serializing to JSON")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "wrote JSON");
    Ok(())
}

/// Load a typed value from a JSON file.
///
/// # Errors
///
/// When the file cannot be read or does not deserialize as `T`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeviceFacts;

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out/nested/device_facts.json");
        let facts = vec![DeviceFacts::empty("10.0.0.1", "cisco_ios")];

        save_json(&path, &facts).expect("save");
        let loaded: Vec<DeviceFacts> = load_json(&path).expect("load");
        assert_eq!(loaded, facts);
    }

    #[test]
    fn load_reports_the_offending_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");
        let err = load_json::<Vec<DeviceFacts>>(&path).expect_err("must fail");
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn load_rejects_mismatched_shapes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"not": "a list"}"#).expect("write");
        assert!(load_json::<Vec<DeviceFacts>>(&path).is_err());
    }
}
