//! `lanmap collect` — gather device facts from every inventory device.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use lanmap_core::collect::collect_facts_batch;
use lanmap_core::inventory::load_inventory;
use lanmap_core::store::save_json;
use lanmap_core::transport::ReplayTransport;

use crate::output::Table;

/// Arguments for `lanmap collect`.
#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Inventory YAML file.
    #[arg(short, long)]
    pub inventory: PathBuf,

    /// Capture directory (one subdirectory per host).
    #[arg(short, long)]
    pub captures: PathBuf,

    /// Output JSON file.
    #[arg(short, long, default_value = "device_facts.json")]
    pub output: PathBuf,

    /// Devices probed concurrently.
    #[arg(short, long, default_value_t = 4)]
    pub workers: usize,
}

/// # Errors
///
/// When the inventory cannot be loaded or the output file cannot be
/// written. Per-device failures are recorded in the records, not here.
pub fn run_collect(args: &CollectArgs) -> Result<()> {
    let devices = load_inventory(&args.inventory)?;
    let transport = ReplayTransport::new(&args.captures);

    let facts = collect_facts_batch(&transport, &devices, args.workers);
    save_json(&args.output, &facts)?;
    info!(devices = facts.len(), output = %args.output.display(), "facts written");

    let mut table = Table::new(&["HOST", "HOSTNAME", "MODEL", "OS VERSION", "INTFS", "ERRORS"]);
    for record in &facts {
        table.push_row(vec![
            record.host.clone(),
            record.hostname.clone(),
            record.model.clone(),
            record.os_version.clone(),
            record.interfaces.len().to_string(),
            record.errors.join("; "),
        ]);
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    table.write_to(&mut out)?;
    writeln!(out, "\n{} device(s) -> {}", facts.len(), args.output.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanmap_core::model::DeviceFacts;
    use std::fs;

    #[test]
    fn collect_writes_one_record_per_device() {
        let dir = tempfile::tempdir().expect("tempdir");
        let inventory = dir.path().join("inventory.yml");
        fs::write(
            &inventory,
            "devices:\n  - host: 10.0.0.1\n  - host: 10.0.0.9\n",
        )
        .expect("write inventory");

        let captures = dir.path().join("captures");
        let host_dir = captures.join("10.0.0.1");
        fs::create_dir_all(&host_dir).expect("mkdir");
        fs::write(
            host_dir.join("show_version.txt"),
            "core-rtr-01 uptime is 1 day\nCisco IOS XE Software, Version 17.06.05\n",
        )
        .expect("write capture");

        let output = dir.path().join("out/facts.json");
        let args = CollectArgs {
            inventory,
            captures,
            output: output.clone(),
            workers: 2,
        };
        run_collect(&args).expect("run");

        let facts: Vec<DeviceFacts> =
            lanmap_core::store::load_json(&output).expect("load output");
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].hostname, "core-rtr-01");
        // 10.0.0.9 has no captures: record present, connection error noted.
        assert!(facts[1].errors[0].starts_with("connection: "));
    }
}
