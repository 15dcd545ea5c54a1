//! `lanmap neighbors` — gather CDP/LLDP tables from every inventory device.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use lanmap_core::collect::collect_neighbors_batch;
use lanmap_core::inventory::load_inventory;
use lanmap_core::store::save_json;
use lanmap_core::transport::ReplayTransport;

use crate::output::Table;

/// Arguments for `lanmap neighbors`.
#[derive(Args, Debug)]
pub struct NeighborsArgs {
    /// Inventory YAML file.
    #[arg(short, long)]
    pub inventory: PathBuf,

    /// Capture directory (one subdirectory per host).
    #[arg(short, long)]
    pub captures: PathBuf,

    /// Output JSON file.
    #[arg(short, long, default_value = "neighbors.json")]
    pub output: PathBuf,

    /// Devices probed concurrently.
    #[arg(short, long, default_value_t = 4)]
    pub workers: usize,
}

/// # Errors
///
/// When the inventory cannot be loaded or the output file cannot be
/// written. Per-device failures are recorded in the reports, not here.
pub fn run_neighbors(args: &NeighborsArgs) -> Result<()> {
    let devices = load_inventory(&args.inventory)?;
    let transport = ReplayTransport::new(&args.captures);

    let reports = collect_neighbors_batch(&transport, &devices, args.workers);
    save_json(&args.output, &reports)?;
    info!(devices = reports.len(), output = %args.output.display(), "neighbors written");

    let mut table = Table::new(&["HOST", "HOSTNAME", "CDP", "LLDP", "ERRORS"]);
    for report in &reports {
        table.push_row(vec![
            report.host.clone(),
            report.hostname.clone(),
            report.cdp_neighbors.len().to_string(),
            report.lldp_neighbors.len().to_string(),
            report.errors.join("; "),
        ]);
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    table.write_to(&mut out)?;
    writeln!(out, "\n{} device(s) -> {}", reports.len(), args.output.display())?;
    Ok(())
}
