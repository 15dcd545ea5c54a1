#![forbid(unsafe_code)]

mod cmd;
mod diagram;
mod output;

use std::env;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "lanmap: multi-vendor network topology discovery",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Collect device facts from every inventory device",
        after_help = "EXAMPLES:\n    # Collect from recorded captures\n    lanmap collect -i inventory.yml -c captures/\n\n    # Write somewhere else\n    lanmap collect -i inventory.yml -c captures/ -o out/facts.json"
    )]
    Collect(cmd::collect::CollectArgs),

    #[command(
        about = "Collect CDP/LLDP neighbor tables from every inventory device",
        after_help = "EXAMPLES:\n    lanmap neighbors -i inventory.yml -c captures/"
    )]
    Neighbors(cmd::neighbors::NeighborsArgs),

    #[command(
        about = "Build the topology and write diagrams",
        after_help = "EXAMPLES:\n    # Mermaid + DOT into ./diagrams\n    lanmap diagram\n\n    # Also render with graphviz\n    lanmap diagram -f mermaid -f dot -f svg"
    )]
    Diagram(cmd::diagram::DiagramArgs),

    #[command(
        about = "Print collected records or the merged topology",
        after_help = "EXAMPLES:\n    lanmap show facts\n    lanmap show topology --facts out/facts.json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(about = "Run the full pipeline on built-in sample data")]
    Demo(cmd::demo::DemoArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LANMAP_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "lanmap=debug,info"
        } else {
            "lanmap=info,warn"
        })
    });

    let format = env::var("LANMAP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Collect(ref args) => cmd::collect::run_collect(args),
        Commands::Neighbors(ref args) => cmd::neighbors::run_neighbors(args),
        Commands::Diagram(ref args) => cmd::diagram::run_diagram(args),
        Commands::Show(ref args) => cmd::show::run_show(args),
        Commands::Demo(ref args) => cmd::demo::run_demo(args),
    }
}
