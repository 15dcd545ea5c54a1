//! One module per subcommand: a clap `Args` struct plus a `run_*`
//! function returning `anyhow::Result<()>`.

pub mod collect;
pub mod demo;
pub mod diagram;
pub mod neighbors;
pub mod show;
