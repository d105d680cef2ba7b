//! CLI definitions using clap.

use clap::Parser;

/// Sync eligible pages from a master Notion database to a slave
/// database, stamping each source page with a terminal sync status.
#[derive(Parser, Debug)]
#[command(name = "ndsync", author, version, about, long_about = None)]
pub struct Cli {
    /// Maximum number of pages to sync this run (default: all eligible)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output the run report as JSON (for agent integration)
    #[arg(long)]
    pub json: bool,

    /// Select and validate pages without creating or updating anything
    #[arg(long)]
    pub dry_run: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long)]
    pub quiet: bool,
}
