use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "sift",
    version,
    about = "Interactively build filtered queries against a record service"
)]
pub struct Args {
    /// Base URL of the record service, e.g. https://records.example.com/
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Authentication token; falls back to $SIFT_TOKEN, then the
    /// config file
    #[arg(short, long)]
    pub token: Option<String>,

    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of filter slots
    #[arg(long)]
    pub slots: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Show errors only
    #[arg(short, long)]
    pub quiet: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json: bool,
}
