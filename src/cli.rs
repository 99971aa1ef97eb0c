// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is plain Rust structs and enums,
// and the #[...] attributes tell clap how to parse them.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "linkpulse",
    version,
    about = "Check which links in a video description still work",
    long_about = "linkpulse pulls every link out of pasted text (a YouTube, TikTok or Vimeo \
                  description, for example) and checks each one with a HEAD request, falling \
                  back to GET. Links come back as ok, broken, error, timeout or unknown."
)]
pub struct Cli {
    /// Log debug details to stderr (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the links from the input and check each one
    ///
    /// Example: linkpulse check description.txt --json
    Check(CheckArgs),

    /// Only extract the links, without checking them
    ///
    /// Example: pbpaste | linkpulse extract
    Extract {
        /// File to read; omit or pass "-" to read stdin
        input: Option<PathBuf>,

        /// Print a JSON array instead of one URL per line
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// File to read; omit or pass "-" to read stdin
    pub input: Option<PathBuf>,

    /// URL of the video the description belongs to (shown in the report)
    #[arg(long)]
    pub video_url: Option<String>,

    /// Output results as JSON
    #[arg(long, conflicts_with = "csv")]
    pub json: bool,

    /// Output results as CSV (url,status,code)
    #[arg(long)]
    pub csv: bool,

    /// Maximum number of links checked at the same time
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Deadline for each HEAD and each GET request, in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// TOML config file (concurrency, timeout_ms, max_redirects, user_agent)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Check timeout and unknown links once more before printing
    #[arg(long)]
    pub recheck: bool,
}
