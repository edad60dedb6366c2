use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fragseek")]
#[command(author, version, about = "Locate the next fragment to load from an HLS level")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick the next fragment to load for a buffer position
    Next {
        /// Media playlist (.m3u8) or level snapshot (.json)
        #[arg(required = true)]
        playlist: PathBuf,

        /// End of the buffered range in seconds
        #[arg(long, allow_negative_numbers = true)]
        buffer_end: f64,

        /// End of the level in seconds (defaults to the end of the last fragment)
        #[arg(long)]
        end: Option<f64>,

        /// Sequence number of the last appended fragment
        #[arg(long)]
        previous_sn: Option<u64>,

        /// PTS of the first fragment in seconds (defaults to its media start)
        #[arg(long)]
        start: Option<f64>,

        /// The buffer follows a discontinuity or seek; prefer program date time
        #[arg(long)]
        discontinuity: bool,

        /// Override the configured lookup tolerance in seconds
        #[arg(long)]
        tolerance: Option<f64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the fragment covering a program date time
    Pdt {
        /// Media playlist (.m3u8) or level snapshot (.json)
        #[arg(required = true)]
        playlist: PathBuf,

        /// Milliseconds since the epoch or an ISO-8601 timestamp
        #[arg(long)]
        at: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the fragments of a level
    Inspect {
        /// Media playlist (.m3u8) or level snapshot (.json)
        #[arg(required = true)]
        playlist: PathBuf,

        /// Output the level snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
