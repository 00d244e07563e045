use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "civvid",
    version,
    about = "Resolve downloadable video URLs from civic meeting pages"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Maximum number of pages resolved concurrently
    #[arg(long, global = true, default_value_t = 4)]
    pub max_concurrent: usize,

    /// Per-probe timeout in seconds
    #[arg(long, global = true, default_value_t = 60)]
    pub probe_timeout: u64,

    /// Path to the yt-dlp binary
    #[arg(long, global = true, env = "YTDLP_PATH")]
    pub ytdlp_path: Option<String>,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve one or more page URLs to downloadable media URLs
    Resolve {
        /// Page URLs to resolve
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Resolve every record in a JSON input file
    Batch {
        /// Input JSON: an array of records carrying a "url" field
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Write results to this file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Run a single oracle probe without resolving
    Probe {
        /// URL to probe
        url: String,
    },

    /// Resolve a page, then hand the winning URL to the download engine
    Download {
        /// Page URL to resolve and download
        url: String,

        /// Directory downloads land in
        #[arg(long, default_value = "downloads")]
        output_dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}
