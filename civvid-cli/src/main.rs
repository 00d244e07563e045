mod cli;
mod error;
mod output;

use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use tracing::{Level, error, info};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use civvid_resolver::download::{DownloadEngine, YtDlpEngine};
use civvid_resolver::{HttpPageFetcher, ProbeOracle, Resolver, YtDlpOracle};

use crate::cli::{Args, Commands};
use crate::error::{AppError, Result};

/// One record of the upstream scrapers' output. Only the URL matters to
/// the resolver; the metadata rides along untouched.
#[derive(Debug, Deserialize)]
struct BatchRecord {
    #[serde(default)]
    url: String,
    #[serde(default)]
    #[allow(dead_code)]
    title: String,
    #[serde(default)]
    #[allow(dead_code)]
    date: String,
    #[serde(default)]
    #[allow(dead_code)]
    source_type: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    init_logging(args.verbose, args.quiet);

    let mut oracle = match args.ytdlp_path.as_deref() {
        Some(path) => YtDlpOracle::with_binary_path(path),
        None => YtDlpOracle::new(),
    };
    oracle = oracle.probe_timeout(Duration::from_secs(args.probe_timeout));
    let oracle: Arc<dyn ProbeOracle> = Arc::new(oracle);

    if args.ytdlp_path.is_none() && !YtDlpOracle::is_available() {
        tracing::warn!("yt-dlp not found on PATH; probes will report failures");
    }

    let resolver = Resolver::new(oracle.clone(), Arc::new(HttpPageFetcher::new()));

    match args.command {
        Commands::Resolve { urls } => {
            let results = resolver.resolve_all(&urls, args.max_concurrent).await;
            output::print_results(&results, args.format)?;
        }

        Commands::Batch { input, output } => {
            let raw = std::fs::read_to_string(&input)?;
            let records: Vec<BatchRecord> = serde_json::from_str(&raw)?;
            let urls: Vec<String> = records
                .into_iter()
                .map(|r| r.url)
                .filter(|u| !u.is_empty())
                .collect();
            if urls.is_empty() {
                return Err(AppError::InvalidInput(format!(
                    "no records with a url field in {}",
                    input.display()
                )));
            }
            info!(count = urls.len(), "resolving batch input");

            let results = resolver.resolve_all(&urls, args.max_concurrent).await;
            match output {
                Some(path) => {
                    std::fs::write(&path, serde_json::to_string_pretty(&results)?)?;
                    let resolved = results.iter().filter(|r| r.is_resolved()).count();
                    info!(
                        resolved,
                        total = results.len(),
                        output = %path.display(),
                        "batch finished"
                    );
                }
                None => output::print_results(&results, args.format)?,
            }
        }

        Commands::Probe { url } => {
            let verdict = oracle.probe(&url).await;
            output::print_verdict(&url, &verdict, args.format)?;
        }

        Commands::Download { url, output_dir } => {
            let result = resolver.resolve(&url).await;
            let Some(resolved) = result.resolved_url.as_deref() else {
                return Err(AppError::InvalidInput(format!(
                    "could not resolve {url}: {}",
                    result.unresolved_reason.as_deref().unwrap_or("unknown")
                )));
            };
            info!(url = %url, resolved, "resolved, handing off to download engine");

            let engine = match args.ytdlp_path.as_deref() {
                Some(path) => YtDlpEngine::with_binary_path(path),
                None => YtDlpEngine::new(),
            };
            engine.download(resolved, &output_dir).await?;
            println!("downloaded {resolved}");
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}
