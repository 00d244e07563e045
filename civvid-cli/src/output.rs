use civvid_resolver::{ProbeVerdict, ResolutionResult};

use crate::cli::OutputFormat;
use crate::error::Result;

pub fn print_results(results: &[ResolutionResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(results)?);
        }
        OutputFormat::Pretty => {
            for result in results {
                print_result(result);
            }
            let resolved = results.iter().filter(|r| r.is_resolved()).count();
            println!("{resolved}/{} resolved", results.len());
        }
    }
    Ok(())
}

fn print_result(result: &ResolutionResult) {
    match (&result.resolved_url, &result.strategy_used) {
        (Some(url), Some(via)) => {
            println!("ok    {}", result.original_url);
            println!("      {url} (via {via})");
        }
        _ => {
            println!("fail  {}", result.original_url);
            println!(
                "      {}",
                result.unresolved_reason.as_deref().unwrap_or("unresolved")
            );
        }
    }
    if !result.candidates_tried.is_empty() {
        println!("      {} candidate(s) probed", result.candidates_tried.len());
    }
}

pub fn print_verdict(url: &str, verdict: &ProbeVerdict, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let record = serde_json::json!({
                "url": url,
                "downloadable": verdict.is_downloadable(),
                "error": verdict.detail(),
            });
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        OutputFormat::Pretty => match verdict {
            ProbeVerdict::Downloadable => println!("downloadable: {url}"),
            ProbeVerdict::NotDownloadable { reason } => {
                println!("not downloadable: {url}");
                if let Some(reason) = reason {
                    println!("      {reason}");
                }
            }
            ProbeVerdict::Failed { error } => {
                println!("probe failed: {url}");
                println!("      {error}");
            }
        },
    }
    Ok(())
}
