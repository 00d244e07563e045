//! The resolution orchestrator: direct probe, then extract-and-verify.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};
use url::Url;

use crate::extract::extract_unique_candidates;
use crate::fetch::PageFetch;
use crate::model::{ProbeOutcome, ResolutionResult, ResolvedVia};
use crate::oracle::ProbeOracle;

/// Bound for the outer loop when resolving independent inputs
/// concurrently. Within one resolution, probes stay strictly sequential.
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Ties the pipeline together: probes the original URL directly and, on
/// failure, fetches the page, extracts candidates, and probes each in
/// precedence order until one passes or the set is exhausted.
///
/// The oracle and fetch transport are injected capabilities; both are
/// stateless with respect to the pipeline, so one `Resolver` may serve
/// concurrent resolutions.
pub struct Resolver {
    oracle: Arc<dyn ProbeOracle>,
    fetcher: Arc<dyn PageFetch>,
}

impl Resolver {
    pub fn new(oracle: Arc<dyn ProbeOracle>, fetcher: Arc<dyn PageFetch>) -> Self {
        Self { oracle, fetcher }
    }

    /// Resolve one input page to at most one confirmed media URL.
    ///
    /// Never returns an error: every failure mode finalizes as a
    /// well-formed unresolved result with a human-readable reason, and the
    /// result is finalized exactly once. Probe order within the resolution
    /// is a hard invariant; candidates are tried strictly in strategy
    /// precedence, first success wins, no backtracking.
    pub async fn resolve(&self, url: &str) -> ResolutionResult {
        let mut result = ResolutionResult::new(url);

        // Only absolute URLs enter the pipeline.
        if Url::parse(url).is_err() {
            return result.unresolved("input url is not absolute");
        }

        // Short-circuit for the common case where the input is already a
        // direct media endpoint.
        let direct = self.oracle.probe(url).await;
        if direct.is_downloadable() {
            info!(url, "direct probe succeeded");
            return result.resolved(url, ResolvedVia::Direct);
        }
        debug!(
            url,
            detail = direct.detail().unwrap_or(""),
            "direct probe failed, extracting candidates from page"
        );

        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(url, error = %e, "page fetch failed");
                return result.unresolved(format!("page fetch failed: {e}"));
            }
        };

        let candidates = extract_unique_candidates(&page.body, &page.final_url);
        if candidates.is_empty() {
            info!(url, "no candidates found on page");
            return result.unresolved("no candidates found");
        }
        info!(url, count = candidates.len(), "probing extracted candidates");

        for candidate in candidates {
            let verdict = self.oracle.probe(&candidate.url).await;
            result
                .candidates_tried
                .push(ProbeOutcome::record(&candidate.url, &verdict));
            if verdict.is_downloadable() {
                info!(
                    url,
                    resolved = %candidate.url,
                    strategy = %candidate.strategy,
                    "candidate passed verification"
                );
                return result.resolved(candidate.url, ResolvedVia::Extracted(candidate.strategy));
            }
            debug!(candidate = %candidate.url, "candidate failed verification");
        }

        warn!(url, "no candidate passed verification");
        result.unresolved("no candidate passed verification")
    }

    /// Resolve independent inputs concurrently, bounded by
    /// `max_concurrent`. Completion order is arbitrary, so results are
    /// re-sorted into input order before returning.
    pub async fn resolve_all(&self, urls: &[String], max_concurrent: usize) -> Vec<ResolutionResult> {
        let limit = max_concurrent.max(1);
        let mut indexed: Vec<(usize, ResolutionResult)> =
            stream::iter(urls.iter().enumerate())
                .map(|(index, url)| async move { (index, self.resolve(url).await) })
                .buffer_unordered(limit)
                .collect()
                .await;
        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, result)| result).collect()
    }
}
