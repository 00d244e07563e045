use rustc_hash::FxHashSet;
use tracing::debug;
use url::Url;

use super::util::resolve_reference;
use crate::model::Candidate;

/// Canonicalizes the raw candidate sequence and removes duplicates.
///
/// Every URL is resolved to absolute form against the page base (candidates
/// `Url::join` cannot resolve are dropped); the earliest occurrence of each
/// normalized URL wins, so a URL found by two strategies is kept under the
/// higher-precedence one. Idempotent: re-running on its own output removes
/// and reorders nothing.
pub fn dedup_candidates(candidates: Vec<Candidate>, base_url: &Url) -> Vec<Candidate> {
    let mut seen = FxHashSet::default();
    let mut unique = Vec::with_capacity(candidates.len());
    for mut candidate in candidates {
        let Some(absolute) = resolve_reference(base_url, &candidate.url) else {
            debug!(url = %candidate.url, "dropping candidate with unresolvable url");
            continue;
        };
        if seen.insert(absolute.clone()) {
            candidate.url = absolute;
            unique.push(candidate);
        }
    }
    unique
}
