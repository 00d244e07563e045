//! Candidate extraction: five independent heuristics run in a fixed order
//! over the fetched page body, concatenated, then deduplicated.
//!
//! Every strategy is a pure function over `(body, base_url)`; the only side
//! effect anywhere in this module is diagnostic logging.

mod anchor_text;
mod dedup;
mod file_pattern;
mod iframe;
mod inline_script;
mod media_tag;
mod util;

pub use dedup::dedup_candidates;

use tracing::debug;
use url::Url;

use crate::model::{Candidate, StrategyTag};

type StrategyFn = fn(&str, &Url) -> Vec<Candidate>;

struct StrategyEntry {
    tag: StrategyTag,
    run: StrategyFn,
}

// Fixed strategy table. Table order is the probe-precedence order and must
// stay in sync with the `StrategyTag` variant order.
static STRATEGIES: &[StrategyEntry] = &[
    StrategyEntry {
        tag: StrategyTag::MediaTag,
        run: media_tag::extract,
    },
    StrategyEntry {
        tag: StrategyTag::IframeTag,
        run: iframe::extract,
    },
    StrategyEntry {
        tag: StrategyTag::InlineScript,
        run: inline_script::extract,
    },
    StrategyEntry {
        tag: StrategyTag::FilePattern,
        run: file_pattern::extract,
    },
    StrategyEntry {
        tag: StrategyTag::AnchorText,
        run: anchor_text::extract,
    },
];

/// Runs every strategy over the page body and concatenates the matches in
/// strategy-precedence order. Performs no network I/O; deterministic for
/// identical input.
pub fn extract_candidates(body: &str, base_url: &Url) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for entry in STRATEGIES {
        let mut found = (entry.run)(body, base_url);
        debug!(strategy = %entry.tag, count = found.len(), "strategy pass finished");
        candidates.append(&mut found);
    }
    candidates
}

/// Extraction followed by normalization and dedup: the ordered unique
/// candidate list the orchestrator probes.
pub fn extract_unique_candidates(body: &str, base_url: &Url) -> Vec<Candidate> {
    dedup_candidates(extract_candidates(body, base_url), base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_table_matches_tag_order() {
        let table: Vec<StrategyTag> = STRATEGIES.iter().map(|e| e.tag).collect();
        assert_eq!(table, StrategyTag::ALL.to_vec());
    }

    #[test]
    fn test_extraction_concatenates_in_precedence_order() {
        let base = Url::parse("https://site.org/events/1").unwrap();
        let body = r#"
            <a href="https://site.org/archive/clip.mp4">Download recording</a>
            <video src="/media/a.mp4"></video>
            <iframe src="https://embed.example.com/x"></iframe>
        "#;

        let candidates = extract_candidates(body, &base);
        let tags: Vec<StrategyTag> = candidates.iter().map(|c| c.strategy).collect();
        // The anchor appears first in the markup but last in the output:
        // output order is strategy order, not document order.
        assert_eq!(
            tags,
            vec![
                StrategyTag::MediaTag,
                StrategyTag::IframeTag,
                StrategyTag::FilePattern,
                StrategyTag::AnchorText,
            ]
        );
    }

    #[test]
    fn test_empty_page_yields_no_candidates() {
        let base = Url::parse("https://site.org/").unwrap();
        assert!(extract_candidates("", &base).is_empty());
        assert!(extract_candidates("<html><body>nothing here</body></html>", &base).is_empty());
    }
}
