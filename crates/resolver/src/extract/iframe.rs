use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::model::{Candidate, StrategyTag};

const IFRAME_SRC_REGEX_STR: &str = r#"(?is)<iframe\b[^>]*?\ssrc\s*=\s*["']([^"']+)["']"#;

static IFRAME_SRC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IFRAME_SRC_REGEX_STR).unwrap());

/// Every iframe `src`, verbatim and unfiltered. These often point at
/// third-party embed players the oracle can itself resolve recursively, so
/// no content filtering is applied here; normalization happens in the
/// dedup pass like every other candidate.
pub(super) fn extract(body: &str, _base_url: &Url) -> Vec<Candidate> {
    IFRAME_SRC_REGEX
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            let raw = m.as_str().trim();
            Candidate::with_raw(raw, StrategyTag::IframeTag, raw)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://site.org/events/1").unwrap()
    }

    #[test]
    fn test_embed_iframe_collected_verbatim() {
        let body = r#"<iframe width="560" src="https://www.youtube.com/embed/abc123" allowfullscreen></iframe>"#;
        let found = extract(body, &base());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "https://www.youtube.com/embed/abc123");
        assert_eq!(found[0].strategy, StrategyTag::IframeTag);
    }

    #[test]
    fn test_relative_iframe_left_unresolved_here() {
        // Resolution against the base is the dedup pass's job.
        let body = r#"<iframe src="/player?id=9"></iframe>"#;
        let found = extract(body, &base());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "/player?id=9");
    }

    #[test]
    fn test_iframe_without_src_skipped() {
        assert!(extract(r#"<iframe name="empty"></iframe>"#, &base()).is_empty());
    }
}
