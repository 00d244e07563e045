use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use super::util::resolve_reference;
use crate::model::{Candidate, StrategyTag};

const ANCHOR_REGEX_STR: &str =
    r#"(?is)<a\b[^>]*?\shref\s*=\s*["']([^"']+)["'][^>]*>(.*?)</a>"#;
const INNER_TAG_REGEX_STR: &str = r"(?s)<[^>]*>";

static ANCHOR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(ANCHOR_REGEX_STR).unwrap());
static INNER_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(INNER_TAG_REGEX_STR).unwrap());

// The weakest heuristic of the set: plain keyword matching on links.
// Highest false-positive risk, so it runs and is probed last.
const LINK_KEYWORDS: &[&str] = &["download", "media", "video"];

/// Anchors whose href or visible text mentions a download-ish keyword,
/// case-insensitively. Anchors without an href never match the pattern and
/// are skipped by construction.
pub(super) fn extract(body: &str, base_url: &Url) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for caps in ANCHOR_REGEX.captures_iter(body) {
        let (Some(href), Some(inner)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let href = href.as_str();
        let text = INNER_TAG_REGEX.replace_all(inner.as_str(), " ");
        let haystack_href = href.to_lowercase();
        let haystack_text = text.to_lowercase();
        let matched = LINK_KEYWORDS
            .iter()
            .any(|kw| haystack_href.contains(kw) || haystack_text.contains(kw));
        if !matched {
            continue;
        }
        match resolve_reference(base_url, href) {
            Some(url) => candidates.push(Candidate::with_raw(url, StrategyTag::AnchorText, href)),
            None => debug!(href, "skipping unresolvable anchor href"),
        }
    }
    candidates
}
