use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::model::{Candidate, StrategyTag};

// Raw-text scan, deliberately blind to HTML structure: a safety net for
// URLs embedded in non-standard markup the tag strategies cannot see.
const FILE_URL_REGEX_STR: &str =
    r#"(?i)https?://[^\s"'<>\\]+\.(?:mp4|webm|mov|avi|wmv|flv|m3u8|mpd|ts)\b"#;

static FILE_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FILE_URL_REGEX_STR).unwrap());

/// Absolute `http(s)` literals anywhere in the raw page text whose path
/// ends in a known video file extension.
pub(super) fn extract(body: &str, _base_url: &Url) -> Vec<Candidate> {
    FILE_URL_REGEX
        .find_iter(body)
        .map(|m| {
            let raw = m.as_str();
            Candidate::with_raw(raw, StrategyTag::FilePattern, raw)
        })
        .collect()
}
