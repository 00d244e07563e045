use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use super::util::resolve_reference;
use crate::model::{Candidate, StrategyTag};

const MEDIA_SRC_REGEX_STR: &str =
    r#"(?is)<(?:video|audio)\b[^>]*?\ssrc\s*=\s*["']([^"']+)["']"#;
const SOURCE_SRC_REGEX_STR: &str = r#"(?is)<source\b[^>]*?\ssrc\s*=\s*["']([^"']+)["']"#;

static MEDIA_SRC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MEDIA_SRC_REGEX_STR).unwrap());
static SOURCE_SRC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SOURCE_SRC_REGEX_STR).unwrap());

/// Native media elements: `<video>`/`<audio>` direct `src` attributes plus
/// nested `<source>` alternates. The most structurally reliable signal a
/// page can carry, so this strategy runs and is probed first.
pub(super) fn extract(body: &str, base_url: &Url) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for regex in [&*MEDIA_SRC_REGEX, &*SOURCE_SRC_REGEX] {
        for caps in regex.captures_iter(body) {
            let Some(raw) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            match resolve_reference(base_url, raw) {
                Some(url) => {
                    candidates.push(Candidate::with_raw(url, StrategyTag::MediaTag, raw));
                }
                None => debug!(reference = raw, "skipping unresolvable media source"),
            }
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://site.org/events/1").unwrap()
    }

    #[test]
    fn test_video_src_resolved_against_base() {
        let body = r#"<video controls src="/media/a.mp4"></video>"#;
        let found = extract(body, &base());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "https://site.org/media/a.mp4");
        assert_eq!(found[0].strategy, StrategyTag::MediaTag);
        assert_eq!(found[0].raw_match.as_deref(), Some("/media/a.mp4"));
    }

    #[test]
    fn test_nested_source_alternates_collected() {
        let body = r#"
            <video poster="/poster.jpg">
              <source src="https://cdn.site.org/a.webm" type="video/webm">
              <source src='/fallback/a.mp4' type="video/mp4">
            </video>
        "#;
        let urls: Vec<String> = extract(body, &base()).into_iter().map(|c| c.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://cdn.site.org/a.webm".to_string(),
                "https://site.org/fallback/a.mp4".to_string(),
            ]
        );
    }

    #[test]
    fn test_audio_src_collected() {
        let body = r#"<audio src="meeting.mp3"></audio>"#;
        let found = extract(body, &base());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "https://site.org/events/meeting.mp3");
    }

    #[test]
    fn test_tags_without_src_skipped() {
        let body = r#"<video controls></video><source type="video/mp4">"#;
        assert!(extract(body, &base()).is_empty());
    }
}
