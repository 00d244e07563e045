use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use super::util::{has_media_extension, resolve_reference};
use crate::model::{Candidate, StrategyTag};

const SCRIPT_BLOCK_REGEX_STR: &str = r"(?is)<script\b[^>]*>(.*?)</script>";
// JSON-like pairs; keys may be quoted (JSON) or bare (JS object literals).
// The leading class keeps key names from matching inside longer identifiers
// ("profile" must not count as "file").
const MEDIA_PAIR_REGEX_STR: &str =
    r#"(?:^|[\s"'{,])["']?(?:url|src|source|file|videoUrl|videoSrc)["']?\s*:\s*["']([^"']+)["']"#;

static SCRIPT_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SCRIPT_BLOCK_REGEX_STR).unwrap());
static MEDIA_PAIR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MEDIA_PAIR_REGEX_STR).unwrap());

const SCRIPT_VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "m3u8", "mpd"];

/// Inline `<script>` bodies mined for JSON-like key/value pairs whose key
/// is a recognized media key and whose value ends in a video extension.
/// Players frequently bury their manifest URL in a config blob here.
pub(super) fn extract(body: &str, base_url: &Url) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for script in SCRIPT_BLOCK_REGEX.captures_iter(body) {
        let Some(content) = script.get(1).map(|m| m.as_str()) else {
            continue;
        };
        if content.trim().is_empty() {
            continue;
        }
        for caps in MEDIA_PAIR_REGEX.captures_iter(content) {
            let Some(value) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if !has_media_extension(value, SCRIPT_VIDEO_EXTENSIONS) {
                continue;
            }
            match resolve_reference(base_url, value) {
                Some(url) => {
                    candidates.push(Candidate::with_raw(url, StrategyTag::InlineScript, value));
                }
                None => debug!(value, "skipping unresolvable script media value"),
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
    fn test_json_config_blob_mined() {
        let body = r#"
            <script type="application/json">
              {"player": {"file": "https://cdn.site.org/streams/a.m3u8", "poster": "/p.jpg"}}
            </script>
        "#;
        let found = extract(body, &base());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "https://cdn.site.org/streams/a.m3u8");
        assert_eq!(found[0].strategy, StrategyTag::InlineScript);
    }

    #[test]
    fn test_bare_js_keys_and_relative_values() {
        let body = r#"<script>var cfg = { videoUrl: '/media/clip.mp4?token=x' };</script>"#;
        let found = extract(body, &base());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "https://site.org/media/clip.mp4?token=x");
    }

    #[test]
    fn test_unrecognized_key_or_extension_skipped() {
        let body = r#"
            <script>
              var a = { poster: "https://cdn.site.org/a.mp4" };
              var b = { src: "https://cdn.site.org/app.js" };
              var c = { profile: "https://cdn.site.org/b.mp4" };
            </script>
        "#;
        assert!(extract(body, &base()).is_empty());
    }

    #[test]
    fn test_external_and_empty_scripts_skipped() {
        let body = r#"<script src="/bundle.js"></script><script></script>"#;
        assert!(extract(body, &base()).is_empty());
    }
}
