use url::Url;

/// Resolve a possibly-relative reference against the page base.
///
/// Returns `None` for references `Url::join` cannot make sense of; such
/// candidates are dropped, never surfaced as errors.
pub(super) fn resolve_reference(base_url: &Url, reference: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    base_url.join(reference).ok().map(String::from)
}

/// True when the URL path, query and fragment ignored, ends in one of the
/// given lowercase extensions.
pub(super) fn has_media_extension(value: &str, extensions: &[&str]) -> bool {
    let path = value.split(['?', '#']).next().unwrap_or(value);
    let Some((_, ext)) = path.rsplit_once('.') else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    extensions.iter().any(|e| *e == ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_reference_relative_and_absolute() {
        let base = Url::parse("https://site.org/events/1").unwrap();
        assert_eq!(
            resolve_reference(&base, "/clip.mp4").as_deref(),
            Some("https://site.org/clip.mp4")
        );
        assert_eq!(
            resolve_reference(&base, "https://cdn.example.com/a.mp4").as_deref(),
            Some("https://cdn.example.com/a.mp4")
        );
        assert_eq!(
            resolve_reference(&base, "//cdn.example.com/a.mp4").as_deref(),
            Some("https://cdn.example.com/a.mp4")
        );
        assert!(resolve_reference(&base, "").is_none());
        assert!(resolve_reference(&base, "   ").is_none());
    }

    #[test]
    fn test_has_media_extension() {
        const EXTS: &[&str] = &["mp4", "m3u8"];
        assert!(has_media_extension("https://x/a.mp4", EXTS));
        assert!(has_media_extension("https://x/a.MP4", EXTS));
        assert!(has_media_extension("https://x/a.m3u8?token=1", EXTS));
        assert!(has_media_extension("/relative/clip.mp4#t=10", EXTS));
        assert!(!has_media_extension("https://x/a.mp4.png", EXTS));
        assert!(!has_media_extension("https://x/watch", EXTS));
        assert!(!has_media_extension("plain text", EXTS));
    }
}
