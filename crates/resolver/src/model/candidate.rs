use serde::{Deserialize, Serialize};
use std::fmt;

/// Extraction strategies, declared in probe-precedence order.
///
/// The derived `Ord` is the precedence: earlier variants are structurally
/// more reliable signals (a native media tag is far more likely to be the
/// intended content than a generic "download" keyword match) and are both
/// extracted and probed first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StrategyTag {
    MediaTag,
    IframeTag,
    InlineScript,
    FilePattern,
    AnchorText,
}

impl StrategyTag {
    /// Every strategy, in precedence order.
    pub const ALL: [StrategyTag; 5] = [
        StrategyTag::MediaTag,
        StrategyTag::IframeTag,
        StrategyTag::InlineScript,
        StrategyTag::FilePattern,
        StrategyTag::AnchorText,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyTag::MediaTag => "media_tag",
            StrategyTag::IframeTag => "iframe_tag",
            StrategyTag::InlineScript => "inline_script",
            StrategyTag::FilePattern => "file_pattern",
            StrategyTag::AnchorText => "anchor_text",
        }
    }

    pub fn from_str_tag(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tag| tag.as_str() == s)
    }
}

impl fmt::Display for StrategyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URL hypothesized, not confirmed, to reference downloadable media,
/// tagged with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub url: String,
    pub strategy: StrategyTag,
    /// The raw text the strategy matched, before any normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_match: Option<String>,
}

impl Candidate {
    pub fn new(url: impl Into<String>, strategy: StrategyTag) -> Self {
        Self {
            url: url.into(),
            strategy,
            raw_match: None,
        }
    }

    pub fn with_raw(
        url: impl Into<String>,
        strategy: StrategyTag,
        raw_match: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            strategy,
            raw_match: Some(raw_match.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_precedence_order() {
        assert!(StrategyTag::MediaTag < StrategyTag::IframeTag);
        assert!(StrategyTag::IframeTag < StrategyTag::InlineScript);
        assert!(StrategyTag::InlineScript < StrategyTag::FilePattern);
        assert!(StrategyTag::FilePattern < StrategyTag::AnchorText);
    }

    #[test]
    fn test_strategy_tag_round_trip() {
        for tag in StrategyTag::ALL {
            assert_eq!(StrategyTag::from_str_tag(tag.as_str()), Some(tag));
        }
        assert_eq!(StrategyTag::from_str_tag("bogus"), None);
    }

    #[test]
    fn test_strategy_tag_serde() {
        let json = serde_json::to_string(&StrategyTag::MediaTag).unwrap();
        assert_eq!(json, r#""media_tag""#);
        let back: StrategyTag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StrategyTag::MediaTag);
    }
}
