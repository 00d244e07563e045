use serde::{Deserialize, Serialize};
use std::fmt;

use super::candidate::StrategyTag;

/// Outcome of a single oracle probe, as reported by the oracle itself.
///
/// `NotDownloadable` means the oracle ran and decided against the URL;
/// `Failed` means the verification itself broke (spawn error, timeout).
/// Both advance the pipeline identically, but callers can tell "verified
/// unfetchable" apart from "verification broke" in the recorded outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeVerdict {
    Downloadable,
    NotDownloadable { reason: Option<String> },
    Failed { error: String },
}

impl ProbeVerdict {
    pub fn is_downloadable(&self) -> bool {
        matches!(self, ProbeVerdict::Downloadable)
    }

    /// Human-readable detail, if the verdict carries any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ProbeVerdict::Downloadable => None,
            ProbeVerdict::NotDownloadable { reason } => reason.as_deref(),
            ProbeVerdict::Failed { error } => Some(error),
        }
    }
}

/// Immutable record of one probe. Probes are never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub url: String,
    pub downloadable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeOutcome {
    pub fn record(url: impl Into<String>, verdict: &ProbeVerdict) -> Self {
        Self {
            url: url.into(),
            downloadable: verdict.is_downloadable(),
            error: verdict.detail().map(ToOwned::to_owned),
        }
    }
}

/// How a resolution succeeded: the original URL passed the direct probe,
/// or a candidate extracted by a specific strategy did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVia {
    Direct,
    Extracted(StrategyTag),
}

impl ResolvedVia {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvedVia::Direct => "direct",
            ResolvedVia::Extracted(tag) => tag.as_str(),
        }
    }
}

impl fmt::Display for ResolvedVia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResolvedVia {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResolvedVia {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == "direct" {
            return Ok(ResolvedVia::Direct);
        }
        StrategyTag::from_str_tag(&s)
            .map(ResolvedVia::Extracted)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown resolution strategy: {s}")))
    }
}

/// The finalized decision for one input page.
///
/// Created per input URL, populated as the orchestrator probes candidates,
/// and finalized exactly once: either `resolved_url` is set, or
/// `unresolved_reason` explains why nothing passed. `candidates_tried`
/// records candidate probes only; a successful direct probe leaves it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub original_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_used: Option<ResolvedVia>,
    #[serde(default)]
    pub candidates_tried: Vec<ProbeOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unresolved_reason: Option<String>,
}

impl ResolutionResult {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            resolved_url: None,
            strategy_used: None,
            candidates_tried: Vec::new(),
            unresolved_reason: None,
        }
    }

    pub fn resolved(mut self, url: impl Into<String>, via: ResolvedVia) -> Self {
        self.resolved_url = Some(url.into());
        self.strategy_used = Some(via);
        self
    }

    pub fn unresolved(mut self, reason: impl Into<String>) -> Self {
        self.unresolved_reason = Some(reason.into());
        self
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_url.is_some()
    }
}
