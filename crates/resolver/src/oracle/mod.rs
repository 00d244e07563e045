pub mod ytdlp;

pub use ytdlp::YtDlpOracle;

use async_trait::async_trait;

use crate::model::ProbeVerdict;

/// Verification oracle: reports whether a download engine could extract a
/// playable stream from a URL, without performing the real transfer.
///
/// Infallible at the call boundary; a broken probe is a
/// [`ProbeVerdict::Failed`], never an `Err`. Implementations must be safe
/// to call repeatedly and concurrently, and must come back within their
/// own timeout. Verdicts may be wrong in both directions (a site can block
/// the probe yet serve the transfer, and vice versa); callers treat them
/// as evidence, not proof.
#[async_trait]
pub trait ProbeOracle: Send + Sync {
    async fn probe(&self, url: &str) -> ProbeVerdict;
}
