//! Video-URL resolution pipeline.
//!
//! Given a page suspected of containing a playable video, the pipeline
//! decides on a single concrete URL an external download engine can fetch:
//! a direct probe first, then candidate extraction from the fetched page
//! via a fixed-order set of heuristics, each candidate verified in turn by
//! an injected probe oracle.

pub mod download;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod oracle;
pub mod resolve;

pub use error::ResolverError;
pub use fetch::{FetchError, FetchedPage, HttpPageFetcher, PageFetch};
pub use model::{
    Candidate, ProbeOutcome, ProbeVerdict, ResolutionResult, ResolvedVia, StrategyTag,
};
pub use oracle::{ProbeOracle, YtDlpOracle};
pub use resolve::Resolver;
