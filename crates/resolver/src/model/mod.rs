pub mod candidate;
pub mod resolution;

pub use candidate::{Candidate, StrategyTag};
pub use resolution::{ProbeOutcome, ProbeVerdict, ResolutionResult, ResolvedVia};
