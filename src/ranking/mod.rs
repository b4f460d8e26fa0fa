//! Candidate ranking.
//!
//! # Modules
//!
//! - [`tier`]: The five relevance tiers
//! - [`classifier`]: Tier classification and stable tiered ranking
//! - [`highlight`]: Matched-character ranges for result rows
//! - [`frecency`]: Launch history ordering for the empty-query view

pub mod classifier;
pub mod frecency;
pub mod highlight;
pub mod tier;

pub use classifier::{classify, is_subsequence, normalize_query, rank, rank_with_tiers, RankedCandidate};
pub use frecency::{calculate_score, UsageLog, UsageRecord};
pub use highlight::highlight_ranges;
pub use tier::MatchTier;
