//! Relevance tiers.

use serde::{Deserialize, Serialize};

/// How well a candidate name matches a query, most relevant first.
///
/// The derived `Ord` follows declaration order, so sorting by tier puts
/// `Exact` first and `Subsequence` last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchTier {
    /// The name equals the query.
    Exact,
    /// The name starts with the query.
    PrefixMatch,
    /// The query starts a word other than the first.
    WordBoundary,
    /// The query occurs somewhere in the name.
    Substring,
    /// The query characters occur in order, possibly with gaps.
    Subsequence,
}

impl MatchTier {
    /// All tiers in priority order.
    pub const ALL: [Self; 5] = [
        Self::Exact,
        Self::PrefixMatch,
        Self::WordBoundary,
        Self::Substring,
        Self::Subsequence,
    ];

    /// Position of this tier in [`MatchTier::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether the matched characters form one contiguous run.
    #[must_use]
    pub const fn is_contiguous(self) -> bool {
        !matches!(self, Self::Subsequence)
    }
}

#[cfg(test)]
mod tests {
    use super::MatchTier;

    #[test]
    fn ordering_follows_priority() {
        let mut tiers = vec![
            MatchTier::Subsequence,
            MatchTier::Exact,
            MatchTier::Substring,
            MatchTier::WordBoundary,
            MatchTier::PrefixMatch,
        ];
        tiers.sort();
        assert_eq!(tiers, MatchTier::ALL.to_vec());
    }

    #[test]
    fn index_matches_position() {
        for (position, tier) in MatchTier::ALL.iter().enumerate() {
            assert_eq!(tier.index(), position);
        }
    }

    #[test]
    fn only_subsequence_is_scattered() {
        let scattered: Vec<MatchTier> = MatchTier::ALL
            .into_iter()
            .filter(|tier| !tier.is_contiguous())
            .collect();
        assert_eq!(scattered, [MatchTier::Subsequence]);
    }
}
