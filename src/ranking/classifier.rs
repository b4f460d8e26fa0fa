//! Tiered match classification and ranking.
//!
//! Each candidate is assigned to the first [`MatchTier`] whose predicate it
//! satisfies; candidates satisfying none are dropped. The result is every
//! `Exact` match in input order, then every `PrefixMatch`, and so on down to
//! `Subsequence`.
//!
//! # Algorithm
//!
//! 1. Normalize the query: trim surrounding whitespace, lowercase.
//! 2. Classify every candidate once against its lowercase name, counting
//!    members per tier.
//! 3. Allocate the output once at its final size and fill it tier by tier,
//!    which keeps the order stable inside a tier.
//!
//! An empty normalized query puts every candidate in `Substring`, since the
//! empty string occurs in every name.

use crate::domain::Candidate;

use super::tier::MatchTier;

/// A candidate together with the tier it was ranked in.
#[derive(Debug)]
pub struct RankedCandidate<'a, C> {
    pub candidate: &'a C,
    pub tier: MatchTier,
}

impl<C> Clone for RankedCandidate<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for RankedCandidate<'_, C> {}

/// Trims and lowercases a raw query the way [`rank`] does.
///
/// # Examples
///
/// ```
/// use launcher_search::ranking::normalize_query;
///
/// assert_eq!(normalize_query("  Google MAPS "), "google maps");
/// assert_eq!(normalize_query("   "), "");
/// ```
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Classifies an already-lowercased name against an already-normalized query.
///
/// Returns `None` when the name matches no tier. Tiers are tested in
/// priority order and the first hit wins, so a name is never in two tiers.
///
/// # Examples
///
/// ```
/// use launcher_search::ranking::{classify, MatchTier};
///
/// assert_eq!(classify("maps", "map"), Some(MatchTier::PrefixMatch));
/// assert_eq!(classify("google maps", "map"), Some(MatchTier::WordBoundary));
/// assert_eq!(classify("bitmap converter", "map"), Some(MatchTier::Substring));
/// assert_eq!(classify("call of duty", "cod"), Some(MatchTier::Subsequence));
/// assert_eq!(classify("calculator", "xyz"), None);
/// ```
#[must_use]
pub fn classify(name: &str, query: &str) -> Option<MatchTier> {
    if query.is_empty() {
        return Some(MatchTier::Substring);
    }

    if name == query {
        Some(MatchTier::Exact)
    } else if name.starts_with(query) {
        Some(MatchTier::PrefixMatch)
    } else if starts_inner_word(name, query) {
        Some(MatchTier::WordBoundary)
    } else if name.contains(query) {
        Some(MatchTier::Substring)
    } else if is_subsequence(query, name) {
        Some(MatchTier::Subsequence)
    } else {
        None
    }
}

/// Whether `query` begins right after some whitespace character in `name`.
fn starts_inner_word(name: &str, query: &str) -> bool {
    name.char_indices()
        .filter(|(_, ch)| ch.is_whitespace())
        .any(|(at, ch)| name[at + ch.len_utf8()..].starts_with(query))
}

/// Whether the characters of `query` appear in `text` in order.
///
/// Comparison is exact; callers lowercase both sides first. A query longer
/// than the text (in bytes, which bounds the character match) can never be
/// a subsequence, so that case returns before scanning.
///
/// # Examples
///
/// ```
/// use launcher_search::ranking::is_subsequence;
///
/// assert!(is_subsequence("cod", "call of duty"));
/// assert!(!is_subsequence("xyz", "calculator"));
/// assert!(is_subsequence("", "anything"));
/// assert!(!is_subsequence("longer", "short"));
/// ```
#[must_use]
pub fn is_subsequence(query: &str, text: &str) -> bool {
    if query.len() > text.len() {
        return false;
    }

    let mut pending = query.chars().peekable();
    for ch in text.chars() {
        match pending.peek() {
            None => break,
            Some(&wanted) if wanted == ch => {
                pending.next();
            }
            Some(_) => {}
        }
    }
    pending.peek().is_none()
}

/// Ranks `candidates` against `query`, keeping the tier of each result.
///
/// See the module docs for the ordering contract.
pub fn rank_with_tiers<'a, C: Candidate>(
    query: &str,
    candidates: &'a [C],
) -> Vec<RankedCandidate<'a, C>> {
    let _span = tracing::debug_span!(
        "rank",
        candidates = candidates.len(),
        query_len = query.len()
    )
    .entered();

    let query = normalize_query(query);

    let mut counts = [0_usize; MatchTier::ALL.len()];
    let tiers: Vec<Option<MatchTier>> = candidates
        .iter()
        .map(|candidate| {
            let tier = classify(&candidate.lowercase_name(), &query);
            if let Some(tier) = tier {
                counts[tier.index()] += 1;
            }
            tier
        })
        .collect();

    let total: usize = counts.iter().sum();
    let mut ranked = Vec::with_capacity(total);
    for tier in MatchTier::ALL {
        if counts[tier.index()] == 0 {
            continue;
        }
        ranked.extend(
            candidates
                .iter()
                .zip(&tiers)
                .filter(|(_, assigned)| **assigned == Some(tier))
                .map(|(candidate, _)| RankedCandidate { candidate, tier }),
        );
    }

    tracing::debug!(
        matched = total,
        exact = counts[MatchTier::Exact.index()],
        subsequence = counts[MatchTier::Subsequence.index()],
        "candidates ranked"
    );
    ranked
}

/// Ranks `candidates` against `query`.
///
/// # Examples
///
/// ```
/// use launcher_search::ranking::rank;
///
/// let apps = ["Maps", "MapMyRun", "Bitmap Converter", "Google Maps", "Clock"];
/// let ranked = rank("map", &apps);
/// assert_eq!(ranked, [&"Maps", &"MapMyRun", &"Google Maps", &"Bitmap Converter"]);
/// ```
pub fn rank<'a, C: Candidate>(query: &str, candidates: &'a [C]) -> Vec<&'a C> {
    let ranked = rank_with_tiers(query, candidates);
    let mut out = Vec::with_capacity(ranked.len());
    out.extend(ranked.into_iter().map(|entry| entry.candidate));
    out
}

#[cfg(test)]
mod tests {
    use super::{classify, is_subsequence, rank, rank_with_tiers, starts_inner_word};
    use crate::domain::AppEntry;
    use crate::ranking::MatchTier;

    #[test]
    fn exact_beats_prefix_case_insensitively() {
        assert_eq!(classify("maps", "maps"), Some(MatchTier::Exact));
        let ranked = rank("MAPS", &["Maps Pro", "maps"]);
        assert_eq!(ranked, [&"maps", &"Maps Pro"]);
    }

    #[test]
    fn word_boundary_skips_first_word() {
        assert!(starts_inner_word("google maps", "maps"));
        assert!(!starts_inner_word("maps", "maps"));
        assert!(starts_inner_word("tab\tmaps", "maps"));
        assert!(!starts_inner_word("bitmap", "map"));
    }

    #[test]
    fn word_boundary_handles_non_ascii_separator() {
        assert!(starts_inner_word("caf\u{e9}\u{a0}noir", "noir"));
    }

    #[test]
    fn overlapping_occurrences_still_find_word_start() {
        // "a a" occurs at 1 and again (overlapping) at 3, after a space.
        assert_eq!(classify("xa a a", "a a"), Some(MatchTier::WordBoundary));
    }

    #[test]
    fn subsequence_requires_order() {
        assert!(is_subsequence("cod", "call of duty"));
        assert!(!is_subsequence("doc", "call of duty"));
        assert!(is_subsequence("ünî", "ü n î"));
    }

    #[test]
    fn unmatched_candidates_are_dropped() {
        let ranked = rank("xyz", &["Calculator", "Camera"]);
        assert!(ranked.is_empty());
    }

    #[test]
    fn blank_query_keeps_everything_as_substring() {
        let apps = ["b", "a", "c"];
        let ranked = rank_with_tiers("   ", &apps);
        assert_eq!(ranked.len(), 3);
        assert!(ranked.iter().all(|entry| entry.tier == MatchTier::Substring));
        let names: Vec<&str> = ranked.iter().map(|entry| *entry.candidate).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn empty_candidate_list_ranks_to_empty() {
        let apps: [AppEntry; 0] = [];
        assert!(rank("map", &apps).is_empty());
    }

    #[test]
    fn query_is_trimmed_before_matching() {
        let apps = [AppEntry::new("a", "Maps")];
        let ranked = rank_with_tiers("  maps  ", &apps);
        assert_eq!(ranked[0].tier, MatchTier::Exact);
    }

    #[test]
    fn within_tier_order_is_input_order() {
        let apps = ["Mapper", "Maps", "Mapbox"];
        assert_eq!(rank("map", &apps), [&"Mapper", &"Maps", &"Mapbox"]);
    }
}
