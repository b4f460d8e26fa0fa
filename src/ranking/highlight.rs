//! Match highlighting for result rows.
//!
//! Matching runs on the lowercase name. The resulting ranges are mapped back
//! to character positions of the name as given, so they line up with the
//! displayed label even when lowercasing changes the character count
//! (`İ` lowercases to two characters).

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use super::classifier::{classify, normalize_query};
use super::tier::MatchTier;

/// Character ranges `(start, end)` (end exclusive) of `name` to emphasize
/// for `query`. Empty when the name does not match or the query is blank.
///
/// Contiguous tiers highlight the run the tier predicate matched. The
/// subsequence tier uses the Skim alignment, which prefers word starts and
/// adjacent characters, and falls back to the leftmost in-order positions.
///
/// # Examples
///
/// ```
/// use launcher_search::ranking::highlight_ranges;
///
/// assert_eq!(highlight_ranges("Google Maps", "map"), vec![(7, 10)]);
/// assert_eq!(highlight_ranges("Call of Duty", "cod"), vec![(0, 1), (5, 6), (8, 9)]);
/// assert!(highlight_ranges("Clock", "xyz").is_empty());
/// ```
#[must_use]
pub fn highlight_ranges(name: &str, query: &str) -> Vec<(usize, usize)> {
    let query = normalize_query(query);
    if query.is_empty() {
        return Vec::new();
    }
    let lower = name.to_lowercase();

    let Some(tier) = classify(&lower, &query) else {
        return Vec::new();
    };

    let ranges = if tier.is_contiguous() {
        contiguous_range(tier, &lower, &query).into_iter().collect()
    } else {
        let query_chars = query.chars().count();
        let indices = SkimMatcherV2::default()
            .fuzzy_indices(&lower, &query)
            .map(|(_score, indices)| indices)
            .filter(|indices| indices.len() == query_chars)
            .or_else(|| greedy_positions(&lower, &query))
            .unwrap_or_default();
        coalesce(&indices)
    };
    to_name_positions(name, &ranges)
}

/// The single run matched by a contiguous tier, in lowercase char indices.
fn contiguous_range(tier: MatchTier, lower: &str, query: &str) -> Option<(usize, usize)> {
    let byte = match tier {
        MatchTier::Exact | MatchTier::PrefixMatch => Some(0),
        MatchTier::WordBoundary => word_start_offset(lower, query),
        MatchTier::Substring | MatchTier::Subsequence => lower.find(query),
    }?;
    let start = lower[..byte].chars().count();
    Some((start, start + query.chars().count()))
}

/// Maps ranges over `name.to_lowercase()` onto char positions of `name`.
fn to_name_positions(name: &str, ranges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut origin = Vec::with_capacity(name.len());
    for (index, ch) in name.chars().enumerate() {
        origin.extend(std::iter::repeat(index).take(ch.to_lowercase().count()));
    }

    let mut mapped: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
    for &(start, end) in ranges {
        let (Some(&first), Some(&last)) = (origin.get(start), origin.get(end.saturating_sub(1))) else {
            continue;
        };
        match mapped.last_mut() {
            Some((_, prev_end)) if *prev_end >= first => *prev_end = (*prev_end).max(last + 1),
            _ => mapped.push((first, last + 1)),
        }
    }
    mapped
}

fn word_start_offset(name: &str, query: &str) -> Option<usize> {
    name.char_indices()
        .filter(|(_, ch)| ch.is_whitespace())
        .map(|(at, ch)| at + ch.len_utf8())
        .find(|&start| name[start..].starts_with(query))
}

/// Leftmost char positions of `query` in `text`, in order.
fn greedy_positions(text: &str, query: &str) -> Option<Vec<usize>> {
    let mut positions = Vec::with_capacity(query.len());
    let mut text_chars = text.chars().enumerate();
    for wanted in query.chars() {
        let (position, _) = text_chars.by_ref().find(|(_, ch)| *ch == wanted)?;
        positions.push(position);
    }
    Some(positions)
}

/// Folds sorted indices into half-open runs.
fn coalesce(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &index in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == index => *end += 1,
            _ => ranges.push((index, index + 1)),
        }
    }
    ranges
}
