//! Immutable registry state.
//!
//! A [`RegistrySnapshot`] is built off to the side and then published whole,
//! so a reader holding one sees a consistent provider table and prefix index
//! for as long as it keeps the `Arc`.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use crate::domain::{PrefixConfiguration, ProviderDefinition};

/// A prefix claimed by more than one provider during an index rebuild.
///
/// The provider processed last (in registration order) owns the prefix;
/// the others are shadowed for that prefix only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixCollision {
    pub prefix: String,
    pub winner: String,
    pub shadowed: Vec<String>,
}

/// Prefix → provider index derived from providers and a configuration.
#[derive(Debug, Clone, Default)]
pub(crate) struct PrefixIndex {
    by_prefix: HashMap<String, String>,
    longest_first: Vec<String>,
    collisions: Vec<PrefixCollision>,
}

impl PrefixIndex {
    /// Indexes the effective prefixes of every provider, in order.
    ///
    /// A later provider overwrites an earlier one on the same prefix text.
    pub(crate) fn build(providers: &[Arc<ProviderDefinition>], config: &PrefixConfiguration) -> Self {
        let mut by_prefix: HashMap<String, String> = HashMap::new();
        let mut claims: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for provider in providers {
            for prefix in config.effective_prefixes(provider) {
                let claimants = claims.entry(prefix.clone()).or_default();
                if !claimants.contains(&provider.id) {
                    claimants.push(provider.id.clone());
                }
                by_prefix.insert(prefix, provider.id.clone());
            }
        }

        let collisions: Vec<PrefixCollision> = claims
            .into_iter()
            .filter(|(_, claimants)| claimants.len() > 1)
            .filter_map(|(prefix, mut claimants)| {
                let winner = claimants.pop()?;
                Some(PrefixCollision {
                    prefix,
                    winner,
                    shadowed: claimants,
                })
            })
            .collect();

        let mut longest_first: Vec<String> = by_prefix.keys().cloned().collect();
        longest_first.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });

        Self {
            by_prefix,
            longest_first,
            collisions,
        }
    }

    pub(crate) fn collisions(&self) -> &[PrefixCollision] {
        &self.collisions
    }
}

/// One published state of a [`ProviderRegistry`](super::ProviderRegistry).
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    generation: u64,
    providers: Vec<Arc<ProviderDefinition>>,
    by_id: HashMap<String, usize>,
    config: Arc<PrefixConfiguration>,
    index: Arc<PrefixIndex>,
}

impl RegistrySnapshot {
    pub(crate) fn new(
        generation: u64,
        providers: Vec<Arc<ProviderDefinition>>,
        by_id: HashMap<String, usize>,
        config: Arc<PrefixConfiguration>,
        index: Arc<PrefixIndex>,
    ) -> Self {
        Self {
            generation,
            providers,
            by_id,
            config,
            index,
        }
    }

    pub(crate) fn index(&self) -> &Arc<PrefixIndex> {
        &self.index
    }

    /// Publication counter; increases with every register or reconfiguration.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The prefix configuration this snapshot was built from.
    #[must_use]
    pub fn configuration(&self) -> &PrefixConfiguration {
        &self.config
    }

    /// Registered providers in registration order.
    pub fn providers(&self) -> impl Iterator<Item = &Arc<ProviderDefinition>> {
        self.providers.iter()
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Arc<ProviderDefinition>> {
        self.by_id.get(id).and_then(|&slot| self.providers.get(slot))
    }

    /// The provider that owns `prefix` in the current index.
    #[must_use]
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&Arc<ProviderDefinition>> {
        self.index
            .by_prefix
            .get(prefix)
            .and_then(|id| self.find_by_id(id))
    }

    /// Every indexed prefix.
    #[must_use]
    pub fn all_prefixes(&self) -> BTreeSet<String> {
        self.index.by_prefix.keys().cloned().collect()
    }

    /// Indexed prefixes ordered by descending character count, ties broken
    /// lexicographically.
    #[must_use]
    pub fn prefixes_longest_first(&self) -> &[String] {
        &self.index.longest_first
    }

    /// Effective prefixes of one provider; empty for unknown ids.
    #[must_use]
    pub fn prefixes_for(&self, id: &str) -> Vec<String> {
        self.find_by_id(id)
            .map(|provider| self.config.effective_prefixes(provider))
            .unwrap_or_default()
    }

    /// Prefixes claimed by more than one provider, sorted by prefix.
    #[must_use]
    pub fn collisions(&self) -> &[PrefixCollision] {
        &self.index.collisions
    }
}

#[cfg(test)]
mod tests {
    use super::PrefixIndex;
    use crate::domain::{PrefixConfiguration, ProviderDefinition};
    use std::sync::Arc;

    fn providers() -> Vec<Arc<ProviderDefinition>> {
        vec![
            Arc::new(ProviderDefinition::new("web", "Web", "s")),
            Arc::new(ProviderDefinition::new("video", "Video", "y")),
            Arc::new(ProviderDefinition::new("music", "Music", "y")),
        ]
    }

    #[test]
    fn later_provider_wins_collision() {
        let index = PrefixIndex::build(&providers(), &PrefixConfiguration::new());
        assert_eq!(index.by_prefix.get("y").map(String::as_str), Some("music"));
        assert_eq!(index.collisions.len(), 1);
        assert_eq!(index.collisions[0].winner, "music");
        assert_eq!(index.collisions[0].shadowed, vec!["video".to_string()]);
    }

    #[test]
    fn longest_first_orders_by_chars_then_text() {
        let config = PrefixConfiguration::new()
            .with_prefixes("web", ["s", "gg", "ab"])
            .with_prefixes("video", ["yt", "م"]);
        let index = PrefixIndex::build(&providers()[..2], &config);
        assert_eq!(index.longest_first, vec!["ab", "gg", "yt", "s", "م"]);
    }

    #[test]
    fn repeated_prefix_within_provider_is_not_a_collision() {
        let providers = vec![Arc::new(ProviderDefinition::new("web", "Web", "s"))];
        let config = PrefixConfiguration::new().with_prefixes("web", ["s", "s"]);
        let index = PrefixIndex::build(&providers, &config);
        assert!(index.collisions.is_empty());
    }
}
