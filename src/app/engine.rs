//! Keystroke-level search flow.
//!
//! [`SearchEngine`] ties routing and ranking together the way the drawer
//! uses them on every keystroke:
//!
//! ```text
//! input ─▶ router::parse ─┬─ provider matched ─▶ SearchOutcome::Provider
//!                         ├─ blank query      ─▶ SearchOutcome::Recents
//!                         └─ otherwise        ─▶ rank ─▶ SearchOutcome::Items
//! ```
//!
//! The provider's own search is not run here; the outcome carries the
//! parsed query for the host to dispatch.

use std::sync::Arc;

use crate::domain::Candidate;
use crate::ranking::{rank_with_tiers, RankedCandidate, UsageLog};
use crate::registry::ProviderRegistry;
use crate::router::{self, ParsedQuery};
use crate::Config;

/// What the drawer should show for one input.
#[derive(Debug)]
pub enum SearchOutcome<'a, C> {
    /// The query is blank: recently launched items, best first.
    Recents(Vec<&'a C>),
    /// Ranked item matches, truncated to the configured maximum.
    Items(Vec<RankedCandidate<'a, C>>),
    /// A provider prefix was typed; hand `query` to that provider.
    Provider(ParsedQuery),
}

impl<C> SearchOutcome<'_, C> {
    /// Number of listed items; zero for a provider hand-off.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Recents(items) => items.len(),
            Self::Items(items) => items.len(),
            Self::Provider(_) => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Search front end for one drawer.
///
/// The registry is shared so a settings flow can reconfigure prefixes while
/// searches run; the usage log and limits belong to the engine.
#[derive(Debug)]
pub struct SearchEngine {
    registry: Arc<ProviderRegistry>,
    usage: UsageLog,
    max_results: usize,
    recents_limit: usize,
}

impl SearchEngine {
    /// Creates an engine over `registry` with default limits.
    #[must_use]
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        let defaults = Config::default();
        Self {
            registry,
            usage: UsageLog::new(),
            max_results: defaults.max_results,
            recents_limit: defaults.recents_limit,
        }
    }

    /// Replaces the usage log, e.g. with one restored by the host.
    #[must_use]
    pub fn with_usage(mut self, usage: UsageLog) -> Self {
        self.usage = usage;
        self
    }

    #[must_use]
    pub const fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    #[must_use]
    pub const fn usage(&self) -> &UsageLog {
        &self.usage
    }

    #[must_use]
    pub const fn max_results(&self) -> usize {
        self.max_results
    }

    /// Applies limits and pushes the prefix configuration to the registry.
    pub fn apply_config(&mut self, config: &Config) {
        let _span = tracing::debug_span!(
            "apply_config",
            max_results = config.max_results,
            recents_limit = config.recents_limit
        )
        .entered();

        self.max_results = config.max_results;
        self.recents_limit = config.recents_limit;
        self.registry.update_configuration(config.prefix_configuration());
    }

    /// Notes that `candidate` was launched now.
    pub fn record_launch<C: Candidate + ?Sized>(&mut self, candidate: &C) {
        self.usage.record_launch_now(candidate.key());
    }

    /// Resolves `input` against `candidates` at the current time.
    pub fn search<'a, C: Candidate>(&self, input: &str, candidates: &'a [C]) -> SearchOutcome<'a, C> {
        self.search_at(input, candidates, chrono::Utc::now().timestamp())
    }

    /// Resolves `input` with `now` (Unix seconds) as the recents clock.
    pub fn search_at<'a, C: Candidate>(
        &self,
        input: &str,
        candidates: &'a [C],
        now: i64,
    ) -> SearchOutcome<'a, C> {
        let _span = tracing::debug_span!(
            "search",
            input_len = input.len(),
            candidates = candidates.len()
        )
        .entered();

        let parsed = router::parse(input, &self.registry);
        if parsed.is_provider() {
            return SearchOutcome::Provider(parsed);
        }

        if parsed.query.trim().is_empty() {
            let recents = self.usage.recents(candidates, self.recents_limit, now);
            tracing::debug!(count = recents.len(), "showing recents");
            return SearchOutcome::Recents(recents);
        }

        let mut items = rank_with_tiers(&parsed.query, candidates);
        items.truncate(self.max_results);
        SearchOutcome::Items(items)
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchEngine, SearchOutcome};
    use crate::domain::AppEntry;
    use crate::ranking::MatchTier;
    use crate::registry::ProviderRegistry;
    use crate::Config;
    use std::sync::Arc;

    fn apps() -> Vec<AppEntry> {
        vec![
            AppEntry::new("maps", "Maps"),
            AppEntry::new("run", "MapMyRun"),
            AppEntry::new("bitmap", "Bitmap Converter"),
            AppEntry::new("gmaps", "Google Maps"),
        ]
    }

    #[test]
    fn blank_input_shows_recents() {
        let mut engine = SearchEngine::new(Arc::new(ProviderRegistry::with_builtins()));
        let apps = apps();
        engine.record_launch(&apps[3]);

        match engine.search("   ", &apps) {
            SearchOutcome::Recents(recents) => assert_eq!(recents, [&apps[3]]),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn items_are_truncated_to_max_results() {
        let mut engine = SearchEngine::new(Arc::new(ProviderRegistry::with_builtins()));
        engine.apply_config(&Config {
            max_results: 2,
            ..Config::default()
        });

        let apps = apps();
        let outcome = engine.search("map", &apps);
        assert_eq!(outcome.len(), 2);
        if let SearchOutcome::Items(items) = outcome {
            assert_eq!(items[0].candidate.label, "Maps");
            assert_eq!(items[1].candidate.label, "MapMyRun");
            assert!(items.iter().all(|item| item.tier == MatchTier::PrefixMatch));
        } else {
            panic!("expected items");
        }
    }

    #[test]
    fn provider_prefix_hands_off() {
        let engine = SearchEngine::new(Arc::new(ProviderRegistry::with_builtins()));
        let apps = apps();
        let outcome = engine.search("y lofi beats", &apps);
        assert!(outcome.is_empty());
        match outcome {
            SearchOutcome::Provider(parsed) => {
                assert_eq!(parsed.provider_id(), Some("video"));
                assert_eq!(parsed.query, "lofi beats");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn disabled_provider_prefix_is_item_search() {
        let mut engine = SearchEngine::new(Arc::new(ProviderRegistry::with_builtins()));
        engine.apply_config(&Config {
            disabled: vec!["contacts".to_string()],
            ..Config::default()
        });
        let apps = vec![AppEntry::new("cam", "C Camera")];
        assert!(matches!(engine.search("c camera", &apps), SearchOutcome::Items(_)));
    }
}
