//! Provider registry with atomically published snapshots.
//!
//! # Concurrency
//!
//! * Readers load the current [`RegistrySnapshot`] from an `ArcSwap`; they
//!   never block and never see a half-built index.
//! * Writers (`register`, `update_configuration`, `rebuild_index`) are
//!   serialized by one mutex, build a complete replacement snapshot and
//!   publish it with a single store.
//! * A reader that keeps an old snapshot keeps a consistent view of the
//!   state it loaded; the next load observes the new one.
//!
//! # Collisions
//!
//! When two providers claim the same prefix text, the one registered later
//! owns it. Replacing a provider through `register` keeps its original
//! registration slot. Every collision is logged at rebuild time and listed
//! in [`RegistrySnapshot::collisions`].

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use crate::domain::{builtin_providers, is_usable_prefix, PrefixConfiguration, ProviderDefinition};

use super::snapshot::{PrefixIndex, RegistrySnapshot};

/// Writer-side state. Only touched with the writer lock held.
#[derive(Debug, Default)]
struct WriterState {
    providers: Vec<Arc<ProviderDefinition>>,
    by_id: HashMap<String, usize>,
    config: Arc<PrefixConfiguration>,
    generation: u64,
}

impl WriterState {
    fn snapshot(&mut self, index: Arc<PrefixIndex>) -> RegistrySnapshot {
        self.generation += 1;
        RegistrySnapshot::new(
            self.generation,
            self.providers.clone(),
            self.by_id.clone(),
            Arc::clone(&self.config),
            index,
        )
    }
}

/// Owns the provider table and the prefix → provider index.
///
/// Share it behind an `Arc` between the search path (reads) and the
/// settings flow (reconfiguration).
///
/// # Examples
///
/// ```
/// use launcher_search::{PrefixConfiguration, ProviderRegistry};
///
/// let registry = ProviderRegistry::with_builtins();
/// assert_eq!(registry.find_by_prefix("s").map(|p| p.id.clone()), Some("web".to_string()));
///
/// registry.update_configuration(PrefixConfiguration::new().with_prefixes("web", ["g"]));
/// assert!(registry.find_by_prefix("s").is_none());
/// assert_eq!(registry.prefixes_for("web"), vec!["g"]);
/// ```
pub struct ProviderRegistry {
    writer: Mutex<WriterState>,
    current: ArcSwap<RegistrySnapshot>,
}

impl ProviderRegistry {
    /// Creates a registry holding `providers` in order, with their default
    /// prefixes indexed.
    #[must_use]
    pub fn new(providers: impl IntoIterator<Item = ProviderDefinition>) -> Self {
        let mut state = WriterState::default();
        for provider in providers {
            insert_provider(&mut state, provider);
        }
        let index = Arc::new(PrefixIndex::build(&state.providers, &state.config));
        log_collisions(&index);
        let snapshot = state.snapshot(index);

        Self {
            writer: Mutex::new(state),
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Creates a registry seeded with [`builtin_providers`].
    #[must_use]
    pub fn with_builtins() -> Self {
        Self::new(builtin_providers())
    }

    /// Inserts a provider, or replaces the one with the same id.
    ///
    /// The prefix index is carried over unchanged: a new provider becomes
    /// reachable by prefix after the next [`update_configuration`] or
    /// [`rebuild_index`]. It is reachable by id immediately.
    ///
    /// [`update_configuration`]: Self::update_configuration
    /// [`rebuild_index`]: Self::rebuild_index
    pub fn register(&self, provider: ProviderDefinition) {
        let _span = tracing::debug_span!("registry_register", provider = %provider.id).entered();

        let mut state = self.writer.lock();
        let replaced = insert_provider(&mut state, provider);
        let index = Arc::clone(self.current.load().index());
        let snapshot = state.snapshot(index);
        self.current.store(Arc::new(snapshot));
        drop(state);

        tracing::debug!(replaced, "provider registered");
    }

    /// Swaps in a new prefix configuration and rebuilds the index.
    pub fn update_configuration(&self, config: PrefixConfiguration) {
        let _span = tracing::debug_span!("registry_update_configuration").entered();

        let mut state = self.writer.lock();
        state.config = Arc::new(config);
        self.publish_rebuilt(&mut state);
    }

    /// Rebuilds the index from the registered providers and the current
    /// configuration.
    pub fn rebuild_index(&self) {
        let _span = tracing::debug_span!("registry_rebuild_index").entered();

        let mut state = self.writer.lock();
        self.publish_rebuilt(&mut state);
    }

    fn publish_rebuilt(&self, state: &mut WriterState) {
        let index = Arc::new(PrefixIndex::build(&state.providers, &state.config));
        log_collisions(&index);
        let snapshot = state.snapshot(index);
        let generation = snapshot.generation();
        let prefix_count = snapshot.prefixes_longest_first().len();
        self.current.store(Arc::new(snapshot));

        tracing::debug!(generation, prefix_count, "prefix index published");
    }

    /// The current snapshot. Hold it to run several lookups against one
    /// consistent state.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.current.load_full()
    }

    #[must_use]
    pub fn find_by_prefix(&self, prefix: &str) -> Option<Arc<ProviderDefinition>> {
        self.current.load().find_by_prefix(prefix).cloned()
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<Arc<ProviderDefinition>> {
        self.current.load().find_by_id(id).cloned()
    }

    #[must_use]
    pub fn all_prefixes(&self) -> BTreeSet<String> {
        self.current.load().all_prefixes()
    }

    #[must_use]
    pub fn prefixes_for(&self, id: &str) -> Vec<String> {
        self.current.load().prefixes_for(id)
    }

    /// The active prefix configuration.
    #[must_use]
    pub fn configuration(&self) -> Arc<PrefixConfiguration> {
        Arc::clone(&self.writer.lock().config)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.current.load();
        f.debug_struct("ProviderRegistry")
            .field("generation", &snapshot.generation())
            .field("providers", &snapshot.providers().count())
            .field("prefixes", &snapshot.prefixes_longest_first())
            .finish_non_exhaustive()
    }
}

/// Returns `true` when an existing provider was replaced in place.
fn insert_provider(state: &mut WriterState, provider: ProviderDefinition) -> bool {
    if !is_usable_prefix(&provider.default_prefix) {
        tracing::warn!(
            provider = %provider.id,
            prefix = ?provider.default_prefix,
            "default prefix is unusable, provider is only reachable through configured prefixes"
        );
    }
    let provider = Arc::new(provider);
    if let Some(&slot) = state.by_id.get(&provider.id) {
        state.providers[slot] = provider;
        true
    } else {
        state.by_id.insert(provider.id.clone(), state.providers.len());
        state.providers.push(provider);
        false
    }
}

fn log_collisions(index: &PrefixIndex) {
    for collision in index.collisions() {
        tracing::warn!(
            prefix = %collision.prefix,
            winner = %collision.winner,
            shadowed = ?collision.shadowed,
            "prefix claimed by several providers"
        );
    }
}
