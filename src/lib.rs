//! Launcher search: the ranking and query-routing engine behind a
//! home-screen app drawer.
//!
//! Every keystroke in the drawer's search field goes through two steps:
//!
//! - **Routing** ([`router`]): decide whether the text invokes one of the
//!   alternate search providers (web, contacts, files, video) by starting
//!   with one of its trigger prefixes plus a space.
//! - **Ranking** ([`ranking`]): otherwise filter the installed apps against
//!   the text and order them by a fixed relevance tier ladder.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Demo shell (main.rs)                               │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Keystroke flow
//! │  - Route, then rank or hand off                     │
//! │  - Recents for the empty query                      │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Router        │   │ Registry      │   │ Ranking       │
//! │ (router/)     │──▶│ (registry/)   │   │ (ranking/)    │
//! │ - Prefix rule │   │ - Prefix index│   │ - Match tiers │
//! │ - ParsedQuery │   │ - Snapshots   │   │ - Highlights  │
//! │               │   │ - Collisions  │   │ - Frecency    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Candidates, providers, errors (domain/)          │
//! │  - Data and config paths (infrastructure/)          │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing subscriber, OTLP-JSON file export        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: [`SearchEngine`] facade
//! - [`domain`]: Candidates, providers, prefix configuration, errors
//! - [`infrastructure`]: Path resolution
//! - [`ranking`]: Tiered match ranking, highlighting, recents
//! - [`registry`]: Provider registry with atomic reconfiguration
//! - [`router`]: Prefix routing
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! ```toml
//! max_results = 50
//! recents_limit = 8
//! trace_level = "info"
//! disabled = ["contacts"]
//!
//! [prefixes]
//! web = ["s", "g"]
//! files = ["f", "م"]
//! ```
//!
//! # Example
//!
//! ```rust
//! use launcher_search::{initialize, AppEntry, Config, SearchOutcome};
//!
//! let engine = initialize(&Config::default());
//! let apps = vec![
//!     AppEntry::new("com.example.maps", "Maps"),
//!     AppEntry::new("com.example.run", "MapMyRun"),
//!     AppEntry::new("com.google.maps", "Google Maps"),
//! ];
//!
//! match engine.search("map", &apps) {
//!     SearchOutcome::Items(items) => assert_eq!(items[0].candidate.label, "Maps"),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//!
//! let routed = engine.search("s weather", &apps);
//! assert!(matches!(routed, SearchOutcome::Provider(ref parsed) if parsed.query == "weather"));
//! ```
//!
//! # Concurrency
//!
//! Ranking and routing are synchronous and keep no state between calls.
//! The [`ProviderRegistry`] is the only shared mutable state; readers load
//! an immutable snapshot and reconfiguration publishes a complete new one.

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ranking;
pub mod registry;
pub mod router;

pub use app::{SearchEngine, SearchOutcome};
pub use domain::{
    builtin_providers, AppEntry, Candidate, LauncherError, PrefixConfiguration, ProviderConfig,
    ProviderDefinition, Result,
};
pub use ranking::{rank, MatchTier, RankedCandidate};
pub use registry::{ProviderRegistry, RegistrySnapshot};
pub use router::{parse, ParsedQuery};

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

const DEFAULT_MAX_RESULTS: usize = 50;
const DEFAULT_RECENTS_LIMIT: usize = 8;
const MAX_RESULTS_RANGE: std::ops::RangeInclusive<usize> = 1..=500;
const RECENTS_LIMIT_RANGE: std::ops::RangeInclusive<usize> = 0..=100;

/// Engine configuration.
///
/// Read from a TOML file with [`Config::load`], from a TOML string with
/// [`Config::from_toml_str`], or from a flat key/value map handed over by a
/// host with [`Config::from_map`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Upper bound on ranked items returned per keystroke. Default: 50
    pub max_results: usize,

    /// Number of recent items shown for an empty query. Default: 8
    pub recents_limit: usize,

    /// Tracing filter directive (`trace`, `debug`, `info`, ...). Default: `"info"`
    pub trace_level: Option<String>,

    /// Provider ids that contribute no prefixes.
    pub disabled: Vec<String>,

    /// Trigger prefixes per provider id. Providers missing here keep their
    /// default prefix.
    pub prefixes: BTreeMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            recents_limit: DEFAULT_RECENTS_LIMIT,
            trace_level: None,
            disabled: Vec::new(),
            prefixes: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::ConfigParse`] for malformed TOML or unknown
    /// keys and [`LauncherError::Config`] for out-of-range values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use launcher_search::Config;
    ///
    /// let config = Config::from_toml_str(r#"
    ///     max_results = 20
    ///     [prefixes]
    ///     web = ["g"]
    /// "#)?;
    /// assert_eq!(config.max_results, 20);
    /// assert_eq!(config.prefix_configuration().configured("web"), Some(&["g".to_string()][..]));
    /// # Ok::<(), launcher_search::LauncherError>(())
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration file at `path`; a missing file yields the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = ?path, "no config file, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(path = ?path, "loading config file");
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Builds a configuration from flat string pairs.
    ///
    /// # Parsing Rules
    ///
    /// - `max_results`, `recents_limit`: numbers; unparsable or out-of-range
    ///   values fall back to the defaults
    /// - `trace_level`: taken as is
    /// - `disabled`: comma-separated provider ids
    /// - `prefix.<id>`: comma-separated prefixes for provider `<id>`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use launcher_search::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("prefix.video".to_string(), "y, yt".to_string());
    /// map.insert("max_results".to_string(), "many".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.prefixes["video"], vec!["y", "yt"]);
    /// assert_eq!(config.max_results, 50);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let max_results = map
            .get("max_results")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| MAX_RESULTS_RANGE.contains(n))
            .unwrap_or(DEFAULT_MAX_RESULTS);

        let recents_limit = map
            .get("recents_limit")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| RECENTS_LIMIT_RANGE.contains(n))
            .unwrap_or(DEFAULT_RECENTS_LIMIT);

        let disabled = map.get("disabled").map(|s| split_list(s)).unwrap_or_default();

        let prefixes = map
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix("prefix.")
                    .filter(|id| !id.is_empty())
                    .map(|id| (id.to_string(), split_list(value)))
            })
            .collect();

        Self {
            max_results,
            recents_limit,
            trace_level: map.get("trace_level").cloned(),
            disabled,
            prefixes,
        }
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::Config`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        if !MAX_RESULTS_RANGE.contains(&self.max_results) {
            return Err(LauncherError::Config(format!(
                "max_results must be within {MAX_RESULTS_RANGE:?}, got {}",
                self.max_results
            )));
        }
        if !RECENTS_LIMIT_RANGE.contains(&self.recents_limit) {
            return Err(LauncherError::Config(format!(
                "recents_limit must be within {RECENTS_LIMIT_RANGE:?}, got {}",
                self.recents_limit
            )));
        }
        if let Some(id) = self.prefixes.keys().find(|id| id.trim().is_empty()) {
            return Err(LauncherError::Config(format!("empty provider id in prefixes: {id:?}")));
        }
        Ok(())
    }

    /// The prefix configuration handed to the registry.
    #[must_use]
    pub fn prefix_configuration(&self) -> PrefixConfiguration {
        let mut config = PrefixConfiguration::new();
        for (id, prefixes) in &self.prefixes {
            config.set_prefixes(id.clone(), prefixes.iter().cloned());
        }
        for id in &self.disabled {
            config.set_disabled(id.clone(), true);
        }
        config
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Creates an engine with the built-in providers and `config` applied.
///
/// Tracing is not set up here; call [`observability::init_tracing`] first
/// if spans should be exported.
#[must_use]
pub fn initialize(config: &Config) -> SearchEngine {
    tracing::debug!(
        max_results = config.max_results,
        configured_providers = config.prefixes.len(),
        "initializing search engine"
    );

    let registry = std::sync::Arc::new(ProviderRegistry::with_builtins());
    let mut engine = SearchEngine::new(registry);
    engine.apply_config(config);
    engine
}
