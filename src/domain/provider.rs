//! Search provider model.
//!
//! A provider is an alternate search destination (web, contacts, files,
//! video) that the user reaches by typing one of its trigger prefixes
//! followed by a space. This module holds the static description of a
//! provider and the user-editable mapping from provider id to prefixes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Identifier of the built-in web search provider.
pub const PROVIDER_WEB: &str = "web";
/// Identifier of the built-in contacts provider.
pub const PROVIDER_CONTACTS: &str = "contacts";
/// Identifier of the built-in files provider.
pub const PROVIDER_FILES: &str = "files";
/// Identifier of the built-in video provider.
pub const PROVIDER_VIDEO: &str = "video";

/// Display metadata for a provider, handed to the UI while it is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Human-readable provider name.
    pub display_name: String,
    /// Placeholder text shown in the search field while the provider is active.
    pub search_hint: String,
}

/// A registered search provider.
///
/// `id` is a persisted key and must never change once shipped; it is
/// independent of the display name. `default_prefix` is used whenever the
/// active [`PrefixConfiguration`] has no usable entry for this provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDefinition {
    pub id: String,
    pub default_prefix: String,
    pub config: ProviderConfig,
}

impl ProviderDefinition {
    /// Creates a provider whose search hint is derived from its name.
    ///
    /// # Examples
    ///
    /// ```
    /// use launcher_search::ProviderDefinition;
    ///
    /// let maps = ProviderDefinition::new("maps", "Maps", "m");
    /// assert_eq!(maps.name(), "Maps");
    /// assert_eq!(maps.config.search_hint, "Search Maps");
    /// ```
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        default_prefix: impl Into<String>,
    ) -> Self {
        let display_name = display_name.into();
        let search_hint = format!("Search {display_name}");
        Self {
            id: id.into(),
            default_prefix: default_prefix.into(),
            config: ProviderConfig {
                display_name,
                search_hint,
            },
        }
    }

    /// Replaces the search hint.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.config.search_hint = hint.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.display_name
    }
}

/// The providers a launcher ships with.
///
/// Identifiers are the `PROVIDER_*` constants; default prefixes are single
/// characters so the common case costs two keystrokes.
#[must_use]
pub fn builtin_providers() -> Vec<ProviderDefinition> {
    vec![
        ProviderDefinition::new(PROVIDER_WEB, "Web", "s").with_hint("Search the web"),
        ProviderDefinition::new(PROVIDER_CONTACTS, "Contacts", "c"),
        ProviderDefinition::new(PROVIDER_FILES, "Files", "f"),
        ProviderDefinition::new(PROVIDER_VIDEO, "Video", "y").with_hint("Search videos"),
    ]
}

/// User-selected trigger prefixes, keyed by provider id.
///
/// Providers without an entry (or whose entry is empty) fall back to their
/// default prefix. Providers listed in `disabled` contribute no prefixes at
/// all.
///
/// Deserialized lists pass through [`PrefixConfiguration::set_prefixes`], so
/// stored configurations get the same sanitising as programmatic ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PrefixConfigurationRecord", into = "PrefixConfigurationRecord")]
pub struct PrefixConfiguration {
    prefixes: BTreeMap<String, Vec<String>>,
    disabled: BTreeSet<String>,
}

/// Serialized shape of [`PrefixConfiguration`].
#[derive(Default, Serialize, Deserialize)]
struct PrefixConfigurationRecord {
    #[serde(default)]
    prefixes: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    disabled: BTreeSet<String>,
}

impl From<PrefixConfigurationRecord> for PrefixConfiguration {
    fn from(record: PrefixConfigurationRecord) -> Self {
        let mut config = Self::new();
        for (id, prefixes) in record.prefixes {
            config.set_prefixes(id, prefixes);
        }
        config.disabled = record.disabled;
        config
    }
}

impl From<PrefixConfiguration> for PrefixConfigurationRecord {
    fn from(config: PrefixConfiguration) -> Self {
        Self {
            prefixes: config.prefixes,
            disabled: config.disabled,
        }
    }
}

/// Whether `prefix` can trigger a provider: non-empty and free of
/// whitespace, since the router could not tell it apart from the separator.
#[must_use]
pub fn is_usable_prefix(prefix: &str) -> bool {
    !prefix.is_empty() && !prefix.chars().any(char::is_whitespace)
}

impl PrefixConfiguration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix list for one provider, replacing any previous list.
    ///
    /// Entries failing [`is_usable_prefix`] are dropped with a warning. Repeated
    /// entries keep their first position. Case and script are preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use launcher_search::PrefixConfiguration;
    ///
    /// let mut config = PrefixConfiguration::new();
    /// config.set_prefixes("files", ["f", "", "f", "م", "a b"]);
    /// assert_eq!(config.configured("files"), Some(&["f".to_string(), "م".to_string()][..]));
    /// ```
    pub fn set_prefixes<I, S>(&mut self, id: impl Into<String>, prefixes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        let mut kept: Vec<String> = Vec::new();
        for prefix in prefixes {
            let prefix = prefix.into();
            if !is_usable_prefix(&prefix) {
                tracing::warn!(provider = %id, prefix = ?prefix, "ignoring unusable prefix");
                continue;
            }
            if !kept.contains(&prefix) {
                kept.push(prefix);
            }
        }
        self.prefixes.insert(id, kept);
    }

    /// Builder-style variant of [`PrefixConfiguration::set_prefixes`].
    #[must_use]
    pub fn with_prefixes<I, S>(mut self, id: impl Into<String>, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_prefixes(id, prefixes);
        self
    }

    /// Marks a provider as disabled or enabled.
    pub fn set_disabled(&mut self, id: impl Into<String>, disabled: bool) {
        let id = id.into();
        if disabled {
            self.disabled.insert(id);
        } else {
            self.disabled.remove(&id);
        }
    }

    #[must_use]
    pub fn is_disabled(&self, id: &str) -> bool {
        self.disabled.contains(id)
    }

    /// The configured list for `id`, if one was set (it may be empty).
    #[must_use]
    pub fn configured(&self, id: &str) -> Option<&[String]> {
        self.prefixes.get(id).map(Vec::as_slice)
    }

    /// Prefixes in effect for `provider` under this configuration.
    ///
    /// Disabled providers have none. Otherwise the configured list wins when
    /// it is non-empty, and the provider's default prefix is used when it is
    /// missing or empty. An unusable default prefix counts as no prefix.
    #[must_use]
    pub fn effective_prefixes(&self, provider: &ProviderDefinition) -> Vec<String> {
        if self.is_disabled(&provider.id) {
            return Vec::new();
        }
        match self.configured(&provider.id) {
            Some(list) if !list.is_empty() => list.to_vec(),
            _ if !is_usable_prefix(&provider.default_prefix) => Vec::new(),
            _ => vec![provider.default_prefix.clone()],
        }
    }
}
