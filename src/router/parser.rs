//! Prefix routing.
//!
//! A provider activates only when the raw input starts with one of its
//! prefixes immediately followed by a single ASCII space. Prefixes are tried
//! longest first (by character count, ties lexicographic), so `"yt"` is
//! never shadowed by `"y"`.
//!
//! Input that is, or is still growing into, a prefix without the space is
//! passed through as an ordinary item query and flagged with
//! [`ParsedQuery::awaiting_separator`]. Typing `"s"` therefore keeps
//! filtering apps until the user commits to the web provider with `"s "`.

use crate::registry::{ProviderRegistry, RegistrySnapshot};

use super::query::ParsedQuery;

const SEPARATOR: char = ' ';

/// Routes `input` against the registry's current state.
///
/// # Examples
///
/// ```
/// use launcher_search::{router, ProviderRegistry};
///
/// let registry = ProviderRegistry::with_builtins();
///
/// let parsed = router::parse("s cats", &registry);
/// assert_eq!(parsed.provider_id(), Some("web"));
/// assert_eq!(parsed.query, "cats");
///
/// let parsed = router::parse("s", &registry);
/// assert!(parsed.provider.is_none());
/// assert_eq!(parsed.query, "s");
/// ```
#[must_use]
pub fn parse(input: &str, registry: &ProviderRegistry) -> ParsedQuery {
    parse_snapshot(input, &registry.snapshot())
}

/// Routes `input` against one pinned snapshot.
#[must_use]
pub fn parse_snapshot(input: &str, snapshot: &RegistrySnapshot) -> ParsedQuery {
    if input.is_empty() {
        return ParsedQuery::passthrough(String::new());
    }

    let _span = tracing::debug_span!(
        "parse",
        input_len = input.len(),
        generation = snapshot.generation()
    )
    .entered();

    let prefixes = snapshot.prefixes_longest_first();
    for prefix in prefixes {
        let Some(residual) = input
            .strip_prefix(prefix.as_str())
            .and_then(|rest| rest.strip_prefix(SEPARATOR))
        else {
            continue;
        };
        if let Some(provider) = snapshot.find_by_prefix(prefix) {
            tracing::debug!(provider = %provider.id, prefix = %prefix, "provider activated");
            return ParsedQuery::activated(provider.clone(), prefix, residual);
        }
    }

    let trimmed = input.trim();
    let awaiting_separator =
        !trimmed.is_empty() && prefixes.iter().any(|prefix| prefix.starts_with(trimmed));

    let mut parsed = ParsedQuery::passthrough(input);
    parsed.awaiting_separator = awaiting_separator;
    parsed
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::domain::{PrefixConfiguration, ProviderDefinition};
    use crate::registry::ProviderRegistry;

    fn registry() -> ProviderRegistry {
        ProviderRegistry::new([
            ProviderDefinition::new("web", "Web", "s"),
            ProviderDefinition::new("music", "Music", "y"),
            ProviderDefinition::new("video", "Video", "yt"),
        ])
    }

    #[test]
    fn empty_input_is_plain_empty_query() {
        let parsed = parse("", &registry());
        assert!(parsed.provider.is_none());
        assert_eq!(parsed.query, "");
        assert!(parsed.config.is_none());
        assert!(!parsed.awaiting_separator);
    }

    #[test]
    fn activation_strips_prefix_and_one_space() {
        let parsed = parse("s  two spaces", &registry());
        assert_eq!(parsed.provider_id(), Some("web"));
        assert_eq!(parsed.query, " two spaces");
        assert_eq!(parsed.matched_prefix.as_deref(), Some("s"));
        assert_eq!(parsed.config.map(|c| c.display_name), Some("Web".to_string()));
    }

    #[test]
    fn prefix_with_empty_residual_still_activates() {
        let parsed = parse("s ", &registry());
        assert_eq!(parsed.provider_id(), Some("web"));
        assert_eq!(parsed.query, "");
    }

    #[test]
    fn longest_prefix_wins() {
        let registry = registry();
        assert_eq!(parse("yt music", &registry).provider_id(), Some("video"));
        assert_eq!(parse("y music", &registry).provider_id(), Some("music"));
    }

    #[test]
    fn partial_prefix_is_flagged_but_not_activated() {
        let registry = registry();
        for input in ["y", "yt", "s", " s "] {
            let parsed = parse(input, &registry);
            assert!(parsed.provider.is_none(), "{input:?} must not activate");
            assert_eq!(parsed.query, input);
            assert!(parsed.awaiting_separator, "{input:?} should await separator");
        }
    }

    #[test]
    fn ordinary_query_passes_through() {
        let parsed = parse("calculator", &registry());
        assert!(parsed.provider.is_none());
        assert_eq!(parsed.query, "calculator");
        assert!(!parsed.awaiting_separator);
    }

    #[test]
    fn prefix_inside_word_does_not_activate() {
        let parsed = parse("spotify", &registry());
        assert!(parsed.provider.is_none());
        assert!(!parsed.awaiting_separator);
    }

    #[test]
    fn prefixes_are_case_sensitive() {
        let parsed = parse("S cats", &registry());
        assert!(parsed.provider.is_none());
        assert_eq!(parsed.query, "S cats");
    }

    #[test]
    fn non_ascii_prefix_routes_after_reconfiguration() {
        let registry = registry();
        registry.update_configuration(PrefixConfiguration::new().with_prefixes("web", ["s", "م"]));
        let parsed = parse("م report", &registry);
        assert_eq!(parsed.provider_id(), Some("web"));
        assert_eq!(parsed.query, "report");
    }
}
