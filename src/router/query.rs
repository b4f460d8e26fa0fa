//! Routing result.

use std::sync::Arc;

use crate::domain::{ProviderConfig, ProviderDefinition};

/// Where one line of input should go.
///
/// With `provider` set, `query` is the residual text to hand to that
/// provider. Without it, `query` is the untouched input for item search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub provider: Option<Arc<ProviderDefinition>>,
    pub query: String,
    /// Display configuration of the matched provider.
    pub config: Option<ProviderConfig>,
    /// The prefix text that activated the provider.
    pub matched_prefix: Option<String>,
    /// The trimmed input is, or begins, a configured prefix but the
    /// separator space has not been typed yet.
    pub awaiting_separator: bool,
}

impl ParsedQuery {
    /// Plain item search over `query`.
    #[must_use]
    pub fn passthrough(query: impl Into<String>) -> Self {
        Self {
            provider: None,
            query: query.into(),
            config: None,
            matched_prefix: None,
            awaiting_separator: false,
        }
    }

    pub(crate) fn activated(
        provider: Arc<ProviderDefinition>,
        prefix: &str,
        residual: &str,
    ) -> Self {
        let config = provider.config.clone();
        Self {
            provider: Some(provider),
            query: residual.to_string(),
            config: Some(config),
            matched_prefix: Some(prefix.to_string()),
            awaiting_separator: false,
        }
    }

    #[must_use]
    pub const fn is_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Id of the matched provider, if any.
    #[must_use]
    pub fn provider_id(&self) -> Option<&str> {
        self.provider.as_ref().map(|provider| provider.id.as_str())
    }
}
