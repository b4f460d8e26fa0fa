//! Domain layer: the types every other layer talks in.
//!
//! Nothing here depends on how candidates are loaded, how configuration is
//! persisted or how results are drawn.
//!
//! # Organization
//!
//! - [`error`]: Error type and result alias
//! - [`candidate`]: The [`Candidate`] trait and the stock [`AppEntry`]
//! - [`provider`]: Provider definitions and prefix configuration
//!
//! # Examples
//!
//! ```
//! use launcher_search::domain::{builtin_providers, PrefixConfiguration};
//!
//! let config = PrefixConfiguration::new().with_prefixes("web", ["s", "g"]);
//! let web = &builtin_providers()[0];
//! assert_eq!(config.effective_prefixes(web), vec!["s", "g"]);
//! ```

pub mod candidate;
pub mod error;
pub mod provider;

pub use candidate::{AppEntry, Candidate};
pub use error::{LauncherError, Result};
pub use provider::{
    builtin_providers, is_usable_prefix, PrefixConfiguration, ProviderConfig, ProviderDefinition,
    PROVIDER_CONTACTS, PROVIDER_FILES, PROVIDER_VIDEO, PROVIDER_WEB,
};
