//! Error types for the launcher search crate.
//!
//! The ranking, registry and routing operations never fail: absence is an
//! `Option` or an empty result. [`LauncherError`] only covers the boundary
//! where configuration is read from disk or from a host-supplied map.

use thiserror::Error;

/// The crate-wide error type.
///
/// # Examples
///
/// ```
/// use launcher_search::LauncherError;
///
/// fn check(max_results: usize) -> Result<(), LauncherError> {
///     if max_results == 0 {
///         return Err(LauncherError::Config("max_results must be positive".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(check(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum LauncherError {
    /// Reading a configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file is not valid TOML or does not match the schema.
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A configuration value is out of range or otherwise unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for launcher search operations.
pub type Result<T> = std::result::Result<T, LauncherError>;
