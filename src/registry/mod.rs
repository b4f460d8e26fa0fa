//! Provider registry: the prefix → provider mapping and its reconfiguration.
//!
//! # Modules
//!
//! - [`provider_registry`]: The shared, reconfigurable registry
//! - [`snapshot`]: Immutable published state and collision reports

pub mod provider_registry;
pub mod snapshot;

pub use provider_registry::ProviderRegistry;
pub use snapshot::{PrefixCollision, RegistrySnapshot};
