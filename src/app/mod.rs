//! Application layer: the per-keystroke search flow.
//!
//! ```text
//! Keystroke → SearchEngine::search → SearchOutcome → host renders / dispatches
//!                    ↑
//!        Settings → SearchEngine::apply_config → ProviderRegistry
//! ```
//!
//! # Modules
//!
//! - [`engine`]: [`SearchEngine`] and [`SearchOutcome`]

pub mod engine;

pub use engine::{SearchEngine, SearchOutcome};
