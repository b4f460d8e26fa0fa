//! Query routing: decides from raw keystrokes whether a provider is being
//! invoked and what text remains for it.
//!
//! # Modules
//!
//! - [`parser`]: Longest-prefix-first activation rules
//! - [`query`]: The [`ParsedQuery`] result record

pub mod parser;
pub mod query;

pub use parser::{parse, parse_snapshot};
pub use query::ParsedQuery;
