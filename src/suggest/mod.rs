//! Alternative-name suggestions
//!
//! [`SuggestionResolver`] turns AI proposals into confirmed-available names
//! and tops the list up from a deterministic [`backfill`] generator.

pub mod backfill;
pub mod candidates;
pub mod resolver;

pub use resolver::{Suggestion, SuggestionResolver, SuggestionSet};
