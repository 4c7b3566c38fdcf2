//! Pattern module orchestrator.
//!
//! The span data model and column inference live in `core`, the permissive
//! input grammar in `grammar`, and cycle/mirror resolution in `cycle`.

mod core;
mod cycle;
mod grammar;

pub use core::{HIDDEN_MARKER, NormalizedPattern, PatternEntry, Span};
pub use cycle::{Mirror, resolve_item};
pub use grammar::{PatternToken, RawPattern, RawPatternItem, parse_pattern, string_to_pattern};
