//! gridspan computes CSS grid/column placement for responsive layouts from a
//! declarative span-pattern description.
//!
//! Given layout options it returns container-level style directives and a
//! pure per-item style function: column/row spans, column counts, hidden
//! flags, and container-relative width percentages, per breakpoint tier with
//! smaller-to-larger inheritance and redundancy pruning. It performs no
//! rendering and no I/O; an existing CSS grid/column engine consumes the
//! values it emits.

pub mod breakpoints;
pub mod error;
pub mod logging;
pub mod pattern;
pub mod style;

pub use breakpoints::{
    BreakpointMap, BreakpointScale, DEFAULT_TIERS, PerTier, TierName, TierValue,
};
pub use error::{GridError, Result};
pub use logging::{
    EventKind, FileSink, LogEvent, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
};
pub use pattern::{
    HIDDEN_MARKER, Mirror, NormalizedPattern, PatternEntry, PatternToken, RawPattern,
    RawPatternItem, Span, parse_pattern, resolve_item, string_to_pattern,
};
pub use style::{
    ContainerStyle, GridGenerator, GridOptions, ItemStyle, MasonryGenerator, MasonryOptions,
    SpanOverride, format_percent, grid, masonry, order_items_for_masonry_columns,
};
