//! Style synthesis orchestrator.
//!
//! `core` holds the output descriptors, `grid` the pattern-driven generator,
//! `masonry` the fixed-column generator and its reading-order helper.

mod core;
mod grid;
mod masonry;

pub use core::{ContainerStyle, ItemStyle, format_percent};
pub use grid::{GridGenerator, GridOptions, SpanOverride, grid};
pub use masonry::{MasonryGenerator, MasonryOptions, masonry, order_items_for_masonry_columns};
