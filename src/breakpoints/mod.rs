//! Breakpoint module orchestrator following the module orchestrator pattern.
//!
//! Downstream code imports tier types from here while the implementation
//! details live in the private `core` module.

mod core;

pub use core::{BreakpointMap, BreakpointScale, DEFAULT_TIERS, PerTier, TierName, TierValue};
