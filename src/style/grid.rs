use std::sync::Arc;

use serde::Deserialize;

use crate::breakpoints::{BreakpointMap, BreakpointScale, PerTier};
use crate::logging::{LogEvent, Logger};
use crate::pattern::{Mirror, NormalizedPattern, RawPattern, Span, parse_pattern, resolve_item};

use super::core::{ContainerStyle, ItemStyle, format_percent};

const LOG_TARGET: &str = "gridspan::grid";

/// Override hook: receives the item index and the full pre-override
/// per-tier column-span map and returns the replacement map. The return
/// value takes precedence entirely (no merge). [`Span::widen`] is the
/// uniform add-a-length helper for hook bodies.
pub type SpanOverride = Arc<dyn Fn(usize, &BreakpointMap<Span>) -> BreakpointMap<Span> + Send + Sync>;

/// Options for a pattern-driven grid.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Span pattern, per tier or bare.
    pub pattern: Option<PerTier<RawPattern>>,
    /// Explicit column counts; overrides inference (vertical-flow layouts).
    pub columns: Option<PerTier<u32>>,
    /// CSS gap length per tier.
    pub gap: Option<PerTier<String>>,
    /// CSS row height per tier.
    pub row_height: Option<PerTier<String>>,
    pub mirror: Mirror,
    pub dense: bool,
    pub inline: bool,
    /// Hide every item with `index >= limit`; `-1` never hides.
    pub limit: i64,
    #[serde(skip)]
    pub override_hook: Option<SpanOverride>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            pattern: None,
            columns: None,
            gap: None,
            row_height: None,
            mirror: Mirror::Off,
            dense: false,
            inline: false,
            limit: -1,
            override_hook: None,
        }
    }
}

/// Build a generator over the default six-tier scale, without logging.
pub fn grid(options: GridOptions) -> GridGenerator {
    GridGenerator::new(options, BreakpointScale::default(), None)
}

/// Immutable container style plus a pure per-item style function.
///
/// Construction resolves everything once; `item` only walks the resolved
/// configuration, so concurrent callers computing styles for different
/// indices never contend.
pub struct GridGenerator {
    scale: BreakpointScale,
    container: ContainerStyle,
    patterns: BreakpointMap<NormalizedPattern>,
    columns: BreakpointMap<u32>,
    mirror: Mirror,
    limit: i64,
    hook: Option<SpanOverride>,
}

impl GridGenerator {
    pub fn new(options: GridOptions, scale: BreakpointScale, logger: Option<Logger>) -> Self {
        let raw_patterns = options
            .pattern
            .map(|p| BreakpointMap::from_per_tier(p, &scale))
            .unwrap_or_default();
        let explicit_columns = options
            .columns
            .map(|c| BreakpointMap::from_per_tier(c, &scale))
            .unwrap_or_default();

        let mut patterns = BreakpointMap::new();
        let mut columns = BreakpointMap::new();
        for tier in scale.tiers() {
            let Some(raw) = raw_patterns.get(tier) else {
                if let Some(count) = explicit_columns.get(tier) {
                    columns.set(tier.clone(), *count);
                }
                continue;
            };
            let parsed = parse_pattern(raw);
            let count = explicit_columns
                .resolved_at(&scale, tier)
                .copied()
                .unwrap_or_else(|| parsed.infer_columns());
            if let Some(logger) = &logger {
                let _ = logger.log_event(LogEvent::tier_resolved(
                    LOG_TARGET,
                    tier.as_str(),
                    parsed.rows().len(),
                    parsed.items_per_cycle(),
                    count,
                    options.mirror,
                ));
            }
            columns.set(tier.clone(), count);
            patterns.set(tier.clone(), parsed.normalized());
        }

        let gap = options
            .gap
            .map(|g| BreakpointMap::from_per_tier(g, &scale))
            .unwrap_or_default();
        let row_height = options
            .row_height
            .map(|r| BreakpointMap::from_per_tier(r, &scale))
            .unwrap_or_default();

        let container = ContainerStyle {
            columns: columns.pruned(&scale, false),
            gap: gap.pruned(&scale, false),
            row_height: row_height.pruned(&scale, false),
            dense: options.dense,
            inline: options.inline,
        };

        Self {
            scale,
            container,
            patterns,
            columns,
            mirror: options.mirror,
            limit: options.limit,
            hook: options.override_hook,
        }
    }

    pub fn container(&self) -> &ContainerStyle {
        &self.container
    }

    pub fn scale(&self) -> &BreakpointScale {
        &self.scale
    }

    /// Style for the item at `index`. Pure; safe to call concurrently.
    pub fn item(&self, index: usize) -> ItemStyle {
        let mut col_spans = BreakpointMap::new();
        let mut row_spans = BreakpointMap::new();
        for (tier, pattern) in self.patterns.iter_ordered(&self.scale) {
            let entry = resolve_item(index, pattern, self.mirror);
            col_spans.set(tier, entry.col);
            row_spans.set(tier, entry.row);
        }

        if let Some(hook) = &self.hook {
            col_spans = hook(index, &col_spans);
        }

        let over_limit = self.limit >= 0 && index as i64 >= self.limit;

        // Not-hidden is the CSS default; emit entries only from the first
        // hiding tier onward, so fully visible items stay silent.
        let mut hidden = BreakpointMap::new();
        let mut was_hidden = false;
        for (tier, span) in col_spans.iter_ordered(&self.scale) {
            let hide = span.is_hidden() || over_limit;
            if hide || was_hidden {
                hidden.set(tier, hide);
            }
            was_hidden = hide;
        }
        if over_limit && hidden.is_empty() {
            hidden.set(self.scale.smallest(), true);
        }

        // Carry the last resolved span upward so width stays defined once any
        // tier has pattern data; hidden tiers and unknown lengths emit
        // nothing.
        let mut widths = BreakpointMap::new();
        let mut carry: Option<&Span> = None;
        for tier in self.scale.tiers() {
            let span = col_spans.get(tier).or(carry);
            carry = span;
            let Some(span) = span else {
                continue;
            };
            if span.is_hidden() {
                continue;
            }
            let Some(len) = span.len() else {
                continue;
            };
            let Some(count) = self.columns.resolved_at(&self.scale, tier) else {
                continue;
            };
            if *count == 0 {
                continue;
            }
            widths.set(tier.clone(), format_percent(len, *count));
        }

        ItemStyle {
            col_spans: col_spans.pruned(&self.scale, true),
            row_spans: row_spans.pruned(&self.scale, true),
            hidden: hidden.pruned(&self.scale, false),
            widths: widths.pruned(&self.scale, false),
        }
    }
}
