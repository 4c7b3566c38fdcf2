use serde::Serialize;

use crate::breakpoints::BreakpointMap;
use crate::pattern::Span;

/// Container-level style directives, pruned per tier.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContainerStyle {
    pub columns: BreakpointMap<u32>,
    pub gap: BreakpointMap<String>,
    pub row_height: BreakpointMap<String>,
    pub dense: bool,
    pub inline: bool,
}

/// Per-item style directives, pruned per tier.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemStyle {
    pub col_spans: BreakpointMap<Span>,
    pub row_spans: BreakpointMap<Span>,
    pub hidden: BreakpointMap<bool>,
    pub widths: BreakpointMap<String>,
}

impl ItemStyle {
    /// Hidden at any tier.
    pub fn is_ever_hidden(&self) -> bool {
        self.hidden.values().any(|hidden| *hidden)
    }
}

/// Container-relative width of `len` tracks out of `columns`.
pub fn format_percent(len: u32, columns: u32) -> String {
    let percent = (len as f64 / columns as f64) * 100.0;
    format!("{percent}%")
}
