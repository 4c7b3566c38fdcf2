use std::fmt;

use serde::{Serialize, Serializer};

use crate::breakpoints::TierValue;

/// Input marker for "no placement at this tier".
pub const HIDDEN_MARKER: &str = "_";

/// Column or row extent assigned to one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// N tracks starting wherever auto-placement lands.
    Implicit(u32),
    /// 1-indexed grid line pair; length is `end - start`.
    /// `end == -1` is the length-unknown sentinel.
    Explicit { start: i32, end: i32 },
    /// No placement; the item is not shown at this tier.
    Hidden,
    /// Unrecognized token carried through untouched. Length unknown,
    /// excluded from all arithmetic.
    Raw(String),
}

impl Span {
    pub fn explicit(start: i32, end: i32) -> Self {
        Self::Explicit { start, end }
    }

    /// Track count covered by this span, when known.
    pub fn len(&self) -> Option<u32> {
        match self {
            Self::Implicit(n) => Some(*n),
            Self::Explicit { start, end } if *end >= 0 && end > start => {
                Some((end - start) as u32)
            }
            _ => None,
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit { .. })
    }

    /// Add `by` tracks, uniformly for implicit and explicit spans. Hidden and
    /// raw spans are returned unchanged. This is the helper handed to
    /// override hooks.
    pub fn widen(&self, by: u32) -> Self {
        match self {
            Self::Implicit(n) => Self::Implicit(n + by),
            Self::Explicit { start, end } if *end >= 0 => Self::Explicit {
                start: *start,
                end: end + by as i32,
            },
            other => other.clone(),
        }
    }

    /// Explicit rendition anchored at line 1; explicit spans pass through.
    pub fn to_explicit(&self) -> Self {
        match self {
            Self::Implicit(n) => Self::Explicit {
                start: 1,
                end: 1 + *n as i32,
            },
            other => other.clone(),
        }
    }

    /// Shift both grid lines by `by`. Only meaningful for explicit spans with
    /// a known end.
    pub fn shifted(&self, by: i32) -> Self {
        match self {
            Self::Explicit { start, end } if *end >= 0 => Self::Explicit {
                start: start + by,
                end: end + by,
            },
            other => other.clone(),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Implicit(n) => write!(f, "{n}"),
            Self::Explicit { start, end } => write!(f, "{start}/{end}"),
            Self::Hidden => write!(f, "{HIDDEN_MARKER}"),
            Self::Raw(token) => write!(f, "{token}"),
        }
    }
}

impl Serialize for Span {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl TierValue for Span {
    fn is_inherit(&self) -> bool {
        matches!(self, Self::Raw(token) if token.is_empty() || token == "inherit")
    }

    fn is_default_span(&self) -> bool {
        matches!(self, Self::Implicit(1))
    }
}

/// Column/row span pair governing one item position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    pub col: Span,
    pub row: Span,
}

impl PatternEntry {
    pub fn new(col: Span) -> Self {
        Self {
            col,
            row: Span::Implicit(1),
        }
    }

    pub fn with_row(col: Span, row: Span) -> Self {
        Self { col, row }
    }
}

impl Default for PatternEntry {
    fn default() -> Self {
        Self::new(Span::Implicit(1))
    }
}

/// Parsed pattern: one or more repeating rows of span pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedPattern {
    rows: Vec<Vec<PatternEntry>>,
}

impl NormalizedPattern {
    pub fn from_rows(rows: Vec<Vec<PatternEntry>>) -> Self {
        Self { rows }
    }

    /// Axis-normalized rendition for cycle resolution. Column inference reads
    /// the pattern as parsed; call this afterwards.
    pub fn normalized(mut self) -> Self {
        self.normalize_axis(Axis::Col);
        self.normalize_axis(Axis::Row);
        self
    }

    pub fn rows(&self) -> &[Vec<PatternEntry>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.is_empty())
    }

    /// Item count of one full pattern repetition.
    pub fn items_per_cycle(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum()
    }

    /// Total column count implied by the pattern. Rows overlay, so the widest
    /// row wins; the result never drops below 1.
    pub fn infer_columns(&self) -> u32 {
        self.rows
            .iter()
            .map(|row| row_footprint(row))
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// When an axis mixes implicit and explicit spans, rebase the implicit
    /// ones to explicit form so cycle resolution works in one coordinate
    /// system.
    fn normalize_axis(&mut self, axis: Axis) {
        let any_explicit = self
            .rows
            .iter()
            .flatten()
            .any(|entry| axis.of(entry).is_explicit());
        if !any_explicit {
            return;
        }
        for entry in self.rows.iter_mut().flatten() {
            if matches!(axis.of(entry), Span::Implicit(_)) {
                let explicit = axis.of(entry).to_explicit();
                *axis.of_mut(entry) = explicit;
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Col,
    Row,
}

impl Axis {
    fn of<'a>(&self, entry: &'a PatternEntry) -> &'a Span {
        match self {
            Self::Col => &entry.col,
            Self::Row => &entry.row,
        }
    }

    fn of_mut<'a>(&self, entry: &'a mut PatternEntry) -> &'a mut Span {
        match self {
            Self::Col => &mut entry.col,
            Self::Row => &mut entry.row,
        }
    }
}

/// Column footprint of a single row.
///
/// All-explicit rows span from the lowest start line to the highest end line;
/// mixed rows assume implicit spans sit after the explicit ones (highest end
/// line wins); implicit-only rows stack left to right with no gaps. Spans
/// with unknown length stay out of the arithmetic.
fn row_footprint(row: &[PatternEntry]) -> u32 {
    let mut min_start: Option<i32> = None;
    let mut max_end: Option<i32> = None;
    let mut implicit_sum: u32 = 0;
    let mut any_implicit = false;

    for entry in row {
        match &entry.col {
            Span::Explicit { start, end } => {
                min_start = Some(min_start.map_or(*start, |s| s.min(*start)));
                if *end >= 0 {
                    max_end = Some(max_end.map_or(*end, |e| e.max(*end)));
                }
            }
            Span::Implicit(n) => {
                any_implicit = true;
                implicit_sum += n;
            }
            Span::Hidden | Span::Raw(_) => {}
        }
    }

    match (max_end, any_implicit) {
        // Grid lines, not tracks: lines 1..10 hold 9 columns.
        (Some(end), false) => (end - min_start.unwrap_or(1)).max(0) as u32,
        (Some(end), true) => end.max(0) as u32,
        (None, _) => implicit_sum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn implicit_row(counts: &[u32]) -> Vec<PatternEntry> {
        counts
            .iter()
            .map(|n| PatternEntry::new(Span::Implicit(*n)))
            .collect()
    }

    #[test]
    fn span_lengths() {
        assert_eq!(Span::Implicit(3).len(), Some(3));
        assert_eq!(Span::explicit(1, 3).len(), Some(2));
        assert_eq!(Span::explicit(4, -1).len(), None);
        assert_eq!(Span::Hidden.len(), None);
        assert_eq!(Span::Raw("wat".into()).len(), None);
    }

    #[test]
    fn widen_is_uniform_across_span_kinds() {
        assert_eq!(Span::Implicit(2).widen(1), Span::Implicit(3));
        assert_eq!(Span::explicit(1, 3).widen(2), Span::explicit(1, 5));
        assert_eq!(Span::Hidden.widen(2), Span::Hidden);
    }

    #[test]
    fn display_round_trips_the_grammar_shapes() {
        assert_eq!(Span::Implicit(4).to_string(), "4");
        assert_eq!(Span::explicit(3, 6).to_string(), "3/6");
        assert_eq!(Span::Hidden.to_string(), "_");
    }

    #[test]
    fn implicit_only_footprint_is_the_sum() {
        let pattern = NormalizedPattern::from_rows(vec![implicit_row(&[2, 1, 3])]);
        assert_eq!(pattern.infer_columns(), 6);
    }

    #[test]
    fn explicit_footprint_spans_lowest_to_highest_line() {
        let row = vec![
            PatternEntry::new(Span::explicit(1, 3)),
            PatternEntry::new(Span::explicit(3, 6)),
            PatternEntry::new(Span::explicit(6, 10)),
        ];
        let pattern = NormalizedPattern::from_rows(vec![row]);
        assert_eq!(pattern.infer_columns(), 9);
    }

    #[test]
    fn multi_row_inference_takes_the_widest_row() {
        let pattern =
            NormalizedPattern::from_rows(vec![implicit_row(&[1, 1]), implicit_row(&[2, 1, 2])]);
        assert_eq!(pattern.infer_columns(), 5);
    }

    #[test]
    fn unknown_end_is_excluded_from_inference() {
        let row = vec![
            PatternEntry::new(Span::explicit(1, 4)),
            PatternEntry::new(Span::explicit(4, -1)),
        ];
        let pattern = NormalizedPattern::from_rows(vec![row]);
        assert_eq!(pattern.infer_columns(), 3);
    }

    #[test]
    fn mixed_row_inference_takes_the_highest_end_line() {
        let row = vec![
            PatternEntry::new(Span::Implicit(2)),
            PatternEntry::new(Span::explicit(3, 6)),
        ];
        let pattern = NormalizedPattern::from_rows(vec![row]);
        assert_eq!(pattern.infer_columns(), 6);
    }

    #[test]
    fn mixed_axis_normalizes_implicit_to_explicit() {
        let row = vec![
            PatternEntry::new(Span::Implicit(2)),
            PatternEntry::new(Span::explicit(3, 6)),
        ];
        let pattern = NormalizedPattern::from_rows(vec![row]).normalized();
        assert_eq!(pattern.rows()[0][0].col, Span::explicit(1, 3));
        assert_eq!(pattern.rows()[0][1].col, Span::explicit(3, 6));
    }

    #[test]
    fn empty_pattern_still_reports_one_column() {
        assert_eq!(NormalizedPattern::default().infer_columns(), 1);
        assert_eq!(NormalizedPattern::default().items_per_cycle(), 0);
    }
}
