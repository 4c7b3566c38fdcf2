//! Cycle resolution: which pattern entry governs a given item index.

use serde::{Deserialize, Serialize};

use super::core::{NormalizedPattern, PatternEntry, Span};

/// Whether alternating pattern repetitions reverse their item order.
///
/// `Even` mirrors the 2nd, 4th, … repetition (cycle indices 1, 3, …); `Odd`
/// mirrors the 1st, 3rd, … (cycle indices 0, 2, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mirror {
    #[default]
    Off,
    Even,
    Odd,
}

impl Mirror {
    pub fn mirrors(&self, cycle: usize) -> bool {
        match self {
            Self::Off => false,
            Self::Even => cycle % 2 == 1,
            Self::Odd => cycle % 2 == 0,
        }
    }
}

/// Resolve the span pair governing `index`.
///
/// The pattern repeats every `items_per_cycle` items. Explicit row spans in
/// cycles beyond the first are shifted by the end line the same relative item
/// reached in the previous cycle, so explicit row coordinates accumulate
/// monotonically instead of resetting each cycle. The shift is accumulated
/// iteratively, one addition per elapsed cycle.
pub fn resolve_item(index: usize, pattern: &NormalizedPattern, mirror: Mirror) -> PatternEntry {
    let items_per_cycle = pattern.items_per_cycle();
    if items_per_cycle == 0 {
        return PatternEntry::default();
    }

    let cycle = index / items_per_cycle;
    let position = index % items_per_cycle;
    let entry = entry_at(pattern, position, mirror.mirrors(cycle));

    match entry.row {
        Span::Explicit { start, end } if end >= 0 && cycle > 0 => {
            let mut shift = 0i32;
            for elapsed in 0..cycle {
                let prior = entry_at(pattern, position, mirror.mirrors(elapsed));
                if let Span::Explicit { end: prior_end, .. } = prior.row {
                    if prior_end >= 0 {
                        // Next cycle starts on the line the prior one ended on.
                        shift = prior_end + shift - 1;
                    }
                }
            }
            PatternEntry::with_row(entry.col, Span::explicit(start + shift, end + shift))
        }
        _ => entry,
    }
}

/// Entry at a within-cycle position, with the governing row optionally
/// mirrored.
fn entry_at(pattern: &NormalizedPattern, position: usize, mirrored: bool) -> PatternEntry {
    let mut offset = position;
    for row in pattern.rows() {
        if offset < row.len() {
            if !mirrored {
                return row[offset].clone();
            }
            let reversed = mirror_row(row);
            return reversed[offset].clone();
        }
        offset -= row.len();
    }
    PatternEntry::default()
}

/// Reverse a row's item order. When every column span is explicit with a
/// known length, contiguous start/end positions are re-derived after the
/// reversal so the total row width stays constant; swapping endpoints would
/// scramble the line numbers.
fn mirror_row(row: &[PatternEntry]) -> Vec<PatternEntry> {
    let mut reversed: Vec<PatternEntry> = row.iter().rev().cloned().collect();

    let rederivable = !row.is_empty()
        && row
            .iter()
            .all(|entry| entry.col.is_explicit() && entry.col.len().is_some());
    if !rederivable {
        return reversed;
    }

    let base = row
        .iter()
        .filter_map(|entry| match entry.col {
            Span::Explicit { start, .. } => Some(start),
            _ => None,
        })
        .min()
        .unwrap_or(1);

    let mut cursor = base;
    for entry in reversed.iter_mut() {
        let len = entry.col.len().unwrap_or(0) as i32;
        entry.col = Span::explicit(cursor, cursor + len);
        cursor += len;
    }
    reversed
}
