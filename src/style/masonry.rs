use serde::Deserialize;

use crate::breakpoints::{BreakpointMap, BreakpointScale, PerTier};

use super::core::{ContainerStyle, ItemStyle, format_percent};

/// Options for a fixed-column masonry layout.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct MasonryOptions {
    /// Column count per tier.
    pub columns: Option<PerTier<u32>>,
    /// CSS gap length per tier.
    pub gap: Option<PerTier<String>>,
    /// Hide every item with `index >= limit`; `-1` never hides.
    pub limit: i64,
}

impl Default for MasonryOptions {
    fn default() -> Self {
        Self {
            columns: None,
            gap: None,
            limit: -1,
        }
    }
}

/// Build a masonry generator over the default six-tier scale.
pub fn masonry(options: MasonryOptions) -> MasonryGenerator {
    MasonryGenerator::new(options, BreakpointScale::default())
}

/// Container style plus per-item width/visibility for column-major layouts.
pub struct MasonryGenerator {
    scale: BreakpointScale,
    container: ContainerStyle,
    columns: BreakpointMap<u32>,
    limit: i64,
}

impl MasonryGenerator {
    pub fn new(options: MasonryOptions, scale: BreakpointScale) -> Self {
        let mut columns = options
            .columns
            .map(|c| BreakpointMap::from_per_tier(c, &scale))
            .unwrap_or_default();
        if columns.is_empty() {
            columns.set(scale.smallest(), 1);
        }
        let gap = options
            .gap
            .map(|g| BreakpointMap::from_per_tier(g, &scale))
            .unwrap_or_default();

        let container = ContainerStyle {
            columns: columns.pruned(&scale, false),
            gap: gap.pruned(&scale, false),
            ..ContainerStyle::default()
        };

        Self {
            scale,
            container,
            columns,
            limit: options.limit,
        }
    }

    pub fn container(&self) -> &ContainerStyle {
        &self.container
    }

    /// Style for the item at `index`: every item fills one column.
    pub fn item(&self, index: usize) -> ItemStyle {
        let mut widths = BreakpointMap::new();
        for (tier, count) in self.columns.iter_ordered(&self.scale) {
            if *count > 0 {
                widths.set(tier, format_percent(1, *count));
            }
        }

        let mut hidden = BreakpointMap::new();
        if self.limit >= 0 && index as i64 >= self.limit {
            hidden.set(self.scale.smallest(), true);
        }

        ItemStyle {
            widths: widths.pruned(&self.scale, false),
            hidden,
            ..ItemStyle::default()
        }
    }
}

/// Remap CSS multi-column fill order (top-to-bottom, then left-to-right)
/// into row-major reading order: `out[i] = items[(i / cols) + (i % cols) *
/// ceil(n / cols)]`. Source slots past the item count are skipped; untaken
/// items keep their original relative order at the tail.
pub fn order_items_for_masonry_columns<T>(items: Vec<T>, column_count: usize) -> Vec<T> {
    let count = items.len();
    if column_count <= 1 || count == 0 {
        return items;
    }
    let row_count = count.div_ceil(column_count);

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(count);
    for index in 0..count {
        let source = (index / column_count) + (index % column_count) * row_count;
        if source < count {
            if let Some(item) = slots[source].take() {
                ordered.push(item);
            }
        }
    }
    for slot in slots {
        if let Some(item) = slot {
            ordered.push(item);
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_columns_two_rows_reads_row_major() {
        let ordered = order_items_for_masonry_columns(vec!["a", "b", "c", "d", "e", "f"], 3);
        assert_eq!(ordered, vec!["a", "c", "e", "b", "d", "f"]);
    }

    #[test]
    fn reorder_matches_the_formula_for_uneven_counts() {
        let items: Vec<usize> = (0..7).collect();
        let ordered = order_items_for_masonry_columns(items, 3);
        let row_count = 7usize.div_ceil(3);
        let mut seen = vec![false; 7];
        let mut expected = Vec::new();
        for index in 0..7 {
            let source = (index / 3) + (index % 3) * row_count;
            if source < 7 {
                expected.push(source);
                seen[source] = true;
            }
        }
        for (value, taken) in seen.iter().enumerate() {
            if !taken {
                expected.push(value);
            }
        }
        assert_eq!(ordered, expected);
        // Every item survives the reorder exactly once.
        let mut sorted = ordered.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn single_column_is_a_no_op() {
        let items = vec![1, 2, 3];
        assert_eq!(order_items_for_masonry_columns(items.clone(), 1), items);
        assert_eq!(order_items_for_masonry_columns(items.clone(), 0), items);
    }

    #[test]
    fn masonry_items_split_the_row_evenly() {
        let options: MasonryOptions =
            serde_json::from_str(r#"{"columns": {"xs": 2, "lg": 4}, "gap": "12px"}"#).unwrap();
        let generator = masonry(options);
        assert_eq!(generator.container().columns.get("xs"), Some(&2));
        assert_eq!(generator.container().gap.get("xs"), Some(&"12px".to_string()));

        let item = generator.item(0);
        assert_eq!(item.widths.get("xs"), Some(&"50%".to_string()));
        assert_eq!(item.widths.get("lg"), Some(&"25%".to_string()));
        assert!(item.col_spans.is_empty());
    }

    #[test]
    fn masonry_limit_hides_the_tail() {
        let options = MasonryOptions {
            columns: Some(PerTier::Value(3)),
            limit: 6,
            ..MasonryOptions::default()
        };
        let generator = masonry(options);
        assert!(!generator.item(5).is_ever_hidden());
        assert!(generator.item(6).is_ever_hidden());
    }
}
