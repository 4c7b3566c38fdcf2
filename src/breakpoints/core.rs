use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Breakpoint tier identifier.
pub type TierName = String;

/// Default six-tier scale, smallest to largest.
pub const DEFAULT_TIERS: [&str; 6] = ["xs", "sm", "md", "lg", "xl", "xxl"];

/// Ordered, fixed list of breakpoint tiers.
///
/// Injected configuration: callers who need a different tier count supply
/// their own scale; nothing in the crate assumes six tiers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct BreakpointScale {
    tiers: Vec<TierName>,
}

impl Default for BreakpointScale {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_TIERS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl BreakpointScale {
    pub fn new<I, S>(tiers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<TierName>,
    {
        let tiers: Vec<TierName> = tiers.into_iter().map(Into::into).collect();
        if tiers.is_empty() {
            return Err(GridError::EmptyScale);
        }
        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[TierName] {
        &self.tiers
    }

    /// Smallest tier name.
    pub fn smallest(&self) -> &str {
        &self.tiers[0]
    }

    pub fn index_of(&self, tier: &str) -> Result<usize> {
        self.position(tier)
            .ok_or_else(|| GridError::UnknownTier(tier.to_string()))
    }

    pub(crate) fn position(&self, tier: &str) -> Option<usize> {
        self.tiers.iter().position(|t| t == tier)
    }
}

/// Values that participate in breakpoint pruning.
pub trait TierValue: Clone + PartialEq {
    /// True for the "defer to the smaller tier" sentinel; such entries are
    /// dropped outright.
    fn is_inherit(&self) -> bool {
        false
    }

    /// True for the engine-default span (an implicit span of 1), dropped from
    /// the smallest tier under span semantics.
    fn is_default_span(&self) -> bool {
        false
    }
}

impl TierValue for String {
    fn is_inherit(&self) -> bool {
        self.is_empty() || self == "inherit"
    }
}

impl TierValue for u32 {}
impl TierValue for bool {}

/// Raw per-option input: either a bare value (lands on the smallest tier) or
/// a tier-keyed map.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PerTier<T> {
    Value(T),
    Map(HashMap<TierName, T>),
}

/// Tier-keyed value set with smaller-to-larger inheritance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BreakpointMap<T> {
    entries: HashMap<TierName, T>,
}

impl<T> Default for BreakpointMap<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> BreakpointMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, tier: impl Into<TierName>, value: T) {
        self.entries.insert(tier.into(), value);
    }

    pub fn get(&self, tier: &str) -> Option<&T> {
        self.entries.get(tier)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Set entries in ascending tier order. Entries keyed by a tier the scale
    /// does not know are skipped.
    pub fn iter_ordered<'a>(
        &'a self,
        scale: &'a BreakpointScale,
    ) -> impl Iterator<Item = (&'a str, &'a T)> + 'a {
        scale
            .tiers()
            .iter()
            .filter_map(|tier| self.entries.get(tier.as_str()).map(|v| (tier.as_str(), v)))
    }
}

impl<T: Clone> BreakpointMap<T> {
    /// Normalize raw option input. A bare value becomes a single entry at the
    /// smallest tier; map entries keyed by unknown tiers are dropped
    /// (permissive, like the rest of the input surface).
    pub fn from_per_tier(value: PerTier<T>, scale: &BreakpointScale) -> Self {
        let mut map = Self::new();
        match value {
            PerTier::Value(v) => map.set(scale.smallest(), v),
            PerTier::Map(entries) => {
                for (tier, v) in entries {
                    if scale.position(&tier).is_some() {
                        map.set(tier, v);
                    }
                }
            }
        }
        map
    }

    /// Value governing `tier`: the entry at the tier itself or the nearest
    /// smaller set tier. Never looks upward.
    pub fn resolved_at(&self, scale: &BreakpointScale, tier: &str) -> Option<&T> {
        let idx = scale.position(tier)?;
        scale.tiers()[..=idx]
            .iter()
            .rev()
            .find_map(|t| self.entries.get(t.as_str()))
    }

    /// Fill every unset tier with the nearest smaller set value, or with
    /// `fallback` below the smallest set tier.
    pub fn fill_gaps(&self, scale: &BreakpointScale, fallback: Option<&T>) -> Self {
        let mut filled = Self::new();
        let mut carry: Option<&T> = fallback;
        for tier in scale.tiers() {
            if let Some(value) = self.entries.get(tier.as_str()) {
                carry = Some(value);
            }
            if let Some(value) = carry {
                filled.set(tier.clone(), value.clone());
            }
        }
        filled
    }
}

impl<T: TierValue> BreakpointMap<T> {
    /// Drop inherit sentinels and entries redundant with the nearest smaller
    /// set entry. Under span semantics the smallest tier is also dropped when
    /// it holds the engine default (implicit span of 1). Idempotent.
    pub fn pruned(&self, scale: &BreakpointScale, span_semantics: bool) -> Self {
        let mut pruned = Self::new();
        let mut last_seen: Option<&T> = None;
        for (idx, tier) in scale.tiers().iter().enumerate() {
            let Some(value) = self.entries.get(tier.as_str()) else {
                continue;
            };
            if value.is_inherit() {
                continue;
            }
            let redundant = last_seen.map(|prev| prev == value).unwrap_or(false);
            let default_at_base = span_semantics && idx == 0 && value.is_default_span();
            if !redundant && !default_at_base {
                pruned.set(tier.clone(), value.clone());
            }
            last_seen = Some(value);
        }
        pruned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale() -> BreakpointScale {
        BreakpointScale::default()
    }

    #[test]
    fn scale_rejects_empty_tier_list() {
        let err = BreakpointScale::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, GridError::EmptyScale));
    }

    #[test]
    fn custom_scale_keeps_order() {
        let scale = BreakpointScale::new(["narrow", "wide"]).unwrap();
        assert_eq!(scale.smallest(), "narrow");
        assert_eq!(scale.index_of("wide").unwrap(), 1);
        assert!(scale.index_of("md").is_err());
    }

    #[test]
    fn bare_value_lands_on_smallest_tier() {
        let map = BreakpointMap::from_per_tier(PerTier::Value(3u32), &scale());
        assert_eq!(map.get("xs"), Some(&3));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn unknown_tier_entries_are_dropped() {
        let mut raw = HashMap::new();
        raw.insert("md".to_string(), 2u32);
        raw.insert("huge".to_string(), 9u32);
        let map = BreakpointMap::from_per_tier(PerTier::Map(raw), &scale());
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("md"), Some(&2));
    }

    #[test]
    fn resolution_inherits_upward_only() {
        let mut map = BreakpointMap::new();
        map.set("sm", 2u32);
        assert_eq!(map.resolved_at(&scale(), "xs"), None);
        assert_eq!(map.resolved_at(&scale(), "sm"), Some(&2));
        assert_eq!(map.resolved_at(&scale(), "xxl"), Some(&2));
    }

    #[test]
    fn fill_gaps_copies_nearest_smaller_value() {
        let mut map = BreakpointMap::new();
        map.set("sm", 2u32);
        map.set("lg", 4u32);
        let filled = map.fill_gaps(&scale(), Some(&1));
        assert_eq!(filled.get("xs"), Some(&1));
        assert_eq!(filled.get("md"), Some(&2));
        assert_eq!(filled.get("xl"), Some(&4));
        assert_eq!(filled.get("xxl"), Some(&4));
    }

    #[test]
    fn prune_drops_redundant_and_inherit_entries() {
        let mut map: BreakpointMap<String> = BreakpointMap::new();
        map.set("xs", "8px".to_string());
        map.set("sm", "inherit".to_string());
        map.set("md", "8px".to_string());
        map.set("lg", "16px".to_string());
        let pruned = map.pruned(&scale(), false);
        assert_eq!(pruned.len(), 2);
        assert_eq!(pruned.get("xs"), Some(&"8px".to_string()));
        assert_eq!(pruned.get("lg"), Some(&"16px".to_string()));
    }

    #[test]
    fn prune_is_idempotent() {
        let mut map: BreakpointMap<String> = BreakpointMap::new();
        map.set("xs", "a".to_string());
        map.set("md", "a".to_string());
        map.set("lg", "b".to_string());
        map.set("xl", "".to_string());
        let once = map.pruned(&scale(), false);
        let twice = once.pruned(&scale(), false);
        assert_eq!(once, twice);
    }

    #[test]
    fn per_tier_deserializes_bare_and_map_forms() {
        let bare: PerTier<u32> = serde_json::from_str("4").unwrap();
        assert!(matches!(bare, PerTier::Value(4)));

        let mapped: PerTier<u32> = serde_json::from_str(r#"{"xs": 2, "lg": 4}"#).unwrap();
        let map = BreakpointMap::from_per_tier(mapped, &scale());
        assert_eq!(map.get("xs"), Some(&2));
        assert_eq!(map.get("lg"), Some(&4));
    }
}
