use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::holdings::Holding;

/// A position present on both days, carrying the derived share delta
/// alongside its current-day attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDelta {
    pub holding: Holding,
    pub shares_change: Decimal,
}

/// The categorized diff between two snapshots of the same fund: five
/// disjoint partitions keyed by instrument id. Derived, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    /// Present only today (current-day attributes).
    pub new: Vec<Holding>,
    /// Present only yesterday (last-known attributes).
    pub sold: Vec<Holding>,
    pub increased: Vec<PositionDelta>,
    pub decreased: Vec<PositionDelta>,
    pub unchanged: Vec<PositionDelta>,
}

impl DiffResult {
    /// True when any position appeared, disappeared or changed size.
    pub fn has_changes(&self) -> bool {
        !(self.new.is_empty()
            && self.sold.is_empty()
            && self.increased.is_empty()
            && self.decreased.is_empty())
    }

    /// Every instrument id across all five partitions. Used by callers and
    /// tests to check the partition invariants.
    pub fn instrument_ids(&self) -> HashSet<String> {
        let mut ids = HashSet::new();
        ids.extend(self.new.iter().map(|h| h.instrument_id.clone()));
        ids.extend(self.sold.iter().map(|h| h.instrument_id.clone()));
        ids.extend(self.increased.iter().map(|d| d.holding.instrument_id.clone()));
        ids.extend(self.decreased.iter().map(|d| d.holding.instrument_id.clone()));
        ids.extend(self.unchanged.iter().map(|d| d.holding.instrument_id.clone()));
        ids
    }

    pub fn partition_sizes(&self) -> [usize; 5] {
        [
            self.new.len(),
            self.sold.len(),
            self.increased.len(),
            self.decreased.len(),
            self.unchanged.len(),
        ]
    }
}
