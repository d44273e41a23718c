//! Day-over-day reconciliation: a full outer join of two snapshots on
//! instrument id, partitioned into five disjoint change categories.

use log::debug;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::snapshots::Snapshot;

use super::reconciliation_model::{DiffResult, PositionDelta};

/// Diffs `current` against `previous`.
///
/// An absent or empty previous snapshot is a fund's first observed day:
/// every current row is `new` and the other categories are empty. Common
/// rows are partitioned by the exact sign of `shares_change`; the
/// comparison is exact Decimal arithmetic, no epsilon.
pub fn reconcile(current: &Snapshot, previous: Option<&Snapshot>) -> DiffResult {
    let previous = match previous {
        Some(p) if !p.is_empty() => p,
        _ => {
            debug!(
                "No history for {}; treating all {} rows as new",
                current.fund_ticker,
                current.len()
            );
            return DiffResult {
                new: current.holdings.clone(),
                ..DiffResult::default()
            };
        }
    };

    let previous_by_id: HashMap<&str, &crate::holdings::Holding> = previous
        .holdings
        .iter()
        .map(|h| (h.instrument_id.as_str(), h))
        .collect();

    let mut diff = DiffResult::default();

    for holding in &current.holdings {
        match previous_by_id.get(holding.instrument_id.as_str()) {
            None => diff.new.push(holding.clone()),
            Some(yesterday) => {
                let shares_change = holding.shares - yesterday.shares;
                let delta = PositionDelta {
                    holding: holding.clone(),
                    shares_change,
                };
                match shares_change.cmp(&Decimal::ZERO) {
                    Ordering::Greater => diff.increased.push(delta),
                    Ordering::Less => diff.decreased.push(delta),
                    Ordering::Equal => diff.unchanged.push(delta),
                }
            }
        }
    }

    // Rows that disappeared keep their last-known attributes.
    let current_ids: HashMap<&str, ()> = current
        .holdings
        .iter()
        .map(|h| (h.instrument_id.as_str(), ()))
        .collect();
    for holding in &previous.holdings {
        if !current_ids.contains_key(holding.instrument_id.as_str()) {
            diff.sold.push(holding.clone());
        }
    }

    debug!(
        "Reconciled {}: {:?} (new/sold/increased/decreased/unchanged)",
        current.fund_ticker,
        diff.partition_sizes()
    );

    diff
}
