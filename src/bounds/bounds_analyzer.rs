//! Option bounds analyzer: derives an income strategy's effective strike
//! ceiling and floor from the option legs of one snapshot.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::holdings::{Holding, OptionType};
use crate::snapshots::Snapshot;

use super::bounds_model::{BoundsSummary, ExpirationBucket, StrikeRange};

/// Analyzes the option subset of `current`.
///
/// Buckets are ordered by expiration ascending with undated rows last.
/// `upper_bound` is the minimum call strike of the first call-bearing
/// bucket and `lower_bound` the maximum put strike of the first put-bearing
/// bucket; later buckets never overwrite a set bound. "First group wins" is
/// a deliberate conservative simplification, not a term-structure model.
pub fn analyze(current: &Snapshot) -> BoundsSummary {
    let mut dated: BTreeMap<chrono::NaiveDate, Vec<&Holding>> = BTreeMap::new();
    let mut undated: Vec<&Holding> = Vec::new();

    for holding in current.options() {
        match holding.expiration_date {
            Some(expiration) => dated.entry(expiration).or_default().push(holding),
            None => undated.push(holding),
        }
    }

    let mut summary = BoundsSummary::default();

    for (expiration, legs) in &dated {
        push_bucket(&mut summary, Some(*expiration), legs);
    }
    if !undated.is_empty() {
        push_bucket(&mut summary, None, &undated);
    }

    summary
}

fn push_bucket(
    summary: &mut BoundsSummary,
    expiration: Option<chrono::NaiveDate>,
    legs: &[&Holding],
) {
    let calls = strike_range(legs, OptionType::Call);
    let puts = strike_range(legs, OptionType::Put);

    if summary.upper_bound.is_none() {
        // Conservative cap: the nearest bucket's lowest written call.
        summary.upper_bound = calls.map(|r| r.min);
    }
    if summary.lower_bound.is_none() {
        // Conservative floor: the nearest bucket's highest written put.
        summary.lower_bound = puts.map(|r| r.max);
    }

    summary.buckets.push(ExpirationBucket {
        expiration,
        calls,
        puts,
    });
}

fn strike_range(legs: &[&Holding], leg_type: OptionType) -> Option<StrikeRange> {
    let strikes: Vec<Decimal> = legs
        .iter()
        .filter(|h| h.option_type == Some(leg_type))
        .filter_map(|h| h.strike_price)
        .collect();

    let min = strikes.iter().min()?;
    let max = strikes.iter().max()?;
    Some(StrikeRange {
        min: *min,
        max: *max,
    })
}
