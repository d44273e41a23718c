//! Maps raw vendor payloads into canonical holdings.
//!
//! Each vendor feed is a named normalization function selected through an
//! explicit `VendorFormat` match rather than per-vendor types, keeping the
//! classifier and the reconciliation engine vendor-agnostic.

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::funds::{FundConfig, VendorFormat};
use crate::holdings::classifier::classify;
use crate::holdings::{AssetClass, Holding};
use crate::snapshots::Snapshot;

use super::normalize_model::RawHoldingRecord;

pub type VendorNormalizer = fn(&FundConfig, NaiveDate, &RawHoldingRecord) -> Holding;

/// Selects the normalization function for a vendor format.
pub fn normalizer_for(vendor: VendorFormat) -> VendorNormalizer {
    match vendor {
        VendorFormat::Neos => normalize_neos,
        VendorFormat::GoldmanSachs => normalize_goldman_sachs,
        VendorFormat::GlobalX => normalize_global_x,
        VendorFormat::Roundhill => normalize_roundhill,
    }
}

/// Normalizes one vendor payload into a snapshot for (fund, date).
///
/// Duplicate instrument ids within a payload collapse to the last row seen,
/// upholding the per-(fund, date) uniqueness invariant at the store boundary.
pub fn normalize_payload(
    fund: &FundConfig,
    date: NaiveDate,
    rows: &[RawHoldingRecord],
) -> Snapshot {
    let normalize = normalizer_for(fund.vendor);

    let mut holdings: Vec<Holding> = Vec::with_capacity(rows.len());
    for row in rows {
        let holding = normalize(fund, date, row);
        if let Some(existing) = holdings
            .iter_mut()
            .find(|h| h.instrument_id == holding.instrument_id)
        {
            warn!(
                "Duplicate instrument '{}' in {} payload; keeping the later row",
                holding.instrument_id, fund.ticker
            );
            *existing = holding;
        } else {
            holdings.push(holding);
        }
    }

    let option_count = holdings.iter().filter(|h| h.is_option()).count();
    if option_count > 0 {
        debug!(
            "Extracted {} options from {} rows for {}",
            option_count,
            holdings.len(),
            fund.ticker
        );
    }

    Snapshot {
        fund_ticker: fund.ticker.clone(),
        date,
        holdings,
    }
}

/// Coerces a dirty vendor numeric to a Decimal. Currency symbols, percent
/// signs and thousands separators are stripped; anything unparsable becomes
/// zero with a soft warning, never an error that blocks the row.
pub fn clean_decimal(raw: Option<&str>) -> Decimal {
    let raw = match raw {
        Some(r) => r,
        None => return Decimal::ZERO,
    };
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | '%' | ','))
        .collect();
    if cleaned.is_empty() || cleaned == "-" {
        return Decimal::ZERO;
    }
    match Decimal::from_str(&cleaned) {
        Ok(value) => value,
        Err(_) => {
            warn!("Unparsable numeric '{}' coerced to zero", raw);
            Decimal::ZERO
        }
    }
}

/// Shared normalization: cleans numerics, scales the percentage weight to a
/// fraction, carries the vendor's asset class label, and runs the option
/// classifier over the row's text.
fn normalize_base(fund: &FundConfig, date: NaiveDate, row: &RawHoldingRecord) -> Holding {
    let mut holding = Holding::new(&fund.ticker, date, row.ticker.trim());
    holding.description = row.description.trim().to_string();
    holding.shares = clean_decimal(row.shares.as_deref());
    holding.market_value = clean_decimal(row.market_value.as_deref());
    // Every reference vendor discloses weight as a percentage of net assets.
    holding.weight = clean_decimal(row.weight.as_deref()) / Decimal::ONE_HUNDRED;
    if let Some(class) = row.asset_class.as_deref() {
        if !class.trim().is_empty() {
            holding.asset_class = AssetClass::from(class.trim().to_string());
        }
    }

    if let Some(details) = classify(&row.ticker, &row.description) {
        holding.apply_option_details(details);
    }
    holding
}

fn normalize_neos(fund: &FundConfig, date: NaiveDate, row: &RawHoldingRecord) -> Holding {
    normalize_base(fund, date, row)
}

fn normalize_goldman_sachs(fund: &FundConfig, date: NaiveDate, row: &RawHoldingRecord) -> Holding {
    normalize_base(fund, date, row)
}

/// Global X labels its cash sweep rows only through the ticker text.
fn normalize_global_x(fund: &FundConfig, date: NaiveDate, row: &RawHoldingRecord) -> Holding {
    let mut holding = normalize_base(fund, date, row);
    if !holding.is_option() && row.ticker.contains("Cash") {
        holding.asset_class = AssetClass::Cash;
    }
    holding
}

fn normalize_roundhill(fund: &FundConfig, date: NaiveDate, row: &RawHoldingRecord) -> Holding {
    normalize_base(fund, date, row)
}
