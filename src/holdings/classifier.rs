//! Instrument classifier: mines option metadata (type, strike, expiration)
//! out of untrusted vendor ticker/description text.
//!
//! Three incompatible disclosure conventions are recognized, tried in a
//! fixed priority order with early return on first match. The order is a
//! documented contract: reordering the cascade changes classification
//! results. False negatives (an option disclosed in an unrecognized format)
//! are expected and harmless; each pattern keeps format-specific anchors
//! (`EXP`, `C/`/`P/`, fixed digit-run lengths) to minimize false positives.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::holdings_model::{parse_expiration, OptionDetails, OptionType};

lazy_static! {
    /// Compact date-strike form, e.g. "NDX US 12/20/24 C26150".
    /// Strike is a plain integer digit run, no implied decimal scaling.
    static ref COMPACT_DATE_STRIKE: Regex =
        Regex::new(r"(\d{2}/\d{2}/\d{2})\s+([CP])(\d+)").expect("Invalid regex pattern");

    /// Slash-leg form, e.g. "C/QQQ FLEX ... 610.3 EXP 2026-03-06".
    /// Strike is a plain decimal anchored by the explicit EXP marker.
    static ref SLASH_LEG: Regex =
        Regex::new(r"(?i)([CP])/([A-Z]+)\s+.*?\s+([\d.]+)\s+EXP\s+(\d{4}-\d{2}-\d{2})")
            .expect("Invalid regex pattern");

    /// OCC-style packed form, e.g. "4NDX 260320C01947250" (ticker only,
    /// whitespace stripped): yymmdd + C/P + eight strike digits with an
    /// implied two-decimal scale.
    static ref OCC_PACKED: Regex =
        Regex::new(r"(\d{6})([CP])(\d{8})").expect("Invalid regex pattern");
}

/// Classifies a (ticker, description) text pair. Returns None when no
/// option pattern fires; the caller leaves the row's asset class untouched.
pub fn classify(ticker: &str, description: &str) -> Option<OptionDetails> {
    let text = format!("{} {}", ticker, description);

    if let Some(details) = match_compact_date_strike(&text) {
        return Some(details);
    }
    if let Some(details) = match_slash_leg(&text) {
        return Some(details);
    }
    match_occ_packed(ticker)
}

fn option_type_from_marker(marker: &str) -> OptionType {
    if marker.eq_ignore_ascii_case("C") {
        OptionType::Call
    } else {
        OptionType::Put
    }
}

fn match_compact_date_strike(text: &str) -> Option<OptionDetails> {
    let caps = COMPACT_DATE_STRIKE.captures(text)?;
    let expiration_raw = caps[1].to_string();
    let strike = Decimal::from_str(&caps[3]).ok()?;
    if strike <= Decimal::ZERO {
        return None;
    }
    Some(OptionDetails {
        option_type: option_type_from_marker(&caps[2]),
        strike_price: strike,
        expiration_date: parse_expiration(&expiration_raw),
        expiration_raw,
    })
}

fn match_slash_leg(text: &str) -> Option<OptionDetails> {
    let caps = SLASH_LEG.captures(text)?;
    let strike = Decimal::from_str(&caps[3]).ok()?;
    if strike <= Decimal::ZERO {
        return None;
    }
    let expiration_raw = caps[4].to_string();
    Some(OptionDetails {
        option_type: option_type_from_marker(&caps[1]),
        strike_price: strike,
        expiration_date: parse_expiration(&expiration_raw),
        expiration_raw,
    })
}

fn match_occ_packed(ticker: &str) -> Option<OptionDetails> {
    let packed: String = ticker.split_whitespace().collect();
    let caps = OCC_PACKED.captures(&packed)?;

    // Eight digits with an implied two-decimal scale: 01947250 -> 19472.50.
    let strike_units: i64 = caps[3].parse().ok()?;
    let strike = Decimal::new(strike_units, 2);
    if strike <= Decimal::ZERO {
        return None;
    }

    // yymmdd -> 20yy-mm-dd. The century is fixed at 20xx by design; this is
    // not a general date parser.
    let yymmdd = &caps[1];
    let expiration_raw = format!("20{}-{}-{}", &yymmdd[0..2], &yymmdd[2..4], &yymmdd[4..6]);

    Some(OptionDetails {
        option_type: option_type_from_marker(&caps[2]),
        strike_price: strike,
        expiration_date: parse_expiration(&expiration_raw),
        expiration_raw,
    })
}
