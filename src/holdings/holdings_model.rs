use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{COMPACT_DATE_FORMAT, DATE_FORMAT};

/// Broad classification of a disclosed instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum AssetClass {
    Equity,
    Option,
    Cash,
    Other(String),
}

impl AssetClass {
    pub fn as_str(&self) -> &str {
        match self {
            AssetClass::Equity => "Equity",
            AssetClass::Option => "Option",
            AssetClass::Cash => "Cash",
            AssetClass::Other(s) => s,
        }
    }
}

impl Default for AssetClass {
    fn default() -> Self {
        AssetClass::Equity
    }
}

impl From<String> for AssetClass {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Equity" => AssetClass::Equity,
            "Option" => AssetClass::Option,
            "Cash" => AssetClass::Cash,
            _ => AssetClass::Other(s),
        }
    }
}

impl From<AssetClass> for String {
    fn from(class: AssetClass) -> Self {
        class.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn as_str(&self) -> &str {
        match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Call" => Some(OptionType::Call),
            "Put" => Some(OptionType::Put),
            _ => None,
        }
    }
}

/// Option metadata extracted from a vendor's free-text ticker/description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDetails {
    pub option_type: OptionType,
    pub strike_price: Decimal,
    /// Parsed expiration, when the vendor text yields a valid calendar date.
    pub expiration_date: Option<NaiveDate>,
    /// The vendor's literal expiration text, kept verbatim so undated rows
    /// can still be reported instead of dropped.
    pub expiration_raw: String,
}

/// One instrument's position within one fund on one date. This is the
/// canonical record every vendor format is normalized into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub fund_ticker: String,
    pub date: NaiveDate,
    /// Vendor ticker/symbol; the reconciliation key, unique within one
    /// (fund_ticker, date) pair.
    pub instrument_id: String,
    pub description: String,
    pub shares: Decimal,
    pub market_value: Decimal,
    /// Fraction of net assets (vendor percentages are scaled down during
    /// normalization).
    pub weight: Decimal,
    pub asset_class: AssetClass,
    pub option_type: Option<OptionType>,
    pub strike_price: Option<Decimal>,
    pub expiration_date: Option<NaiveDate>,
    pub expiration_raw: Option<String>,
}

impl Holding {
    pub fn new(fund_ticker: &str, date: NaiveDate, instrument_id: &str) -> Self {
        Holding {
            fund_ticker: fund_ticker.to_string(),
            date,
            instrument_id: instrument_id.to_string(),
            description: String::new(),
            shares: Decimal::ZERO,
            market_value: Decimal::ZERO,
            weight: Decimal::ZERO,
            asset_class: AssetClass::Equity,
            option_type: None,
            strike_price: None,
            expiration_date: None,
            expiration_raw: None,
        }
    }

    pub fn is_option(&self) -> bool {
        self.asset_class == AssetClass::Option
    }

    /// Applies classified option metadata to this row.
    pub fn apply_option_details(&mut self, details: OptionDetails) {
        self.asset_class = AssetClass::Option;
        self.option_type = Some(details.option_type);
        self.strike_price = Some(details.strike_price);
        self.expiration_date = details.expiration_date;
        self.expiration_raw = Some(details.expiration_raw);
    }
}

/// Parses an expiration string in either the canonical ISO form or the
/// compact two-digit-year form vendors use. Returns None for anything else;
/// unparsable expirations are reported, not dropped.
pub fn parse_expiration(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, COMPACT_DATE_FORMAT))
        .ok()
}
