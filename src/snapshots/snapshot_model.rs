use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::constants::{DATE_FORMAT, DECIMAL_PRECISION};
use crate::holdings::{parse_expiration, AssetClass, Holding, OptionType};

/// All holdings of one fund on one disclosed date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub fund_ticker: String,
    pub date: NaiveDate,
    pub holdings: Vec<Holding>,
}

impl Snapshot {
    /// The empty snapshot for a (fund, date) with no stored rows. Missing
    /// history is a normal state, not an error.
    pub fn empty(fund_ticker: &str, date: NaiveDate) -> Self {
        Snapshot {
            fund_ticker: fund_ticker.to_string(),
            date,
            holdings: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// The option legs of this snapshot.
    pub fn options(&self) -> impl Iterator<Item = &Holding> {
        self.holdings.iter().filter(|h| h.is_option())
    }
}

// --- DB Representation ---

#[derive(Debug, Clone, Queryable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::fund_holdings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct FundHoldingDB {
    pub fund_ticker: String,
    /// Stored as a YYYY-MM-DD string; SQLite orders these correctly.
    pub snapshot_date: String,
    pub instrument_id: String,
    pub description: String,
    // Decimals are stored as TEXT to avoid float round-tripping.
    pub shares: String,
    pub market_value: String,
    pub weight: String,
    pub asset_class: String,
    pub option_type: Option<String>,
    pub strike_price: Option<String>,
    /// The vendor's literal expiration text; reparsed on load so unparsable
    /// dates survive round trips.
    pub expiration_date: Option<String>,
}

impl From<FundHoldingDB> for Holding {
    fn from(db: FundHoldingDB) -> Self {
        let expiration_raw = db.expiration_date;
        Holding {
            fund_ticker: db.fund_ticker,
            date: NaiveDate::parse_from_str(&db.snapshot_date, DATE_FORMAT).unwrap_or_default(),
            instrument_id: db.instrument_id,
            description: db.description,
            shares: Decimal::from_str(&db.shares).unwrap_or_default(),
            market_value: Decimal::from_str(&db.market_value).unwrap_or_default(),
            weight: Decimal::from_str(&db.weight).unwrap_or_default(),
            asset_class: AssetClass::from(db.asset_class),
            option_type: db.option_type.as_deref().and_then(OptionType::parse),
            strike_price: db
                .strike_price
                .as_deref()
                .and_then(|s| Decimal::from_str(s).ok()),
            expiration_date: expiration_raw.as_deref().and_then(parse_expiration),
            expiration_raw,
        }
    }
}

impl From<Holding> for FundHoldingDB {
    fn from(domain: Holding) -> Self {
        FundHoldingDB {
            fund_ticker: domain.fund_ticker,
            snapshot_date: domain.date.format(DATE_FORMAT).to_string(),
            instrument_id: domain.instrument_id,
            description: domain.description,
            shares: domain.shares.round_dp(DECIMAL_PRECISION).to_string(),
            market_value: domain.market_value.round_dp(DECIMAL_PRECISION).to_string(),
            weight: domain.weight.round_dp(DECIMAL_PRECISION).to_string(),
            asset_class: String::from(domain.asset_class),
            option_type: domain.option_type.map(|t| t.as_str().to_string()),
            strike_price: domain
                .strike_price
                .map(|s| s.round_dp(DECIMAL_PRECISION).to_string()),
            expiration_date: domain.expiration_raw.or_else(|| {
                domain
                    .expiration_date
                    .map(|d| d.format(DATE_FORMAT).to_string())
            }),
        }
    }
}
