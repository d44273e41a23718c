use serde::{Deserialize, Serialize};

/// One raw row as handed across the retrieval boundary, after the vendor
/// adapter has mapped its native column names but before any cleaning.
/// Numeric fields are still the vendor's text ("$1,234.56", "4.37%", ...);
/// absent columns are simply None (schema drift is non-fatal).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHoldingRecord {
    pub ticker: String,
    pub description: String,
    pub shares: Option<String>,
    pub market_value: Option<String>,
    pub weight: Option<String>,
    pub asset_class: Option<String>,
}

impl RawHoldingRecord {
    pub fn new(ticker: &str, description: &str) -> Self {
        RawHoldingRecord {
            ticker: ticker.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }
}
