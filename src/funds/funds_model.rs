use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Disclosure format a fund's vendor publishes its holdings in.
///
/// Each variant maps to one normalization function; the raw retrieval
/// (HTTP, browser automation) lives entirely outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VendorFormat {
    Neos,
    GoldmanSachs,
    GlobalX,
    Roundhill,
}

/// Static configuration for one tracked fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundConfig {
    pub ticker: String,
    pub name: String,
    pub vendor: VendorFormat,
}

impl FundConfig {
    pub fn new(ticker: &str, name: &str, vendor: VendorFormat) -> Self {
        FundConfig {
            ticker: ticker.to_string(),
            name: name.to_string(),
            vendor,
        }
    }
}

/// Immutable fund registry, passed explicitly into the components that need
/// it. Never read from ambient process state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundRegistry {
    funds: Vec<FundConfig>,
}

impl FundRegistry {
    pub fn new(funds: Vec<FundConfig>) -> Result<Self> {
        let mut seen: Vec<&str> = Vec::with_capacity(funds.len());
        for fund in &funds {
            if fund.ticker.trim().is_empty() {
                return Err(
                    ValidationError::InvalidRegistry("empty fund ticker".to_string()).into(),
                );
            }
            if seen.contains(&fund.ticker.as_str()) {
                return Err(ValidationError::InvalidRegistry(format!(
                    "duplicate fund ticker '{}'",
                    fund.ticker
                ))
                .into());
            }
            seen.push(&fund.ticker);
        }
        Ok(FundRegistry { funds })
    }

    /// Loads a registry from its JSON representation (a plain array of fund
    /// configs), validating ticker uniqueness.
    pub fn from_json(json: &str) -> Result<Self> {
        let funds: Vec<FundConfig> = serde_json::from_str(json)
            .map_err(|e| ValidationError::InvalidRegistry(e.to_string()))?;
        Self::new(funds)
    }

    pub fn get(&self, ticker: &str) -> Option<&FundConfig> {
        self.funds.iter().find(|f| f.ticker == ticker)
    }

    pub fn funds(&self) -> &[FundConfig] {
        &self.funds
    }

    pub fn tickers(&self) -> Vec<String> {
        self.funds.iter().map(|f| f.ticker.clone()).collect()
    }
}

impl Default for FundRegistry {
    /// The reference set of covered-call income ETFs this system was built
    /// around.
    fn default() -> Self {
        FundRegistry {
            funds: vec![
                FundConfig::new(
                    "QQQI",
                    "NEOS Nasdaq 100(R) High Income ETF",
                    VendorFormat::Neos,
                ),
                FundConfig::new(
                    "GPIQ",
                    "Goldman Sachs Nasdaq-100 Premium Income ETF",
                    VendorFormat::GoldmanSachs,
                ),
                FundConfig::new(
                    "QYLD",
                    "Global X Nasdaq 100 Covered Call ETF",
                    VendorFormat::GlobalX,
                ),
                FundConfig::new(
                    "QDTE",
                    "Roundhill N-100 0DTE Covered Call Strategy ETF",
                    VendorFormat::Roundhill,
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_contains_reference_funds() {
        let registry = FundRegistry::default();
        assert_eq!(registry.funds().len(), 4);
        assert_eq!(registry.get("QQQI").unwrap().vendor, VendorFormat::Neos);
        assert_eq!(registry.get("QYLD").unwrap().vendor, VendorFormat::GlobalX);
        assert!(registry.get("SPY").is_none());
    }

    #[test]
    fn duplicate_tickers_are_rejected() {
        let result = FundRegistry::new(vec![
            FundConfig::new("QQQI", "a", VendorFormat::Neos),
            FundConfig::new("QQQI", "b", VendorFormat::Neos),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn registry_loads_from_json() {
        let json = r#"[
            {"ticker": "QDTE", "name": "Roundhill 0DTE", "vendor": "roundhill"}
        ]"#;
        let registry = FundRegistry::from_json(json).unwrap();
        assert_eq!(
            registry.get("QDTE").unwrap().vendor,
            VendorFormat::Roundhill
        );
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        assert!(FundRegistry::from_json("{not json").is_err());
    }
}
