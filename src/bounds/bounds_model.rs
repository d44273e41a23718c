use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DATE_FORMAT;

/// Min/max strikes of one option leg within an expiration bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrikeRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// One expiration's option legs. `expiration == None` is the bucket for
/// rows whose vendor expiration text did not parse; it sorts last and is
/// reported, not dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationBucket {
    pub expiration: Option<NaiveDate>,
    pub calls: Option<StrikeRange>,
    pub puts: Option<StrikeRange>,
}

impl ExpirationBucket {
    pub fn label(&self) -> String {
        match self.expiration {
            Some(date) => date.format(DATE_FORMAT).to_string(),
            None => "Unknown Date".to_string(),
        }
    }
}

/// Per-expiration breakdown of a snapshot's option legs plus the inferred
/// near-term strike ceiling/floor. Derived, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundsSummary {
    pub buckets: Vec<ExpirationBucket>,
    /// Max put strike of the first put-bearing expiration (effective floor).
    pub lower_bound: Option<Decimal>,
    /// Min call strike of the first call-bearing expiration (effective cap).
    pub upper_bound: Option<Decimal>,
}

impl BoundsSummary {
    pub fn has_options(&self) -> bool {
        !self.buckets.is_empty()
    }

    /// Renders the textual per-expiration breakdown handed to reporting
    /// collaborators.
    pub fn summary_text(&self) -> String {
        if self.buckets.is_empty() {
            return "No Options Positions Found".to_string();
        }

        let mut lines = Vec::new();
        for bucket in &self.buckets {
            lines.push(format!("### Expiration: {}", bucket.label()));
            if let Some(calls) = &bucket.calls {
                lines.push(format!("- Calls: Strike Range {} - {}", calls.min, calls.max));
            }
            if let Some(puts) = &bucket.puts {
                lines.push(format!("- Puts: Strike Range {} - {}", puts.min, puts.max));
            }
        }
        lines.join("\n")
    }
}
