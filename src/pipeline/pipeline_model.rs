use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::bounds::BoundsSummary;
use crate::reconciliation::DiffResult;

/// Everything one fund's daily run produced, handed read-only to the
/// reporting collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundReport {
    pub fund_ticker: String,
    pub date: NaiveDate,
    /// Number of normalized records saved for the day.
    pub record_count: usize,
    /// The snapshot date the diff was computed against, if any history existed.
    pub previous_date: Option<NaiveDate>,
    pub diff: DiffResult,
    pub bounds: BoundsSummary,
}

/// Per-fund outcome of a batch run. One fund's failure never aborts the
/// others; the shell turns these into its one-line-per-fund status output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum FundRunOutcome {
    Succeeded { report: FundReport },
    Failed { fund_ticker: String, error: String },
}

impl FundRunOutcome {
    pub fn fund_ticker(&self) -> &str {
        match self {
            FundRunOutcome::Succeeded { report } => &report.fund_ticker,
            FundRunOutcome::Failed { fund_ticker, .. } => fund_ticker,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FundRunOutcome::Succeeded { .. })
    }
}
