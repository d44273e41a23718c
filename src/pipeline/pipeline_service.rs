use chrono::NaiveDate;
use log::{error, info};
use std::sync::Arc;

use crate::bounds::analyze;
use crate::errors::{Error, Result};
use crate::funds::{FundConfig, FundRegistry};
use crate::normalize::normalize_payload;
use crate::pipeline::{FundReport, FundRunOutcome, HoldingsProvider};
use crate::reconciliation::reconcile;
use crate::snapshots::SnapshotRepositoryTrait;

/// Drives one business day's batch of fetch, normalize, persist, diff and
/// analyze steps per fund, with per-fund failure isolation.
#[derive(Clone)]
pub struct PipelineService {
    provider: Arc<dyn HoldingsProvider>,
    repository: Arc<dyn SnapshotRepositoryTrait>,
    registry: FundRegistry,
}

impl PipelineService {
    pub fn new(
        provider: Arc<dyn HoldingsProvider>,
        repository: Arc<dyn SnapshotRepositoryTrait>,
        registry: FundRegistry,
    ) -> Self {
        Self {
            provider,
            repository,
            registry,
        }
    }

    /// Runs one fund's daily unit of work. Storage failures propagate and
    /// abort this fund only.
    pub async fn run_fund(&self, fund: &FundConfig, as_of: NaiveDate) -> Result<FundReport> {
        let rows = self.provider.fetch(fund).await?;
        if rows.is_empty() {
            return Err(Error::Retrieval(format!(
                "no holdings rows returned for {}",
                fund.ticker
            )));
        }

        let snapshot = normalize_payload(fund, as_of, &rows);
        let record_count = snapshot.len();

        self.repository
            .save(&fund.ticker, as_of, snapshot.holdings.clone())
            .await?;

        // The immediately preceding disclosure, if any. recent_dates is
        // queried after the save so a same-day re-run still diffs against
        // the prior business day rather than its own first pass.
        let previous_date = self
            .repository
            .recent_dates(&fund.ticker, 2)?
            .into_iter()
            .find(|d| *d < as_of);
        let previous = match previous_date {
            Some(d) => Some(self.repository.load(&fund.ticker, d)?),
            None => None,
        };

        let diff = reconcile(&snapshot, previous.as_ref());
        let bounds = analyze(&snapshot);

        info!(
            "Processed {}: {} records for {}",
            fund.ticker, record_count, as_of
        );

        Ok(FundReport {
            fund_ticker: fund.ticker.clone(),
            date: as_of,
            record_count,
            previous_date,
            diff,
            bounds,
        })
    }

    /// Runs every registered fund for the given date. Funds are processed
    /// concurrently (each worker writes a distinct (fund, date) key) and
    /// each failure is contained to its own outcome.
    pub async fn run_all(&self, as_of: NaiveDate) -> Vec<FundRunOutcome> {
        let tasks = self.registry.funds().iter().map(|fund| async move {
            match self.run_fund(fund, as_of).await {
                Ok(report) => FundRunOutcome::Succeeded { report },
                Err(e) => {
                    error!("Run failed for {}: {}", fund.ticker, e);
                    FundRunOutcome::Failed {
                        fund_ticker: fund.ticker.clone(),
                        error: e.to_string(),
                    }
                }
            }
        });

        futures::future::join_all(tasks).await
    }
}
