#[cfg(test)]
mod tests {
    use crate::errors::{Error, Result};
    use crate::funds::{FundConfig, FundRegistry, VendorFormat};
    use crate::holdings::Holding;
    use crate::normalize::RawHoldingRecord;
    use crate::pipeline::{FundRunOutcome, HoldingsProvider, PipelineService};
    use crate::snapshots::{Snapshot, SnapshotRepositoryTrait};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    fn raw_row(ticker: &str, shares: &str) -> RawHoldingRecord {
        let mut row = RawHoldingRecord::new(ticker, ticker);
        row.shares = Some(shares.to_string());
        row
    }

    // --- Mock provider ---

    struct MockProvider {
        payloads: HashMap<String, Vec<RawHoldingRecord>>,
        failing: Vec<String>,
    }

    impl MockProvider {
        fn new() -> Self {
            MockProvider {
                payloads: HashMap::new(),
                failing: Vec::new(),
            }
        }

        fn with_payload(mut self, ticker: &str, rows: Vec<RawHoldingRecord>) -> Self {
            self.payloads.insert(ticker.to_string(), rows);
            self
        }

        fn with_failure(mut self, ticker: &str) -> Self {
            self.failing.push(ticker.to_string());
            self
        }
    }

    #[async_trait]
    impl HoldingsProvider for MockProvider {
        async fn fetch(&self, fund: &FundConfig) -> Result<Vec<RawHoldingRecord>> {
            if self.failing.contains(&fund.ticker) {
                return Err(Error::Retrieval(format!("{} download failed", fund.ticker)));
            }
            Ok(self.payloads.get(&fund.ticker).cloned().unwrap_or_default())
        }
    }

    // --- Mock repository (in-memory store keyed like the real table) ---

    #[derive(Default)]
    struct MockRepository {
        rows: Mutex<HashMap<(String, NaiveDate), Vec<Holding>>>,
    }

    #[async_trait]
    impl SnapshotRepositoryTrait for MockRepository {
        async fn save(
            &self,
            fund_ticker: &str,
            date: NaiveDate,
            holdings: Vec<Holding>,
        ) -> Result<()> {
            self.rows
                .lock()
                .unwrap()
                .insert((fund_ticker.to_string(), date), holdings);
            Ok(())
        }

        fn load(&self, fund_ticker: &str, date: NaiveDate) -> Result<Snapshot> {
            let rows = self.rows.lock().unwrap();
            Ok(Snapshot {
                fund_ticker: fund_ticker.to_string(),
                date,
                holdings: rows
                    .get(&(fund_ticker.to_string(), date))
                    .cloned()
                    .unwrap_or_default(),
            })
        }

        fn latest_date(&self, fund_ticker: &str) -> Result<Option<NaiveDate>> {
            Ok(self.recent_dates(fund_ticker, 1)?.into_iter().next())
        }

        fn recent_dates(&self, fund_ticker: &str, n: i64) -> Result<Vec<NaiveDate>> {
            let rows = self.rows.lock().unwrap();
            let mut dates: Vec<NaiveDate> = rows
                .keys()
                .filter(|(f, _)| f == fund_ticker)
                .map(|(_, d)| *d)
                .collect();
            dates.sort_unstable_by(|a, b| b.cmp(a));
            dates.truncate(n as usize);
            Ok(dates)
        }
    }

    fn registry(tickers: &[&str]) -> FundRegistry {
        FundRegistry::new(
            tickers
                .iter()
                .map(|t| FundConfig::new(t, t, VendorFormat::Neos))
                .collect(),
        )
        .unwrap()
    }

    fn service(provider: MockProvider, repo: Arc<MockRepository>, funds: &[&str]) -> PipelineService {
        PipelineService::new(Arc::new(provider), repo, registry(funds))
    }

    #[tokio::test]
    async fn first_run_reports_everything_new() {
        let repo = Arc::new(MockRepository::default());
        let provider = MockProvider::new()
            .with_payload("QQQI", vec![raw_row("AAPL", "100"), raw_row("MSFT", "50")]);
        let service = service(provider, repo.clone(), &["QQQI"]);

        let fund = registry(&["QQQI"]).get("QQQI").unwrap().clone();
        let report = service.run_fund(&fund, date(22)).await.unwrap();

        assert_eq!(report.record_count, 2);
        assert_eq!(report.previous_date, None);
        assert_eq!(report.diff.partition_sizes(), [2, 0, 0, 0, 0]);
        assert!(!report.bounds.has_options());

        // The snapshot landed in the store.
        assert_eq!(repo.load("QQQI", date(22)).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn second_run_diffs_against_previous_day() {
        let repo = Arc::new(MockRepository::default());
        repo.save(
            "QQQI",
            date(21),
            vec![
                {
                    let mut h = Holding::new("QQQI", date(21), "AAPL");
                    h.shares = dec!(100);
                    h
                },
                {
                    let mut h = Holding::new("QQQI", date(21), "GONE");
                    h.shares = dec!(10);
                    h
                },
            ],
        )
        .await
        .unwrap();

        let provider = MockProvider::new()
            .with_payload("QQQI", vec![raw_row("AAPL", "150"), raw_row("FRESH", "5")]);
        let service = service(provider, repo.clone(), &["QQQI"]);

        let fund = registry(&["QQQI"]).get("QQQI").unwrap().clone();
        let report = service.run_fund(&fund, date(22)).await.unwrap();

        assert_eq!(report.previous_date, Some(date(21)));
        assert_eq!(report.diff.new.len(), 1);
        assert_eq!(report.diff.sold.len(), 1);
        assert_eq!(report.diff.increased.len(), 1);
        assert_eq!(report.diff.increased[0].shares_change, dec!(50));
    }

    #[tokio::test]
    async fn same_day_rerun_still_diffs_against_prior_business_day() {
        let repo = Arc::new(MockRepository::default());
        repo.save("QQQI", date(21), vec![Holding::new("QQQI", date(21), "AAPL")])
            .await
            .unwrap();
        // A first pass already stored today's snapshot.
        repo.save("QQQI", date(22), vec![Holding::new("QQQI", date(22), "AAPL")])
            .await
            .unwrap();

        let provider = MockProvider::new().with_payload("QQQI", vec![raw_row("AAPL", "0")]);
        let service = service(provider, repo, &["QQQI"]);

        let fund = registry(&["QQQI"]).get("QQQI").unwrap().clone();
        let report = service.run_fund(&fund, date(22)).await.unwrap();
        assert_eq!(report.previous_date, Some(date(21)));
    }

    #[tokio::test]
    async fn empty_payload_fails_that_fund() {
        let repo = Arc::new(MockRepository::default());
        let provider = MockProvider::new().with_payload("QQQI", vec![]);
        let service = service(provider, repo.clone(), &["QQQI"]);

        let fund = registry(&["QQQI"]).get("QQQI").unwrap().clone();
        assert!(service.run_fund(&fund, date(22)).await.is_err());
        // Nothing was persisted for the failed run.
        assert!(repo.load("QQQI", date(22)).unwrap().is_empty());
    }

    #[tokio::test]
    async fn one_failing_fund_does_not_abort_the_batch() {
        let repo = Arc::new(MockRepository::default());
        let provider = MockProvider::new()
            .with_payload("QQQI", vec![raw_row("AAPL", "100")])
            .with_failure("GPIQ")
            .with_payload("QDTE", vec![raw_row("MSFT", "10")]);
        let service = service(provider, repo, &["QQQI", "GPIQ", "QDTE"]);

        let outcomes = service.run_all(date(22)).await;
        assert_eq!(outcomes.len(), 3);

        let by_fund: HashMap<&str, &FundRunOutcome> =
            outcomes.iter().map(|o| (o.fund_ticker(), o)).collect();
        assert!(by_fund["QQQI"].is_success());
        assert!(!by_fund["GPIQ"].is_success());
        assert!(by_fund["QDTE"].is_success());

        match by_fund["GPIQ"] {
            FundRunOutcome::Failed { error, .. } => {
                assert!(error.contains("GPIQ download failed"))
            }
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn option_rows_flow_through_to_bounds() {
        let repo = Arc::new(MockRepository::default());
        let provider = MockProvider::new().with_payload(
            "QQQI",
            vec![
                raw_row("AAPL", "100"),
                raw_row("NDX US 12/20/24 C26150", "-120"),
            ],
        );
        let service = service(provider, repo, &["QQQI"]);

        let fund = registry(&["QQQI"]).get("QQQI").unwrap().clone();
        let report = service.run_fund(&fund, date(22)).await.unwrap();

        assert!(report.bounds.has_options());
        assert_eq!(report.bounds.upper_bound, Some(dec!(26150)));
    }
}
