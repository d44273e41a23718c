use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use crate::constants::DATE_FORMAT;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{Error, Result};
use crate::holdings::Holding;

use super::snapshot_model::{FundHoldingDB, Snapshot};

/// The snapshot store boundary. Writes are async (funneled through the
/// writer actor); reads hit the pool directly.
#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// Replaces any existing rows for (fund_ticker, date) with the given
    /// holding set in one atomic step. Same-day re-runs are idempotent.
    async fn save(&self, fund_ticker: &str, date: NaiveDate, holdings: Vec<Holding>)
        -> Result<()>;

    /// Returns the snapshot for that exact key, or an empty snapshot if
    /// absent. Missing history is a normal state (e.g. first run).
    fn load(&self, fund_ticker: &str, date: NaiveDate) -> Result<Snapshot>;

    /// The most recent date with at least one stored row for the fund.
    fn latest_date(&self, fund_ticker: &str) -> Result<Option<NaiveDate>>;

    /// Up to `n` distinct dates for the fund, most recent first.
    fn recent_dates(&self, fund_ticker: &str, n: i64) -> Result<Vec<NaiveDate>>;
}

pub struct SnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn parse_stored_date(raw: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|e| Error::Unexpected(format!("Failed to parse stored date '{}': {}", raw, e)))
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for SnapshotRepository {
    async fn save(
        &self,
        fund_ticker: &str,
        date: NaiveDate,
        holdings: Vec<Holding>,
    ) -> Result<()> {
        use crate::schema::fund_holdings::dsl;

        let ticker_value = fund_ticker.to_string();
        let date_value = date.format(DATE_FORMAT).to_string();
        let rows: Vec<FundHoldingDB> = holdings.into_iter().map(FundHoldingDB::from).collect();

        debug!(
            "Saving {} holdings for {} on {}",
            rows.len(),
            ticker_value,
            date_value
        );

        // Delete-then-insert inside the writer actor's transaction, so a
        // partially written date is never visible to readers.
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    dsl::fund_holdings
                        .filter(dsl::fund_ticker.eq(&ticker_value))
                        .filter(dsl::snapshot_date.eq(&date_value)),
                )
                .execute(conn)?;
                diesel::insert_into(dsl::fund_holdings)
                    .values(&rows)
                    .execute(conn)?;
                Ok(())
            })
            .await
    }

    fn load(&self, fund_ticker: &str, date: NaiveDate) -> Result<Snapshot> {
        use crate::schema::fund_holdings::dsl;

        let mut conn = get_connection(&self.pool)?;
        let date_value = date.format(DATE_FORMAT).to_string();

        let rows = dsl::fund_holdings
            .filter(dsl::fund_ticker.eq(fund_ticker))
            .filter(dsl::snapshot_date.eq(&date_value))
            .order(dsl::instrument_id.asc())
            .load::<FundHoldingDB>(&mut conn)?;

        debug!(
            "Loaded {} holdings for {} on {}",
            rows.len(),
            fund_ticker,
            date_value
        );

        Ok(Snapshot {
            fund_ticker: fund_ticker.to_string(),
            date,
            holdings: rows.into_iter().map(Holding::from).collect(),
        })
    }

    fn latest_date(&self, fund_ticker: &str) -> Result<Option<NaiveDate>> {
        use crate::schema::fund_holdings::dsl;
        use diesel::dsl::max;

        let mut conn = get_connection(&self.pool)?;

        let latest: Option<String> = dsl::fund_holdings
            .filter(dsl::fund_ticker.eq(fund_ticker))
            .select(max(dsl::snapshot_date))
            .first(&mut conn)?;

        latest
            .map(|raw| Self::parse_stored_date(&raw))
            .transpose()
    }

    fn recent_dates(&self, fund_ticker: &str, n: i64) -> Result<Vec<NaiveDate>> {
        use crate::schema::fund_holdings::dsl;

        let mut conn = get_connection(&self.pool)?;

        let raw_dates: Vec<String> = dsl::fund_holdings
            .filter(dsl::fund_ticker.eq(fund_ticker))
            .select(dsl::snapshot_date)
            .distinct()
            .order(dsl::snapshot_date.desc())
            .limit(n)
            .load(&mut conn)?;

        raw_dates
            .iter()
            .map(|raw| Self::parse_stored_date(raw))
            .collect()
    }
}
