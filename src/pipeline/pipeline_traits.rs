use async_trait::async_trait;

use crate::errors::Result;
use crate::funds::FundConfig;
use crate::normalize::RawHoldingRecord;

/// The retrieval boundary. Implementations live outside the core (HTTP
/// downloads, browser automation) and hand over raw rows with vendor field
/// names already mapped to the raw record shape.
#[async_trait]
pub trait HoldingsProvider: Send + Sync {
    async fn fetch(&self, fund: &FundConfig) -> Result<Vec<RawHoldingRecord>>;
}
