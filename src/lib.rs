pub mod db;

pub mod bounds;
pub mod constants;
pub mod errors;
pub mod funds;
pub mod holdings;
pub mod normalize;
pub mod pipeline;
pub mod reconciliation;
pub mod schema;
pub mod snapshots;

pub use bounds::{analyze, BoundsSummary};
pub use errors::{Error, Result};
pub use funds::{FundConfig, FundRegistry, VendorFormat};
pub use holdings::{AssetClass, Holding, OptionDetails, OptionType};
pub use normalize::{normalize_payload, RawHoldingRecord};
pub use pipeline::{FundReport, FundRunOutcome, HoldingsProvider, PipelineService};
pub use reconciliation::{reconcile, DiffResult, PositionDelta};
pub use snapshots::{Snapshot, SnapshotRepository, SnapshotRepositoryTrait};
