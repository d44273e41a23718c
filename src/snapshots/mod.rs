mod snapshot_model;
mod snapshot_repository;

pub use snapshot_model::*;
pub use snapshot_repository::*;
