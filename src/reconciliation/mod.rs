mod reconciliation_engine;
mod reconciliation_model;

pub use reconciliation_engine::reconcile;
pub use reconciliation_model::*;
