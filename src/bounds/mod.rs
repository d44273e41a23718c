mod bounds_analyzer;
mod bounds_model;

pub use bounds_analyzer::analyze;
pub use bounds_model::*;
