pub mod classifier;
mod holdings_model;

pub use holdings_model::*;

#[cfg(test)]
mod classifier_tests;
