mod pipeline_model;
mod pipeline_service;
mod pipeline_traits;

pub use pipeline_model::*;
pub use pipeline_service::PipelineService;
pub use pipeline_traits::HoldingsProvider;

#[cfg(test)]
mod pipeline_service_tests;
