mod normalize_model;
mod normalize_service;

pub use normalize_model::*;
pub use normalize_service::{clean_decimal, normalize_payload, normalizer_for, VendorNormalizer};
