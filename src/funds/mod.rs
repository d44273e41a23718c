mod funds_model;

pub use funds_model::*;
