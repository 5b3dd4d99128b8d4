// Domain layer - Core clip planning types and rules

pub mod errors;
pub mod model;
pub mod rules;
