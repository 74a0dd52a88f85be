//! Application command handlers.

mod calculate_weights;

pub use calculate_weights::{CalculateError, CalculateWeightsHandler};
