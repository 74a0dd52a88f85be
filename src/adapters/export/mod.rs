//! Tabular export adapters.

pub mod weights;

pub use weights::{matrix_sheet, weight_sheet, Sheet};
