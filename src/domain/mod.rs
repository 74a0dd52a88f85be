//! Domain layer containing the judgment matrix engine.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (errors, state machine trait)
//! - `fuzzy` - TFN/label codec and the numeric entry grammar
//! - `matrix` - Judgment matrix model, BWM reference selection, validators
//! - `synthesis` - Weighted-sum alternative ranking

pub mod foundation;
pub mod fuzzy;
pub mod matrix;
pub mod synthesis;
