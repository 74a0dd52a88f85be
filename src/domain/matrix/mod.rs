//! Matrix model: the judgment container, BWM reference selection, and
//! the pure validators for imported matrices.

mod judgment;
mod reference;
mod validate;

pub use judgment::{Crisp, Judgment, JudgmentMatrix, MIN_CRITERIA};
pub use reference::{best_row, worst_column, ReferenceSelection};
pub use validate::{validate_ahp, validate_bwm, ValidationReport, DEFAULT_TOLERANCE};
