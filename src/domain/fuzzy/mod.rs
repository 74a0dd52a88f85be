//! TFN/Label codec: triangular fuzzy numbers, the linguistic scale, and
//! the numeric grammar shared by manual entry and tabular import.

mod label;
mod numeric;
mod tfn;

pub use label::{convert_matrix_to_values, FuzzyLabel, SCALE};
pub use numeric::{parse_cell, parse_ratio};
pub use tfn::Tfn;
