//! Matrix import adapters.

pub mod table;

pub use table::{import_matrix_file, parse_table, ImportError, ImportedMatrix};
