//! Tabular matrix import.
//!
//! Reads a square-matrix worksheet exported as CSV. The first row is a
//! header whose first cell is ignored and whose remaining cells name the
//! criteria; each following row carries one matrix row starting at column
//! two. Unparseable cells become NaN so validation can point at the exact
//! coordinate instead of the import aborting on the first bad cell.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::domain::fuzzy::parse_cell;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Empty file.")]
    EmptyFile,

    #[error("Header must list at least 2 criteria.")]
    TooFewCriteria,

    #[error("Matrix must have {expected} rows.")]
    MissingRows { expected: usize },

    #[error("Unsupported file type. Please upload .csv")]
    UnsupportedFileType,

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Criteria names and raw cell values lifted from a worksheet.
///
/// Cells are untrusted at this point: NaN marks unparseable input, and
/// reciprocity/diagonal rules have not been checked yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedMatrix {
    pub criteria: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
}

/// Parses worksheet text into criteria names and an n×n value grid.
pub fn parse_table(contents: &str) -> Result<ImportedMatrix, ImportError> {
    let mut lines = contents
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty());

    let header = lines.next().ok_or(ImportError::EmptyFile)?;
    let criteria: Vec<String> = split_row(header)
        .into_iter()
        .skip(1)
        .filter(|name| !name.is_empty())
        .collect();

    let n = criteria.len();
    if n < 2 {
        return Err(ImportError::TooFewCriteria);
    }

    let body: Vec<&str> = lines.take(n).collect();
    if body.len() < n {
        return Err(ImportError::MissingRows { expected: n });
    }

    let matrix = body
        .iter()
        .map(|line| {
            let cells = split_row(line);
            // Column zero repeats the row label; data starts at column one.
            (0..n)
                .map(|j| cells.get(j + 1).map(|c| parse_cell(c)).unwrap_or(f64::NAN))
                .collect()
        })
        .collect();

    Ok(ImportedMatrix { criteria, matrix })
}

/// Reads and parses a matrix file, dispatching on the extension.
pub fn import_matrix_file(path: &Path) -> Result<ImportedMatrix, ImportError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("csv") => {
            let contents = fs::read_to_string(path).map_err(|source| ImportError::Io {
                path: path.display().to_string(),
                source,
            })?;
            parse_table(&contents)
        }
        _ => Err(ImportError::UnsupportedFileType),
    }
}

fn split_row(line: &str) -> Vec<String> {
    line.split(',').map(|cell| cell.trim().to_string()).collect()
}
