//! Tabular export of solved weights and judgment matrices.
//!
//! Sheets are plain string grids with a header row, rendered to CSV.
//! Weight values are rounded to three decimals; non-finite values are
//! written as 0 rather than poisoning the sheet.

use crate::ports::{SolverVariant, WeightResponse};

/// A header row plus data rows, ready for CSV rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.header.join(","));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }
}

/// Builds the weight sheet for a solved session.
///
/// Linear results carry a single crisp weight per criterion; the fuzzy
/// variants add lower and upper bounds, with the center falling back to
/// the bound midpoint when the solver omits a crisp value.
pub fn weight_sheet(variant: SolverVariant, criteria: &[String], response: &WeightResponse) -> Sheet {
    if variant == SolverVariant::Linear {
        let rows = criteria
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let w = response.crisp_weights.get(i).copied().unwrap_or(f64::NAN);
                vec![name.clone(), format_weight(w)]
            })
            .collect();
        return Sheet {
            header: vec!["Criterion".to_string(), "Weight".to_string()],
            rows,
        };
    }

    let lower = response.lower_weights.as_deref().unwrap_or(&[]);
    let upper = response.upper_weights.as_deref().unwrap_or(&[]);
    let rows = criteria
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let lo = lower.get(i).copied().unwrap_or(f64::NAN);
            let up = upper.get(i).copied().unwrap_or(f64::NAN);
            let center = response
                .crisp_weights
                .get(i)
                .copied()
                .filter(|c| c.is_finite())
                .unwrap_or((lo + up) / 2.0);
            vec![
                name.clone(),
                format_weight(lo),
                format_weight(center),
                format_weight(up),
            ]
        })
        .collect();

    Sheet {
        header: vec![
            "Criterion".to_string(),
            "Lower Weight".to_string(),
            "Crisp / Center".to_string(),
            "Upper Weight".to_string(),
        ],
        rows,
    }
}

/// Builds a square-matrix sheet in the same layout the importer reads.
pub fn matrix_sheet(criteria: &[String], matrix: &[Vec<f64>]) -> Sheet {
    let mut header = Vec::with_capacity(criteria.len() + 1);
    header.push("Criteria".to_string());
    header.extend(criteria.iter().cloned());

    let rows = criteria
        .iter()
        .zip(matrix)
        .map(|(name, row)| {
            let mut cells = Vec::with_capacity(row.len() + 1);
            cells.push(name.clone());
            cells.extend(row.iter().map(|v| v.to_string()));
            cells
        })
        .collect();

    Sheet { header, rows }
}

fn format_weight(value: f64) -> String {
    round3(value).to_string()
}

fn round3(value: f64) -> f64 {
    if value.is_finite() {
        (value * 1000.0).round() / 1000.0
    } else {
        0.0
    }
}
