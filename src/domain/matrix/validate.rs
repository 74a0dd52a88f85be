//! Pure validators for externally authored matrices.
//!
//! Both functions collect every violation instead of failing fast, so an
//! import dialog can show the complete list. Coordinates in messages are
//! 1-based, matching what a spreadsheet user sees.

/// Default tolerance for diagonal and reciprocity checks.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Outcome of a matrix validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub ok: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self { ok: errors.is_empty(), errors }
    }
}

/// Checks an AHP pairwise matrix: N×N shape, unit diagonal, and
/// `a[i][j] * a[j][i] ≈ 1` reciprocity within `tol`.
pub fn validate_ahp(criteria: &[String], matrix: &[Vec<f64>], tol: f64) -> ValidationReport {
    let n = criteria.len();
    let mut errors = Vec::new();
    if matrix.len() != n {
        errors.push(format!("Matrix must be {}×{} (rows={}).", n, n, matrix.len()));
    }
    errors.extend(row_errors(n, matrix));

    for i in 0..n {
        let v = matrix.get(i).and_then(|row| row.get(i)).copied();
        let on_diagonal = v.map(|v| (v - 1.0).abs() <= tol).unwrap_or(false);
        if !on_diagonal {
            errors.push(format!("Diagonal must be 1 at ({},{}).", i + 1, i + 1));
        }
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let a = matrix.get(i).and_then(|row| row.get(j)).copied().unwrap_or(f64::NAN);
            let b = matrix.get(j).and_then(|row| row.get(i)).copied().unwrap_or(f64::NAN);
            if !a.is_finite() || !b.is_finite() {
                errors.push(format!(
                    "Non-numeric at ({},{}) or ({},{}).",
                    i + 1,
                    j + 1,
                    j + 1,
                    i + 1
                ));
                continue;
            }
            if (a * b - 1.0).abs() > tol {
                errors.push(format!(
                    "Reciprocity violated: a[{},{}] * a[{},{}] = {:.6}.",
                    i + 1,
                    j + 1,
                    j + 1,
                    i + 1,
                    a * b
                ));
            }
        }
    }

    ValidationReport::from_errors(errors)
}

/// Checks a BWM reference matrix: shape only. Reciprocity is not required
/// because only the best row and worst column are semantically used.
pub fn validate_bwm(criteria: &[String], matrix: &[Vec<f64>]) -> ValidationReport {
    let n = criteria.len();
    let mut errors = Vec::new();
    if matrix.len() != n {
        errors.push(format!("Matrix must be {}×{}.", n, n));
    }
    errors.extend(row_errors(n, matrix));
    ValidationReport::from_errors(errors)
}

fn row_errors(n: usize, matrix: &[Vec<f64>]) -> Vec<String> {
    matrix
        .iter()
        .enumerate()
        .filter(|(_, row)| row.len() != n)
        .map(|(i, _)| format!("Row {} must have {} entries.", i + 1, n))
        .collect()
}
