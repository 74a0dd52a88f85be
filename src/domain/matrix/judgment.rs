//! Judgment matrix: the N×N container shared by every method variant.
//!
//! The container is an owned value type; snapshots for the edit flow are
//! plain clones, never aliased views.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::fuzzy::{FuzzyLabel, Tfn};

/// Smallest matrix that still expresses a comparison.
pub const MIN_CRITERIA: usize = 2;

/// A single judgment cell: one payload kind of the matrix family.
///
/// `paired` encodes the reciprocal-write policy per kind: `Some` means the
/// quick editors write the paired cell in the same operation
/// (AutoReciprocal); `None` means the pair is entered independently and
/// checked later by the import validator (ManualReciprocal).
pub trait Judgment: Clone + PartialEq + fmt::Debug {
    /// The "no difference" judgment, also the fixed diagonal value.
    fn identity() -> Self;

    /// The value written at `(j, i)` when this value lands at `(i, j)`,
    /// or `None` for kinds whose pair is set manually.
    fn paired(&self) -> Option<Self>;
}

/// A crisp positive judgment ratio.
///
/// Serializes as a plain number; deserialization runs the same checks as
/// [`Crisp::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Crisp(f64);

impl Crisp {
    /// Creates a crisp judgment, rejecting non-finite or non-positive input.
    ///
    /// The reciprocal must be finite too, so a coupled write can never
    /// plant an infinity at the paired cell.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::invalid_format(
                "judgment",
                format!("judgment must be a positive finite number, got {}", value),
            ));
        }
        if !(1.0 / value).is_finite() {
            return Err(ValidationError::invalid_format(
                "judgment",
                format!("judgment {} is too small to carry a reciprocal", value),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<Crisp> for f64 {
    fn from(c: Crisp) -> Self {
        c.0
    }
}

impl TryFrom<f64> for Crisp {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Crisp::try_new(value)
    }
}

impl Judgment for Crisp {
    fn identity() -> Self {
        Self(1.0)
    }

    fn paired(&self) -> Option<Self> {
        Some(Self(1.0 / self.0))
    }
}

impl Judgment for Tfn {
    fn identity() -> Self {
        Tfn::IDENTITY
    }

    // The modal TFN editor sets each side of the pair on its own; the
    // import validator checks the product instead.
    fn paired(&self) -> Option<Self> {
        None
    }
}

impl Judgment for FuzzyLabel {
    fn identity() -> Self {
        FuzzyLabel::EI
    }

    fn paired(&self) -> Option<Self> {
        Some(self.reciprocal())
    }
}

/// An N×N judgment matrix over one payload kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgmentMatrix<C: Judgment> {
    n: usize,
    cells: Vec<C>,
}

impl<C: Judgment> JudgmentMatrix<C> {
    /// Allocates an N×N matrix filled with the kind's identity element.
    pub fn new(n: usize) -> Result<Self, DomainError> {
        if n < MIN_CRITERIA {
            return Err(DomainError::new(
                ErrorCode::MatrixTooSmall,
                format!("A judgment matrix needs at least {} criteria, got {}", MIN_CRITERIA, n),
            ));
        }
        Ok(Self {
            n,
            cells: vec![C::identity(); n * n],
        })
    }

    /// Adopts externally supplied rows, checking shape and diagonal.
    ///
    /// Callers run the method-specific validator first; this only enforces
    /// what the container itself guarantees.
    pub fn try_from_rows(rows: Vec<Vec<C>>) -> Result<Self, DomainError> {
        let n = rows.len();
        if n < MIN_CRITERIA {
            return Err(DomainError::new(
                ErrorCode::MatrixTooSmall,
                format!("A judgment matrix needs at least {} rows, got {}", MIN_CRITERIA, n),
            ));
        }
        let mut cells = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(DomainError::new(
                    ErrorCode::ValidationFailed,
                    format!("Row {} must have {} entries, got {}", i + 1, n, row.len()),
                ));
            }
            cells.extend(row);
        }
        for i in 0..n {
            if cells[i * n + i] != C::identity() {
                return Err(DomainError::new(
                    ErrorCode::DiagonalReadOnly,
                    format!("Diagonal cell ({}, {}) must be the identity judgment", i + 1, i + 1),
                ));
            }
        }
        Ok(Self { n, cells })
    }

    /// Number of criteria (the matrix is `len × len`).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        false // construction guarantees n >= MIN_CRITERIA
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&C> {
        if i < self.n && j < self.n {
            self.cells.get(i * self.n + j)
        } else {
            None
        }
    }

    /// Writes a judgment at `(i, j)`, and the kind's reciprocal at `(j, i)`
    /// in the same operation when the kind's policy pairs writes.
    ///
    /// The diagonal is read-only and out-of-bounds indices are rejected;
    /// in both cases the matrix is untouched.
    pub fn set(&mut self, i: usize, j: usize, value: C) -> Result<(), DomainError> {
        let pair = value.paired();
        self.set_decoupled(i, j, value)?;
        if let Some(reciprocal) = pair {
            self.cells[j * self.n + i] = reciprocal;
        }
        Ok(())
    }

    /// Writes only `(i, j)`, regardless of the kind's pairing policy.
    ///
    /// The per-criterion alternative matrices edit cells reciprocity-free;
    /// everything else goes through [`JudgmentMatrix::set`].
    pub fn set_decoupled(&mut self, i: usize, j: usize, value: C) -> Result<(), DomainError> {
        if i >= self.n || j >= self.n {
            return Err(DomainError::new(
                ErrorCode::IndexOutOfBounds,
                format!("Cell ({}, {}) is outside the {}×{} matrix", i + 1, j + 1, self.n, self.n),
            )
            .with_detail("row", i.to_string())
            .with_detail("col", j.to_string()));
        }
        if i == j {
            return Err(DomainError::new(
                ErrorCode::DiagonalReadOnly,
                format!("Diagonal cell ({}, {}) is fixed at the identity judgment", i + 1, j + 1),
            ));
        }
        self.cells[i * self.n + j] = value;
        Ok(())
    }

    /// Row `i` as an owned vector.
    pub fn row(&self, i: usize) -> Option<Vec<C>> {
        if i < self.n {
            Some(self.cells[i * self.n..(i + 1) * self.n].to_vec())
        } else {
            None
        }
    }

    /// Column `j` as an owned vector.
    pub fn column(&self, j: usize) -> Option<Vec<C>> {
        if j < self.n {
            Some((0..self.n).map(|i| self.cells[i * self.n + j].clone()).collect())
        } else {
            None
        }
    }

    /// The full matrix as owned rows, for serialization and validation.
    pub fn rows(&self) -> Vec<Vec<C>> {
        (0..self.n).map(|i| self.row(i).unwrap_or_default()).collect()
    }

    /// A resized copy: judgments survive where both indices remain valid,
    /// new cells hold the identity element.
    pub fn resized(&self, new_len: usize) -> Result<Self, DomainError> {
        let mut next = Self::new(new_len)?;
        let keep = self.n.min(new_len);
        for i in 0..keep {
            for j in 0..keep {
                next.cells[i * new_len + j] = self.cells[i * self.n + j].clone();
            }
        }
        Ok(next)
    }
}

impl JudgmentMatrix<Crisp> {
    /// The matrix as plain floats, the shape the validators and the solver
    /// wire format use.
    pub fn to_values(&self) -> Vec<Vec<f64>> {
        self.rows()
            .into_iter()
            .map(|row| row.into_iter().map(|c| c.value()).collect())
            .collect()
    }
}
