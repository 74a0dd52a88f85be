//! Best/worst criterion selection for the BWM reference-row matrix.
//!
//! The container is the same N×N judgment matrix; only the best row and
//! the worst column carry meaning, the rest are inert placeholders.

use serde::{Deserialize, Serialize};

use super::judgment::{Judgment, JudgmentMatrix};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Designated best/worst criteria for a BWM session.
///
/// Both selections are optional until the solve is requested; they are
/// mutually exclusive while set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSelection {
    best: Option<usize>,
    worst: Option<usize>,
}

impl ReferenceSelection {
    pub fn best(&self) -> Option<usize> {
        self.best
    }

    pub fn worst(&self) -> Option<usize> {
        self.worst
    }

    /// Selects the best criterion by name.
    pub fn set_best(&mut self, criteria: &[String], name: &str) -> Result<(), DomainError> {
        let idx = resolve(criteria, name)?;
        if self.worst == Some(idx) {
            return Err(conflict(name));
        }
        self.best = Some(idx);
        Ok(())
    }

    /// Selects the worst criterion by name; the current best is excluded.
    pub fn set_worst(&mut self, criteria: &[String], name: &str) -> Result<(), DomainError> {
        let idx = resolve(criteria, name)?;
        if self.best == Some(idx) {
            return Err(conflict(name));
        }
        self.worst = Some(idx);
        Ok(())
    }

    /// Drops both selections (criteria edits invalidate the indices).
    pub fn clear(&mut self) {
        self.best = None;
        self.worst = None;
    }

    /// Both selections, or an error naming the missing one.
    pub fn require(&self) -> Result<(usize, usize), DomainError> {
        match (self.best, self.worst) {
            (Some(b), Some(w)) => Ok((b, w)),
            (None, _) => Err(DomainError::new(
                ErrorCode::BestWorstRequired,
                "Select the best criterion before calculating",
            )),
            (_, None) => Err(DomainError::new(
                ErrorCode::BestWorstRequired,
                "Select the worst criterion before calculating",
            )),
        }
    }
}

fn resolve(criteria: &[String], name: &str) -> Result<usize, DomainError> {
    criteria
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| {
            DomainError::new(
                ErrorCode::CriterionNotFound,
                format!("Unknown criterion '{}'", name),
            )
        })
}

fn conflict(name: &str) -> DomainError {
    DomainError::new(
        ErrorCode::BestWorstConflict,
        format!("'{}' cannot be both the best and the worst criterion", name),
    )
}

/// Extracts the semantically active best row of a reference matrix.
pub fn best_row<C: Judgment>(
    matrix: &JudgmentMatrix<C>,
    selection: &ReferenceSelection,
) -> Result<Vec<C>, DomainError> {
    let (best, _) = selection.require()?;
    matrix.row(best).ok_or_else(|| {
        DomainError::new(
            ErrorCode::IndexOutOfBounds,
            format!("Best criterion index {} is outside the matrix", best + 1),
        )
    })
}

/// Extracts the semantically active worst column of a reference matrix.
pub fn worst_column<C: Judgment>(
    matrix: &JudgmentMatrix<C>,
    selection: &ReferenceSelection,
) -> Result<Vec<C>, DomainError> {
    let (_, worst) = selection.require()?;
    matrix.column(worst).ok_or_else(|| {
        DomainError::new(
            ErrorCode::IndexOutOfBounds,
            format!("Worst criterion index {} is outside the matrix", worst + 1),
        )
    })
}
