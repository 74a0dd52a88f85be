//! Wizard state machine: the multi-step flow that owns the criterion list,
//! the active judgment matrix, and (once weights exist) the alternative
//! sub-flow.
//!
//! The session is the single source of truth for the criterion count; it is
//! always derived from the owned list, never stored separately.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, StateMachine, ValidationError};
use crate::domain::fuzzy::{parse_ratio, FuzzyLabel, Tfn};
use crate::domain::matrix::{
    best_row, validate_ahp, validate_bwm, worst_column, Crisp, Judgment, JudgmentMatrix,
    ReferenceSelection, ValidationReport, DEFAULT_TOLERANCE, MIN_CRITERIA,
};
use crate::domain::synthesis::{RankedAlternative, Synthesizer};
use crate::ports::{
    AhpRequest, BwmRequest, MatrixPayload, SolverVariant, VectorPayload, WeightResponse,
};

/// Default upper bound for criterion/alternative counts (original UI bound).
pub const DEFAULT_UPPER_BOUND: usize = 5;

/// Wizard stages: choose count, name entries, ready, or criteria editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Choosing how many criteria to compare.
    Number,
    /// Naming the criteria before the matrix exists.
    Text,
    /// Matrix allocated; editing judgments or viewing results.
    Ready,
    /// Criteria list re-opened for rename/add/remove.
    Edit,
}

impl StateMachine for Stage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use Stage::*;
        // Reset returns to Number from anywhere.
        matches!(
            (self, target),
            (Number, Text)
                | (Text, Ready)
                | (Ready, Edit)
                | (Edit, Ready)
                | (Text, Number)
                | (Ready, Number)
                | (Edit, Number)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use Stage::*;
        match self {
            Number => vec![Text],
            Text => vec![Ready, Number],
            Ready => vec![Edit, Number],
            Edit => vec![Ready, Number],
        }
    }
}

/// Active weighting method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Ahp,
    Bwm,
}

/// Payload kind of the active judgment matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixKind {
    Crisp,
    Tfn,
    Linguistic,
}

/// The judgment matrix in its active payload kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActiveMatrix {
    Crisp(JudgmentMatrix<Crisp>),
    Tfn(JudgmentMatrix<Tfn>),
    Linguistic(JudgmentMatrix<FuzzyLabel>),
}

impl ActiveMatrix {
    fn new(kind: MatrixKind, n: usize) -> Result<Self, DomainError> {
        Ok(match kind {
            MatrixKind::Crisp => ActiveMatrix::Crisp(JudgmentMatrix::new(n)?),
            MatrixKind::Tfn => ActiveMatrix::Tfn(JudgmentMatrix::new(n)?),
            MatrixKind::Linguistic => ActiveMatrix::Linguistic(JudgmentMatrix::new(n)?),
        })
    }

    pub fn kind(&self) -> MatrixKind {
        match self {
            ActiveMatrix::Crisp(_) => MatrixKind::Crisp,
            ActiveMatrix::Tfn(_) => MatrixKind::Tfn,
            ActiveMatrix::Linguistic(_) => MatrixKind::Linguistic,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ActiveMatrix::Crisp(m) => m.len(),
            ActiveMatrix::Tfn(m) => m.len(),
            ActiveMatrix::Linguistic(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn resized(&self, n: usize) -> Result<Self, DomainError> {
        Ok(match self {
            ActiveMatrix::Crisp(m) => ActiveMatrix::Crisp(m.resized(n)?),
            ActiveMatrix::Tfn(m) => ActiveMatrix::Tfn(m.resized(n)?),
            ActiveMatrix::Linguistic(m) => ActiveMatrix::Linguistic(m.resized(n)?),
        })
    }
}

fn kind_mismatch(expected: MatrixKind, actual: MatrixKind) -> DomainError {
    DomainError::new(
        ErrorCode::InvalidFormat,
        format!(
            "Active matrix holds {:?} judgments, the editor sent a {:?} value",
            actual, expected
        ),
    )
}

/// One user session of the judgment wizard.
///
/// Exclusively owns the criterion list, the active judgment matrix, the BWM
/// selection, the applied weight results, and the alternative sub-flow.
/// Everything downstream of an edit is cleared when it goes stale.
#[derive(Debug, Clone)]
pub struct WizardSession {
    method: Method,
    kind: MatrixKind,
    variant: SolverVariant,
    upper_bound: usize,

    stage: Stage,
    criteria: Vec<String>,
    temp_criteria: Vec<String>,
    matrix: Option<ActiveMatrix>,
    reference: ReferenceSelection,
    weights: Option<WeightResponse>,

    alt_stage: Stage,
    alternatives: Vec<String>,
    alternative_matrices: Vec<JudgmentMatrix<Crisp>>,
}

impl WizardSession {
    /// Creates a session for the given method/kind/variant.
    pub fn new(method: Method, kind: MatrixKind, variant: SolverVariant) -> Self {
        Self::with_upper_bound(method, kind, variant, DEFAULT_UPPER_BOUND)
    }

    /// Creates a session with a flow-specific criterion-count bound.
    pub fn with_upper_bound(
        method: Method,
        kind: MatrixKind,
        variant: SolverVariant,
        upper_bound: usize,
    ) -> Self {
        Self {
            method,
            kind,
            variant,
            upper_bound: upper_bound.max(MIN_CRITERIA),
            stage: Stage::Number,
            criteria: Vec::new(),
            temp_criteria: Vec::new(),
            matrix: None,
            reference: ReferenceSelection::default(),
            weights: None,
            alt_stage: Stage::Number,
            alternatives: Vec::new(),
            alternative_matrices: Vec::new(),
        }
    }

    /// A crisp AHP session.
    pub fn ahp() -> Self {
        Self::new(Method::Ahp, MatrixKind::Crisp, SolverVariant::Linear)
    }

    /// A BWM session with the given solver variant.
    pub fn bwm(variant: SolverVariant) -> Self {
        let kind = match variant {
            SolverVariant::Fuzzy => MatrixKind::Linguistic,
            _ => MatrixKind::Crisp,
        };
        Self::new(Method::Bwm, kind, variant)
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn matrix_kind(&self) -> MatrixKind {
        self.kind
    }

    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    pub fn matrix(&self) -> Option<&ActiveMatrix> {
        self.matrix.as_ref()
    }

    pub fn reference(&self) -> &ReferenceSelection {
        &self.reference
    }

    pub fn weights(&self) -> Option<&WeightResponse> {
        self.weights.as_ref()
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn alternative_matrices(&self) -> &[JudgmentMatrix<Crisp>] {
        &self.alternative_matrices
    }

    // ---- criterion flow -------------------------------------------------

    /// Confirms a criterion count, clamped into `[2, upper_bound]`, and
    /// generates the default names.
    pub fn set_criterion_count(&mut self, count: usize) -> Result<(), DomainError> {
        self.stage = self.stage.transition_to(Stage::Text).map_err(DomainError::from)?;
        let count = count.clamp(MIN_CRITERIA, self.upper_bound);
        self.criteria = (0..count).map(|i| format!("Criterion {}", i + 1)).collect();
        Ok(())
    }

    /// Renames a criterion: the live list while naming, the temp buffer
    /// while editing.
    pub fn rename_criterion(&mut self, index: usize, name: impl Into<String>) -> Result<(), DomainError> {
        let list = match self.stage {
            Stage::Text => &mut self.criteria,
            Stage::Edit => &mut self.temp_criteria,
            _ => {
                return Err(DomainError::new(
                    ErrorCode::InvalidStateTransition,
                    "Criteria are only editable in the naming or edit stage",
                ))
            }
        };
        let len = list.len();
        let slot = list.get_mut(index).ok_or_else(|| {
            DomainError::new(
                ErrorCode::IndexOutOfBounds,
                format!("Criterion {} is outside the list of {}", index + 1, len),
            )
        })?;
        *slot = name.into();
        Ok(())
    }

    /// Confirms the named criteria and allocates the judgment matrix.
    pub fn confirm_criteria(&mut self) -> Result<(), DomainError> {
        self.stage = self.stage.transition_to(Stage::Ready).map_err(DomainError::from)?;
        self.matrix = Some(ActiveMatrix::new(self.kind, self.criteria.len())?);
        Ok(())
    }

    /// Opens the edit stage with a snapshot of the current criteria.
    pub fn begin_edit(&mut self) -> Result<(), DomainError> {
        self.stage = self.stage.transition_to(Stage::Edit).map_err(DomainError::from)?;
        self.temp_criteria = self.criteria.clone();
        Ok(())
    }

    /// Appends a criterion to the edit buffer, bounded by the flow's limit.
    pub fn add_criterion(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        self.require_stage(Stage::Edit)?;
        if self.temp_criteria.len() >= self.upper_bound {
            return Err(ValidationError::out_of_range(
                "criteria_count",
                MIN_CRITERIA as i32,
                self.upper_bound as i32,
                (self.temp_criteria.len() + 1) as i32,
            )
            .into());
        }
        self.temp_criteria.push(name.into());
        Ok(())
    }

    /// Removes a criterion from the edit buffer, never below the minimum.
    pub fn remove_criterion(&mut self, index: usize) -> Result<(), DomainError> {
        self.require_stage(Stage::Edit)?;
        if self.temp_criteria.len() <= MIN_CRITERIA {
            return Err(ValidationError::out_of_range(
                "criteria_count",
                MIN_CRITERIA as i32,
                self.upper_bound as i32,
                (self.temp_criteria.len() - 1) as i32,
            )
            .into());
        }
        if index >= self.temp_criteria.len() {
            return Err(DomainError::new(
                ErrorCode::IndexOutOfBounds,
                format!("Criterion {} is outside the edit buffer", index + 1),
            ));
        }
        self.temp_criteria.remove(index);
        Ok(())
    }

    /// Commits the edit buffer: criteria replaced, matrix resized with
    /// surviving judgments preserved, downstream results cleared.
    pub fn save_edit(&mut self) -> Result<(), DomainError> {
        self.stage = self.stage.transition_to(Stage::Ready).map_err(DomainError::from)?;
        self.criteria = std::mem::take(&mut self.temp_criteria);
        let n = self.criteria.len();
        self.matrix = Some(match self.matrix.take() {
            Some(m) => m.resized(n)?,
            None => ActiveMatrix::new(self.kind, n)?,
        });
        self.reference.clear();
        self.clear_downstream();
        Ok(())
    }

    /// Discards criteria, matrix, selections, and all results.
    pub fn reset(&mut self) {
        self.stage = Stage::Number;
        self.criteria.clear();
        self.temp_criteria.clear();
        self.matrix = None;
        self.reference.clear();
        self.clear_downstream();
    }

    /// Switches the active payload kind.
    ///
    /// Idempotent: a no-op when the kind is unchanged. Otherwise the matrix
    /// is reallocated with the new kind's identity element and every
    /// downstream result is cleared, so the cell kind always matches the
    /// selected variant.
    pub fn set_matrix_kind(&mut self, kind: MatrixKind) -> Result<(), DomainError> {
        if kind == self.kind {
            return Ok(());
        }
        self.kind = kind;
        if self.matrix.is_some() {
            self.matrix = Some(ActiveMatrix::new(kind, self.criteria.len())?);
            self.clear_downstream();
        }
        Ok(())
    }

    // ---- cell edits ------------------------------------------------------

    /// Quick-editor crisp write: the reciprocal lands at `(j, i)` in the
    /// same operation.
    pub fn set_crisp_cell(&mut self, i: usize, j: usize, value: f64) -> Result<(), DomainError> {
        match self.active_matrix_mut()? {
            ActiveMatrix::Crisp(m) => m.set(i, j, Crisp::try_new(value)?),
            other => return Err(kind_mismatch(MatrixKind::Crisp, other.kind())),
        }
    }

    /// Quick-editor label write: the reciprocal label lands at `(j, i)`.
    pub fn set_label_cell(&mut self, i: usize, j: usize, label: FuzzyLabel) -> Result<(), DomainError> {
        match self.active_matrix_mut()? {
            ActiveMatrix::Linguistic(m) => m.set(i, j, label),
            other => return Err(kind_mismatch(MatrixKind::Linguistic, other.kind())),
        }
    }

    /// Modal-editor TFN write: only `(i, j)` changes; the operator enters
    /// the paired cell separately and the import validator checks products.
    pub fn set_tfn_cell(&mut self, i: usize, j: usize, tfn: Tfn) -> Result<(), DomainError> {
        match self.active_matrix_mut()? {
            ActiveMatrix::Tfn(m) => m.set(i, j, tfn),
            other => return Err(kind_mismatch(MatrixKind::Tfn, other.kind())),
        }
    }

    /// Modal-editor TFN entry from raw text, decimal or `"p/q"` fraction
    /// per bound. Bad input is a recoverable error naming the bound.
    pub fn set_tfn_cell_from_input(
        &mut self,
        i: usize,
        j: usize,
        lower: &str,
        middle: &str,
        upper: &str,
    ) -> Result<(), DomainError> {
        let l = parse_ratio("lower", lower)?;
        let m = parse_ratio("middle", middle)?;
        let u = parse_ratio("upper", upper)?;
        self.set_tfn_cell(i, j, Tfn::try_new(l, m, u)?)
    }

    fn active_matrix_mut(&mut self) -> Result<&mut ActiveMatrix, DomainError> {
        self.matrix.as_mut().ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                "No judgment matrix yet; confirm the criteria first",
            )
        })
    }

    // ---- BWM reference selection ------------------------------------------

    /// Designates the best criterion (BWM only).
    pub fn set_best(&mut self, name: &str) -> Result<(), DomainError> {
        self.require_bwm()?;
        self.reference.set_best(&self.criteria, name)
    }

    /// Designates the worst criterion (BWM only); the current best is excluded.
    pub fn set_worst(&mut self, name: &str) -> Result<(), DomainError> {
        self.require_bwm()?;
        self.reference.set_worst(&self.criteria, name)
    }

    // ---- import ------------------------------------------------------------

    /// Runs the method-specific validator over parsed tabular input.
    pub fn validate_import(&self, criteria: &[String], values: &[Vec<f64>]) -> ValidationReport {
        match self.method {
            Method::Ahp => validate_ahp(criteria, values, DEFAULT_TOLERANCE),
            Method::Bwm => validate_bwm(criteria, values),
        }
    }

    /// Adopts an already-validated crisp import: criteria and matrix are
    /// replaced, downstream results cleared, stage set to ready.
    ///
    /// Callers surface [`WizardSession::validate_import`] errors first;
    /// this still rejects anything the container itself cannot hold.
    ///
    /// BWM sheets only fill the best row and the worst column: the other
    /// cells are inert placeholders (zero or blank). Those placeholders
    /// become identity cells, and the filled row/column designate the
    /// best and worst criteria, matching how the sheet was authored.
    pub fn adopt_import(
        &mut self,
        criteria: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> Result<(), DomainError> {
        if self.kind != MatrixKind::Crisp {
            return Err(DomainError::new(
                ErrorCode::InvalidFormat,
                "Tabular import is only supported for crisp matrices",
            ));
        }
        let report = self.validate_import(&criteria, &values);
        if !report.ok {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                report.errors.join(" "),
            ));
        }

        let (detected_best, detected_worst) = match self.method {
            Method::Bwm => detect_reference(&values),
            Method::Ahp => (None, None),
        };

        let n = values.len();
        let mut rows = Vec::with_capacity(n);
        for (i, row) in values.into_iter().enumerate() {
            let mut cells = Vec::with_capacity(n);
            for (j, v) in row.into_iter().enumerate() {
                let cell = if i == j {
                    Crisp::identity()
                } else if self.method == Method::Bwm {
                    // Only the best row and worst column carry judgments;
                    // placeholders elsewhere degrade to the identity.
                    let active = detected_best == Some(i) || detected_worst == Some(j);
                    match Crisp::try_new(v) {
                        Ok(c) => c,
                        Err(err) if active => return Err(err.into()),
                        Err(_) => Crisp::identity(),
                    }
                } else {
                    Crisp::try_new(v)?
                };
                cells.push(cell);
            }
            rows.push(cells);
        }
        self.matrix = Some(ActiveMatrix::Crisp(JudgmentMatrix::try_from_rows(rows)?));
        self.criteria = criteria;
        self.temp_criteria.clear();
        self.reference.clear();
        if let Some(b) = detected_best {
            let name = self.criteria[b].clone();
            self.reference.set_best(&self.criteria, &name)?;
        }
        if let Some(w) = detected_worst {
            if detected_best != Some(w) {
                let name = self.criteria[w].clone();
                self.reference.set_worst(&self.criteria, &name)?;
            }
        }
        self.clear_downstream();
        self.stage = Stage::Ready;
        Ok(())
    }

    // ---- solver payloads and results ---------------------------------------

    /// Builds the AHP endpoint payload from the current matrix.
    pub fn ahp_request(&self) -> Result<AhpRequest, DomainError> {
        self.require_calculable()?;
        let matrix = match self.matrix.as_ref().ok_or_else(no_matrix)? {
            ActiveMatrix::Crisp(m) => MatrixPayload::Crisp(m.to_values()),
            ActiveMatrix::Tfn(m) => MatrixPayload::Fuzzy(tfn_rows(m.rows())),
            ActiveMatrix::Linguistic(m) => MatrixPayload::Fuzzy(
                m.rows()
                    .into_iter()
                    .map(|row| row.into_iter().map(|l| l.to_tfn().bounds()).collect())
                    .collect(),
            ),
        };
        Ok(AhpRequest {
            variant: self.wire_variant(),
            n: self.criteria.len(),
            criteria: self.criteria.clone(),
            best_idx: None,
            worst_idx: None,
            matrix,
        })
    }

    /// Builds the BWM endpoint payload from the best row and worst column.
    pub fn bwm_request(&self) -> Result<BwmRequest, DomainError> {
        self.require_calculable()?;
        let (best_idx, worst_idx) = self.reference.require()?;
        let (best_row, worst_col) = match self.matrix.as_ref().ok_or_else(no_matrix)? {
            ActiveMatrix::Crisp(m) => (
                VectorPayload::Crisp(best_row(m, &self.reference)?.iter().map(Crisp::value).collect()),
                VectorPayload::Crisp(worst_column(m, &self.reference)?.iter().map(Crisp::value).collect()),
            ),
            ActiveMatrix::Tfn(m) => (
                VectorPayload::Fuzzy(best_row(m, &self.reference)?.iter().map(Tfn::bounds).collect()),
                VectorPayload::Fuzzy(worst_column(m, &self.reference)?.iter().map(Tfn::bounds).collect()),
            ),
            ActiveMatrix::Linguistic(m) => (
                VectorPayload::Fuzzy(
                    best_row(m, &self.reference)?.iter().map(|l| l.to_tfn().bounds()).collect(),
                ),
                VectorPayload::Fuzzy(
                    worst_column(m, &self.reference)?.iter().map(|l| l.to_tfn().bounds()).collect(),
                ),
            ),
        };
        Ok(BwmRequest {
            variant: self.wire_variant(),
            n: self.criteria.len(),
            criteria: self.criteria.clone(),
            best_idx,
            worst_idx,
            best_row,
            worst_col,
        })
    }

    /// Applies a full solver result set; previous results are replaced
    /// wholesale. Unlocks the alternative sub-flow.
    pub fn apply_weights(&mut self, response: WeightResponse) {
        self.weights = Some(response);
    }

    // ---- alternative sub-flow ----------------------------------------------

    /// Confirms an alternative count; requires criterion weights.
    pub fn set_alternative_count(&mut self, count: usize) -> Result<(), DomainError> {
        self.require_weights()?;
        self.alt_stage = self.alt_stage.transition_to(Stage::Text).map_err(DomainError::from)?;
        let count = count.clamp(MIN_CRITERIA, self.upper_bound);
        self.alternatives = (0..count).map(|i| format!("Option {}", i + 1)).collect();
        Ok(())
    }

    /// Renames an alternative while the sub-flow is in its naming stage.
    pub fn rename_alternative(&mut self, index: usize, name: impl Into<String>) -> Result<(), DomainError> {
        if self.alt_stage != Stage::Text {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Alternatives are only editable in the naming stage",
            ));
        }
        let len = self.alternatives.len();
        let slot = self.alternatives.get_mut(index).ok_or_else(|| {
            DomainError::new(
                ErrorCode::IndexOutOfBounds,
                format!("Alternative {} is outside the list of {}", index + 1, len),
            )
        })?;
        *slot = name.into();
        Ok(())
    }

    /// Allocates one per-criterion alternative matrix per criterion.
    pub fn confirm_alternatives(&mut self) -> Result<(), DomainError> {
        self.alt_stage = self.alt_stage.transition_to(Stage::Ready).map_err(DomainError::from)?;
        let m = self.alternatives.len();
        self.alternative_matrices = (0..self.criteria.len())
            .map(|_| JudgmentMatrix::new(m))
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    /// Reciprocity-free edit of alternative matrix `k` at `(i, j)`.
    pub fn set_alternative_cell(
        &mut self,
        k: usize,
        i: usize,
        j: usize,
        value: f64,
    ) -> Result<(), DomainError> {
        let count = self.alternative_matrices.len();
        let matrix = self.alternative_matrices.get_mut(k).ok_or_else(|| {
            DomainError::new(
                ErrorCode::IndexOutOfBounds,
                format!("Criterion {} has no alternative matrix (have {})", k + 1, count),
            )
        })?;
        matrix.set_decoupled(i, j, Crisp::try_new(value)?)
    }

    /// Runs the weighted-sum synthesis over the per-criterion matrices.
    pub fn synthesize(&self) -> Result<Vec<RankedAlternative>, DomainError> {
        let weights = self.require_weights()?;
        Synthesizer::synthesize(&self.criteria, &weights.crisp_weights, &self.alternative_matrices)
    }

    // ---- internals -----------------------------------------------------------

    fn wire_variant(&self) -> SolverVariant {
        match self.kind {
            MatrixKind::Crisp => self.variant,
            _ => SolverVariant::Fuzzy,
        }
    }

    fn clear_downstream(&mut self) {
        self.weights = None;
        self.alt_stage = Stage::Number;
        self.alternatives.clear();
        self.alternative_matrices.clear();
    }

    fn require_stage(&self, stage: Stage) -> Result<(), DomainError> {
        if self.stage != stage {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Operation requires the {:?} stage, currently {:?}", stage, self.stage),
            ));
        }
        Ok(())
    }

    fn require_bwm(&self) -> Result<(), DomainError> {
        if self.method != Method::Bwm {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Best/worst selection only applies to the BWM method",
            ));
        }
        Ok(())
    }

    fn require_weights(&self) -> Result<&WeightResponse, DomainError> {
        self.weights.as_ref().ok_or_else(|| {
            DomainError::new(
                ErrorCode::ResultsLocked,
                "Alternatives unlock once criterion weights have been calculated",
            )
        })
    }

    fn require_calculable(&self) -> Result<(), DomainError> {
        let named = self.criteria.iter().filter(|c| !c.trim().is_empty()).count();
        if named < MIN_CRITERIA {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Please enter at least two valid criteria",
            ));
        }
        Ok(())
    }
}

/// Finds the best/worst candidates in an imported BWM sheet: the first row
/// whose off-diagonal cells are all filled is the best criterion, the first
/// such column the worst. Zeros mark cells the sheet left unused.
fn detect_reference(values: &[Vec<f64>]) -> (Option<usize>, Option<usize>) {
    let n = values.len();
    let best = (0..n).find(|&i| (0..n).all(|j| i == j || values[i][j] != 0.0));
    let worst = (0..n).find(|&j| (0..n).all(|i| i == j || values[i][j] != 0.0));
    (best, worst)
}

fn tfn_rows(rows: Vec<Vec<Tfn>>) -> Vec<Vec<[f64; 3]>> {
    rows.into_iter()
        .map(|row| row.into_iter().map(|t| t.bounds()).collect())
        .collect()
}

fn no_matrix() -> DomainError {
    DomainError::new(
        ErrorCode::InvalidStateTransition,
        "No judgment matrix yet; confirm the criteria first",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_ahp(n: usize) -> WizardSession {
        let mut s = WizardSession::ahp();
        s.set_criterion_count(n).unwrap();
        s.confirm_criteria().unwrap();
        s
    }

    fn response(weights: Vec<f64>) -> WeightResponse {
        WeightResponse {
            crisp_weights: weights,
            lower_weights: None,
            upper_weights: None,
            sorted_criteria: None,
            lambda_max: Some(3.01),
            ci: 0.005,
            cr: 0.009,
            inconsistency_ratios: None,
        }
    }

    #[test]
    fn count_is_clamped_at_both_bounds() {
        let mut s = WizardSession::ahp();
        s.set_criterion_count(1).unwrap();
        assert_eq!(s.criteria().len(), 2);

        let mut s = WizardSession::ahp();
        s.set_criterion_count(DEFAULT_UPPER_BOUND + 5).unwrap();
        assert_eq!(s.criteria().len(), DEFAULT_UPPER_BOUND);
    }

    #[test]
    fn default_names_follow_position() {
        let mut s = WizardSession::ahp();
        s.set_criterion_count(3).unwrap();
        assert_eq!(s.criteria(), ["Criterion 1", "Criterion 2", "Criterion 3"]);
    }

    #[test]
    fn confirm_allocates_identity_matrix() {
        let s = ready_ahp(3);
        assert_eq!(s.stage(), Stage::Ready);
        match s.matrix().unwrap() {
            ActiveMatrix::Crisp(m) => {
                assert_eq!(m.len(), 3);
                assert_eq!(m.get(0, 1).unwrap().value(), 1.0);
            }
            other => panic!("expected crisp matrix, got {:?}", other.kind()),
        }
    }

    #[test]
    fn quick_editor_keeps_reciprocity_through_the_session() {
        let mut s = ready_ahp(3);
        s.set_crisp_cell(0, 2, 5.0).unwrap();
        match s.matrix().unwrap() {
            ActiveMatrix::Crisp(m) => {
                assert_eq!(m.get(2, 0).unwrap().value(), 0.2);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn cell_editor_of_the_wrong_kind_is_rejected() {
        let mut s = ready_ahp(2);
        let err = s.set_label_cell(0, 1, FuzzyLabel::FMI).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn save_edit_resizes_and_preserves_judgments() {
        let mut s = ready_ahp(2);
        s.set_crisp_cell(0, 1, 3.0).unwrap();
        s.apply_weights(response(vec![0.75, 0.25]));

        s.begin_edit().unwrap();
        s.add_criterion("Durability").unwrap();
        s.save_edit().unwrap();

        assert_eq!(s.criteria().len(), 3);
        assert!(s.weights().is_none(), "stale results must be cleared");
        match s.matrix().unwrap() {
            ActiveMatrix::Crisp(m) => {
                assert_eq!(m.get(0, 1).unwrap().value(), 3.0);
                assert_eq!(m.get(0, 2).unwrap().value(), 1.0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn remove_criterion_respects_the_minimum() {
        let mut s = ready_ahp(2);
        s.begin_edit().unwrap();
        assert!(s.remove_criterion(0).is_err());
    }

    #[test]
    fn add_criterion_respects_the_upper_bound() {
        let mut s = ready_ahp(DEFAULT_UPPER_BOUND);
        s.begin_edit().unwrap();
        assert!(s.add_criterion("One too many").is_err());
    }

    #[test]
    fn reset_returns_to_the_initial_stage() {
        let mut s = ready_ahp(3);
        s.set_crisp_cell(0, 1, 7.0).unwrap();
        s.apply_weights(response(vec![0.5, 0.3, 0.2]));
        s.reset();
        assert_eq!(s.stage(), Stage::Number);
        assert!(s.matrix().is_none());
        assert!(s.criteria().is_empty());
        assert!(s.weights().is_none());
    }

    #[test]
    fn kind_switch_reallocates_and_is_idempotent() {
        let mut s = ready_ahp(3);
        s.set_crisp_cell(0, 1, 3.0).unwrap();
        s.apply_weights(response(vec![0.5, 0.3, 0.2]));

        s.set_matrix_kind(MatrixKind::Linguistic).unwrap();
        assert_eq!(s.matrix().unwrap().kind(), MatrixKind::Linguistic);
        assert!(s.weights().is_none());
        match s.matrix().unwrap() {
            ActiveMatrix::Linguistic(m) => assert_eq!(m.get(0, 1), Some(&FuzzyLabel::EI)),
            _ => unreachable!(),
        }

        // A second switch to the same kind changes nothing.
        let before = s.matrix().unwrap().clone();
        s.set_matrix_kind(MatrixKind::Linguistic).unwrap();
        assert_eq!(s.matrix().unwrap(), &before);
    }

    #[test]
    fn tfn_entry_reports_the_offending_bound() {
        let mut s = WizardSession::new(Method::Ahp, MatrixKind::Tfn, SolverVariant::Fuzzy);
        s.set_criterion_count(2).unwrap();
        s.confirm_criteria().unwrap();

        let err = s.set_tfn_cell_from_input(0, 1, "1/2", "oops", "2").unwrap_err();
        assert!(err.message.contains("middle"));

        s.set_tfn_cell_from_input(0, 1, "1/2", "1", "3/2").unwrap();
        match s.matrix().unwrap() {
            ActiveMatrix::Tfn(m) => {
                assert_eq!(m.get(0, 1).unwrap().bounds(), [0.5, 1.0, 1.5]);
                // Decoupled: pair untouched until the operator sets it.
                assert_eq!(m.get(1, 0), Some(&Tfn::IDENTITY));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn bwm_selection_is_rejected_for_ahp_sessions() {
        let mut s = ready_ahp(2);
        assert!(s.set_best("Criterion 1").is_err());
    }

    #[test]
    fn bwm_request_carries_best_row_and_worst_column() {
        let mut s = WizardSession::bwm(SolverVariant::Linear);
        s.set_criterion_count(3).unwrap();
        s.rename_criterion(0, "Cost").unwrap();
        s.rename_criterion(1, "Quality").unwrap();
        s.rename_criterion(2, "Speed").unwrap();
        s.confirm_criteria().unwrap();
        s.set_best("Cost").unwrap();
        s.set_worst("Speed").unwrap();
        s.set_crisp_cell(0, 1, 3.0).unwrap();
        s.set_crisp_cell(0, 2, 9.0).unwrap();
        s.set_crisp_cell(1, 2, 4.0).unwrap();

        let req = s.bwm_request().unwrap();
        assert_eq!((req.best_idx, req.worst_idx), (0, 2));
        assert_eq!(req.best_row, VectorPayload::Crisp(vec![1.0, 3.0, 9.0]));
        assert_eq!(req.worst_col, VectorPayload::Crisp(vec![9.0, 4.0, 1.0]));
    }

    #[test]
    fn bwm_request_without_selection_is_rejected() {
        let mut s = WizardSession::bwm(SolverVariant::Linear);
        s.set_criterion_count(3).unwrap();
        s.confirm_criteria().unwrap();
        let err = s.bwm_request().unwrap_err();
        assert_eq!(err.code, ErrorCode::BestWorstRequired);
    }

    #[test]
    fn linguistic_request_uses_the_fuzzy_wire_variant() {
        let mut s = WizardSession::new(Method::Ahp, MatrixKind::Linguistic, SolverVariant::Linear);
        s.set_criterion_count(2).unwrap();
        s.confirm_criteria().unwrap();
        s.set_label_cell(0, 1, FuzzyLabel::FMI).unwrap();

        let req = s.ahp_request().unwrap();
        assert_eq!(req.variant, SolverVariant::Fuzzy);
        match req.matrix {
            MatrixPayload::Fuzzy(rows) => {
                assert_eq!(rows[0][1], [1.5, 2.0, 2.5]);
                assert_eq!(rows[1][0], [0.4, 0.5, 2.0 / 3.0]);
            }
            _ => panic!("expected fuzzy payload"),
        }
    }

    #[test]
    fn import_replaces_state_and_clears_results() {
        let mut s = ready_ahp(2);
        s.apply_weights(response(vec![0.5, 0.5]));

        let criteria = vec!["Cost".to_string(), "Quality".to_string(), "Speed".to_string()];
        let values = vec![
            vec![1.0, 3.0, 0.5],
            vec![1.0 / 3.0, 1.0, 2.0],
            vec![2.0, 0.5, 1.0],
        ];
        s.adopt_import(criteria, values).unwrap();
        assert_eq!(s.criteria().len(), 3);
        assert_eq!(s.stage(), Stage::Ready);
        assert!(s.weights().is_none());
    }

    #[test]
    fn bwm_import_accepts_zero_placeholder_cells() {
        let mut s = WizardSession::bwm(SolverVariant::Linear);

        // Best row 0 and worst column 2 are filled; everything else is the
        // zero the sheet leaves in unused cells.
        let criteria = vec!["Cost".to_string(), "Quality".to_string(), "Speed".to_string()];
        let values = vec![
            vec![1.0, 3.0, 9.0],
            vec![0.0, 1.0, 4.0],
            vec![0.0, 0.0, 1.0],
        ];

        let report = s.validate_import(&criteria, &values);
        assert!(report.ok, "unexpected errors: {:?}", report.errors);
        s.adopt_import(criteria, values).unwrap();

        assert_eq!(s.stage(), Stage::Ready);
        match s.matrix().unwrap() {
            ActiveMatrix::Crisp(m) => {
                assert_eq!(m.get(0, 1).unwrap().value(), 3.0);
                assert_eq!(m.get(1, 2).unwrap().value(), 4.0);
                // Placeholder degraded to the identity, not rejected.
                assert_eq!(m.get(1, 0), Some(&Crisp::identity()));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn bwm_import_detects_best_and_worst_from_the_fill_pattern() {
        let mut s = WizardSession::bwm(SolverVariant::Linear);

        let criteria = vec!["Cost".to_string(), "Quality".to_string(), "Speed".to_string()];
        let values = vec![
            vec![1.0, 0.0, 2.0],
            vec![3.0, 1.0, 9.0],
            vec![0.0, 0.0, 1.0],
        ];
        s.adopt_import(criteria, values).unwrap();

        // Row 1 is the only fully filled row, column 2 the only column.
        assert_eq!(s.reference().best(), Some(1));
        assert_eq!(s.reference().worst(), Some(2));
        assert!(s.bwm_request().is_ok());
    }

    #[test]
    fn bwm_import_without_a_fill_pattern_leaves_the_selection_empty() {
        let mut s = WizardSession::bwm(SolverVariant::Linear);

        let criteria = vec!["A".to_string(), "B".to_string()];
        let values = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        s.adopt_import(criteria, values).unwrap();

        assert_eq!(s.reference().best(), None);
        assert_eq!(s.reference().worst(), None);
    }

    #[test]
    fn bwm_import_rejects_garbage_in_the_active_row() {
        let mut s = WizardSession::bwm(SolverVariant::Linear);

        // Row 0 is the detected best row but holds a negative judgment.
        let criteria = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let values = vec![
            vec![1.0, -3.0, 2.0],
            vec![0.0, 1.0, 4.0],
            vec![0.0, 0.0, 1.0],
        ];
        assert!(s.adopt_import(criteria, values).is_err());
    }

    #[test]
    fn invalid_import_leaves_the_session_untouched() {
        let mut s = ready_ahp(2);
        s.set_crisp_cell(0, 1, 3.0).unwrap();

        let bad = vec![vec![1.0, 4.0], vec![0.5, 1.0]]; // product 2.0
        let err = s
            .adopt_import(vec!["A".to_string(), "B".to_string()], bad)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        match s.matrix().unwrap() {
            ActiveMatrix::Crisp(m) => assert_eq!(m.get(0, 1).unwrap().value(), 3.0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn alternatives_unlock_only_after_weights() {
        let mut s = ready_ahp(2);
        assert_eq!(s.set_alternative_count(2).unwrap_err().code, ErrorCode::ResultsLocked);

        s.apply_weights(response(vec![0.6, 0.4]));
        s.set_alternative_count(2).unwrap();
        assert_eq!(s.alternatives(), ["Option 1", "Option 2"]);
    }

    #[test]
    fn full_alternative_flow_ranks_deterministically() {
        let mut s = ready_ahp(2);
        s.apply_weights(response(vec![0.6, 0.4]));
        s.set_alternative_count(2).unwrap();
        s.rename_alternative(0, "Plan A").unwrap();
        s.rename_alternative(1, "Plan B").unwrap();
        s.confirm_alternatives().unwrap();
        assert_eq!(s.alternative_matrices().len(), 2);

        // Criterion 1: rows sum to 3 and 1; criterion 2: equal rows.
        s.set_alternative_cell(0, 0, 1, 2.0).unwrap();
        s.set_alternative_cell(0, 1, 0, 1e-9).unwrap();

        let ranked = s.synthesize().unwrap();
        assert_eq!(ranked[0].index, 0);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn alternative_edits_are_reciprocity_free() {
        let mut s = ready_ahp(2);
        s.apply_weights(response(vec![0.6, 0.4]));
        s.set_alternative_count(2).unwrap();
        s.confirm_alternatives().unwrap();

        s.set_alternative_cell(0, 0, 1, 4.0).unwrap();
        let m = &s.alternative_matrices()[0];
        assert_eq!(m.get(0, 1).unwrap().value(), 4.0);
        assert_eq!(m.get(1, 0).unwrap().value(), 1.0);
    }

    #[test]
    fn stage_machine_rejects_skipping_ahead() {
        let mut s = WizardSession::ahp();
        assert!(s.confirm_criteria().is_err());
        assert!(s.begin_edit().is_err());
    }
}
