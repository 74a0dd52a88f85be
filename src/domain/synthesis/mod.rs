//! Alternative synthesis: local weights per criterion, weighted composite
//! scores, and a deterministic ranking.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::matrix::{Crisp, JudgmentMatrix};

/// Scores within this distance of each other count as tied and fall back
/// to original input order.
pub const TIE_EPSILON: f64 = 1e-9;

/// One alternative's composite outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    /// Original input position of the alternative.
    pub index: usize,
    /// Weighted composite score.
    pub score: f64,
    /// 1-based position in the descending-score order.
    pub rank: usize,
}

/// Weighted-sum synthesis over per-criterion alternative matrices.
pub struct Synthesizer;

impl Synthesizer {
    /// Normalized row-sum weights of one per-criterion alternative matrix.
    ///
    /// `criterion` names the matrix in errors. A zero or non-finite grand
    /// total fails the computation instead of propagating NaN/Infinity.
    pub fn local_weights(
        criterion: &str,
        matrix: &JudgmentMatrix<Crisp>,
    ) -> Result<Vec<f64>, DomainError> {
        let rows = matrix.to_values();
        let row_sums: Vec<f64> = rows.iter().map(|row| row.iter().sum()).collect();
        let total: f64 = row_sums.iter().sum();

        if !total.is_finite() || total <= 0.0 {
            return Err(DomainError::new(
                ErrorCode::DegenerateRowSums,
                format!(
                    "Alternative matrix for criterion '{}' has a degenerate row-sum total ({})",
                    criterion, total
                ),
            ));
        }

        Ok(row_sums.into_iter().map(|s| s / total).collect())
    }

    /// Composite score per alternative: `score[a] = Σ_k w[k] * local_k[a]`.
    ///
    /// Every local weight vector must cover the same alternative count.
    pub fn composite_scores(
        weights: &[f64],
        locals: &[Vec<f64>],
    ) -> Result<Vec<f64>, DomainError> {
        if weights.len() != locals.len() {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!(
                    "Got {} criterion weights but {} local weight vectors",
                    weights.len(),
                    locals.len()
                ),
            ));
        }
        let m = locals.first().map(Vec::len).unwrap_or(0);
        if m == 0 || locals.iter().any(|l| l.len() != m) {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Local weight vectors must all cover the same non-empty alternative list",
            ));
        }

        let mut scores = vec![0.0; m];
        for (w, local) in weights.iter().zip(locals) {
            for (score, lw) in scores.iter_mut().zip(local) {
                *score += w * lw;
            }
        }
        Ok(scores)
    }

    /// Ranks alternatives by score descending.
    ///
    /// Scores within [`TIE_EPSILON`] are tied and keep original input order,
    /// so the ranking is deterministic for equal judgments.
    pub fn rank(scores: &[f64]) -> Vec<RankedAlternative> {
        // Quantizing into epsilon-wide buckets keeps the comparison a
        // proper total order even across chains of near-ties.
        let bucket = |i: usize| (scores[i] / TIE_EPSILON).round();
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| {
            bucket(b)
                .partial_cmp(&bucket(a))
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });

        order
            .into_iter()
            .enumerate()
            .map(|(pos, index)| RankedAlternative {
                index,
                score: scores[index],
                rank: pos + 1,
            })
            .collect()
    }

    /// Full pipeline: local weights for every criterion matrix, composite
    /// scores against the global weights, then the deterministic ranking.
    pub fn synthesize(
        criteria: &[String],
        weights: &[f64],
        matrices: &[JudgmentMatrix<Crisp>],
    ) -> Result<Vec<RankedAlternative>, DomainError> {
        if criteria.len() != matrices.len() {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!(
                    "Expected one alternative matrix per criterion ({}), got {}",
                    criteria.len(),
                    matrices.len()
                ),
            ));
        }
        let locals = criteria
            .iter()
            .zip(matrices)
            .map(|(name, matrix)| Self::local_weights(name, matrix))
            .collect::<Result<Vec<_>, _>>()?;
        let scores = Self::composite_scores(weights, &locals)?;
        Ok(Self::rank(&scores))
    }
}
