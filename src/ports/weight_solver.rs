//! Weight Solver Port - Interface to the external weight-derivation service.
//!
//! The engine never computes weights itself: AHP eigenvector/λmax and the
//! BWM optimization run in a remote service reached over HTTP. This port
//! carries the request payloads the service expects and the structured
//! response the session applies atomically.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Solver variant tag the service dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverVariant {
    Linear,
    Nonlinear,
    Fuzzy,
}

/// Full-matrix payload: crisp ratios or TFN triples, depending on variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatrixPayload {
    Crisp(Vec<Vec<f64>>),
    Fuzzy(Vec<Vec<[f64; 3]>>),
}

/// Single row/column payload for the BWM reference vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VectorPayload {
    Crisp(Vec<f64>),
    Fuzzy(Vec<[f64; 3]>),
}

/// Request body for the AHP endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AhpRequest {
    pub variant: SolverVariant,
    pub n: usize,
    pub criteria: Vec<String>,
    /// Always `null` for AHP; present so both endpoints share one schema.
    #[serde(rename = "bestIdx")]
    pub best_idx: Option<usize>,
    #[serde(rename = "worstIdx")]
    pub worst_idx: Option<usize>,
    pub matrix: MatrixPayload,
}

/// Request body for the BWM endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BwmRequest {
    pub variant: SolverVariant,
    pub n: usize,
    pub criteria: Vec<String>,
    #[serde(rename = "bestIdx")]
    pub best_idx: usize,
    #[serde(rename = "worstIdx")]
    pub worst_idx: usize,
    #[serde(rename = "bestRow")]
    pub best_row: VectorPayload,
    #[serde(rename = "worstCol")]
    pub worst_col: VectorPayload,
}

/// Structured solver response, shared by both endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightResponse {
    pub crisp_weights: Vec<f64>,
    #[serde(default)]
    pub lower_weights: Option<Vec<f64>>,
    #[serde(default)]
    pub upper_weights: Option<Vec<f64>>,
    #[serde(default)]
    pub sorted_criteria: Option<Vec<String>>,
    #[serde(rename = "lambdaMax", default)]
    pub lambda_max: Option<f64>,
    pub ci: f64,
    pub cr: f64,
    #[serde(default)]
    pub inconsistency_ratios: Option<Vec<Vec<f64>>>,
}

/// Failures crossing the solver boundary.
///
/// All are terminal for the triggering Calculate action; the engine never
/// retries, so one Calculate maps to at most one request.
#[derive(Debug, Clone, Error)]
pub enum SolverError {
    #[error("Solver request failed: {0}")]
    Network(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Malformed solver response: {0}")]
    MalformedResponse(String),
}

/// Port for the external weight-derivation service.
#[async_trait]
pub trait WeightSolver: Send + Sync {
    /// Derives criterion weights from a full pairwise matrix.
    async fn solve_ahp(&self, request: AhpRequest) -> Result<WeightResponse, SolverError>;

    /// Derives criterion weights from the best row / worst column vectors.
    async fn solve_bwm(&self, request: BwmRequest) -> Result<WeightResponse, SolverError>;
}
