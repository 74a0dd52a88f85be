//! CalculateWeightsHandler - sends the session's judgments to the external
//! solver and applies the result set atomically.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::wizard::{Method, WizardSession};
use crate::domain::foundation::DomainError;
use crate::ports::{SolverError, WeightResponse, WeightSolver};

/// Error type for a Calculate action.
#[derive(Debug, Clone)]
pub enum CalculateError {
    /// The session is not ready to calculate (missing criteria, selection).
    Session(DomainError),
    /// The solver call failed; no results were applied.
    Solver(SolverError),
}

impl std::fmt::Display for CalculateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculateError::Session(err) => write!(f, "{}", err),
            CalculateError::Solver(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CalculateError {}

impl From<DomainError> for CalculateError {
    fn from(err: DomainError) -> Self {
        CalculateError::Session(err)
    }
}

impl From<SolverError> for CalculateError {
    fn from(err: SolverError) -> Self {
        CalculateError::Solver(err)
    }
}

/// Handler for the Calculate action.
///
/// One in-flight request per call; no retry, no de-duplication. Results
/// are applied all-or-nothing: a failed call leaves the session exactly
/// as it was.
pub struct CalculateWeightsHandler {
    solver: Arc<dyn WeightSolver>,
}

impl CalculateWeightsHandler {
    pub fn new(solver: Arc<dyn WeightSolver>) -> Self {
        Self { solver }
    }

    pub async fn handle(
        &self,
        session: &mut WizardSession,
    ) -> Result<WeightResponse, CalculateError> {
        let response = match session.method() {
            Method::Ahp => {
                let request = session.ahp_request()?;
                debug!(n = request.n, variant = ?request.variant, "Requesting AHP weights");
                self.solver.solve_ahp(request).await
            }
            Method::Bwm => {
                let request = session.bwm_request()?;
                debug!(
                    n = request.n,
                    best = request.best_idx,
                    worst = request.worst_idx,
                    variant = ?request.variant,
                    "Requesting BWM weights"
                );
                self.solver.solve_bwm(request).await
            }
        };

        let response = response.map_err(|err| {
            warn!("Weight calculation failed: {}", err);
            err
        })?;

        session.apply_weights(response.clone());
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::solver::MockSolver;
    use crate::ports::SolverVariant;

    fn ready_session() -> WizardSession {
        let mut s = WizardSession::ahp();
        s.set_criterion_count(2).unwrap();
        s.confirm_criteria().unwrap();
        s.set_crisp_cell(0, 1, 3.0).unwrap();
        s
    }

    fn response() -> WeightResponse {
        WeightResponse {
            crisp_weights: vec![0.75, 0.25],
            lower_weights: None,
            upper_weights: None,
            sorted_criteria: None,
            lambda_max: Some(2.0),
            ci: 0.0,
            cr: 0.0,
            inconsistency_ratios: None,
        }
    }

    #[tokio::test]
    async fn applies_the_full_result_set_on_success() {
        let solver = Arc::new(MockSolver::returning(response()));
        let handler = CalculateWeightsHandler::new(solver.clone());

        let mut session = ready_session();
        let result = handler.handle(&mut session).await.unwrap();
        assert_eq!(result.crisp_weights, vec![0.75, 0.25]);
        assert_eq!(session.weights().unwrap().crisp_weights, vec![0.75, 0.25]);
        assert_eq!(solver.calls(), 1);
    }

    #[tokio::test]
    async fn failed_calls_apply_nothing() {
        let solver = Arc::new(MockSolver::failing(SolverError::Api {
            status: 422,
            message: "Matrix is inconsistent".to_string(),
        }));
        let handler = CalculateWeightsHandler::new(solver);

        let mut session = ready_session();
        let err = handler.handle(&mut session).await.unwrap_err();
        assert!(matches!(err, CalculateError::Solver(SolverError::Api { status: 422, .. })));
        assert!(session.weights().is_none());
    }

    #[tokio::test]
    async fn bwm_sessions_route_to_the_bwm_endpoint() {
        let solver = Arc::new(MockSolver::returning(response()));
        let handler = CalculateWeightsHandler::new(solver.clone());

        let mut session = WizardSession::bwm(SolverVariant::Linear);
        session.set_criterion_count(2).unwrap();
        session.confirm_criteria().unwrap();
        session.set_best("Criterion 1").unwrap();
        session.set_worst("Criterion 2").unwrap();

        handler.handle(&mut session).await.unwrap();
        assert_eq!(solver.bwm_calls(), 1);
        assert_eq!(solver.ahp_calls(), 0);
    }

    #[tokio::test]
    async fn unready_sessions_never_reach_the_solver() {
        let solver = Arc::new(MockSolver::returning(response()));
        let handler = CalculateWeightsHandler::new(solver.clone());

        let mut session = WizardSession::bwm(SolverVariant::Linear);
        session.set_criterion_count(2).unwrap();
        session.confirm_criteria().unwrap();
        // Best/worst never selected.

        let err = handler.handle(&mut session).await.unwrap_err();
        assert!(matches!(err, CalculateError::Session(_)));
        assert_eq!(solver.calls(), 0);
    }
}
