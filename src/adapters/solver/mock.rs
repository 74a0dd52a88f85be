//! Scripted WeightSolver for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::ports::{AhpRequest, BwmRequest, SolverError, WeightResponse, WeightSolver};

/// WeightSolver double that replays a fixed outcome and counts calls.
pub struct MockSolver {
    outcome: Result<WeightResponse, SolverError>,
    ahp_calls: AtomicUsize,
    bwm_calls: AtomicUsize,
}

impl MockSolver {
    /// Every call succeeds with the given response.
    pub fn returning(response: WeightResponse) -> Self {
        Self {
            outcome: Ok(response),
            ahp_calls: AtomicUsize::new(0),
            bwm_calls: AtomicUsize::new(0),
        }
    }

    /// Every call fails with the given error.
    pub fn failing(error: SolverError) -> Self {
        Self {
            outcome: Err(error),
            ahp_calls: AtomicUsize::new(0),
            bwm_calls: AtomicUsize::new(0),
        }
    }

    pub fn ahp_calls(&self) -> usize {
        self.ahp_calls.load(Ordering::SeqCst)
    }

    pub fn bwm_calls(&self) -> usize {
        self.bwm_calls.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.ahp_calls() + self.bwm_calls()
    }
}

#[async_trait]
impl WeightSolver for MockSolver {
    async fn solve_ahp(&self, _request: AhpRequest) -> Result<WeightResponse, SolverError> {
        self.ahp_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    async fn solve_bwm(&self, _request: BwmRequest) -> Result<WeightResponse, SolverError> {
        self.bwm_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
