//! Ports - Boundary interfaces for external collaborators.

mod weight_solver;

pub use weight_solver::{
    AhpRequest, BwmRequest, MatrixPayload, SolverError, SolverVariant, VectorPayload,
    WeightResponse, WeightSolver,
};
