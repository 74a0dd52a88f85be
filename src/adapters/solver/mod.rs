//! WeightSolver adapters.

pub mod http;
pub mod mock;

pub use http::HttpWeightSolver;
pub use mock::MockSolver;
