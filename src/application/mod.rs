//! Application layer: wizard session ownership and command handlers.

pub mod handlers;
pub mod wizard;

pub use handlers::{CalculateError, CalculateWeightsHandler};
pub use wizard::{ActiveMatrix, MatrixKind, Method, Stage, WizardSession, DEFAULT_UPPER_BOUND};
