//! Foundation module - Shared domain primitives.
//!
//! Contains the error taxonomy and the state machine trait that form
//! the vocabulary of the judgment matrix engine.

mod errors;
mod state_machine;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use state_machine::StateMachine;
