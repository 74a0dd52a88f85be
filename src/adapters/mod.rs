//! Adapters - infrastructure implementations of the ports.

pub mod export;
pub mod import;
pub mod solver;
