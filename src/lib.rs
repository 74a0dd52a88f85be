//! Tradeoff Engine - Pairwise-Comparison Decision Support
//!
//! This crate implements the judgment-matrix core of an AHP/BWM decision
//! tool: fuzzy judgment encoding, reciprocal matrix editing, matrix import
//! and validation, weight calculation through an external solver service,
//! and alternative synthesis into a final ranking.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
