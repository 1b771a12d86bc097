//! Reusable helpers for running pipeline stages
//!
//! - `stage`: stage execution with automatic event and console logging

pub mod stage;

pub use stage::{execute_stage, stage_banner};
