//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`deadline`] - Timeouts for store-bound operations

pub mod code_generator;
pub mod deadline;
