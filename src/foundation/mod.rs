//! Shared primitives: geometry, pixel math and the error taxonomy.

/// Positions, dimensions and angle helpers.
pub mod core;
/// Error type used across the crate.
pub mod error;
pub(crate) mod math;
