//! Declarative render input.

/// JSON job documents.
pub mod job;
/// Canvas spec and drawing operations.
pub mod model;
