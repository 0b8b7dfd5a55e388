//! Pixel-level operations shared by the render backends.

/// Source-over compositing.
pub mod composite;
/// Resizing and rotation.
pub mod transform;
