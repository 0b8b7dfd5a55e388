//! The working pixel buffer and its construction.

/// Premultiplied RGBA8 pixel buffer.
pub mod buffer;
/// Initial canvas creation.
pub mod factory;
