//! Inputs that come from outside a render: colors, encoded images and fonts.

/// Color parsing.
pub mod color;
/// Encoded image decoding.
pub mod decode;
/// Font database.
pub mod fonts;
