//! Serializing a finished canvas into PNG, JPEG or WebP.

/// Output formats and the encoder.
pub mod format;
