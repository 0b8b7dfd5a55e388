//! Applying operations to a canvas.
//!
//! Text and image drawing sit behind the [`text::TextRenderer`] and [`image::ImageOverlay`]
//! traits; [`compositor::Compositor`] runs an ordered operation list through them.

/// Operation sequencing and batch rendering.
pub mod compositor;
/// Image overlays.
pub mod image;
/// Text rendering.
pub mod text;
