//! picedit composites text and images onto a canvas and encodes the result.
//!
//! A render is a pure function of its input:
//!
//! - Describe the starting canvas with a [`CanvasSpec`]
//! - List [`Operation`]s (text stamps and image overlays) in drawing order
//! - Run them through a [`Compositor`] and get a [`PixelBuffer`] or an [`EncodedImage`]
//!
//! Colors are parsed with [`Color::parse`]. Loosely typed JSON jobs go through [`JobDocument`].
//! Everything process-wide (fonts, resampling, worker threads) is set once in [`EngineConfig`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Colors, image decoding and fonts.
pub mod assets;
/// Pixel buffer and canvas factory.
pub mod canvas;
/// Engine configuration.
pub mod config;
/// Compositing and geometric transforms.
pub mod effects;
/// Output encoding.
pub mod encode;
/// Errors and geometry primitives.
pub mod foundation;
/// Backends and the compositor.
pub mod render;
/// Canvas spec, operations and job documents.
pub mod scene;

pub use crate::assets::color::Color;
pub use crate::assets::decode::decode_image;
pub use crate::assets::fonts::FontBook;
pub use crate::canvas::buffer::PixelBuffer;
pub use crate::canvas::factory::CanvasFactory;
pub use crate::config::{EngineConfig, FontConfig, ResampleFilter, TextBackendKind};
pub use crate::encode::format::{
    DEFAULT_QUALITY, EncodedImage, FormatEncoder, OutputFormat, OutputOptions,
};
pub use crate::foundation::core::{Dimensions, Position};
pub use crate::foundation::error::{PicEditError, PicEditResult};
pub use crate::render::compositor::{Compositor, RenderJob};
pub use crate::render::image::{ImageOverlay, RasterImageOverlay};
pub use crate::render::text::{SvgTextRenderer, TextRenderer, create_text_renderer};
pub use crate::scene::job::{
    CanvasDoc, ImageDoc, JobDocument, OperationDoc, OutputDoc, SourceResolver, TextDoc,
};
pub use crate::scene::model::{Background, CanvasSpec, ImageOp, Operation, TextAlign, TextOp};
