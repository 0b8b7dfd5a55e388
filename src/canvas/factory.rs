use crate::assets::decode::decode_image;
use crate::canvas::buffer::PixelBuffer;
use crate::config::ResampleFilter;
use crate::effects::transform::resize_fill;
use crate::foundation::error::PicEditResult;
use crate::scene::model::{Background, CanvasSpec};

/// Creates the initial canvas of a render.
#[derive(Clone, Copy, Debug, Default)]
pub struct CanvasFactory {
    filter: ResampleFilter,
}

impl CanvasFactory {
    /// Factory resizing background images with `filter`.
    pub fn new(filter: ResampleFilter) -> Self {
        Self { filter }
    }

    /// Create a `width x height` canvas from `spec`.
    ///
    /// Dimensions are checked before anything is allocated or decoded. Background images are
    /// stretched to fill the canvas exactly; aspect ratio is not preserved.
    pub fn create(&self, spec: &CanvasSpec) -> PicEditResult<PixelBuffer> {
        spec.validate()?;
        let dims = spec.dimensions();
        match &spec.background {
            Background::Color(color) => PixelBuffer::filled(dims, color.to_premul_rgba8()),
            Background::Image(bytes) => {
                let img = decode_image(bytes)?;
                tracing::debug!(
                    src_w = img.width(),
                    src_h = img.height(),
                    dst_w = dims.width,
                    dst_h = dims.height,
                    "stretching background image"
                );
                let fitted = resize_fill(&img, dims.width, dims.height, self.filter);
                Ok(PixelBuffer::from_straight(fitted))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/factory.rs"]
mod tests;
