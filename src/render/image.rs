use crate::assets::decode::decode_image;
use crate::canvas::buffer::PixelBuffer;
use crate::config::ResampleFilter;
use crate::effects::transform::{resize_fill, rotate_expand, scaled_size};
use crate::foundation::error::PicEditResult;
use crate::scene::model::ImageOp;

/// Draws an [`ImageOp`] onto a canvas.
pub trait ImageOverlay: Send + Sync + std::fmt::Debug {
    /// Overlay `op` onto `canvas` in place.
    fn overlay_image(&self, canvas: &mut PixelBuffer, op: &ImageOp) -> PicEditResult<()>;
}

/// Raster overlay: decode, scale, rotate, then composite with source-over.
#[derive(Clone, Copy, Debug, Default)]
pub struct RasterImageOverlay {
    filter: ResampleFilter,
}

impl RasterImageOverlay {
    /// Overlay scaling with `filter`.
    pub fn new(filter: ResampleFilter) -> Self {
        Self { filter }
    }

    /// Produce the final asset exactly as it will be composited.
    ///
    /// The order decode -> scale -> rotate is fixed; swapping steps changes the output.
    pub fn prepare_asset(&self, op: &ImageOp) -> PicEditResult<PixelBuffer> {
        op.validate()?;
        let decoded = decode_image(&op.source)?;
        let (w, h) = decoded.dimensions();

        let scaled = if op.scale != 1.0 {
            let (sw, sh) = scaled_size(w, h, op.scale)?;
            tracing::debug!(w, h, sw, sh, scale = op.scale, "scaling overlay");
            resize_fill(&decoded, sw, sh, self.filter)
        } else {
            decoded
        };

        let asset = PixelBuffer::from_straight(scaled);
        rotate_expand(&asset, op.rotation)
    }
}

impl ImageOverlay for RasterImageOverlay {
    fn overlay_image(&self, canvas: &mut PixelBuffer, op: &ImageOp) -> PicEditResult<()> {
        let asset = self.prepare_asset(op)?;
        canvas.draw_over(&asset, op.position, f32::from(op.opacity) / 255.0);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/image.rs"]
mod tests;
