use crate::foundation::core::{Dimensions, Position};
use crate::foundation::error::{PicEditError, PicEditResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};

/// In-memory raster a render draws into.
///
/// Pixels are **premultiplied** RGBA8, tightly packed, row-major. A buffer is owned by exactly one
/// render at a time; operations mutate it in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes.
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a buffer where every pixel is `premul`.
    pub fn filled(dims: Dimensions, premul: [u8; 4]) -> PicEditResult<Self> {
        dims.validate()?;
        let len = dims.rgba8_len()?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..(len / 4) {
            data.extend_from_slice(&premul);
        }
        Ok(Self {
            width: dims.width,
            height: dims.height,
            data,
        })
    }

    /// Fully transparent buffer.
    pub fn transparent(dims: Dimensions) -> PicEditResult<Self> {
        Self::filled(dims, [0, 0, 0, 0])
    }

    /// Wrap already premultiplied bytes.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> PicEditResult<Self> {
        let expected = Dimensions { width, height }.rgba8_len()?;
        if data.len() != expected {
            return Err(PicEditError::Other(anyhow::anyhow!(
                "premultiplied buffer has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert a straight-alpha image into a premultiplied buffer.
    pub fn from_straight(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            data,
        }
    }

    /// Straight-alpha copy suitable for encoders.
    pub fn to_straight(&self) -> image::RgbaImage {
        let mut data = self.data.clone();
        unpremultiply_rgba8_in_place(&mut data);
        image::RgbaImage::from_raw(self.width, self.height, data)
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    /// Buffer dimensions.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = &self.data[idx..idx + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Composite `src` over this buffer with its top-left corner at `at`.
    ///
    /// Pixels of `src` that fall outside this buffer are clipped.
    pub fn draw_over(&mut self, src: &PixelBuffer, at: Position, opacity: f32) {
        let dst_w = i64::from(self.width);
        let dst_h = i64::from(self.height);
        let x0 = i64::from(at.x).max(0);
        let y0 = i64::from(at.y).max(0);
        let x1 = (i64::from(at.x) + i64::from(src.width)).min(dst_w);
        let y1 = (i64::from(at.y) + i64::from(src.height)).min(dst_h);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let span = ((x1 - x0) as usize) * 4;
        for y in y0..y1 {
            let sy = (y - i64::from(at.y)) as usize;
            let sx = (x0 - i64::from(at.x)) as usize;
            let s_start = (sy * src.width as usize + sx) * 4;
            let d_start = ((y as usize) * self.width as usize + x0 as usize) * 4;
            crate::effects::composite::over_span(
                &mut self.data[d_start..d_start + span],
                &src.data[s_start..s_start + span],
                opacity,
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/buffer.rs"]
mod tests;
