use crate::foundation::error::{PicEditError, PicEditResult};

pub use kurbo::{Affine, Point};

/// Integer pixel position, top-left origin, y pointing down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// Horizontal offset in pixels.
    pub x: i32,
    /// Vertical offset in pixels.
    pub y: i32,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Build a position from a coordinate list that must hold exactly two entries.
    pub fn from_coords(coords: &[i64]) -> Option<Self> {
        match coords {
            [x, y] => Some(Self {
                x: i32::try_from(*x).ok()?,
                y: i32::try_from(*y).ok()?,
            }),
            _ => None,
        }
    }
}

/// Pixel dimensions of a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Validate signed dimensions as they arrive from loosely typed input.
    pub fn from_signed(width: Option<i64>, height: Option<i64>) -> PicEditResult<Self> {
        let (Some(w), Some(h)) = (width, height) else {
            return Err(PicEditError::invalid_dimensions(format!(
                "width and height are required (got {width:?}x{height:?})"
            )));
        };
        if w <= 0 || h <= 0 {
            return Err(PicEditError::invalid_dimensions(format!(
                "canvas must be at least 1x1 (got {w}x{h})"
            )));
        }
        let width = u32::try_from(w)
            .map_err(|_| PicEditError::invalid_dimensions(format!("width {w} is too large")))?;
        let height = u32::try_from(h)
            .map_err(|_| PicEditError::invalid_dimensions(format!("height {h} is too large")))?;
        Ok(Self { width, height })
    }

    /// Return an error unless both sides are non-zero.
    pub fn validate(self) -> PicEditResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PicEditError::invalid_dimensions(format!(
                "canvas must be at least 1x1 (got {}x{})",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Byte length of a tightly packed RGBA8 buffer with these dimensions.
    pub fn rgba8_len(self) -> PicEditResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| {
                PicEditError::invalid_dimensions(format!(
                    "{}x{} overflows the addressable buffer size",
                    self.width, self.height
                ))
            })
    }
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let d = deg % 360.0;
    if d < 0.0 { d + 360.0 } else { d }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
