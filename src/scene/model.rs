use crate::assets::color::Color;
use crate::foundation::core::{Dimensions, Position};
use crate::foundation::error::{PicEditError, PicEditResult};

/// What fills a freshly created canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    /// Solid color fill.
    Color(Color),
    /// Encoded image bytes, stretched to the canvas size.
    Image(Vec<u8>),
}

impl Default for Background {
    fn default() -> Self {
        Self::Color(Color::WHITE)
    }
}

/// Canvas to create before any operation runs.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasSpec {
    /// Width in pixels, must be > 0.
    pub width: u32,
    /// Height in pixels, must be > 0.
    pub height: u32,
    /// Initial content.
    pub background: Background,
}

impl CanvasSpec {
    /// Canvas filled with a solid color.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            background: Background::Color(color),
        }
    }

    /// Canvas whose content is `bytes` stretched to `width x height`.
    pub fn image(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self {
            width,
            height,
            background: Background::Image(bytes),
        }
    }

    /// Canvas dimensions.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Reject zero-sized canvases.
    pub fn validate(&self) -> PicEditResult<()> {
        self.dimensions().validate()
    }
}

/// Horizontal anchoring of a text run relative to its x position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// `x` is the start of the run.
    #[default]
    Left,
    /// `x` is the middle of the run.
    Center,
    /// `x` is the end of the run.
    Right,
}

/// Stamp a line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOp {
    /// Text to draw, non-empty.
    pub text: String,
    /// Font size in pixels, > 0.
    pub font_size: f32,
    /// Fill color; its alpha multiplies with `opacity`.
    pub color: Color,
    /// Anchor; `y` is the top of the glyphs.
    pub position: Position,
    /// Clockwise rotation in degrees about the anchor.
    pub rotation: f64,
    /// Opacity `0..=255`.
    pub opacity: u8,
    /// Requested font family; unknown families fall back silently.
    pub font_family: Option<String>,
    /// Horizontal anchoring.
    pub align: TextAlign,
}

impl TextOp {
    /// Text op with defaults: no rotation, opaque, default family, left aligned.
    pub fn new(text: impl Into<String>, font_size: f32, color: Color, position: Position) -> Self {
        Self {
            text: text.into(),
            font_size,
            color,
            position,
            rotation: 0.0,
            opacity: 255,
            font_family: None,
            align: TextAlign::Left,
        }
    }

    /// Check the cheap invariants.
    pub fn validate(&self) -> PicEditResult<()> {
        if self.text.is_empty() {
            return Err(PicEditError::invalid_text("text must be non-empty"));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(PicEditError::invalid_text(format!(
                "font size must be finite and > 0 (got {})",
                self.font_size
            )));
        }
        if !self.rotation.is_finite() {
            return Err(PicEditError::invalid_text("rotation must be finite"));
        }
        if let Some(c) = self.text.chars().find(|c| is_xml_illegal(*c)) {
            return Err(PicEditError::invalid_text(format!(
                "text contains unsupported control character U+{:04X}",
                u32::from(c)
            )));
        }
        Ok(())
    }

    /// Combined alpha multiplier: `opacity / 255 * color.alpha`.
    pub fn effective_alpha(&self) -> f32 {
        f32::from(self.opacity) / 255.0 * self.color.alpha
    }
}

/// Characters XML 1.0 cannot carry, not even as character references. Tab, LF and CR are fine.
pub(crate) fn is_xml_illegal(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

/// Overlay an encoded image.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageOp {
    /// Encoded image bytes.
    pub source: Vec<u8>,
    /// Top-left corner of the (scaled, rotated) asset on the canvas.
    pub position: Position,
    /// Scale factor, > 0. `1.0` keeps the original size.
    pub scale: f64,
    /// Clockwise rotation in degrees about the asset center.
    pub rotation: f64,
    /// Opacity `0..=255`.
    pub opacity: u8,
}

impl ImageOp {
    /// Image op with defaults: unscaled, unrotated, opaque.
    pub fn new(source: Vec<u8>, position: Position) -> Self {
        Self {
            source,
            position,
            scale: 1.0,
            rotation: 0.0,
            opacity: 255,
        }
    }

    /// Check the cheap invariants. A zero scale is rejected here, before any decode.
    pub fn validate(&self) -> PicEditResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(PicEditError::invalid_scale(format!(
                "scale must be finite and > 0 (got {})",
                self.scale
            )));
        }
        if !self.rotation.is_finite() {
            return Err(PicEditError::invalid_image("rotation must be finite"));
        }
        if self.source.is_empty() {
            return Err(PicEditError::decode("image bytes are empty"));
        }
        Ok(())
    }
}

/// One drawing instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    /// Stamp text.
    Text(TextOp),
    /// Overlay an image.
    Image(ImageOp),
}

impl Operation {
    /// Short kind name used in errors and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
        }
    }

    /// Check the cheap invariants of the wrapped op.
    pub fn validate(&self) -> PicEditResult<()> {
        match self {
            Self::Text(op) => op.validate(),
            Self::Image(op) => op.validate(),
        }
    }
}

impl From<TextOp> for Operation {
    fn from(op: TextOp) -> Self {
        Self::Text(op)
    }
}

impl From<ImageOp> for Operation {
    fn from(op: ImageOp) -> Self {
        Self::Image(op)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
