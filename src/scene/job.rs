//! JSON render jobs.
//!
//! A [`JobDocument`] is the loosely typed form a collaborator hands over: signed numbers, color
//! strings and opaque image references. [`JobDocument::to_render_job`] turns it into validated
//! core types, resolving image references through a [`SourceResolver`]. The library itself never
//! opens files.

use anyhow::Context as _;

use crate::assets::color::Color;
use crate::encode::format::{DEFAULT_QUALITY, OutputFormat, OutputOptions};
use crate::foundation::core::{Dimensions, Position};
use crate::foundation::error::{PicEditError, PicEditResult};
use crate::render::compositor::RenderJob;
use crate::scene::model::{Background, CanvasSpec, ImageOp, Operation, TextAlign, TextOp};

/// Turns an image reference from a job document into encoded bytes.
pub trait SourceResolver {
    /// Return the bytes behind `source`.
    fn resolve(&self, source: &str) -> PicEditResult<Vec<u8>>;
}

impl<F> SourceResolver for F
where
    F: Fn(&str) -> PicEditResult<Vec<u8>>,
{
    fn resolve(&self, source: &str) -> PicEditResult<Vec<u8>> {
        self(source)
    }
}

/// A complete render job as read from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JobDocument {
    /// Canvas section.
    pub canvas: CanvasDoc,
    /// Drawing operations in application order.
    #[serde(default)]
    pub operations: Vec<OperationDoc>,
    /// Output section.
    #[serde(default)]
    pub output: OutputDoc,
}

/// Canvas section of a job.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanvasDoc {
    /// Width in pixels.
    #[serde(default)]
    pub width: Option<i64>,
    /// Height in pixels.
    #[serde(default)]
    pub height: Option<i64>,
    /// Fill color, used when there is no background image.
    #[serde(default = "default_background_color")]
    pub background_color: String,
    /// Image reference stretched over the canvas.
    #[serde(default)]
    pub background_image: Option<String>,
}

/// One operation of a job, tagged by `"type"`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationDoc {
    /// Text operation.
    Text(TextDoc),
    /// Image operation.
    Image(ImageDoc),
}

/// Text operation fields.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextDoc {
    /// Text to draw.
    #[serde(default)]
    pub text: String,
    /// Font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Required; a missing color is a text config error rather than a silent default.
    #[serde(default)]
    pub color: Option<String>,
    /// `[x, y]`.
    #[serde(default)]
    pub position: Option<Vec<i64>>,
    /// Clockwise degrees.
    #[serde(default)]
    pub rotation: f64,
    /// `0..=255`.
    #[serde(default = "default_opacity")]
    pub opacity: i64,
    /// Requested family.
    #[serde(default)]
    pub font_family: Option<String>,
    /// Horizontal anchoring.
    #[serde(default)]
    pub align: TextAlign,
}

/// Image operation fields.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageDoc {
    /// Reference handed to the [`SourceResolver`].
    pub source: String,
    /// `[x, y]`.
    #[serde(default)]
    pub position: Option<Vec<i64>>,
    /// Scale factor, default 1.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Clockwise degrees.
    #[serde(default)]
    pub rotation: f64,
    /// `0..=255`.
    #[serde(default = "default_opacity")]
    pub opacity: i64,
}

/// Output section of a job.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutputDoc {
    /// Format name; unknown names fall back to PNG.
    pub format: String,
    /// Quality for JPEG and WebP.
    pub quality: i64,
}

impl Default for OutputDoc {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png.as_str().to_string(),
            quality: i64::from(DEFAULT_QUALITY),
        }
    }
}

fn default_background_color() -> String {
    "#FFFFFF".to_string()
}

fn default_font_size() -> f32 {
    24.0
}

fn default_scale() -> f64 {
    1.0
}

fn default_opacity() -> i64 {
    255
}

impl JobDocument {
    /// Parse a job from JSON text. Only the shape is checked here.
    pub fn from_json(s: &str) -> PicEditResult<Self> {
        let doc: Self = serde_json::from_str(s).context("parse job document")?;
        Ok(doc)
    }

    /// Convert into core types, fetching every image reference through `resolver`.
    ///
    /// Operation errors carry the operation index.
    pub fn to_render_job(&self, resolver: &dyn SourceResolver) -> PicEditResult<RenderJob> {
        let canvas = self.canvas.to_spec(resolver)?;
        let operations = self
            .operations
            .iter()
            .enumerate()
            .map(|(index, op)| {
                op.to_operation(resolver)
                    .map_err(|e| e.at_operation(index, op.kind()))
            })
            .collect::<PicEditResult<Vec<_>>>()?;
        let output = self.output.to_options()?;
        Ok(RenderJob {
            canvas,
            operations,
            output,
        })
    }
}

impl CanvasDoc {
    fn to_spec(&self, resolver: &dyn SourceResolver) -> PicEditResult<CanvasSpec> {
        let dims = Dimensions::from_signed(self.width, self.height)?;
        let background = match &self.background_image {
            Some(source) => Background::Image(resolver.resolve(source)?),
            None => Background::Color(Color::parse(&self.background_color)?),
        };
        Ok(CanvasSpec {
            width: dims.width,
            height: dims.height,
            background,
        })
    }
}

impl OperationDoc {
    fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
        }
    }

    fn to_operation(&self, resolver: &dyn SourceResolver) -> PicEditResult<Operation> {
        let op = match self {
            Self::Text(t) => Operation::Text(t.to_op()?),
            Self::Image(i) => Operation::Image(i.to_op(resolver)?),
        };
        op.validate()?;
        Ok(op)
    }
}

impl TextDoc {
    fn to_op(&self) -> PicEditResult<TextOp> {
        let color = self
            .color
            .as_deref()
            .ok_or_else(|| PicEditError::invalid_text("color is required"))?;
        let position = self
            .position
            .as_deref()
            .and_then(Position::from_coords)
            .ok_or_else(|| PicEditError::invalid_text("position must be [x, y]"))?;
        let opacity = u8::try_from(self.opacity).map_err(|_| {
            PicEditError::invalid_text(format!("opacity must be in 0..=255 (got {})", self.opacity))
        })?;

        let mut op = TextOp::new(self.text.clone(), self.font_size, Color::parse(color)?, position);
        op.rotation = self.rotation;
        op.opacity = opacity;
        op.font_family = self.font_family.clone();
        op.align = self.align;
        Ok(op)
    }
}

impl ImageDoc {
    fn to_op(&self, resolver: &dyn SourceResolver) -> PicEditResult<ImageOp> {
        let position = self
            .position
            .as_deref()
            .and_then(Position::from_coords)
            .ok_or_else(|| PicEditError::invalid_image("position must be [x, y]"))?;
        let opacity = u8::try_from(self.opacity).map_err(|_| {
            PicEditError::invalid_image(format!("opacity must be in 0..=255 (got {})", self.opacity))
        })?;
        // Reject a bad scale before paying for the source lookup.
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(PicEditError::invalid_scale(format!(
                "scale must be finite and > 0 (got {})",
                self.scale
            )));
        }

        let mut op = ImageOp::new(resolver.resolve(&self.source)?, position);
        op.scale = self.scale;
        op.rotation = self.rotation;
        op.opacity = opacity;
        Ok(op)
    }
}

impl OutputDoc {
    fn to_options(&self) -> PicEditResult<OutputOptions> {
        let format = OutputFormat::parse_lenient(&self.format);
        let quality = match u8::try_from(self.quality) {
            Ok(q) => q,
            Err(_) if !format.uses_quality() => DEFAULT_QUALITY,
            Err(_) => {
                return Err(PicEditError::invalid_quality(format!(
                    "{format} quality must be in 1..=100 (got {})",
                    self.quality
                )));
            }
        };
        let opts = OutputOptions::new(format, quality);
        opts.validate()?;
        Ok(opts)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/job.rs"]
mod tests;
