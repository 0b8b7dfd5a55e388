use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use image::ImageEncoder as _;

use crate::canvas::buffer::PixelBuffer;
use crate::effects::composite::flatten_onto;
use crate::foundation::error::{PicEditError, PicEditResult};

/// Default quality for lossy formats.
pub const DEFAULT_QUALITY: u8 = 90;

/// Encoded output formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless PNG with alpha.
    #[default]
    Png,
    /// Baseline JPEG, flattened onto white.
    Jpeg,
    /// WebP with alpha.
    Webp,
}

impl OutputFormat {
    /// Parse a format name, falling back to PNG for anything unrecognized.
    pub fn parse_lenient(name: &str) -> Self {
        match name.parse() {
            Ok(f) => f,
            Err(_) => {
                tracing::warn!(format = name, "unsupported output format, using png");
                Self::Png
            }
        }
    }

    /// Whether the quality setting affects this format.
    pub fn uses_quality(self) -> bool {
        matches!(self, Self::Jpeg | Self::Webp)
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Webp => "webp",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = PicEditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "webp" => Ok(Self::Webp),
            other => Err(PicEditError::unsupported_format(format!(
                "'{other}' (expected png, jpeg or webp)"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format and quality of the encoded output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Quality `1..=100`; only JPEG and WebP use it.
    pub quality: u8,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl OutputOptions {
    /// Options for `format` at `quality`.
    pub fn new(format: OutputFormat, quality: u8) -> Self {
        Self { format, quality }
    }

    /// Reject out-of-range quality for formats that use it. PNG never fails here.
    pub fn validate(&self) -> PicEditResult<()> {
        if self.format.uses_quality() && !(1..=100).contains(&self.quality) {
            return Err(PicEditError::invalid_quality(format!(
                "{} quality must be in 1..=100 (got {})",
                self.format, self.quality
            )));
        }
        Ok(())
    }
}

/// Final image file bytes plus the metadata collaborators need.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    /// Format of `bytes`.
    pub format: OutputFormat,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Encoded file bytes.
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Return `true` when no bytes were produced.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Serializes a finished canvas.
#[derive(Clone, Copy, Debug, Default)]
pub struct FormatEncoder;

impl FormatEncoder {
    /// Encode `canvas` with `opts`.
    pub fn encode(&self, canvas: &PixelBuffer, opts: OutputOptions) -> PicEditResult<EncodedImage> {
        opts.validate()?;
        let bytes = match opts.format {
            OutputFormat::Png => encode_png(canvas)?,
            OutputFormat::Jpeg => encode_jpeg(canvas, opts.quality)?,
            OutputFormat::Webp => encode_webp(canvas, opts.quality)?,
        };
        tracing::debug!(format = %opts.format, bytes = bytes.len(), "encoded canvas");
        Ok(EncodedImage {
            format: opts.format,
            width: canvas.width,
            height: canvas.height,
            bytes,
        })
    }
}

fn encode_png(canvas: &PixelBuffer) -> PicEditResult<Vec<u8>> {
    let rgba = canvas.to_straight();
    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(Cursor::new(&mut buf))
        .write_image(
            rgba.as_raw(),
            canvas.width,
            canvas.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| anyhow::anyhow!("encode png: {e}"))?;
    Ok(buf)
}

fn encode_jpeg(canvas: &PixelBuffer, quality: u8) -> PicEditResult<Vec<u8>> {
    // JPEG has no alpha channel; composite over white first.
    let mut rgb = Vec::with_capacity((canvas.width as usize) * (canvas.height as usize) * 3);
    for px in canvas.data.chunks_exact(4) {
        rgb.extend_from_slice(&flatten_onto([255, 255, 255], [px[0], px[1], px[2], px[3]]));
    }
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut buf), quality)
        .write_image(
            &rgb,
            canvas.width,
            canvas.height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| anyhow::anyhow!("encode jpeg: {e}"))?;
    Ok(buf)
}

fn encode_webp(canvas: &PixelBuffer, quality: u8) -> PicEditResult<Vec<u8>> {
    // The pure-Rust WebP encoder is lossless only; lower qualities quantize RGB first.
    let mut rgba = canvas.to_straight();
    quantize_rgb(&mut rgba, quality);
    let mut buf = Vec::new();
    image::codecs::webp::WebPEncoder::new_lossless(Cursor::new(&mut buf))
        .write_image(
            rgba.as_raw(),
            canvas.width,
            canvas.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| anyhow::anyhow!("encode webp: {e}"))?;
    Ok(buf)
}

fn quantize_rgb(data: &mut [u8], quality: u8) {
    if quality >= 100 {
        return;
    }
    let levels = quantize_levels(quality);
    let step = 255.0 / (f32::from(levels) - 1.0);
    for pixel in data.chunks_exact_mut(4) {
        for channel in pixel.iter_mut().take(3) {
            let bucket = (f32::from(*channel) / step).round();
            *channel = (bucket * step).round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Finer palettes at high quality, coarse ones at low quality.
fn quantize_levels(quality: u8) -> u16 {
    if quality >= 100 {
        return 256;
    }
    let normalized = f32::from(quality).clamp(1.0, 100.0) / 100.0;
    let levels = 2.0 + normalized * normalized * 254.0;
    levels.round().clamp(2.0, 256.0) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/encode/format.rs"]
mod tests;
