//! Engine configuration.
//!
//! Everything that would otherwise be process-wide codec state (resampling quality, worker
//! threads, font discovery) is carried here and handed to [`crate::Compositor::new`]. Two
//! compositors built from different configs never observe each other's settings.

use std::path::PathBuf;

use crate::foundation::error::{PicEditError, PicEditResult};

/// Resampling filter used when resizing background and overlay images.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    /// Nearest neighbor.
    Nearest,
    /// Linear (triangle) filter.
    Triangle,
    /// Cubic (Catmull-Rom) filter.
    CatmullRom,
    /// Gaussian filter.
    Gaussian,
    /// Lanczos with window 3.
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for image::imageops::FilterType {
    fn from(f: ResampleFilter) -> Self {
        match f {
            ResampleFilter::Nearest => Self::Nearest,
            ResampleFilter::Triangle => Self::Triangle,
            ResampleFilter::CatmullRom => Self::CatmullRom,
            ResampleFilter::Gaussian => Self::Gaussian,
            ResampleFilter::Lanczos3 => Self::Lanczos3,
        }
    }
}

/// Text rasterization backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBackendKind {
    /// Build SVG `<text>` markup and rasterize it with `resvg`.
    #[default]
    Svg,
}

/// Font discovery settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Load fonts installed on the host.
    pub load_system_fonts: bool,
    /// Extra directories scanned (non-recursively) for `.ttf`, `.otf` and `.ttc` files.
    pub font_dirs: Vec<PathBuf>,
    /// Family used for the generic `sans-serif` fallback. `None` keeps the font database default.
    pub sans_serif_family: Option<String>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            font_dirs: Vec::new(),
            sans_serif_family: None,
        }
    }
}

/// Top-level engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Font discovery.
    pub fonts: FontConfig,
    /// Filter for background fill and overlay scaling.
    pub resample: ResampleFilter,
    /// Worker threads for batch rendering. Kept small so single renders stay predictable.
    pub worker_threads: usize,
    /// Text backend.
    pub text_backend: TextBackendKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fonts: FontConfig::default(),
            resample: ResampleFilter::Lanczos3,
            worker_threads: 1,
            text_backend: TextBackendKind::Svg,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json(s: &str) -> PicEditResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| PicEditError::invalid_config(format!("parse engine config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> PicEditResult<()> {
        if self.worker_threads == 0 {
            return Err(PicEditError::invalid_config(
                "worker_threads must be >= 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
