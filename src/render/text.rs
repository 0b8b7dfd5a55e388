use std::fmt::Write as _;

use anyhow::Context as _;

use crate::assets::fonts::{FontBook, fallback_font_resolver};
use crate::canvas::buffer::PixelBuffer;
use crate::config::TextBackendKind;
use crate::foundation::core::{Position, normalize_degrees};
use crate::foundation::error::{PicEditError, PicEditResult};
use crate::scene::model::{TextAlign, TextOp, is_xml_illegal};

/// Draws a [`TextOp`] onto a canvas.
///
/// Implementations rasterize the text into a transparent, canvas-sized layer and composite that
/// layer with source-over. They must never fail because a font family is missing.
pub trait TextRenderer: Send + Sync + std::fmt::Debug {
    /// Render `op` onto `canvas` in place.
    fn render_text(&self, canvas: &mut PixelBuffer, op: &TextOp) -> PicEditResult<()>;
}

/// Create the text renderer selected by `kind`.
pub fn create_text_renderer(kind: TextBackendKind, fonts: FontBook) -> Box<dyn TextRenderer> {
    match kind {
        TextBackendKind::Svg => Box::new(SvgTextRenderer::new(fonts)),
    }
}

/// Text backend that emits SVG `<text>` markup and rasterizes it with `resvg`.
#[derive(Debug, Clone)]
pub struct SvgTextRenderer {
    fonts: FontBook,
}

impl SvgTextRenderer {
    /// Renderer resolving families against `fonts`.
    pub fn new(fonts: FontBook) -> Self {
        Self { fonts }
    }

    /// Rasterize `op` into a transparent `width x height` layer with opaque glyphs. Neither the
    /// color alpha nor the op opacity is applied here.
    pub fn rasterize_layer(&self, op: &TextOp, width: u32, height: u32) -> PicEditResult<PixelBuffer> {
        let svg = text_layer_svg(op, width, height);
        let opts = usvg::Options {
            fontdb: self.fonts.database(),
            font_resolver: fallback_font_resolver(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts).context("parse text layer markup")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| PicEditError::invalid_dimensions("failed to allocate text layer"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::default(),
            &mut pixmap.as_mut(),
        );
        PixelBuffer::from_premul(width, height, pixmap.take())
    }
}

impl TextRenderer for SvgTextRenderer {
    fn render_text(&self, canvas: &mut PixelBuffer, op: &TextOp) -> PicEditResult<()> {
        op.validate()?;
        if self.fonts.is_empty() {
            tracing::warn!("no fonts available, text layer will be empty");
        }
        let layer = self.rasterize_layer(op, canvas.width, canvas.height)?;
        canvas.draw_over(&layer, Position::new(0, 0), op.effective_alpha());
        Ok(())
    }
}

/// Build the markup for a canvas-sized text layer.
///
/// `position.y` is the top of the glyphs, so the baseline sits `font_size` below it. Rotation is
/// clockwise about that baseline anchor.
pub(crate) fn text_layer_svg(op: &TextOp, width: u32, height: u32) -> String {
    let x = op.position.x;
    let y = f64::from(op.position.y) + f64::from(op.font_size);
    let anchor = match op.align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    };
    let family = font_family_stack(op.font_family.as_deref());
    let c = op.color;

    let mut svg = String::with_capacity(256 + op.text.len());
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let rotation = normalize_degrees(op.rotation);
    if rotation != 0.0 {
        let _ = write!(svg, r#"<g transform="rotate({rotation} {x} {y})">"#);
    }
    let _ = write!(
        svg,
        r#"<text x="{x}" y="{y}" font-family="{family}" font-size="{size}" text-anchor="{anchor}" fill="rgb({r},{g},{b})" xml:space="preserve">{text}</text>"#,
        size = op.font_size,
        r = c.r,
        g = c.g,
        b = c.b,
        text = escape_xml(&op.text),
    );
    if rotation != 0.0 {
        svg.push_str("</g>");
    }
    svg.push_str("</svg>");
    svg
}

fn font_family_stack(family: Option<&str>) -> String {
    let Some(name) = family.map(str::trim).filter(|s| !s.is_empty()) else {
        return "sans-serif".to_string();
    };
    // Quotes cannot be expressed inside a quoted CSS family name here.
    let cleaned: String = name.chars().filter(|c| *c != '\'' && *c != '"').collect();
    format!("'{}', sans-serif", escape_xml(&cleaned))
}

/// Escape the five XML special characters and drop characters XML cannot carry.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            c if is_xml_illegal(c) => {}
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
