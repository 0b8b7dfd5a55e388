//! Resize and rotation helpers for raster assets.

use crate::canvas::buffer::PixelBuffer;
use crate::config::ResampleFilter;
use crate::foundation::core::{Affine, Dimensions, Point, normalize_degrees};
use crate::foundation::error::{PicEditError, PicEditResult};

/// Resize a straight-alpha image to exactly `width x height`, ignoring aspect ratio.
pub fn resize_fill(
    img: &image::RgbaImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> image::RgbaImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    image::imageops::resize(img, width, height, filter.into())
}

/// Size of an asset after scaling by `scale`: `round(w * scale) x round(h * scale)`.
pub fn scaled_size(width: u32, height: u32, scale: f64) -> PicEditResult<(u32, u32)> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(PicEditError::invalid_scale(format!(
            "scale must be finite and > 0 (got {scale})"
        )));
    }
    let w = (f64::from(width) * scale).round();
    let h = (f64::from(height) * scale).round();
    if w < 1.0 || h < 1.0 {
        return Err(PicEditError::invalid_scale(format!(
            "scale {scale} collapses {width}x{height} to an empty image"
        )));
    }
    if w > f64::from(u32::MAX) || h > f64::from(u32::MAX) {
        return Err(PicEditError::invalid_scale(format!(
            "scale {scale} overflows {width}x{height}"
        )));
    }
    Ok((w as u32, h as u32))
}

/// Rotate a premultiplied raster clockwise by `degrees` about its center.
///
/// The output box grows to contain the rotated silhouette; uncovered pixels are transparent.
/// Quarter turns are exact; other angles are bilinearly resampled.
pub fn rotate_expand(src: &PixelBuffer, degrees: f64) -> PicEditResult<PixelBuffer> {
    let deg = normalize_degrees(degrees);
    if deg == 0.0 {
        return Ok(src.clone());
    }
    if deg == 90.0 || deg == 180.0 || deg == 270.0 {
        return Ok(rotate_quarter(src, deg as u32));
    }

    let theta = deg.to_radians();
    let (w, h) = (f64::from(src.width), f64::from(src.height));
    let (sin, cos) = theta.sin_cos();
    let out_w = (w * cos.abs() + h * sin.abs() - 1e-9).ceil().max(1.0) as u32;
    let out_h = (w * sin.abs() + h * cos.abs() - 1e-9).ceil().max(1.0) as u32;

    // Destination pixel centers map back into source space through the inverse transform.
    let forward = Affine::translate((f64::from(out_w) / 2.0, f64::from(out_h) / 2.0))
        * Affine::rotate(theta)
        * Affine::translate((-w / 2.0, -h / 2.0));
    let inverse = forward.inverse();

    let mut out = PixelBuffer::transparent(Dimensions {
        width: out_w,
        height: out_h,
    })?;
    for y in 0..out_h {
        for x in 0..out_w {
            let p = inverse * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let px = sample_bilinear(src, p.x - 0.5, p.y - 0.5);
            let idx = ((y as usize) * (out_w as usize) + (x as usize)) * 4;
            out.data[idx..idx + 4].copy_from_slice(&px);
        }
    }
    Ok(out)
}

fn rotate_quarter(src: &PixelBuffer, deg: u32) -> PixelBuffer {
    // Premultiplied bytes are just four channels to the image crate.
    let img = image::RgbaImage::from_raw(src.width, src.height, src.data.clone())
        .unwrap_or_else(|| image::RgbaImage::new(src.width, src.height));
    let rotated = match deg {
        90 => image::imageops::rotate90(&img),
        180 => image::imageops::rotate180(&img),
        _ => image::imageops::rotate270(&img),
    };
    let (width, height) = rotated.dimensions();
    PixelBuffer {
        width,
        height,
        data: rotated.into_raw(),
    }
}

fn sample_bilinear(src: &PixelBuffer, fx: f64, fy: f64) -> [u8; 4] {
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let fetch = |x: i64, y: i64| -> [f64; 4] {
        if x < 0 || y < 0 || x >= i64::from(src.width) || y >= i64::from(src.height) {
            return [0.0; 4];
        }
        let idx = ((y as usize) * (src.width as usize) + (x as usize)) * 4;
        let p = &src.data[idx..idx + 4];
        [
            f64::from(p[0]),
            f64::from(p[1]),
            f64::from(p[2]),
            f64::from(p[3]),
        ]
    };

    let a = fetch(x0, y0);
    let b = fetch(x0 + 1, y0);
    let c = fetch(x0, y0 + 1);
    let d = fetch(x0 + 1, y0 + 1);

    let mut out = [0u8; 4];
    for i in 0..4 {
        let top = a[i] + (b[i] - a[i]) * tx;
        let bottom = c[i] + (d[i] - c[i]) * tx;
        let v = top + (bottom - top) * ty;
        out[i] = v.round().clamp(0.0, 255.0) as u8;
    }
    // Keep premultiplied invariant: no channel may exceed alpha.
    for i in 0..3 {
        out[i] = out[i].min(out[3]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transform.rs"]
mod tests;
