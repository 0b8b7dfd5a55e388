use std::io::Cursor;

use super::*;
use crate::assets::color::Color;
use crate::foundation::error::PicEditError;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn solid_fill_uses_color() {
    let canvas = CanvasFactory::default()
        .create(&CanvasSpec::solid(4, 3, Color::parse("#336699").unwrap()))
        .unwrap();
    assert_eq!((canvas.width, canvas.height), (4, 3));
    assert!(
        canvas
            .data
            .chunks_exact(4)
            .all(|p| p == [0x33, 0x66, 0x99, 0xff])
    );
}

#[test]
fn translucent_fill_is_premultiplied() {
    let canvas = CanvasFactory::default()
        .create(&CanvasSpec::solid(1, 1, Color::rgba(255, 0, 0, 0.5)))
        .unwrap();
    assert_eq!(canvas.pixel(0, 0), Some([128, 0, 0, 128]));
}

#[test]
fn zero_width_fails_before_decoding() {
    // The bytes are garbage: a decode attempt would report ImageDecode instead.
    let err = CanvasFactory::default()
        .create(&CanvasSpec::image(0, 10, b"garbage".to_vec()))
        .unwrap_err();
    assert!(matches!(err, PicEditError::InvalidDimensions(_)));
}

#[test]
fn background_image_is_stretched_to_fill() {
    let src = image::RgbaImage::from_pixel(2, 8, image::Rgba([10, 200, 30, 255]));
    let canvas = CanvasFactory::new(ResampleFilter::Lanczos3)
        .create(&CanvasSpec::image(16, 4, png_bytes(src)))
        .unwrap();
    assert_eq!((canvas.width, canvas.height), (16, 4));
    assert!(
        canvas
            .data
            .chunks_exact(4)
            .all(|p| p == [10, 200, 30, 255])
    );
}

#[test]
fn undecodable_background_is_decode_error() {
    let err = CanvasFactory::default()
        .create(&CanvasSpec::image(4, 4, b"garbage".to_vec()))
        .unwrap_err();
    assert!(matches!(err, PicEditError::ImageDecode(_)));
}
