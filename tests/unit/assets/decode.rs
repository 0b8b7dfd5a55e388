use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_straight_alpha() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50, 200, 128]).unwrap();
    let decoded = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(decoded.dimensions(), (1, 1));
    assert_eq!(decoded.as_raw().as_slice(), &[100, 50, 200, 128]);
}

#[test]
fn decode_rejects_garbage_and_empty() {
    assert!(matches!(
        decode_image(b"definitely not an image"),
        Err(PicEditError::ImageDecode(_))
    ));
    assert!(matches!(decode_image(&[]), Err(PicEditError::ImageDecode(_))));
}

#[test]
fn decode_rejects_truncated_png() {
    let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([1, 2, 3, 255]));
    let bytes = png_bytes(img);
    let truncated = &bytes[..bytes.len() / 2];
    assert!(matches!(
        decode_image(truncated),
        Err(PicEditError::ImageDecode(_))
    ));
}
