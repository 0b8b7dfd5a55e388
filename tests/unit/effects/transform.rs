use super::*;

fn buffer(width: u32, height: u32, px: [u8; 4]) -> PixelBuffer {
    PixelBuffer::filled(crate::foundation::core::Dimensions { width, height }, px).unwrap()
}

#[test]
fn scaled_size_rounds_to_nearest() {
    assert_eq!(scaled_size(10, 7, 2.0).unwrap(), (20, 14));
    assert_eq!(scaled_size(10, 7, 0.5).unwrap(), (5, 4));
    assert_eq!(scaled_size(3, 3, 1.0).unwrap(), (3, 3));
}

#[test]
fn scaled_size_rejects_zero_negative_and_collapse() {
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            scaled_size(10, 10, bad),
            Err(PicEditError::InvalidScale(_))
        ));
    }
    assert!(matches!(
        scaled_size(10, 10, 0.01),
        Err(PicEditError::InvalidScale(_))
    ));
}

#[test]
fn resize_fill_ignores_aspect_ratio() {
    let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]));
    let out = resize_fill(&img, 3, 9, ResampleFilter::Lanczos3);
    assert_eq!(out.dimensions(), (3, 9));
    assert!(out.pixels().all(|p| p.0 == [10, 20, 30, 255]));
}

#[test]
fn full_turn_is_identity() {
    let mut src = buffer(3, 2, [0, 0, 0, 0]);
    src.data[0..4].copy_from_slice(&[255, 0, 0, 255]);
    assert_eq!(rotate_expand(&src, 360.0).unwrap(), src);
    assert_eq!(rotate_expand(&src, 0.0).unwrap(), src);
    assert_eq!(rotate_expand(&src, -720.0).unwrap(), src);
}

#[test]
fn quarter_turn_is_clockwise_and_swaps_dimensions() {
    // 2x1 raster: red on the left, blue on the right.
    let mut src = buffer(2, 1, [0, 0, 255, 255]);
    src.data[0..4].copy_from_slice(&[255, 0, 0, 255]);

    let out = rotate_expand(&src, 90.0).unwrap();
    assert_eq!((out.width, out.height), (1, 2));
    // Clockwise: the left pixel ends up on top.
    assert_eq!(out.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(out.pixel(0, 1), Some([0, 0, 255, 255]));

    let back = rotate_expand(&src, -270.0).unwrap();
    assert_eq!(back, out);
}

#[test]
fn arbitrary_angle_expands_box_with_transparent_corners() {
    let src = buffer(10, 10, [255, 255, 255, 255]);
    let out = rotate_expand(&src, 45.0).unwrap();
    assert_eq!((out.width, out.height), (15, 15));
    assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(out.pixel(7, 7), Some([255, 255, 255, 255]));
}

#[test]
fn rotated_pixels_stay_premultiplied() {
    let src = buffer(6, 4, [120, 60, 30, 128]);
    let out = rotate_expand(&src, 33.0).unwrap();
    assert!(
        out.data
            .chunks_exact(4)
            .all(|p| p[0] <= p[3] && p[1] <= p[3] && p[2] <= p[3])
    );
}
