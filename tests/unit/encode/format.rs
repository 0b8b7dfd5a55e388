use super::*;
use crate::foundation::core::Dimensions;

fn gradient(width: u32, height: u32) -> PixelBuffer {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
            255,
        ])
    });
    PixelBuffer::from_straight(img)
}

fn mean_abs_error(a: &[u8], b: &[u8]) -> f64 {
    let total: u64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| u64::from(x.abs_diff(*y)))
        .sum();
    total as f64 / a.len() as f64
}

#[test]
fn format_names_parse_strictly_and_leniently() {
    assert_eq!("PNG".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
    assert_eq!("jpg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
    assert_eq!("webp".parse::<OutputFormat>().unwrap(), OutputFormat::Webp);
    assert!(matches!(
        "bmp".parse::<OutputFormat>(),
        Err(PicEditError::UnsupportedFormat(_))
    ));
    assert_eq!(OutputFormat::parse_lenient("bmp"), OutputFormat::Png);
    assert_eq!(OutputFormat::parse_lenient("jpeg"), OutputFormat::Jpeg);
}

#[test]
fn png_round_trip_is_exact() {
    let canvas = gradient(17, 9);
    let out = FormatEncoder
        .encode(&canvas, OutputOptions::new(OutputFormat::Png, 1))
        .unwrap();
    assert_eq!(out.len(), out.bytes.len());
    assert_eq!((out.width, out.height), (17, 9));

    let decoded = image::load_from_memory(&out.bytes).unwrap().to_rgba8();
    assert_eq!(decoded, canvas.to_straight());
}

#[test]
fn png_round_trip_keeps_translucency() {
    let canvas =
        PixelBuffer::filled(Dimensions { width: 2, height: 2 }, [64, 0, 0, 128]).unwrap();
    let out = FormatEncoder
        .encode(&canvas, OutputOptions::default())
        .unwrap();
    let decoded = image::load_from_memory(&out.bytes).unwrap().to_rgba8();
    assert_eq!(decoded, canvas.to_straight());
    assert_eq!(decoded.get_pixel(0, 0).0[3], 128);
}

#[test]
fn jpeg_round_trip_is_close() {
    let canvas = gradient(32, 32);
    let out = FormatEncoder
        .encode(&canvas, OutputOptions::new(OutputFormat::Jpeg, 90))
        .unwrap();
    assert_eq!(&out.bytes[..2], &[0xFF, 0xD8]);
    let decoded = image::load_from_memory(&out.bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (32, 32));
    assert!(mean_abs_error(decoded.as_raw(), canvas.to_straight().as_raw()) < 8.0);
}

#[test]
fn jpeg_flattens_transparency_onto_white() {
    let canvas = PixelBuffer::transparent(Dimensions {
        width: 8,
        height: 8,
    })
    .unwrap();
    let out = FormatEncoder
        .encode(&canvas, OutputOptions::new(OutputFormat::Jpeg, 95))
        .unwrap();
    let decoded = image::load_from_memory(&out.bytes).unwrap().to_rgb8();
    assert!(decoded.pixels().all(|p| p.0.iter().all(|&c| c >= 250)));
}

#[test]
fn webp_round_trip_is_close_and_exact_at_100() {
    let canvas = gradient(16, 16);
    let lossy = FormatEncoder
        .encode(&canvas, OutputOptions::new(OutputFormat::Webp, 60))
        .unwrap();
    assert_eq!(&lossy.bytes[..4], b"RIFF");
    let decoded = image::load_from_memory(&lossy.bytes).unwrap().to_rgba8();
    assert!(mean_abs_error(decoded.as_raw(), canvas.to_straight().as_raw()) < 8.0);

    let exact = FormatEncoder
        .encode(&canvas, OutputOptions::new(OutputFormat::Webp, 100))
        .unwrap();
    let decoded = image::load_from_memory(&exact.bytes).unwrap().to_rgba8();
    assert_eq!(decoded, canvas.to_straight());
}

#[test]
fn quality_out_of_range_is_rejected_for_lossy_only() {
    let canvas = gradient(2, 2);
    for q in [0u8, 101, 255] {
        for format in [OutputFormat::Jpeg, OutputFormat::Webp] {
            assert!(matches!(
                FormatEncoder.encode(&canvas, OutputOptions::new(format, q)),
                Err(PicEditError::InvalidQuality(_))
            ));
        }
        assert!(
            FormatEncoder
                .encode(&canvas, OutputOptions::new(OutputFormat::Png, q))
                .is_ok()
        );
    }
}

#[test]
fn quantize_levels_grow_with_quality() {
    assert_eq!(quantize_levels(1), 2);
    assert!(quantize_levels(50) < quantize_levels(90));
    assert_eq!(quantize_levels(100), 256);
}
