use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn unit_to_u8_clamps_and_rounds() {
    assert_eq!(unit_to_u8(-1.0), 0);
    assert_eq!(unit_to_u8(0.5), 128);
    assert_eq!(unit_to_u8(2.0), 255);
}

#[test]
fn premultiply_then_unpremultiply_is_stable_for_opaque_and_clear() {
    let mut px = vec![10u8, 20, 30, 255, 200, 100, 50, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[10, 20, 30, 255]);
    assert_eq!(&px[4..], &[0, 0, 0, 0]);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[10, 20, 30, 255]);
}

#[test]
fn unpremultiply_half_alpha_recovers_color_closely() {
    let mut px = vec![200u8, 100, 50, 128];
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    assert!(px[0].abs_diff(200) <= 1);
    assert!(px[1].abs_diff(100) <= 1);
    assert!(px[2].abs_diff(50) <= 1);
    assert_eq!(px[3], 128);
}
