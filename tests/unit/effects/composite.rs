use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_scaled_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_same_opaque_color_twice_is_idempotent() {
    let dst = [255, 255, 255, 255];
    let src = [0, 0, 0, 255];
    let once = over(dst, src, 1.0);
    assert_eq!(over(once, src, 1.0), once);
}

#[test]
fn over_half_opacity_on_white_gives_mid_gray() {
    let out = over([255, 255, 255, 255], [0, 0, 0, 255], 0.5);
    assert_eq!(out[3], 255);
    assert!(out[0].abs_diff(127) <= 1);
}

#[test]
fn flatten_onto_white() {
    assert_eq!(flatten_onto([255, 255, 255], [0, 0, 0, 0]), [255, 255, 255]);
    assert_eq!(flatten_onto([255, 255, 255], [10, 20, 30, 255]), [10, 20, 30]);
}
