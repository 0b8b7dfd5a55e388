use super::*;

#[test]
fn position_from_coords_requires_exactly_two() {
    assert_eq!(Position::from_coords(&[3, -4]), Some(Position::new(3, -4)));
    assert_eq!(Position::from_coords(&[1]), None);
    assert_eq!(Position::from_coords(&[1, 2, 3]), None);
    assert_eq!(Position::from_coords(&[i64::MAX, 0]), None);
}

#[test]
fn dimensions_from_signed_rejects_missing_zero_negative() {
    assert!(matches!(
        Dimensions::from_signed(None, Some(10)),
        Err(PicEditError::InvalidDimensions(_))
    ));
    assert!(matches!(
        Dimensions::from_signed(Some(0), Some(10)),
        Err(PicEditError::InvalidDimensions(_))
    ));
    assert!(matches!(
        Dimensions::from_signed(Some(10), Some(-1)),
        Err(PicEditError::InvalidDimensions(_))
    ));
    assert_eq!(
        Dimensions::from_signed(Some(4), Some(2)).unwrap(),
        Dimensions {
            width: 4,
            height: 2
        }
    );
}

#[test]
fn rgba8_len_matches_area() {
    let d = Dimensions {
        width: 3,
        height: 5,
    };
    assert_eq!(d.rgba8_len().unwrap(), 60);
}

#[test]
fn normalize_degrees_wraps_into_range() {
    assert_eq!(normalize_degrees(0.0), 0.0);
    assert_eq!(normalize_degrees(360.0), 0.0);
    assert_eq!(normalize_degrees(-90.0), 270.0);
    assert_eq!(normalize_degrees(725.0), 5.0);
}
