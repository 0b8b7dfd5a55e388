use super::*;

fn text(s: &str, size: f32) -> TextOp {
    TextOp::new(s, size, Color::BLACK, Position::new(0, 0))
}

#[test]
fn canvas_spec_rejects_zero_sides() {
    assert!(CanvasSpec::solid(1, 1, Color::WHITE).validate().is_ok());
    assert!(matches!(
        CanvasSpec::solid(0, 10, Color::WHITE).validate(),
        Err(PicEditError::InvalidDimensions(_))
    ));
    assert!(matches!(
        CanvasSpec::image(10, 0, vec![1]).validate(),
        Err(PicEditError::InvalidDimensions(_))
    ));
}

#[test]
fn text_op_validation() {
    assert!(text("hi", 12.0).validate().is_ok());
    for bad in [text("", 12.0), text("hi", 0.0), text("hi", -3.0), text("hi", f32::NAN)] {
        assert!(matches!(
            bad.validate(),
            Err(PicEditError::InvalidTextConfig(_))
        ));
    }
    let mut spun = text("hi", 12.0);
    spun.rotation = f64::INFINITY;
    assert!(spun.validate().is_err());
}

#[test]
fn text_op_rejects_characters_xml_cannot_carry() {
    for bad in ["a\u{1}b", "x\0y", "\u{FFFE}", "\u{FFFF}", "form\u{C}feed", "\u{1F}"] {
        assert!(
            matches!(text(bad, 12.0).validate(), Err(PicEditError::InvalidTextConfig(_))),
            "expected {bad:?} to be rejected"
        );
    }
    for ok in ["tab\tok", "two\nlines", "cr\r", "\u{7F}", "\u{FFFD}", "\u{1F600}"] {
        assert!(text(ok, 12.0).validate().is_ok(), "expected {ok:?} to pass");
    }
}

#[test]
fn effective_alpha_multiplies_opacity_and_color_alpha() {
    let mut op = text("hi", 10.0);
    op.color = Color::rgba(0, 0, 0, 0.5);
    op.opacity = 255;
    assert!((op.effective_alpha() - 0.5).abs() < 1e-6);
    op.opacity = 51;
    assert!((op.effective_alpha() - 0.1).abs() < 1e-6);
}

#[test]
fn image_op_validation_rejects_zero_scale_eagerly() {
    let mut op = ImageOp::new(vec![1, 2, 3], Position::new(0, 0));
    assert!(op.validate().is_ok());
    op.scale = 0.0;
    assert!(matches!(op.validate(), Err(PicEditError::InvalidScale(_))));
    op.scale = -2.0;
    assert!(matches!(op.validate(), Err(PicEditError::InvalidScale(_))));

    let empty = ImageOp::new(vec![], Position::new(0, 0));
    assert!(matches!(empty.validate(), Err(PicEditError::ImageDecode(_))));
}

#[test]
fn operation_kind_names() {
    let t: Operation = text("a", 1.0).into();
    let i: Operation = ImageOp::new(vec![0], Position::default()).into();
    assert_eq!(t.kind(), "text");
    assert_eq!(i.kind(), "image");
}
