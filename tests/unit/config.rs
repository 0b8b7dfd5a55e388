use super::*;

#[test]
fn defaults_pin_small_pool_and_lanczos() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.worker_threads, 1);
    assert_eq!(cfg.resample, ResampleFilter::Lanczos3);
    assert!(cfg.fonts.load_system_fonts);
    cfg.validate().unwrap();
}

#[test]
fn from_json_fills_missing_fields() {
    let cfg = EngineConfig::from_json(r#"{ "resample": "nearest" }"#).unwrap();
    assert_eq!(cfg.resample, ResampleFilter::Nearest);
    assert_eq!(cfg.worker_threads, 1);

    let cfg = EngineConfig::from_json(
        r#"{ "fonts": { "load_system_fonts": false, "font_dirs": ["fonts"] }, "worker_threads": 3 }"#,
    )
    .unwrap();
    assert!(!cfg.fonts.load_system_fonts);
    assert_eq!(cfg.fonts.font_dirs.len(), 1);
    assert_eq!(cfg.worker_threads, 3);
}

#[test]
fn from_json_rejects_zero_threads_and_garbage() {
    assert!(matches!(
        EngineConfig::from_json(r#"{ "worker_threads": 0 }"#),
        Err(PicEditError::InvalidConfig(_))
    ));
    assert!(matches!(
        EngineConfig::from_json("not json"),
        Err(PicEditError::InvalidConfig(_))
    ));
}

#[test]
fn filter_maps_to_image_filter() {
    let f: image::imageops::FilterType = ResampleFilter::CatmullRom.into();
    assert!(matches!(f, image::imageops::FilterType::CatmullRom));
}
