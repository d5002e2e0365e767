use bevy::prelude::*;
use waxwing::core::blur::{
    BlurConfigError, BlurSettings, backdrop_uv, pass_offsets, source_rect,
};

#[test]
fn offset_schedule_has_one_entry_per_pass() {
    for passes in 2..=15 {
        let offsets = pass_offsets(passes);
        assert_eq!(offsets.len(), passes as usize);
    }
}

#[test]
fn offset_schedule_seeds_wide_then_grows() {
    let offsets = pass_offsets(6);
    assert_eq!(offsets, vec![1.5, 1.5, 2.5, 3.5, 4.5, 5.5]);

    let minimal = pass_offsets(2);
    assert_eq!(minimal, vec![1.5, 1.5]);

    for window in pass_offsets(15).windows(2) {
        assert!(window[1] >= window[0], "offsets must never shrink");
    }
}

#[test]
fn settings_check_flags_out_of_range_fields() {
    assert!(BlurSettings::default().check().is_ok());

    let too_few = BlurSettings {
        passes: 1,
        ..default()
    };
    assert_eq!(too_few.check(), Err(BlurConfigError::PassCount(1)));

    let oversampled = BlurSettings {
        downsample: 9,
        ..default()
    };
    assert_eq!(oversampled.check(), Err(BlurConfigError::Downsample(9)));
}

#[test]
fn validated_clamps_instead_of_failing() {
    let settings = BlurSettings {
        passes: 40,
        downsample: 0,
        ..default()
    }
    .validated();

    assert_eq!(settings.passes, 15);
    assert_eq!(settings.downsample, 1);
    assert!(settings.check().is_ok());

    let in_range = BlurSettings::default().validated();
    assert_eq!(in_range, BlurSettings::default());
}

#[test]
fn full_coverage_panel_maps_to_unit_rect() {
    let root = Rect::new(0.0, 0.0, 1920.0, 1080.0);
    let uv = backdrop_uv(root, root);
    assert_eq!(uv, Rect::new(0.0, 0.0, 1.0, 1.0));
}

#[test]
fn half_width_panel_has_half_width_uv() {
    let root = Rect::new(0.0, 0.0, 1920.0, 1080.0);
    let panel = Rect::new(0.0, 0.0, 960.0, 1080.0);
    let uv = backdrop_uv(panel, root);
    assert!((uv.width() - 0.5).abs() < 1e-6);
    assert!((uv.height() - 1.0).abs() < 1e-6);
}

#[test]
fn offset_panel_uv_is_proportional() {
    let root = Rect::new(0.0, 0.0, 800.0, 600.0);
    let panel = Rect::new(200.0, 150.0, 600.0, 450.0);
    let uv = backdrop_uv(panel, root);
    assert!((uv.min.x - 0.25).abs() < 1e-6);
    assert!((uv.min.y - 0.25).abs() < 1e-6);
    assert!((uv.width() - 0.5).abs() < 1e-6);
}

#[test]
fn root_offset_is_subtracted() {
    let root = Rect::new(100.0, 100.0, 900.0, 700.0);
    let uv = backdrop_uv(root, root);
    assert_eq!(uv, Rect::new(0.0, 0.0, 1.0, 1.0));
}

#[test]
fn degenerate_root_falls_back_to_full_rect() {
    let root = Rect::new(0.0, 0.0, 0.0, 0.0);
    let panel = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert_eq!(backdrop_uv(panel, root), Rect::new(0.0, 0.0, 1.0, 1.0));
}

#[test]
fn source_rect_scales_uv_to_texels() {
    let uv = Rect::new(0.25, 0.5, 0.75, 1.0);
    let rect = source_rect(uv, Vec2::new(640.0, 360.0));
    assert_eq!(rect.min, Vec2::new(160.0, 180.0));
    assert_eq!(rect.max, Vec2::new(480.0, 360.0));
}
