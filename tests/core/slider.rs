use bevy::prelude::*;
use waxwing::core::range::Range2D;
use waxwing::core::slider::{
    TrackMetrics, axis_handle_position, axis_value_at, needs_reposition,
};

fn metrics() -> TrackMetrics {
    TrackMetrics::new(Vec2::new(112.0, 112.0), Vec2::splat(12.0))
}

#[test]
fn value_at_maps_corners() {
    let m = metrics();
    let range = Range2D::default();

    // top-left: x minimum, y maximum (top of the track is the max)
    let top_left = m.value_at(Vec2::ZERO, &range).unwrap();
    assert!((top_left - Vec2::new(0.0, 1.0)).length() < 1e-5);

    // bottom-right of the usable extent
    let bottom_right = m.value_at(Vec2::splat(100.0), &range).unwrap();
    assert!((bottom_right - Vec2::new(1.0, 0.0)).length() < 1e-5);
}

#[test]
fn positions_outside_track_clamp_to_boundary() {
    let m = metrics();
    let range = Range2D::default();

    let boundary = m.value_at(Vec2::new(100.0, 0.0), &range).unwrap();
    for outside in [
        Vec2::new(250.0, -3.0),
        Vec2::new(101.0, 0.0),
        Vec2::new(10_000.0, -10_000.0),
    ] {
        let clamped = m.value_at(outside, &range).unwrap();
        assert!(
            (clamped - boundary).length() < 1e-5,
            "expected boundary value for {outside}, got {clamped}"
        );
    }
}

#[test]
fn values_stay_in_range_for_any_position() {
    let m = metrics();
    let range = Range2D::new(Vec2::new(-2.0, 3.0), Vec2::new(2.0, 5.0));

    for x in [-500.0, -1.0, 0.0, 33.3, 100.0, 999.0] {
        for y in [-500.0, -1.0, 0.0, 66.6, 100.0, 999.0] {
            let value = m.value_at(Vec2::new(x, y), &range).unwrap();
            assert!((-2.0..=2.0).contains(&value.x), "x escaped: {value}");
            assert!((3.0..=5.0).contains(&value.y), "y escaped: {value}");
        }
    }
}

#[test]
fn degenerate_track_is_a_no_op() {
    // handle as large as the track on one axis
    let m = TrackMetrics::new(Vec2::new(112.0, 12.0), Vec2::splat(12.0));
    assert_eq!(m.value_at(Vec2::new(10.0, 0.0), &Range2D::default()), None);

    let unresolved = TrackMetrics::new(Vec2::ZERO, Vec2::ZERO);
    assert_eq!(
        unresolved.value_at(Vec2::new(10.0, 0.0), &Range2D::default()),
        None
    );
}

#[test]
fn handle_position_roundtrips_value() {
    let m = metrics();
    let range = Range2D::default();

    let pos = m.handle_position(Vec2::new(0.5, 0.5), &range);
    assert!((pos - Vec2::new(56.0 - 6.0, 56.0 - 6.0)).length() < 1e-4);

    // maximum y sits at the top
    let top = m.handle_position(Vec2::new(0.0, 1.0), &range);
    assert!((top.y - (-6.0)).abs() < 1e-4);
}

#[test]
fn reposition_tolerance_swallows_subpixel_noise() {
    let current = Vec2::new(40.0, 40.0);
    assert!(!needs_reposition(current, Vec2::new(40.4, 39.7)));
    assert!(needs_reposition(current, Vec2::new(41.0, 40.0)));
    assert!(needs_reposition(current, Vec2::new(40.0, 38.5)));
}

#[test]
fn axis_mapping_matches_2d_behavior() {
    assert_eq!(axis_value_at(50.0, 112.0, 12.0, 0.0, 1.0, false), Some(0.5));
    assert_eq!(axis_value_at(0.0, 112.0, 12.0, 0.0, 360.0, true), Some(360.0));
    assert_eq!(axis_value_at(-20.0, 112.0, 12.0, 0.0, 1.0, false), Some(0.0));
    assert_eq!(axis_value_at(10.0, 12.0, 12.0, 0.0, 1.0, false), None);
}

#[test]
fn axis_handle_position_centers_handle() {
    let pos = axis_handle_position(0.5, 112.0, 12.0, 0.0, 1.0, false);
    assert!((pos - 50.0).abs() < 1e-4);

    let top = axis_handle_position(360.0, 112.0, 12.0, 0.0, 360.0, true);
    assert!((top - (-6.0)).abs() < 1e-4);
}
