use bevy::prelude::*;
use waxwing::core::range::{Range2D, axis_clamp};

#[test]
fn range_default_is_unit_square() {
    let range = Range2D::default();
    assert_eq!(range.min, Vec2::ZERO);
    assert_eq!(range.max, Vec2::ONE);
}

#[test]
fn clamp_keeps_values_inside() {
    let range = Range2D::new(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 2.0));
    assert_eq!(range.clamp(Vec2::new(5.0, -5.0)), Vec2::new(1.0, 0.0));
    assert_eq!(range.clamp(Vec2::new(0.5, 1.5)), Vec2::new(0.5, 1.5));
}

#[test]
fn clamp_tolerates_reversed_bounds() {
    // callers may pass min/max swapped on either axis
    let range = Range2D::new(Vec2::new(1.0, 2.0), Vec2::new(-1.0, 0.0));
    let clamped = range.clamp(Vec2::new(5.0, -5.0));
    assert_eq!(clamped, Vec2::new(1.0, 0.0));

    for value in [
        Vec2::new(-10.0, -10.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(10.0, 10.0),
    ] {
        let clamped = range.clamp(value);
        assert!((-1.0..=1.0).contains(&clamped.x), "x out of range: {clamped}");
        assert!((0.0..=2.0).contains(&clamped.y), "y out of range: {clamped}");
    }
}

#[test]
fn normalize_and_lerp_are_inverse() {
    let range = Range2D::new(Vec2::new(2.0, -4.0), Vec2::new(6.0, 4.0));
    let value = Vec2::new(3.0, 0.0);
    let roundtrip = range.lerp_unclamped(range.normalize(value));
    assert!((roundtrip - value).length() < 1e-5);
}

#[test]
fn normalize_zero_span_axis_maps_to_zero() {
    let range = Range2D::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 2.0));
    assert_eq!(range.normalize(Vec2::new(1.0, 1.0)), Vec2::new(0.0, 0.5));
}

#[test]
fn axis_clamp_tolerates_reversed_bounds() {
    assert_eq!(axis_clamp(5.0, 1.0, 0.0), 1.0);
    assert_eq!(axis_clamp(-5.0, 1.0, 0.0), 0.0);
    assert_eq!(axis_clamp(0.25, 0.0, 1.0), 0.25);
}
