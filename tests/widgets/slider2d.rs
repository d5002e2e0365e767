use bevy::prelude::*;
use waxwing::core::range::Range2D;
use waxwing::ui::slider::{Slider, SliderProps, slider};
use waxwing::ui::slider2d::{
    Slider2D, Slider2DDragger, Slider2DProps, slider_2d,
};

use crate::helpers::{advance_frames, create_minimal_app};

#[test]
fn construction_clamps_the_initial_value() {
    let mut app = create_minimal_app();
    let entity = app
        .world_mut()
        .spawn(slider_2d(Slider2DProps::new(
            Range2D::default(),
            Vec2::new(4.0, -3.0),
        )))
        .id();
    app.update();

    let slider = app.world().get::<Slider2D>(entity).unwrap();
    assert_eq!(slider.value(), Vec2::new(1.0, 0.0));
}

#[test]
fn set_value_without_notify_clamps() {
    let mut app = create_minimal_app();
    let entity = app
        .world_mut()
        .spawn(slider_2d(Slider2DProps::new(
            Range2D::new(Vec2::ZERO, Vec2::new(1.0, 360.0)),
            Vec2::ZERO,
        )))
        .id();
    app.update();

    let mut slider = app.world_mut().get_mut::<Slider2D>(entity).unwrap();
    slider.set_value_without_notify(Vec2::new(-2.0, 720.0));
    assert_eq!(slider.value(), Vec2::new(0.0, 360.0));
}

#[test]
fn reversed_range_still_produces_in_range_values() {
    let mut app = create_minimal_app();
    let entity = app
        .world_mut()
        .spawn(slider_2d(Slider2DProps::new(
            Range2D::new(Vec2::ONE, Vec2::ZERO),
            Vec2::new(0.25, 0.75),
        )))
        .id();
    app.update();

    let slider = app.world().get::<Slider2D>(entity).unwrap();
    let value = slider.value();
    assert!((0.0..=1.0).contains(&value.x));
    assert!((0.0..=1.0).contains(&value.y));
}

#[test]
fn slider_spawns_its_dragger_children() {
    let mut app = create_minimal_app();
    let entity = app
        .world_mut()
        .spawn(slider_2d(Slider2DProps::default()))
        .id();
    advance_frames(&mut app, 2);

    let dragger_count = app
        .world_mut()
        .query::<&Slider2DDragger>()
        .iter(app.world())
        .filter(|dragger| dragger.0 == entity)
        .count();
    assert_eq!(dragger_count, 1);
}

#[test]
fn one_dimensional_slider_clamps_too() {
    let mut app = create_minimal_app();
    let entity = app
        .world_mut()
        .spawn(slider(SliderProps::new(0.0, 360.0, 9000.0)))
        .id();
    app.update();

    let slider = app.world().get::<Slider>(entity).unwrap();
    assert_eq!(slider.value(), 360.0);

    let mut slider = app.world_mut().get_mut::<Slider>(entity).unwrap();
    slider.set_value_without_notify(-5.0);
    assert_eq!(slider.value(), 0.0);
}
