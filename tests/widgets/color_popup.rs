use bevy::prelude::*;
use waxwing::ui::color_popup::{
    ColorPopup, ColorPopupProps, ColorSubmitted, ShowColorPopup, color_popup,
};
use waxwing::ui::popup::{PopupProps, popup_panel};
use waxwing::ui::slider::{Slider, SliderChangeEvent};
use waxwing::ui::slider2d::{Slider2D, Slider2DChangeEvent};

use crate::helpers::{advance_frames, create_minimal_app};

fn spawn_color_popup(app: &mut App) -> Entity {
    let entity = app
        .world_mut()
        .spawn((
            popup_panel(PopupProps::new().with_fade_time_ms(0).without_blur_backdrop()),
            color_popup(ColorPopupProps::default()),
        ))
        .id();
    advance_frames(app, 3);
    entity
}

fn sliders_of(app: &mut App, popup: Entity) -> (Entity, Entity, Vec<Entity>) {
    // the popup owns exactly one 2D slider (the gradient square), one
    // vertical 1D slider (hue) and four horizontal rows (R/G/B/A)
    let world = app.world_mut();

    let gradient = world
        .query_filtered::<Entity, With<Slider2D>>()
        .iter(world)
        .next()
        .expect("gradient slider");

    let mut rows: Vec<Entity> = world
        .query_filtered::<Entity, With<Slider>>()
        .iter(world)
        .collect();
    rows.sort();
    assert_eq!(rows.len(), 5, "hue + four channel rows for popup {popup:?}");

    // the hue slider is spawned first
    let hue = rows.remove(0);
    (gradient, hue, rows)
}

#[test]
fn show_seeds_canonical_state_and_controls() {
    let mut app = create_minimal_app();
    let popup = spawn_color_popup(&mut app);

    app.world_mut().trigger(ShowColorPopup {
        entity: popup,
        color: [1.0, 0.0, 0.0, 0.5],
    });
    advance_frames(&mut app, 2);

    let state = app.world().get::<ColorPopup>(popup).unwrap().state();
    assert!((state.h - 0.0).abs() < 1e-5);
    assert!((state.s - 1.0).abs() < 1e-5);
    assert!((state.v - 1.0).abs() < 1e-5);
    assert!((state.a - 0.5).abs() < 1e-5);

    let (gradient, hue, rows) = sliders_of(&mut app, popup);

    let gradient_value = app.world().get::<Slider2D>(gradient).unwrap().value();
    assert!((gradient_value - Vec2::new(1.0, 1.0)).length() < 1e-4);

    let hue_value = app.world().get::<Slider>(hue).unwrap().value();
    assert!(hue_value.abs() < 1e-4);

    // red row shows 1.0, alpha row was seeded with 0.5
    let red_value = app.world().get::<Slider>(rows[0]).unwrap().value();
    assert!((red_value - 1.0).abs() < 1e-4);
    let alpha_value = app.world().get::<Slider>(rows[3]).unwrap().value();
    assert!((alpha_value - 0.5).abs() < 1e-4);

    // two baked textures: the gradient square and the hue strip
    assert_eq!(app.world().resource::<Assets<Image>>().len(), 2);
}

#[test]
fn hue_slider_edit_keeps_hue_slider_untouched() {
    let mut app = create_minimal_app();
    let popup = spawn_color_popup(&mut app);

    app.world_mut().trigger(ShowColorPopup {
        entity: popup,
        color: [1.0, 0.0, 0.0, 1.0],
    });
    advance_frames(&mut app, 2);

    let (_, hue, _) = sliders_of(&mut app, popup);

    // user drags the hue bar to 120 degrees
    app.world_mut()
        .get_mut::<Slider>(hue)
        .unwrap()
        .set_value_without_notify(120.0);
    app.world_mut().trigger(SliderChangeEvent {
        entity: hue,
        value: 120.0,
    });
    advance_frames(&mut app, 2);

    let state = app.world().get::<ColorPopup>(popup).unwrap().state();
    assert!((state.h - 1.0 / 3.0).abs() < 1e-4);

    // the originating control is not rewritten by the resync
    let hue_value = app.world().get::<Slider>(hue).unwrap().value();
    assert!((hue_value - 120.0).abs() < 1e-4);
}

#[test]
fn rgb_channel_edit_rewrites_hue_slider() {
    let mut app = create_minimal_app();
    let popup = spawn_color_popup(&mut app);

    app.world_mut().trigger(ShowColorPopup {
        entity: popup,
        // pure green; editing blue to full lands on cyan
        color: [0.0, 1.0, 0.0, 1.0],
    });
    advance_frames(&mut app, 2);

    let (_, hue, rows) = sliders_of(&mut app, popup);
    let blue_row = rows[2];

    app.world_mut().trigger(SliderChangeEvent {
        entity: blue_row,
        value: 1.0,
    });
    advance_frames(&mut app, 2);

    let state = app.world().get::<ColorPopup>(popup).unwrap().state();
    assert!((state.h - 0.5).abs() < 1e-4, "cyan sits at hue 0.5");

    let hue_degrees = app.world().get::<Slider>(hue).unwrap().value();
    assert!((hue_degrees - 180.0).abs() < 1e-2, "hue bar must follow");
}

#[test]
fn gradient_edit_updates_state_without_texture_rebake() {
    let mut app = create_minimal_app();
    let popup = spawn_color_popup(&mut app);

    app.world_mut().trigger(ShowColorPopup {
        entity: popup,
        color: [1.0, 0.0, 0.0, 1.0],
    });
    advance_frames(&mut app, 2);

    let (gradient, _, _) = sliders_of(&mut app, popup);

    app.world_mut().trigger(Slider2DChangeEvent {
        entity: gradient,
        value: Vec2::new(0.3, 0.6),
    });
    advance_frames(&mut app, 2);

    let state = app.world().get::<ColorPopup>(popup).unwrap().state();
    assert!((state.s - 0.3).abs() < 1e-5);
    assert!((state.v - 0.6).abs() < 1e-5);
    // hue untouched by a saturation/value edit
    assert!(state.h.abs() < 1e-5);
}

#[test]
fn submit_emits_final_color_and_hides() {
    let mut app = create_minimal_app();
    let popup = spawn_color_popup(&mut app);

    app.world_mut().trigger(ShowColorPopup {
        entity: popup,
        color: [0.0, 0.0, 1.0, 1.0],
    });
    advance_frames(&mut app, 2);

    #[derive(Resource, Default)]
    struct Submitted(Option<[f32; 4]>);
    app.init_resource::<Submitted>();
    app.add_observer(
        |event: On<ColorSubmitted>, mut submitted: ResMut<Submitted>| {
            submitted.0 = Some(event.color);
        },
    );

    use waxwing::ui::button::ButtonClickEvent;
    let world = app.world_mut();
    let mut buttons = world.query::<(&Text, &ChildOf)>();
    let submit = buttons
        .iter(world)
        .find(|(text, _)| text.0 == "Close")
        .map(|(_, child_of)| child_of.parent())
        .expect("submit button");

    app.world_mut().trigger(ButtonClickEvent { entity: submit });
    advance_frames(&mut app, 2);

    let color = app.world().resource::<Submitted>().0.expect("submitted");
    assert!((color[0] - 0.0).abs() < 1e-4);
    assert!((color[2] - 1.0).abs() < 1e-4);

    // textures are released on hide
    assert_eq!(app.world().resource::<Assets<Image>>().len(), 0);
}
