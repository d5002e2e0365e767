//! One-dimensional slider rows (hue bar, RGBA channels). Same
//! clamp-before-map math and gesture recognition as the 2D slider,
//! restricted to one axis. Vertical sliders put the maximum at the top.

use bevy::picking::events::{Cancel, Press, Release};
use bevy::picking::prelude::Pickable;
use bevy::prelude::*;
use bevy::ui::UiGlobalTransform;

use crate::core::gesture::{DragRecognizer, GestureEnd, PointerPolicy};
use crate::core::range::axis_clamp;
use crate::core::slider::{axis_handle_position, axis_value_at, needs_reposition};
use crate::ui::slider2d::{DRAGGER_SIZE, local_position, pointer_source};
use crate::ui::tokens::PANEL_BORDER_COLOR;

pub fn plugin(app: &mut App) {
    app.add_systems(Update, (setup_slider, sync_slider_dragger));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliderDirection {
    #[default]
    Horizontal,
    Vertical,
}

impl SliderDirection {
    fn is_vertical(self) -> bool {
        self == Self::Vertical
    }
}

#[derive(EntityEvent)]
pub struct SliderChangeEvent {
    pub entity: Entity,
    pub value: f32,
}

#[derive(Component)]
pub struct Slider {
    min: f32,
    max: f32,
    value: f32,
    direction: SliderDirection,
}

impl Slider {
    pub fn new(min: f32, max: f32, value: f32, direction: SliderDirection) -> Self {
        Self {
            min,
            max,
            value: axis_clamp(value, min, max),
            direction,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value_without_notify(&mut self, value: f32) {
        self.value = axis_clamp(value, self.min, self.max);
    }

    fn set_value(&mut self, value: f32) -> bool {
        let clamped = axis_clamp(value, self.min, self.max);
        let changed = clamped != self.value;
        self.value = clamped;
        changed
    }
}

#[derive(Component, Default)]
struct SliderDrag(DragRecognizer);

#[derive(Component)]
pub struct SliderDragger(pub Entity);

pub struct SliderProps {
    pub min: f32,
    pub max: f32,
    pub value: f32,
    pub direction: SliderDirection,
    pub policy: PointerPolicy,
}

impl Default for SliderProps {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            value: 0.0,
            direction: SliderDirection::Horizontal,
            policy: PointerPolicy::default(),
        }
    }
}

impl SliderProps {
    pub fn new(min: f32, max: f32, value: f32) -> Self {
        Self {
            min,
            max,
            value,
            ..default()
        }
    }

    pub fn vertical(mut self) -> Self {
        self.direction = SliderDirection::Vertical;
        self
    }

    pub fn with_policy(mut self, policy: PointerPolicy) -> Self {
        self.policy = policy;
        self
    }
}

pub fn slider(props: SliderProps) -> impl Bundle {
    let SliderProps {
        min,
        max,
        value,
        direction,
        policy,
    } = props;

    (
        Slider::new(min, max, value, direction),
        SliderDrag(DragRecognizer::new(policy)),
        Node::default(),
        Interaction::None,
    )
}

fn setup_slider(mut commands: Commands, sliders: Query<Entity, Added<Slider>>) {
    for entity in &sliders {
        let dragger = commands
            .spawn((
                SliderDragger(entity),
                Pickable::IGNORE,
                Node {
                    position_type: PositionType::Absolute,
                    width: px(DRAGGER_SIZE),
                    height: px(DRAGGER_SIZE),
                    border: UiRect::all(px(1.0)),
                    border_radius: BorderRadius::all(px(DRAGGER_SIZE / 2.0)),
                    ..default()
                },
                BackgroundColor(Srgba::WHITE.into()),
                BorderColor::all(PANEL_BORDER_COLOR),
            ))
            .id();

        commands.entity(entity).add_child(dragger);

        commands
            .entity(entity)
            .observe(on_slider_press)
            .observe(on_slider_drag)
            .observe(on_slider_release)
            .observe(on_slider_drag_end)
            .observe(on_slider_cancel);
    }
}

fn axis_position(slider: &Slider, local: Vec2) -> f32 {
    if slider.direction.is_vertical() {
        local.y
    } else {
        local.x
    }
}

fn apply_position(
    slider: &mut Slider,
    computed: &ComputedNode,
    position: f32,
) -> Option<bool> {
    let size = computed.size() * computed.inverse_scale_factor;
    let track = if slider.direction.is_vertical() {
        size.y
    } else {
        size.x
    };
    let value = axis_value_at(
        position - DRAGGER_SIZE * 0.5,
        track,
        DRAGGER_SIZE,
        slider.min,
        slider.max,
        slider.direction.is_vertical(),
    )?;
    Some(slider.set_value(value))
}

fn on_slider_press(
    event: On<Pointer<Press>>,
    mut sliders: Query<(&Slider, &mut SliderDrag, &ComputedNode, &UiGlobalTransform)>,
) {
    let Ok((_, mut drag, computed, transform)) = sliders.get_mut(event.event_target()) else {
        return;
    };
    let Some(local) = local_position(computed, transform, event.pointer_location.position) else {
        return;
    };
    drag.0.pointer_down(pointer_source(event.pointer_id), local);
}

fn on_slider_drag(
    event: On<Pointer<Drag>>,
    mut sliders: Query<(
        &mut Slider,
        &mut SliderDrag,
        &ComputedNode,
        &UiGlobalTransform,
    )>,
    mut commands: Commands,
) {
    let entity = event.event_target();
    let Ok((mut slider, mut drag, computed, transform)) = sliders.get_mut(entity) else {
        return;
    };
    let Some(local) = local_position(computed, transform, event.pointer_location.position) else {
        return;
    };
    if drag
        .0
        .pointer_move(pointer_source(event.pointer_id), local)
        .is_none()
    {
        return;
    }
    let Some(session) = drag.0.session() else {
        return;
    };

    let position = axis_position(&slider, session.start_position + session.delta());
    if apply_position(&mut slider, computed, position) == Some(true) {
        commands.trigger(SliderChangeEvent {
            entity,
            value: slider.value(),
        });
    }
}

fn on_slider_release(
    event: On<Pointer<Release>>,
    mut sliders: Query<(&mut Slider, &mut SliderDrag, &ComputedNode)>,
    mut commands: Commands,
) {
    let entity = event.event_target();
    let Ok((mut slider, mut drag, computed)) = sliders.get_mut(entity) else {
        return;
    };

    let Some(GestureEnd::Click { position }) = drag.0.pointer_up(pointer_source(event.pointer_id))
    else {
        return;
    };

    let position = axis_position(&slider, position);
    if apply_position(&mut slider, computed, position) == Some(true) {
        commands.trigger(SliderChangeEvent {
            entity,
            value: slider.value(),
        });
    }
}

fn on_slider_drag_end(event: On<Pointer<DragEnd>>, mut sliders: Query<&mut SliderDrag>) {
    if let Ok(mut drag) = sliders.get_mut(event.event_target()) {
        drag.0.pointer_up(pointer_source(event.pointer_id));
    }
}

fn on_slider_cancel(event: On<Pointer<Cancel>>, mut sliders: Query<&mut SliderDrag>) {
    if let Ok(mut drag) = sliders.get_mut(event.event_target()) {
        drag.0.pointer_cancel();
    }
}

fn sync_slider_dragger(
    sliders: Query<
        (Entity, &Slider, &ComputedNode),
        Or<(Changed<Slider>, Changed<ComputedNode>)>,
    >,
    mut draggers: Query<(&SliderDragger, &mut Node)>,
) {
    for (entity, slider, computed) in &sliders {
        let size = computed.size() * computed.inverse_scale_factor;
        if size.x == 0.0 || size.y == 0.0 || size.x.is_nan() || size.y.is_nan() {
            continue;
        }

        let vertical = slider.direction.is_vertical();
        let track = if vertical { size.y } else { size.x };
        let along = axis_handle_position(
            slider.value,
            track,
            DRAGGER_SIZE,
            slider.min,
            slider.max,
            vertical,
        );
        let across = ((if vertical { size.x } else { size.y }) - DRAGGER_SIZE) * 0.5;

        let target = if vertical {
            Vec2::new(across, along)
        } else {
            Vec2::new(along, across)
        };

        for (dragger, mut node) in &mut draggers {
            if dragger.0 != entity {
                continue;
            }
            let current = Vec2::new(
                if let Val::Px(x) = node.left { x } else { 0.0 },
                if let Val::Px(y) = node.top { y } else { 0.0 },
            );
            if !needs_reposition(current, target) {
                continue;
            }
            node.left = px(target.x);
            node.top = px(target.y);
        }
    }
}
