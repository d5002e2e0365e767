//! Two-dimensional drag slider. Pointer input runs through the
//! [`DragRecognizer`]; a plain click jumps the value to the press
//! position, a drag tracks `start + delta`. Values are clamped into the
//! slider's [`Range2D`] by construction.

use bevy::picking::events::{Cancel, Press, Release};
use bevy::picking::pointer::PointerId;
use bevy::picking::prelude::Pickable;
use bevy::prelude::*;
use bevy::ui::UiGlobalTransform;

use crate::core::gesture::{DragRecognizer, GestureEnd, PointerPolicy, PointerSources};
use crate::core::range::Range2D;
use crate::core::slider::{TrackMetrics, needs_reposition};
use crate::ui::tokens::PANEL_BORDER_COLOR;

pub const DRAGGER_SIZE: f32 = 12.0;
const DRAGGER_BORDER: f32 = 2.0;

pub fn plugin(app: &mut App) {
    app.add_systems(Update, (setup_slider_2d, sync_dragger_position));
}

/// Fires whenever user input produced a new value. Programmatic writes
/// through [`Slider2D::set_value_without_notify`] stay silent.
#[derive(EntityEvent)]
pub struct Slider2DChangeEvent {
    pub entity: Entity,
    pub value: Vec2,
}

#[derive(Component)]
pub struct Slider2D {
    range: Range2D,
    value: Vec2,
}

impl Slider2D {
    pub fn new(range: Range2D, value: Vec2) -> Self {
        Self {
            range,
            value: range.clamp(value),
        }
    }

    pub fn range(&self) -> Range2D {
        self.range
    }

    pub fn value(&self) -> Vec2 {
        self.value
    }

    /// Clamped setter; the dragger follows on the next frame, the change
    /// event does not fire.
    pub fn set_value_without_notify(&mut self, value: Vec2) {
        self.value = self.range.clamp(value);
    }

    fn set_value(&mut self, value: Vec2) -> bool {
        let clamped = self.range.clamp(value);
        let changed = clamped != self.value;
        self.value = clamped;
        changed
    }
}

/// Recognizer state for one slider instance.
#[derive(Component, Default)]
pub struct SliderDrag(pub DragRecognizer);

#[derive(Component)]
pub struct Slider2DDragger(pub Entity);

#[derive(Component)]
pub struct Slider2DDraggerBorder(pub Entity);

pub struct Slider2DProps {
    pub range: Range2D,
    pub value: Vec2,
    pub policy: PointerPolicy,
}

impl Default for Slider2DProps {
    fn default() -> Self {
        Self {
            range: Range2D::default(),
            value: Vec2::ZERO,
            policy: PointerPolicy::default(),
        }
    }
}

impl Slider2DProps {
    pub fn new(range: Range2D, value: Vec2) -> Self {
        Self {
            range,
            value,
            ..default()
        }
    }

    pub fn with_policy(mut self, policy: PointerPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// The caller sizes the returned node; the dragger and its border are
/// spawned as children on the next update.
pub fn slider_2d(props: Slider2DProps) -> impl Bundle {
    let Slider2DProps {
        range,
        value,
        policy,
    } = props;

    (
        Slider2D::new(range, value),
        SliderDrag(DragRecognizer::new(policy)),
        Node::default(),
        Interaction::None,
    )
}

fn setup_slider_2d(mut commands: Commands, sliders: Query<Entity, Added<Slider2D>>) {
    for entity in &sliders {
        let border = commands
            .spawn((
                Slider2DDraggerBorder(entity),
                Pickable::IGNORE,
                Node {
                    position_type: PositionType::Absolute,
                    width: px(DRAGGER_SIZE + DRAGGER_BORDER * 2.0),
                    height: px(DRAGGER_SIZE + DRAGGER_BORDER * 2.0),
                    border_radius: BorderRadius::all(px((DRAGGER_SIZE + DRAGGER_BORDER * 2.0) / 2.0)),
                    ..default()
                },
                BackgroundColor(PANEL_BORDER_COLOR.into()),
            ))
            .id();

        let dragger = commands
            .spawn((
                Slider2DDragger(entity),
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
                BorderColor::all(Srgba::BLACK),
            ))
            .id();

        commands.entity(entity).add_children(&[border, dragger]);

        commands
            .entity(entity)
            .observe(on_slider_press)
            .observe(on_slider_drag)
            .observe(on_slider_release)
            .observe(on_slider_drag_end)
            .observe(on_slider_cancel);
    }
}

pub(crate) fn pointer_source(id: PointerId) -> PointerSources {
    match id {
        PointerId::Mouse => PointerSources::PRIMARY,
        PointerId::Touch(_) => PointerSources::TOUCH,
        PointerId::Custom(_) => PointerSources::OTHER,
    }
}

/// Pointer position in the node's local logical pixels, origin top-left.
pub(crate) fn local_position(
    computed: &ComputedNode,
    transform: &UiGlobalTransform,
    pointer_position: Vec2,
) -> Option<Vec2> {
    let physical = pointer_position / computed.inverse_scale_factor;
    let normalized = computed.normalize_point(*transform, physical)?;
    Some((normalized + Vec2::splat(0.5)) * computed.size() * computed.inverse_scale_factor)
}

fn track_metrics(computed: &ComputedNode) -> TrackMetrics {
    TrackMetrics::new(
        computed.size() * computed.inverse_scale_factor,
        Vec2::splat(DRAGGER_SIZE),
    )
}

fn on_slider_press(
    event: On<Pointer<Press>>,
    mut sliders: Query<(&mut SliderDrag, &ComputedNode, &UiGlobalTransform), With<Slider2D>>,
) {
    let Ok((mut drag, computed, transform)) = sliders.get_mut(event.event_target()) else {
        return;
    };
    let Some(local) = local_position(computed, transform, event.pointer_location.position) else {
        return;
    };
    drag.0
        .pointer_down(pointer_source(event.pointer_id), local);
}

fn on_slider_drag(
    event: On<Pointer<Drag>>,
    mut sliders: Query<(
        &mut Slider2D,
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

    let position = session.start_position + session.delta() - Vec2::splat(DRAGGER_SIZE * 0.5);
    let Some(value) = track_metrics(computed).value_at(position, &slider.range) else {
        return;
    };

    if slider.set_value(value) {
        commands.trigger(Slider2DChangeEvent {
            entity,
            value: slider.value(),
        });
    }
}

fn on_slider_release(
    event: On<Pointer<Release>>,
    mut sliders: Query<(&mut Slider2D, &mut SliderDrag, &ComputedNode)>,
    mut commands: Commands,
) {
    let entity = event.event_target();
    let Ok((mut slider, mut drag, computed)) = sliders.get_mut(entity) else {
        return;
    };

    // A press+release with no move in between jumps the value to the
    // press position; drags have already been applied continuously.
    let Some(GestureEnd::Click { position }) = drag.0.pointer_up(pointer_source(event.pointer_id))
    else {
        return;
    };

    let position = position - Vec2::splat(DRAGGER_SIZE * 0.5);
    let Some(value) = track_metrics(computed).value_at(position, &slider.range) else {
        return;
    };

    if slider.set_value(value) {
        commands.trigger(Slider2DChangeEvent {
            entity,
            value: slider.value(),
        });
    }
}

// A drag released outside the node delivers DragEnd instead of Release;
// close the session either way.
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

/// Re-derives the dragger's position whenever the value or the resolved
/// geometry changed. Skipped while the slider has no layout, and when the
/// move is within the one-pixel tolerance.
fn sync_dragger_position(
    sliders: Query<
        (Entity, &Slider2D, &ComputedNode),
        Or<(Changed<Slider2D>, Changed<ComputedNode>)>,
    >,
    mut draggers: Query<(&Slider2DDragger, &mut Node), Without<Slider2DDraggerBorder>>,
    mut borders: Query<(&Slider2DDraggerBorder, &mut Node), Without<Slider2DDragger>>,
) {
    for (entity, slider, computed) in &sliders {
        let metrics = track_metrics(computed);
        if metrics.track_size.x == 0.0
            || metrics.track_size.y == 0.0
            || metrics.track_size.x.is_nan()
            || metrics.track_size.y.is_nan()
        {
            continue;
        }

        let target = metrics.handle_position(slider.value(), &slider.range());

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

            for (border, mut border_node) in &mut borders {
                if border.0 != entity {
                    continue;
                }
                border_node.left = px(target.x - DRAGGER_BORDER);
                border_node.top = px(target.y - DRAGGER_BORDER);
            }
        }
    }
}
