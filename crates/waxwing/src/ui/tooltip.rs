//! Hover tooltip sharing the popup fade machinery, with an extra show
//! delay. Any node with a [`TooltipSource`] arms hover observers; the
//! source text may carry a placement hint prefix (`"T:"`, `"B:"`,
//! `"L:"`, `"R:"`), defaulting to below the target.

use std::time::Duration;

use bevy::picking::events::{Out, Over};
use bevy::picking::prelude::Pickable;
use bevy::prelude::*;
use bevy::ui::UiGlobalTransform;

use crate::core::fade::FadeMachine;
use crate::ui::tokens::{CORNER_RADIUS, TEXT_COLOR, TEXT_SIZE, TOOLTIP_COLOR};

const TOOLTIP_GAP: f32 = 5.0;

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (setup_tooltip, setup_tooltip_sources, tick_tooltip_fade, sync_tooltip_visual),
    );
}

#[derive(Component)]
pub struct Tooltip {
    /// Wait before the fade-in starts.
    pub delay_ms: u32,
    /// Fade tick period; ten ticks cover a full transition.
    pub fade_time_ms: u32,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            delay_ms: 500,
            fade_time_ms: 15,
        }
    }
}

/// Tooltip text for the node it sits on.
#[derive(Component)]
pub struct TooltipSource {
    pub text: String,
}

impl TooltipSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Component)]
struct TooltipFade {
    machine: FadeMachine,
    timer: Timer,
    delay: Option<Timer>,
}

#[derive(Component)]
struct TooltipLabel(Entity);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum TooltipPlacement {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

fn parse_hint(text: &str) -> (TooltipPlacement, &str) {
    let bytes = text.as_bytes();
    if text.len() > 2 && bytes[1] == b':' {
        let placement = match bytes[0] {
            b'T' | b't' => TooltipPlacement::Top,
            b'L' | b'l' => TooltipPlacement::Left,
            b'R' | b'r' => TooltipPlacement::Right,
            _ => TooltipPlacement::Bottom,
        };
        (placement, &text[2..])
    } else {
        (TooltipPlacement::Bottom, text)
    }
}

pub fn tooltip(config: Tooltip) -> impl Bundle {
    (
        config,
        TooltipFade {
            machine: FadeMachine::default(),
            timer: Timer::new(Duration::ZERO, TimerMode::Repeating),
            delay: None,
        },
        Pickable::IGNORE,
        Node {
            position_type: PositionType::Absolute,
            padding: UiRect::axes(px(8.0), px(4.0)),
            border_radius: BorderRadius::all(CORNER_RADIUS),
            ..default()
        },
        BackgroundColor(TOOLTIP_COLOR.into()),
        GlobalZIndex(300),
        Visibility::Hidden,
    )
}

fn setup_tooltip(mut commands: Commands, tooltips: Query<Entity, Added<Tooltip>>) {
    for entity in &tooltips {
        commands.entity(entity).with_child((
            TooltipLabel(entity),
            Pickable::IGNORE,
            Text::new(""),
            TextFont {
                font_size: TEXT_SIZE,
                ..default()
            },
            TextColor(TEXT_COLOR.into()),
        ));
    }
}

fn setup_tooltip_sources(
    mut commands: Commands,
    sources: Query<Entity, Added<TooltipSource>>,
) {
    for entity in &sources {
        commands
            .entity(entity)
            .observe(on_source_over)
            .observe(on_source_out);
    }
}

fn on_source_over(
    event: On<Pointer<Over>>,
    sources: Query<(&TooltipSource, &ComputedNode, &UiGlobalTransform)>,
    mut tooltips: Query<(
        Entity,
        &Tooltip,
        &mut TooltipFade,
        &mut Node,
        &ComputedNode,
        &ChildOf,
    )>,
    mut labels: Query<(&TooltipLabel, &mut Text)>,
    parents: Query<(&ComputedNode, &UiGlobalTransform), With<Node>>,
) {
    let Ok((source, target_computed, target_transform)) = sources.get(event.event_target()) else {
        return;
    };

    let (placement, text) = parse_hint(&source.text);

    for (tooltip_entity, config, mut fade, mut node, computed, child_of) in &mut tooltips {
        if config.fade_time_ms > 0 {
            fade.machine.show(true);
            fade.timer = Timer::new(
                Duration::from_millis(config.fade_time_ms as u64),
                TimerMode::Repeating,
            );
            fade.delay = Some(Timer::new(
                Duration::from_millis(config.delay_ms as u64),
                TimerMode::Once,
            ));
        } else {
            fade.machine.show(false);
            fade.delay = None;
        }

        for (label, mut label_text) in &mut labels {
            if label.0 == tooltip_entity {
                **label_text = text.to_string();
            }
        }

        // target and tooltip rects in logical pixels
        let scale = target_computed.inverse_scale_factor;
        let target_rect = Rect::from_center_size(
            target_transform.translation * scale,
            target_computed.size() * scale,
        );
        let own_size = computed.size() * computed.inverse_scale_factor;

        let mut pos = match placement {
            TooltipPlacement::Left => Vec2::new(
                target_rect.min.x - own_size.x - TOOLTIP_GAP,
                target_rect.center().y - own_size.y * 0.5,
            ),
            TooltipPlacement::Right => Vec2::new(
                target_rect.max.x + TOOLTIP_GAP,
                target_rect.center().y - own_size.y * 0.5,
            ),
            TooltipPlacement::Top => Vec2::new(
                target_rect.center().x - own_size.x * 0.5,
                target_rect.min.y - own_size.y - TOOLTIP_GAP,
            ),
            TooltipPlacement::Bottom => Vec2::new(
                target_rect.center().x - own_size.x * 0.5,
                target_rect.max.y + TOOLTIP_GAP,
            ),
        };

        // keep the tooltip inside its parent
        if let Ok((parent_computed, parent_transform)) = parents.get(child_of.parent()) {
            let parent_scale = parent_computed.inverse_scale_factor;
            let parent_rect = Rect::from_center_size(
                parent_transform.translation * parent_scale,
                parent_computed.size() * parent_scale,
            );
            pos.x = pos
                .x
                .clamp(parent_rect.min.x, (parent_rect.max.x - own_size.x).max(parent_rect.min.x));
            pos.y = pos
                .y
                .clamp(parent_rect.min.y, (parent_rect.max.y - own_size.y).max(parent_rect.min.y));

            // node offsets are parent-relative
            pos -= parent_rect.min;
        }

        node.left = px(pos.x);
        node.top = px(pos.y);
    }
}

fn on_source_out(
    event: On<Pointer<Out>>,
    sources: Query<(), With<TooltipSource>>,
    mut tooltips: Query<(&Tooltip, &mut TooltipFade)>,
) {
    if sources.get(event.event_target()).is_err() {
        return;
    }

    for (config, mut fade) in &mut tooltips {
        if config.fade_time_ms > 0 {
            // Fades out from wherever the fade-in got to; the pending
            // show delay is dropped.
            if fade.machine.is_visible() {
                fade.machine.hide(true);
                fade.timer = Timer::new(
                    Duration::from_millis(config.fade_time_ms as u64),
                    TimerMode::Repeating,
                );
            }
            fade.delay = None;
        } else {
            fade.machine.hide(false);
        }
    }
}

fn tick_tooltip_fade(time: Res<Time>, mut tooltips: Query<&mut TooltipFade>) {
    for mut fade in &mut tooltips {
        let fade = &mut *fade;

        if let Some(delay) = fade.delay.as_mut() {
            delay.tick(time.delta());
            if !delay.is_finished() {
                continue;
            }
            fade.delay = None;
        }

        if !fade.machine.is_ticking() {
            continue;
        }
        fade.timer.tick(time.delta());
        for _ in 0..fade.timer.times_finished_this_tick() {
            if !fade.machine.tick() {
                break;
            }
        }
    }
}

fn sync_tooltip_visual(
    tooltips: Query<(Entity, &TooltipFade), Changed<TooltipFade>>,
    mut visibilities: Query<&mut Visibility>,
    mut bg_colors: Query<&mut BackgroundColor>,
    mut text_colors: Query<&mut TextColor>,
    labels: Query<(Entity, &TooltipLabel)>,
) {
    for (entity, fade) in &tooltips {
        let alpha = fade.machine.opacity();

        if let Ok(mut visibility) = visibilities.get_mut(entity) {
            *visibility = if fade.machine.is_visible() {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }

        if let Ok(mut bg) = bg_colors.get_mut(entity) {
            let color: Srgba = bg.0.into();
            bg.0 = color.with_alpha(alpha).into();
        }

        for (label_entity, label) in &labels {
            if label.0 != entity {
                continue;
            }
            if let Ok(mut text_color) = text_colors.get_mut(label_entity) {
                let color: Srgba = text_color.0.into();
                text_color.0 = color.with_alpha(alpha).into();
            }
        }
    }
}
