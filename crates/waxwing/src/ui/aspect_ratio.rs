//! Letterboxing container: keeps its content at a fixed aspect ratio by
//! growing equal left/right padding children when the container is wider
//! than the design ratio.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub fn plugin(app: &mut App) {
    app.add_systems(Update, (setup_aspect_ratio, sync_aspect_padding));
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRatioPadding {
    pub ratio_width: f32,
    pub ratio_height: f32,
}

impl Default for AspectRatioPadding {
    fn default() -> Self {
        Self {
            ratio_width: 16.0,
            ratio_height: 9.0,
        }
    }
}

#[derive(Component)]
struct PaddingLeft(Entity);

#[derive(Component)]
struct PaddingRight(Entity);

pub fn aspect_ratio_padding(config: AspectRatioPadding) -> impl Bundle {
    (
        config,
        Node {
            flex_direction: FlexDirection::Row,
            width: percent(100),
            height: percent(100),
            ..default()
        },
    )
}

fn setup_aspect_ratio(
    mut commands: Commands,
    containers: Query<Entity, Added<AspectRatioPadding>>,
) {
    for entity in &containers {
        let left = commands.spawn((PaddingLeft(entity), Node::default())).id();
        let right = commands.spawn((PaddingRight(entity), Node::default())).id();
        commands.entity(entity).insert_children(0, &[left]);
        commands.entity(entity).add_child(right);
    }
}

fn sync_aspect_padding(
    mut commands: Commands,
    containers: Query<
        (Entity, &AspectRatioPadding, &ComputedNode),
        Or<(Changed<ComputedNode>, Changed<AspectRatioPadding>)>,
    >,
    mut left_paddings: Query<(Entity, &PaddingLeft, &mut Node), Without<PaddingRight>>,
    mut right_paddings: Query<(Entity, &PaddingRight, &mut Node), Without<PaddingLeft>>,
) {
    for (entity, config, computed) in &containers {
        let size = computed.size() * computed.inverse_scale_factor;
        if size.x.is_nan() || size.y.is_nan() || size.y == 0.0 {
            // No resolved layout yet; the next geometry event retries.
            continue;
        }

        let width = if config.ratio_width <= 0.0 || config.ratio_height <= 0.0 {
            warn!(
                "invalid aspect ratio {}:{}, disabling padding",
                config.ratio_width, config.ratio_height
            );
            0.0
        } else {
            let design_ratio = config.ratio_width / config.ratio_height;
            let current_ratio = size.x / size.y;
            if current_ratio - design_ratio > 0.01 {
                (size.x - size.y * design_ratio) * 0.5
            } else {
                0.0
            }
        };

        for (left_entity, left, mut node) in &mut left_paddings {
            if left.0 != entity {
                continue;
            }
            node.width = px(width);
            // keep the padding elements at the outer edges
            commands.entity(entity).insert_children(0, &[left_entity]);
        }
        for (right_entity, right, mut node) in &mut right_paddings {
            if right.0 != entity {
                continue;
            }
            node.width = px(width);
            commands.entity(entity).add_child(right_entity);
        }
    }
}
