//! Minimal button used by the popup footers. Emits [`ButtonClickEvent`]
//! on click and tints on hover; anything fancier belongs to the host
//! application.

use bevy::picking::events::Click;
use bevy::picking::hover::Hovered;
use bevy::prelude::*;

use crate::ui::tokens::{BUTTON_COLOR, CORNER_RADIUS, HEADING_COLOR, TEXT_SIZE};

pub fn plugin(app: &mut App) {
    app.add_systems(Update, (setup_button, handle_hover));
}

#[derive(EntityEvent)]
pub struct ButtonClickEvent {
    pub entity: Entity,
}

#[derive(Component)]
pub struct PopupButton;

#[derive(Component)]
struct ButtonLabel(String);

pub fn button(label: impl Into<String>) -> impl Bundle {
    (
        PopupButton,
        ButtonLabel(label.into()),
        Hovered::default(),
        Interaction::None,
        Node {
            height: px(28.0),
            padding: UiRect::axes(px(12.0), px(0.0)),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            border_radius: BorderRadius::all(CORNER_RADIUS),
            ..default()
        },
        BackgroundColor(BUTTON_COLOR.into()),
    )
}

fn setup_button(mut commands: Commands, buttons: Query<(Entity, &ButtonLabel), Added<PopupButton>>) {
    for (entity, label) in &buttons {
        commands.entity(entity).with_child((
            Text::new(label.0.clone()),
            TextFont {
                font_size: TEXT_SIZE,
                ..default()
            },
            TextColor(HEADING_COLOR.into()),
        ));

        commands.entity(entity).observe(on_button_click);
        commands.entity(entity).remove::<ButtonLabel>();
    }
}

fn on_button_click(event: On<Pointer<Click>>, mut commands: Commands) {
    commands.trigger(ButtonClickEvent {
        entity: event.event_target(),
    });
}

fn handle_hover(mut buttons: Query<(&Hovered, &mut BackgroundColor), (With<PopupButton>, Changed<Hovered>)>) {
    for (hovered, mut bg) in &mut buttons {
        let color: Srgba = bg.0.into();
        bg.0 = color
            .with_alpha(if hovered.get() { 0.8 } else { 1.0 })
            .into();
    }
}
