//! Single-line text entry popup over the shared panel. Submit hands the
//! entered text to the consumer as an entity event.

use bevy::input_focus::InputFocus;
use bevy::prelude::*;
use bevy_ui_text_input::{
    TextInputBuffer, TextInputMode, TextInputNode, TextInputPlugin, TextInputQueue,
    actions::{TextInputAction, TextInputEdit},
};

use crate::ui::button::{ButtonClickEvent, button};
use crate::ui::popup::{HidePopup, PopupContent, ShowPopup};
use crate::ui::tokens::{
    CORNER_RADIUS, HEADING_COLOR, PANEL_BORDER_COLOR, TEXT_COLOR, TEXT_SIZE_LG, TEXT_SIZE_XL,
};

pub fn plugin(app: &mut App) {
    app.add_plugins(TextInputPlugin)
        .add_observer(on_show_text_field)
        .add_observer(on_submit_click)
        .add_observer(on_cancel_click)
        .add_systems(Update, setup_popup_text_field);
}

#[derive(Component, Default)]
pub struct PopupTextField {
    max_len: usize,
}

#[derive(EntityEvent)]
pub struct ShowPopupTextField {
    pub entity: Entity,
    pub heading: String,
    pub message: String,
    pub initial_text: String,
    pub max_len: usize,
}

/// The submit button was pressed; carries the field's text, truncated to
/// the armed maximum length.
#[derive(EntityEvent)]
pub struct PopupTextSubmitted {
    pub entity: Entity,
    pub text: String,
}

#[derive(Component)]
struct TextFieldHeading(Entity);

#[derive(Component)]
struct TextFieldBody(Entity);

#[derive(Component)]
struct TextFieldInput(Entity);

#[derive(Component)]
struct TextFieldSubmitButton(Entity);

#[derive(Component)]
struct TextFieldCancelButton(Entity);

#[derive(Component)]
struct TextFieldUiBuilt;

/// Add next to [`popup_panel`](crate::ui::popup::popup_panel) on the same
/// entity.
pub fn popup_text_field() -> impl Bundle {
    PopupTextField::default()
}

fn setup_popup_text_field(
    mut commands: Commands,
    fields: Query<Entity, (With<PopupTextField>, Without<TextFieldUiBuilt>)>,
    contents: Query<(Entity, &PopupContent)>,
) {
    for popup in &fields {
        let Some((content_entity, _)) = contents.iter().find(|(_, c)| c.0 == popup) else {
            continue;
        };
        commands.entity(popup).insert(TextFieldUiBuilt);

        commands.entity(content_entity).with_children(|parent| {
            parent
                .spawn(Node {
                    padding: UiRect::all(px(16.0)),
                    ..default()
                })
                .with_child((
                    TextFieldHeading(popup),
                    Text::new(""),
                    TextFont {
                        font_size: TEXT_SIZE_XL,
                        ..default()
                    },
                    TextColor(HEADING_COLOR.into()),
                ));

            parent
                .spawn(Node {
                    padding: UiRect::axes(px(16.0), px(4.0)),
                    flex_direction: FlexDirection::Column,
                    row_gap: px(8.0),
                    max_width: px(360.0),
                    ..default()
                })
                .with_children(|body| {
                    body.spawn((
                        TextFieldBody(popup),
                        Text::new(""),
                        TextFont {
                            font_size: TEXT_SIZE_LG,
                            ..default()
                        },
                        TextColor(TEXT_COLOR.into()),
                    ));

                    body.spawn((
                        TextFieldInput(popup),
                        TextInputNode {
                            mode: TextInputMode::SingleLine,
                            ..default()
                        },
                        Node {
                            width: percent(100),
                            height: px(28.0),
                            padding: UiRect::axes(px(8.0), px(4.0)),
                            border: UiRect::all(px(1.0)),
                            border_radius: BorderRadius::all(CORNER_RADIUS),
                            ..default()
                        },
                        BorderColor::all(PANEL_BORDER_COLOR),
                    ));
                });

            parent
                .spawn(Node {
                    padding: UiRect::all(px(16.0)),
                    column_gap: px(6.0),
                    justify_content: JustifyContent::End,
                    ..default()
                })
                .with_children(|bar| {
                    bar.spawn((TextFieldCancelButton(popup), button("Cancel")));
                    bar.spawn((TextFieldSubmitButton(popup), button("Submit")));
                });
        });
    }
}

fn on_show_text_field(
    event: On<ShowPopupTextField>,
    mut fields: Query<&mut PopupTextField>,
    mut headings: Query<(&TextFieldHeading, &mut Text), Without<TextFieldBody>>,
    mut bodies: Query<(&TextFieldBody, &mut Text), Without<TextFieldHeading>>,
    mut inputs: Query<(Entity, &TextFieldInput, &mut TextInputQueue)>,
    mut input_focus: ResMut<InputFocus>,
    mut commands: Commands,
) {
    let Ok(mut field) = fields.get_mut(event.entity) else {
        return;
    };
    field.max_len = event.max_len;

    for (heading, mut text) in &mut headings {
        if heading.0 == event.entity {
            **text = event.heading.clone();
        }
    }
    for (body, mut text) in &mut bodies {
        if body.0 == event.entity {
            **text = event.message.clone();
        }
    }

    for (input_entity, input, mut queue) in &mut inputs {
        if input.0 != event.entity {
            continue;
        }
        queue.add(TextInputAction::Edit(TextInputEdit::SelectAll));
        queue.add(TextInputAction::Edit(TextInputEdit::Paste(
            event.initial_text.clone(),
        )));
        input_focus.0 = Some(input_entity);
    }

    commands.trigger(ShowPopup {
        entity: event.entity,
    });
}

fn on_submit_click(
    event: On<ButtonClickEvent>,
    submit_buttons: Query<&TextFieldSubmitButton>,
    fields: Query<&PopupTextField>,
    inputs: Query<(&TextFieldInput, &TextInputBuffer)>,
    mut commands: Commands,
) {
    let Ok(submit) = submit_buttons.get(event.entity) else {
        return;
    };
    let popup = submit.0;
    let Ok(field) = fields.get(popup) else {
        return;
    };

    for (input, buffer) in &inputs {
        if input.0 != popup {
            continue;
        }
        let mut text = buffer.get_text();
        if field.max_len > 0 {
            text = text.chars().take(field.max_len).collect();
        }
        commands.trigger(PopupTextSubmitted { entity: popup, text });
    }

    commands.trigger(HidePopup { entity: popup });
}

fn on_cancel_click(
    event: On<ButtonClickEvent>,
    cancel_buttons: Query<&TextFieldCancelButton>,
    mut commands: Commands,
) {
    let Ok(cancel) = cancel_buttons.get(event.entity) else {
        return;
    };
    commands.trigger(HidePopup { entity: cancel.0 });
}
