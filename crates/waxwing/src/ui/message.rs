//! Confirmation popup: heading, message body and an accept/cancel button
//! bar over the shared [`PopupPanel`](crate::ui::popup::PopupPanel).

use bevy::prelude::*;

use crate::ui::button::{ButtonClickEvent, button};
use crate::ui::popup::{HidePopup, PopupContent, ShowPopup};
use crate::ui::tokens::{HEADING_COLOR, TEXT_COLOR, TEXT_SIZE_LG, TEXT_SIZE_XL};

pub fn plugin(app: &mut App) {
    app.add_observer(on_show_message)
        .add_observer(on_accept_click)
        .add_observer(on_cancel_click)
        .add_systems(Update, (setup_popup_message, sync_message_content));
}

#[derive(Component, Default)]
pub struct PopupMessage {
    heading: String,
    message: String,
    accept_label: Option<String>,
    cancel_label: Option<String>,
}

/// Opens the message popup with fresh content. A `None` label leaves the
/// corresponding button out entirely.
#[derive(EntityEvent)]
pub struct ShowPopupMessage {
    pub entity: Entity,
    pub heading: String,
    pub message: String,
    pub accept_label: Option<String>,
    pub cancel_label: Option<String>,
}

#[derive(EntityEvent)]
pub struct PopupMessageAccepted {
    pub entity: Entity,
}

#[derive(EntityEvent)]
pub struct PopupMessageCancelled {
    pub entity: Entity,
}

#[derive(Component)]
struct MessageHeading(Entity);

#[derive(Component)]
struct MessageBody(Entity);

#[derive(Component)]
struct MessageAcceptButton(Entity);

#[derive(Component)]
struct MessageCancelButton(Entity);

/// Present once the content subtree has been spawned.
#[derive(Component)]
struct MessageUiBuilt;

/// Add next to [`popup_panel`](crate::ui::popup::popup_panel) on the same
/// entity.
pub fn popup_message() -> impl Bundle {
    PopupMessage::default()
}

fn setup_popup_message(
    mut commands: Commands,
    messages: Query<Entity, (With<PopupMessage>, Without<MessageUiBuilt>)>,
    contents: Query<(Entity, &PopupContent)>,
) {
    for popup in &messages {
        // The content slot spawns a frame after the popup bundle.
        let Some((content_entity, _)) = contents.iter().find(|(_, c)| c.0 == popup) else {
            continue;
        };
        commands.entity(popup).insert(MessageUiBuilt);

        commands.entity(content_entity).with_children(|parent| {
            parent
                .spawn(Node {
                    padding: UiRect::all(px(16.0)),
                    ..default()
                })
                .with_child((
                    MessageHeading(popup),
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
                    max_width: px(360.0),
                    ..default()
                })
                .with_child((
                    MessageBody(popup),
                    Text::new(""),
                    TextFont {
                        font_size: TEXT_SIZE_LG,
                        ..default()
                    },
                    TextColor(TEXT_COLOR.into()),
                ));

            parent
                .spawn(Node {
                    padding: UiRect::all(px(16.0)),
                    column_gap: px(6.0),
                    justify_content: JustifyContent::End,
                    ..default()
                })
                .with_children(|bar| {
                    bar.spawn((MessageCancelButton(popup), button("No")));
                    bar.spawn((MessageAcceptButton(popup), button("Yes")));
                });
        });
    }
}

fn on_show_message(
    event: On<ShowPopupMessage>,
    mut messages: Query<&mut PopupMessage>,
    mut commands: Commands,
) {
    let Ok(mut message) = messages.get_mut(event.entity) else {
        return;
    };

    message.heading = event.heading.clone();
    message.message = event.message.clone();
    message.accept_label = event.accept_label.clone();
    message.cancel_label = event.cancel_label.clone();

    commands.trigger(ShowPopup {
        entity: event.entity,
    });
}

fn sync_message_content(
    messages: Query<(Entity, &PopupMessage), Or<(Changed<PopupMessage>, Added<MessageUiBuilt>)>>,
    mut headings: Query<(&MessageHeading, &mut Text), Without<MessageBody>>,
    mut bodies: Query<(&MessageBody, &mut Text), Without<MessageHeading>>,
    mut accept_buttons: Query<
        (&MessageAcceptButton, &mut Node, &Children),
        Without<MessageCancelButton>,
    >,
    mut cancel_buttons: Query<
        (&MessageCancelButton, &mut Node, &Children),
        Without<MessageAcceptButton>,
    >,
    mut labels: Query<&mut Text, (Without<MessageHeading>, Without<MessageBody>)>,
) {
    for (popup, message) in &messages {
        for (heading, mut text) in &mut headings {
            if heading.0 == popup {
                **text = message.heading.clone();
            }
        }
        for (body, mut text) in &mut bodies {
            if body.0 == popup {
                **text = message.message.clone();
            }
        }

        for (accept, mut node, children) in &mut accept_buttons {
            if accept.0 != popup {
                continue;
            }
            sync_button(&message.accept_label, &mut node, children, &mut labels);
        }
        for (cancel, mut node, children) in &mut cancel_buttons {
            if cancel.0 != popup {
                continue;
            }
            sync_button(&message.cancel_label, &mut node, children, &mut labels);
        }
    }
}

fn sync_button(
    label: &Option<String>,
    node: &mut Node,
    children: &Children,
    labels: &mut Query<&mut Text, (Without<MessageHeading>, Without<MessageBody>)>,
) {
    node.display = if label.is_some() {
        Display::Flex
    } else {
        Display::None
    };
    if let Some(label) = label {
        for child in children.iter() {
            if let Ok(mut text) = labels.get_mut(child) {
                **text = label.clone();
            }
        }
    }
}

fn on_accept_click(
    event: On<ButtonClickEvent>,
    accept_buttons: Query<&MessageAcceptButton>,
    mut commands: Commands,
) {
    let Ok(accept) = accept_buttons.get(event.entity) else {
        return;
    };
    commands.trigger(PopupMessageAccepted { entity: accept.0 });
    commands.trigger(HidePopup { entity: accept.0 });
}

fn on_cancel_click(
    event: On<ButtonClickEvent>,
    cancel_buttons: Query<&MessageCancelButton>,
    mut commands: Commands,
) {
    let Ok(cancel) = cancel_buttons.get(event.entity) else {
        return;
    };
    commands.trigger(PopupMessageCancelled { entity: cancel.0 });
    commands.trigger(HidePopup { entity: cancel.0 });
}
