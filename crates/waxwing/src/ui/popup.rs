//! Shared modal popup panel: a full-screen container holding a centered
//! main panel with an optional frosted-glass backdrop. Show/hide run on
//! one timer-driven fade machine per popup; starting a new transition
//! always supersedes the one in flight.

use std::time::Duration;

use bevy::input_focus::InputFocus;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::fade::FadeMachine;
use crate::render::blur::{BlurTargetImage, blur_backdrop};
use crate::ui::tokens::{CORNER_RADIUS_LG, PANEL_BORDER_COLOR, PANEL_COLOR};

pub fn plugin(app: &mut App) {
    app.add_observer(on_show_popup)
        .add_observer(on_hide_popup)
        .add_systems(
            Update,
            (setup_popup_panel, tick_popup_fades, sync_popup_visual),
        );
}

#[derive(Component)]
pub struct PopupPanel;

#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Fade tick period in milliseconds; ten ticks cover a full
    /// transition. Zero makes show/hide instantaneous.
    pub fade_time_ms: u32,
    pub start_visible: bool,
    pub blur_backdrop: bool,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            fade_time_ms: 30,
            start_visible: false,
            blur_backdrop: true,
        }
    }
}

impl PopupConfig {
    fn fades(&self) -> bool {
        self.fade_time_ms > 0
    }
}

/// Fade machine plus the periodic timer driving it.
#[derive(Component)]
pub struct PopupFade {
    pub machine: FadeMachine,
    timer: Timer,
}

impl PopupFade {
    fn new(machine: FadeMachine) -> Self {
        Self {
            machine,
            timer: Timer::new(Duration::ZERO, TimerMode::Repeating),
        }
    }

    fn restart(&mut self, period_ms: u32) {
        self.timer = Timer::new(Duration::from_millis(period_ms as u64), TimerMode::Repeating);
    }
}

/// The focusable centered panel; points back at the popup root.
#[derive(Component)]
pub struct PopupMainPanel(pub Entity);

/// Content slot consumers fill; points back at the popup root.
#[derive(Component)]
pub struct PopupContent(pub Entity);

#[derive(EntityEvent)]
pub struct ShowPopup {
    pub entity: Entity,
}

#[derive(EntityEvent)]
pub struct HidePopup {
    pub entity: Entity,
}

#[derive(Default)]
pub struct PopupProps {
    pub config: PopupConfig,
}

impl PopupProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fade_time_ms(mut self, fade_time_ms: u32) -> Self {
        self.config.fade_time_ms = fade_time_ms;
        self
    }

    pub fn start_visible(mut self) -> Self {
        self.config.start_visible = true;
        self
    }

    pub fn without_blur_backdrop(mut self) -> Self {
        self.config.blur_backdrop = false;
        self
    }
}

pub fn popup_panel(props: PopupProps) -> impl Bundle {
    let machine = if props.config.start_visible {
        FadeMachine::visible_from_start()
    } else {
        FadeMachine::default()
    };
    let visibility = if machine.is_visible() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };

    (
        PopupPanel,
        props.config,
        PopupFade::new(machine),
        Node {
            position_type: PositionType::Absolute,
            width: percent(100),
            height: percent(100),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        GlobalZIndex(100),
        visibility,
        Interaction::None,
    )
}

/// Intended resting alpha of a node whose color the fade overwrites;
/// without it a fade would flatten translucent surfaces to fully opaque.
#[derive(Component)]
pub struct BaseAlpha(pub f32);

const MAIN_PANEL_ALPHA: f32 = 0.85;

fn setup_popup_panel(
    mut commands: Commands,
    popups: Query<(Entity, &PopupConfig), Added<PopupPanel>>,
    blur_target: Option<Res<BlurTargetImage>>,
) {
    for (entity, config) in &popups {
        let main_panel = commands
            .spawn((
                PopupMainPanel(entity),
                BaseAlpha(MAIN_PANEL_ALPHA),
                Node {
                    border: UiRect::all(px(1.0)),
                    border_radius: BorderRadius::all(CORNER_RADIUS_LG),
                    flex_direction: FlexDirection::Column,
                    overflow: Overflow::clip(),
                    ..default()
                },
                BackgroundColor(PANEL_COLOR.with_alpha(MAIN_PANEL_ALPHA).into()),
                BorderColor::all(PANEL_BORDER_COLOR),
                Interaction::None,
            ))
            .id();

        if config.blur_backdrop {
            if let Some(target) = blur_target.as_deref() {
                commands
                    .entity(main_panel)
                    .with_child(blur_backdrop(target));
            }
        }

        commands.entity(main_panel).with_child((
            PopupContent(entity),
            Node {
                flex_direction: FlexDirection::Column,
                ..default()
            },
        ));

        commands.entity(entity).add_child(main_panel);
    }
}

fn on_show_popup(
    event: On<ShowPopup>,
    mut popups: Query<(&PopupConfig, &mut PopupFade), With<PopupPanel>>,
    main_panels: Query<(Entity, &PopupMainPanel)>,
    mut input_focus: ResMut<InputFocus>,
) {
    let Ok((config, mut fade)) = popups.get_mut(event.entity) else {
        return;
    };

    fade.machine.show(config.fades());
    fade.restart(config.fade_time_ms);

    // Route keyboard/controller input to the modal while it is up.
    for (panel_entity, main) in &main_panels {
        if main.0 == event.entity {
            input_focus.0 = Some(panel_entity);
        }
    }
}

fn on_hide_popup(
    event: On<HidePopup>,
    mut popups: Query<(&PopupConfig, &mut PopupFade), With<PopupPanel>>,
    main_panels: Query<(Entity, &PopupMainPanel)>,
    mut input_focus: ResMut<InputFocus>,
) {
    let Ok((config, mut fade)) = popups.get_mut(event.entity) else {
        return;
    };

    fade.machine.hide(config.fades());
    fade.restart(config.fade_time_ms);

    for (panel_entity, main) in &main_panels {
        if main.0 == event.entity && input_focus.0 == Some(panel_entity) {
            input_focus.0 = None;
        }
    }
}

fn tick_popup_fades(time: Res<Time>, mut popups: Query<&mut PopupFade>) {
    for mut fade in &mut popups {
        if !fade.machine.is_ticking() {
            continue;
        }
        let delta = time.delta();
        let fade = &mut *fade;
        fade.timer.tick(delta);
        for _ in 0..fade.timer.times_finished_this_tick() {
            if !fade.machine.tick() {
                break;
            }
        }
    }
}

fn sync_popup_visual(
    popups: Query<(Entity, &PopupFade), Changed<PopupFade>>,
    mut visibilities: Query<&mut Visibility>,
    children_query: Query<&Children>,
    base_alphas: Query<&BaseAlpha>,
    mut bg_colors: Query<&mut BackgroundColor>,
    mut border_colors: Query<&mut BorderColor>,
    mut text_colors: Query<&mut TextColor>,
    mut image_nodes: Query<&mut ImageNode>,
) {
    for (entity, fade) in &popups {
        if let Ok(mut visibility) = visibilities.get_mut(entity) {
            *visibility = if fade.machine.is_visible() {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }

        apply_alpha_recursive(
            entity,
            fade.machine.opacity(),
            &children_query,
            &base_alphas,
            &mut bg_colors,
            &mut border_colors,
            &mut text_colors,
            &mut image_nodes,
        );
    }
}

/// Bevy UI has no inherited opacity, so a fade multiplies into every
/// paintable color in the subtree.
pub(crate) fn apply_alpha_recursive(
    entity: Entity,
    alpha: f32,
    children_query: &Query<&Children>,
    base_alphas: &Query<&BaseAlpha>,
    bg_colors: &mut Query<&mut BackgroundColor>,
    border_colors: &mut Query<&mut BorderColor>,
    text_colors: &mut Query<&mut TextColor>,
    image_nodes: &mut Query<&mut ImageNode>,
) {
    let base = base_alphas.get(entity).map(|b| b.0).unwrap_or(1.0);

    if let Ok(mut bg) = bg_colors.get_mut(entity) {
        let color: Srgba = bg.0.into();
        bg.0 = color.with_alpha(alpha * base).into();
    }

    if let Ok(mut border) = border_colors.get_mut(entity) {
        let color: Srgba = border.top.into();
        *border = BorderColor::all(color.with_alpha(alpha * base));
    }

    if let Ok(mut text_color) = text_colors.get_mut(entity) {
        let color: Srgba = text_color.0.into();
        text_color.0 = color.with_alpha(alpha).into();
    }

    if let Ok(mut image) = image_nodes.get_mut(entity) {
        let color: Srgba = image.color.into();
        image.color = color.with_alpha(alpha).into();
    }

    if let Ok(children) = children_query.get(entity) {
        for child in children.iter() {
            apply_alpha_recursive(
                child,
                alpha,
                children_query,
                base_alphas,
                bg_colors,
                border_colors,
                text_colors,
                image_nodes,
            );
        }
    }
}
