//! Color picking popup: a saturation/value gradient square (2D slider),
//! a vertical hue bar in degrees, R/G/B/A channel rows and a submit
//! button, all reading from and writing to one canonical [`Hsva`] state.
//!
//! Every originating control routes through the matching bridge
//! operation; the returned [`SyncPlan`] decides whether the hue bar is
//! rewritten and whether the gradient texture is rebaked. The gradient
//! rebake is the expensive path, so only hue-moving edits pay for it.

use bevy::picking::prelude::Pickable;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages};

use crate::core::color::{Hsva, RgbChannel, SyncPlan, display_value, hsv_to_rgb};
use crate::core::range::Range2D;
use crate::ui::button::{ButtonClickEvent, button};
use crate::ui::popup::{HidePopup, PopupContent, ShowPopup};
use crate::ui::slider::{
    Slider, SliderChangeEvent, SliderDragger, SliderProps, slider,
};
use crate::ui::slider2d::{
    Slider2D, Slider2DChangeEvent, Slider2DDragger, Slider2DProps, slider_2d,
};
use crate::ui::tokens::{HEADING_COLOR, TEXT_COLOR, TEXT_SIZE, TEXT_SIZE_XL};

const GRADIENT_TEXTURE_SIZE: u32 = 64;
const HUE_TEXTURE_HEIGHT: u32 = 64;
const GRADIENT_AREA_SIZE: f32 = 200.0;
const HUE_BAR_WIDTH: f32 = 18.0;

pub fn plugin(app: &mut App) {
    app.add_observer(on_show_color_popup)
        .add_observer(on_gradient_change)
        .add_observer(on_row_change)
        .add_observer(on_submit_click)
        .add_observer(on_color_popup_hidden)
        .add_systems(Update, (setup_color_popup, apply_color_sync));
}

#[derive(Component)]
pub struct ColorPopup {
    heading: String,
    button_label: String,
    state: Hsva,
    pending: Option<SyncPlan>,
}

impl ColorPopup {
    pub fn state(&self) -> Hsva {
        self.state
    }

    fn queue(&mut self, plan: SyncPlan) {
        self.pending = Some(match self.pending {
            Some(prev) => SyncPlan {
                update_hue: prev.update_hue || plan.update_hue,
                update_gradient: prev.update_gradient || plan.update_gradient,
            },
            None => plan,
        });
    }
}

/// Opens the popup seeded with `color`.
#[derive(EntityEvent)]
pub struct ShowColorPopup {
    pub entity: Entity,
    pub color: [f32; 4],
}

/// The submit button was pressed; carries the final color.
#[derive(EntityEvent)]
pub struct ColorSubmitted {
    pub entity: Entity,
    pub color: [f32; 4],
}

pub struct ColorPopupProps {
    pub heading: String,
    pub button_label: String,
}

impl Default for ColorPopupProps {
    fn default() -> Self {
        Self {
            heading: "Pick Colour".into(),
            button_label: "Close".into(),
        }
    }
}

/// Add next to [`popup_panel`](crate::ui::popup::popup_panel) on the same
/// entity.
pub fn color_popup(props: ColorPopupProps) -> impl Bundle {
    ColorPopup {
        heading: props.heading,
        button_label: props.button_label,
        state: Hsva::default(),
        pending: None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChannelControl {
    Red,
    Green,
    Blue,
    Alpha,
}

impl ChannelControl {
    const ALL: [Self; 4] = [Self::Red, Self::Green, Self::Blue, Self::Alpha];

    fn label(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Alpha => "Alpha",
        }
    }

    fn rgb_channel(self) -> Option<RgbChannel> {
        match self {
            Self::Red => Some(RgbChannel::Red),
            Self::Green => Some(RgbChannel::Green),
            Self::Blue => Some(RgbChannel::Blue),
            Self::Alpha => None,
        }
    }

    fn value(self, rgba: [f32; 4]) -> f32 {
        match self {
            Self::Red => rgba[0],
            Self::Green => rgba[1],
            Self::Blue => rgba[2],
            Self::Alpha => rgba[3],
        }
    }
}

#[derive(Component)]
struct GradientSlider(Entity);

#[derive(Component)]
struct GradientImage(Entity);

#[derive(Component)]
struct HueSliderRow(Entity);

#[derive(Component)]
struct HueStripImage(Entity);

#[derive(Component)]
struct ChannelSliderRow {
    popup: Entity,
    control: ChannelControl,
}

#[derive(Component)]
struct ChannelValueLabel {
    popup: Entity,
    control: ChannelControl,
}

#[derive(Component)]
struct ColorSubmitButton(Entity);

/// Baked textures, alive while the popup is shown.
#[derive(Component)]
struct ColorPopupTextures {
    gradient: Handle<Image>,
    hue: Handle<Image>,
}

#[derive(Component)]
struct ColorUiBuilt;

fn setup_color_popup(
    mut commands: Commands,
    popups: Query<(Entity, &ColorPopup), Without<ColorUiBuilt>>,
    contents: Query<(Entity, &PopupContent)>,
) {
    for (popup, color_popup) in &popups {
        let Some((content_entity, _)) = contents.iter().find(|(_, c)| c.0 == popup) else {
            continue;
        };
        commands.entity(popup).insert(ColorUiBuilt);

        commands.entity(content_entity).with_children(|parent| {
            parent
                .spawn(Node {
                    padding: UiRect::all(px(16.0)),
                    ..default()
                })
                .with_child((
                    Text::new(color_popup.heading.clone()),
                    TextFont {
                        font_size: TEXT_SIZE_XL,
                        ..default()
                    },
                    TextColor(HEADING_COLOR.into()),
                ));

            // gradient square and hue bar side by side
            parent
                .spawn(Node {
                    padding: UiRect::axes(px(16.0), px(4.0)),
                    column_gap: px(12.0),
                    ..default()
                })
                .with_children(|area| {
                    area.spawn((
                        GradientSlider(popup),
                        slider_2d(Slider2DProps::new(Range2D::default(), Vec2::ZERO)),
                    ))
                    .insert(Node {
                        width: px(GRADIENT_AREA_SIZE),
                        height: px(GRADIENT_AREA_SIZE),
                        ..default()
                    })
                    .with_child((
                        GradientImage(popup),
                        Pickable::IGNORE,
                        ImageNode::default(),
                        ZIndex(-1),
                        Node {
                            position_type: PositionType::Absolute,
                            width: percent(100),
                            height: percent(100),
                            ..default()
                        },
                    ));

                    area.spawn((
                        HueSliderRow(popup),
                        slider(SliderProps::new(0.0, 360.0, 0.0).vertical()),
                    ))
                    .insert(Node {
                        width: px(HUE_BAR_WIDTH),
                        height: px(GRADIENT_AREA_SIZE),
                        ..default()
                    })
                    .with_child((
                        HueStripImage(popup),
                        Pickable::IGNORE,
                        ImageNode::default(),
                        ZIndex(-1),
                        Node {
                            position_type: PositionType::Absolute,
                            width: percent(100),
                            height: percent(100),
                            ..default()
                        },
                    ));
                });

            // channel rows
            for control in ChannelControl::ALL {
                parent
                    .spawn(Node {
                        padding: UiRect::axes(px(16.0), px(4.0)),
                        column_gap: px(8.0),
                        align_items: AlignItems::Center,
                        ..default()
                    })
                    .with_children(|row| {
                        row.spawn((
                            Text::new(control.label()),
                            TextFont {
                                font_size: TEXT_SIZE,
                                ..default()
                            },
                            TextColor(TEXT_COLOR.into()),
                            Node {
                                width: px(40.0),
                                ..default()
                            },
                        ));

                        row.spawn((
                            ChannelSliderRow {
                                popup,
                                control,
                            },
                            slider(SliderProps::new(0.0, 1.0, 0.0)),
                        ))
                        .insert(Node {
                            width: px(160.0),
                            height: px(HUE_BAR_WIDTH),
                            ..default()
                        });

                        row.spawn((
                            ChannelValueLabel {
                                popup,
                                control,
                            },
                            Text::new("0"),
                            TextFont {
                                font_size: TEXT_SIZE,
                                ..default()
                            },
                            TextColor(TEXT_COLOR.into()),
                            Node {
                                width: px(40.0),
                                ..default()
                            },
                        ));
                    });
            }

            parent
                .spawn(Node {
                    padding: UiRect::all(px(16.0)),
                    justify_content: JustifyContent::End,
                    ..default()
                })
                .with_child((
                    ColorSubmitButton(popup),
                    button(color_popup.button_label.clone()),
                ));
        });
    }
}

fn on_show_color_popup(
    event: On<ShowColorPopup>,
    mut popups: Query<&mut ColorPopup>,
    mut images: ResMut<Assets<Image>>,
    mut gradient_images: Query<(&GradientImage, &mut ImageNode), Without<HueStripImage>>,
    mut hue_images: Query<(&HueStripImage, &mut ImageNode), Without<GradientImage>>,
    mut channel_sliders: Query<(&ChannelSliderRow, &mut Slider)>,
    mut commands: Commands,
) {
    let Ok(mut popup) = popups.get_mut(event.entity) else {
        return;
    };

    popup.state = Hsva::from_rgba(event.color);
    popup.queue(SyncPlan {
        update_hue: true,
        update_gradient: true,
    });

    let gradient = images.add(bake_gradient_texture(popup.state.h));
    let hue = images.add(bake_hue_strip_texture());

    for (marker, mut image) in &mut gradient_images {
        if marker.0 == event.entity {
            image.image = gradient.clone();
        }
    }
    for (marker, mut image) in &mut hue_images {
        if marker.0 == event.entity {
            image.image = hue.clone();
        }
    }

    // The alpha row is only seeded here; nothing else moves it.
    for (row, mut slider) in &mut channel_sliders {
        if row.popup == event.entity && row.control == ChannelControl::Alpha {
            slider.set_value_without_notify(popup.state.a);
        }
    }

    commands
        .entity(event.entity)
        .insert(ColorPopupTextures { gradient, hue });
    commands.trigger(ShowPopup {
        entity: event.entity,
    });
}

fn on_gradient_change(
    event: On<Slider2DChangeEvent>,
    gradient_sliders: Query<&GradientSlider>,
    mut popups: Query<&mut ColorPopup>,
) {
    let Ok(marker) = gradient_sliders.get(event.entity) else {
        return;
    };
    let Ok(mut popup) = popups.get_mut(marker.0) else {
        return;
    };

    let value = event.value;
    let plan = popup.state.set_saturation_value(value.x, value.y);
    popup.queue(plan);
}

fn on_row_change(
    event: On<SliderChangeEvent>,
    hue_rows: Query<&HueSliderRow>,
    channel_rows: Query<&ChannelSliderRow>,
    mut popups: Query<&mut ColorPopup>,
) {
    if let Ok(marker) = hue_rows.get(event.entity) {
        if let Ok(mut popup) = popups.get_mut(marker.0) {
            let plan = popup.state.set_hue_degrees(event.value);
            popup.queue(plan);
        }
        return;
    }

    let Ok(row) = channel_rows.get(event.entity) else {
        return;
    };
    let Ok(mut popup) = popups.get_mut(row.popup) else {
        return;
    };

    match row.control.rgb_channel() {
        Some(channel) => {
            let plan = popup.state.set_rgb_channel(channel, event.value);
            popup.queue(plan);
        }
        None => {
            popup.state.set_alpha(event.value);
            popup.queue(SyncPlan {
                update_hue: false,
                update_gradient: false,
            });
        }
    }
}

/// Re-synchronizes the dependent controls from the canonical state. The
/// RGB rows always pick up their derived (display-rounded) values; the
/// hue bar and the gradient square only refresh when the plan asks,
/// which keeps an in-progress drag from being overwritten by its own
/// echo.
fn apply_color_sync(
    mut popups: Query<(Entity, &mut ColorPopup, Option<&ColorPopupTextures>)>,
    mut images: ResMut<Assets<Image>>,
    mut gradient_sliders: Query<(&GradientSlider, &mut Slider2D)>,
    mut rows: Query<(&ChannelSliderRow, &mut Slider), Without<HueSliderRow>>,
    mut hue_rows: Query<(&HueSliderRow, &mut Slider), Without<ChannelSliderRow>>,
    mut value_labels: Query<(&ChannelValueLabel, &mut Text)>,
    mut gradient_draggers: Query<(&Slider2DDragger, &mut BackgroundColor), Without<SliderDragger>>,
    mut row_draggers: Query<(&SliderDragger, &mut BackgroundColor), Without<Slider2DDragger>>,
) {
    for (popup_entity, mut popup, textures) in &mut popups {
        let Some(plan) = popup.pending.take() else {
            continue;
        };
        let state = popup.state;
        let rgba = state.to_rgba();

        for (row, mut slider) in &mut rows {
            if row.popup != popup_entity || row.control == ChannelControl::Alpha {
                continue;
            }
            slider.set_value_without_notify(display_value(row.control.value(rgba)));
        }

        for (label, mut text) in &mut value_labels {
            if label.popup != popup_entity {
                continue;
            }
            **text = format!("{:.3}", display_value(label.control.value(rgba)));
        }

        if plan.update_hue {
            for (marker, mut slider) in &mut hue_rows {
                if marker.0 == popup_entity {
                    slider.set_value_without_notify(state.hue_degrees());
                }
            }
        }

        if plan.update_gradient {
            if let Some(textures) = textures {
                images.insert(textures.gradient.id(), bake_gradient_texture(state.h));
            }
            for (marker, mut slider) in &mut gradient_sliders {
                if marker.0 == popup_entity {
                    slider.set_value_without_notify(Vec2::new(state.s, state.v));
                }
            }
        }

        // swatches
        let (r, g, b) = hsv_to_rgb(state.h, state.s, state.v);
        for (marker, mut bg) in &mut gradient_draggers {
            let Ok((gradient, _)) = gradient_sliders.get(marker.0) else {
                continue;
            };
            if gradient.0 == popup_entity {
                bg.0 = Srgba::new(r, g, b, 1.0).into();
            }
        }
        let (hr, hg, hb) = hsv_to_rgb(state.h, 1.0, 1.0);
        for (marker, mut bg) in &mut row_draggers {
            let Ok((hue, _)) = hue_rows.get(marker.0) else {
                continue;
            };
            if hue.0 == popup_entity {
                bg.0 = Srgba::new(hr, hg, hb, 1.0).into();
            }
        }
    }
}

fn on_submit_click(
    event: On<ButtonClickEvent>,
    submit_buttons: Query<&ColorSubmitButton>,
    popups: Query<&ColorPopup>,
    mut commands: Commands,
) {
    let Ok(submit) = submit_buttons.get(event.entity) else {
        return;
    };
    let Ok(popup) = popups.get(submit.0) else {
        return;
    };

    commands.trigger(ColorSubmitted {
        entity: submit.0,
        color: popup.state.to_rgba(),
    });
    commands.trigger(HidePopup { entity: submit.0 });
}

/// Baked textures are released as soon as the popup starts hiding.
fn on_color_popup_hidden(
    event: On<HidePopup>,
    popups: Query<&ColorPopupTextures, With<ColorPopup>>,
    mut images: ResMut<Assets<Image>>,
    mut gradient_images: Query<(&GradientImage, &mut ImageNode), Without<HueStripImage>>,
    mut hue_images: Query<(&HueStripImage, &mut ImageNode), Without<GradientImage>>,
    mut commands: Commands,
) {
    let Ok(textures) = popups.get(event.entity) else {
        return;
    };

    images.remove(textures.gradient.id());
    images.remove(textures.hue.id());

    for (marker, mut image) in &mut gradient_images {
        if marker.0 == event.entity {
            image.image = Handle::default();
        }
    }
    for (marker, mut image) in &mut hue_images {
        if marker.0 == event.entity {
            image.image = Handle::default();
        }
    }

    commands.entity(event.entity).remove::<ColorPopupTextures>();
}

/// Saturation runs left→right, value bottom→top, hue fixed.
fn bake_gradient_texture(hue: f32) -> Image {
    let size = GRADIENT_TEXTURE_SIZE;
    let mut data = Vec::with_capacity((size * size * 4) as usize);

    for y in 0..size {
        let v = 1.0 - y as f32 / (size - 1) as f32;
        for x in 0..size {
            let s = x as f32 / (size - 1) as f32;
            let (r, g, b) = hsv_to_rgb(hue, s, v);
            data.push((r * 255.0).clamp(0.0, 255.0) as u8);
            data.push((g * 255.0).clamp(0.0, 255.0) as u8);
            data.push((b * 255.0).clamp(0.0, 255.0) as u8);
            data.push(255);
        }
    }

    new_texture(size, size, data)
}

/// Full-saturation hue ramp, maximum hue at the top to match the
/// vertical slider's orientation.
fn bake_hue_strip_texture() -> Image {
    let height = HUE_TEXTURE_HEIGHT;
    let mut data = Vec::with_capacity((height * 4) as usize);

    for y in 0..height {
        let hue = 1.0 - y as f32 / (height - 1) as f32;
        let (r, g, b) = hsv_to_rgb(hue, 1.0, 1.0);
        data.push((r * 255.0).clamp(0.0, 255.0) as u8);
        data.push((g * 255.0).clamp(0.0, 255.0) as u8);
        data.push((b * 255.0).clamp(0.0, 255.0) as u8);
        data.push(255);
    }

    new_texture(1, height, data)
}

fn new_texture(width: u32, height: u32, data: Vec<u8>) -> Image {
    let mut image = Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        default(),
    );
    image.texture_descriptor.usage = TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST;
    image
}
