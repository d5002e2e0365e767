//! Frosted-glass widget kit for Bevy: a 2D color-picking slider, modal
//! popups with a shared fade driver, tooltips, aspect-ratio letterboxing
//! and a backdrop-blur render feature.
//!
//! Add [`WaxwingPlugin`] and spawn widgets from the builder functions in
//! [`ui`]; the pure state machines and math live in [`core`] and can be
//! used on their own.

pub mod core;
pub mod render;
pub mod ui;

use bevy::input_focus::InputFocus;
use bevy::prelude::*;

use render::blur::BlurBackdropPlugin;

pub struct WaxwingPlugin;

impl Plugin for WaxwingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputFocus>();

        app.add_plugins(BlurBackdropPlugin);

        ui::button::plugin(app);
        ui::slider2d::plugin(app);
        ui::slider::plugin(app);
        ui::popup::plugin(app);
        ui::message::plugin(app);
        ui::text_field::plugin(app);
        ui::color_popup::plugin(app);
        ui::tooltip::plugin(app);
        ui::aspect_ratio::plugin(app);
    }
}

pub mod prelude {
    pub use crate::WaxwingPlugin;
    pub use crate::core::blur::BlurSettings;
    pub use crate::core::color::Hsva;
    pub use crate::core::gesture::PointerPolicy;
    pub use crate::core::range::Range2D;
    pub use crate::render::blur::{BackdropWatch, BlurBackdrop, BlurTargetImage, blur_backdrop};
    pub use crate::ui::aspect_ratio::{AspectRatioPadding, aspect_ratio_padding};
    pub use crate::ui::color_popup::{
        ColorPopup, ColorPopupProps, ColorSubmitted, ShowColorPopup, color_popup,
    };
    pub use crate::ui::message::{
        PopupMessage, PopupMessageAccepted, PopupMessageCancelled, ShowPopupMessage, popup_message,
    };
    pub use crate::ui::popup::{
        HidePopup, PopupConfig, PopupPanel, PopupProps, ShowPopup, popup_panel,
    };
    pub use crate::ui::slider::{Slider, SliderChangeEvent, SliderProps, slider};
    pub use crate::ui::slider2d::{
        Slider2D, Slider2DChangeEvent, Slider2DProps, slider_2d,
    };
    pub use crate::ui::text_field::{
        PopupTextField, PopupTextSubmitted, ShowPopupTextField, popup_text_field,
    };
    pub use crate::ui::tooltip::{Tooltip, TooltipSource, tooltip};
}
