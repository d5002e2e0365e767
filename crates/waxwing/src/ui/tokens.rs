use bevy::color::palettes::tailwind;
use bevy::prelude::*;

// corner radius
pub const CORNER_RADIUS: Val = Val::Px(4.0);
pub const CORNER_RADIUS_LG: Val = Val::Px(6.0);

// colors
pub const ACCENT_COLOR: Srgba = tailwind::BLUE_500;
pub const PANEL_COLOR: Srgba = tailwind::ZINC_800;
pub const PANEL_BORDER_COLOR: Srgba = tailwind::ZINC_700;
pub const BUTTON_COLOR: Srgba = tailwind::ZINC_700;
pub const TEXT_COLOR: Srgba = tailwind::ZINC_200;
pub const HEADING_COLOR: Srgba = tailwind::ZINC_50;
pub const TOOLTIP_COLOR: Srgba = tailwind::ZINC_900;

// text sizes
pub const TEXT_SIZE: f32 = 12.0;
pub const TEXT_SIZE_LG: f32 = 14.0;
pub const TEXT_SIZE_XL: f32 = 16.0;
