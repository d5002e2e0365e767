pub mod aspect_ratio;
pub mod button;
pub mod color_popup;
pub mod message;
pub mod popup;
pub mod slider;
pub mod slider2d;
pub mod text_field;
pub mod tokens;
pub mod tooltip;
