#[path = "../helpers/mod.rs"]
mod helpers;

mod color_popup;
mod slider2d;
