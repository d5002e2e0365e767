//! Engine-free widget logic: value ranges, drag recognition, fade state,
//! color bridging and blur planning. Everything in here is plain data and
//! math so it can be exercised without an [`App`](bevy::app::App).

pub mod blur;
pub mod color;
pub mod fade;
pub mod gesture;
pub mod range;
pub mod slider;
