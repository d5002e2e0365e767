mod blur;
mod gesture;
mod range;
mod slider;
