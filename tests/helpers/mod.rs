#![allow(dead_code)]

use bevy::app::ScheduleRunnerPlugin;
use bevy::asset::AssetPlugin;
use bevy::input_focus::InputFocus;
use bevy::prelude::*;

/// Headless app carrying just the widget systems under test, in the
/// same Update schedule the plugin registers them in.
pub fn create_minimal_app() -> App {
    let mut app = App::new();

    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
            std::time::Duration::from_millis(10),
        )),
    );

    app.add_plugins(AssetPlugin::default());
    app.init_asset::<Image>();
    app.init_resource::<InputFocus>();

    waxwing::ui::button::plugin(&mut app);
    waxwing::ui::slider2d::plugin(&mut app);
    waxwing::ui::slider::plugin(&mut app);
    waxwing::ui::popup::plugin(&mut app);
    waxwing::ui::message::plugin(&mut app);
    waxwing::ui::color_popup::plugin(&mut app);

    app
}

pub fn advance_frames(app: &mut App, n: u32) {
    for _ in 0..n {
        app.update();
    }
}

/// Advances the app for approximately the given number of seconds of
/// real time. Fade timers run off the real clock in these tests.
pub fn advance_time(app: &mut App, seconds: f32) {
    let frame_count = (seconds / 0.016).ceil() as u32 + 2;
    let sleep_per_frame = std::time::Duration::from_secs_f64(seconds as f64 / frame_count as f64);
    for _ in 0..frame_count {
        std::thread::sleep(sleep_per_frame);
        app.update();
    }
}
