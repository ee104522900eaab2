use bevy::prelude::*;
use balldrop_simulation::logger::{self, LogLevel};
use balldrop_simulation::SimulationPlugin;

mod audio;
mod camera;
mod logging;
mod rendering;
mod settings;
mod ui;
mod viewport;

use audio::HitSoundPlugin;
use camera::CameraPlugin;
use rendering::RenderingSyncPlugin;
use ui::LaunchFormPlugin;
use viewport::ViewportPlugin;

fn main() {
    logger::set_logger(Box::new(logging::BevyLogPrinter));
    if let Some(level) = std::env::var("BALLDROP_LOG").ok().as_deref().and_then(LogLevel::parse) {
        logger::set_log_level(level);
    }

    let config = settings::load_or_default(&settings::config_path());

    App::new()
        // Bevy defaults (rendering, input, audio, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "BALLDROP".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Simulation (physics, launch pipeline, sync loop)
        .add_plugins(SimulationPlugin::new(config))
        // Rendering (scene, ball meshes)
        .add_plugins(RenderingSyncPlugin)
        // Camera controls (damped orbit)
        .add_plugins(CameraPlugin)
        // Launch form (X/Y fields + Drop button)
        .add_plugins(LaunchFormPlugin)
        // Hit sound playback
        .add_plugins(HitSoundPlugin)
        // Resize → pixel ratio
        .add_plugins(ViewportPlugin)
        .run();
}
