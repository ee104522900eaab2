//! Headless симуляция BALLDROP
//!
//! Запускает один шар без рендера и печатает его позу.
//! Использование: `balldrop_simulation [raw_x] [raw_y] [frames]`

use balldrop_simulation::logger::{self, LogLevel};
use balldrop_simulation::{create_headless_app, DemoConfig, LaunchRequest, ProjectileSlot};
use bevy::prelude::*;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg = |index: usize| args.get(index).map(String::as_str).unwrap_or("");

    let request = LaunchRequest::from_text(arg(0), arg(1));
    let frames: u32 = arg(2).parse().unwrap_or(300);

    if let Some(level) = std::env::var("BALLDROP_LOG").ok().as_deref().and_then(LogLevel::parse) {
        logger::set_log_level(level);
    }

    let mut app = create_headless_app(DemoConfig::default());
    logger::log_info(&format!(
        "Starting BALLDROP headless simulation ({} frames, raw input {:?})",
        frames, request
    ));

    // Startup (пол + resting ball), потом запуск
    app.update();
    app.world_mut().send_event(request);

    for frame in 0..frames {
        app.update();

        if frame % 30 == 0 {
            let Some(pair) = app.world().resource::<ProjectileSlot>().active() else {
                continue;
            };
            if let Some(transform) = app.world().get::<Transform>(pair.visual) {
                logger::log_info(&format!(
                    "Frame {}: ball at ({:.3}, {:.3}, {:.3})",
                    frame, transform.translation.x, transform.translation.y, transform.translation.z
                ));
            }
        }
    }

    logger::log_info("Simulation complete!");
}
