//! Window resize → pixel ratio (scale factor) capped at 2
//!
//! Aspect камеры и размер surface Bevy пересчитывает сам на WindowResized.

use bevy::prelude::*;
use bevy::window::WindowResized;
use balldrop_simulation::logger;

const MAX_PIXEL_RATIO: f32 = 2.0;

pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, cap_pixel_ratio_on_resize);
    }
}

pub fn capped_pixel_ratio(native: f32) -> f32 {
    native.min(MAX_PIXEL_RATIO)
}

fn cap_pixel_ratio_on_resize(
    mut resized: EventReader<WindowResized>,
    mut windows: Query<&mut Window>,
) {
    for event in resized.read() {
        let Ok(mut window) = windows.get_mut(event.window) else {
            continue;
        };

        let capped = capped_pixel_ratio(window.resolution.base_scale_factor());
        if window.resolution.scale_factor_override() != Some(capped) {
            window.resolution.set_scale_factor_override(Some(capped));
        }

        logger::log(&format!(
            "🖥️ Resized to {:.0}x{:.0} (pixel ratio {:.2})",
            event.width, event.height, capped
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_ratio_cap() {
        assert_eq!(capped_pixel_ratio(1.0), 1.0);
        assert_eq!(capped_pixel_ratio(1.5), 1.5);
        assert_eq!(capped_pixel_ratio(2.0), 2.0);
        assert_eq!(capped_pixel_ratio(3.0), 2.0);
    }
}
