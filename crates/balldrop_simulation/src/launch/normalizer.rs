//! Input Normalizer: raw UI координаты → simulation-space точка запуска
//!
//! Ошибок нет: out-of-range input молча насыщается (clamp),
//! не-числовой текст превращается в 0 (шар падает в начало координат).

use bevy::prelude::*;
use crate::config::{DepthSource, LaunchConfig};

/// Raw текст поля ввода → число
///
/// Пустая строка, мусор, NaN → 0.0. `inf`/`-inf` проходят дальше и
/// насыщаются clamp'ом до границы.
pub fn parse_raw_coordinate(text: &str) -> f32 {
    let value = text.trim().parse::<f32>().unwrap_or(0.0);
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Clamp в [-bound, bound] и деление на scale
///
/// NaN (если пришёл мимо `parse_raw_coordinate`) тоже → 0.
pub fn normalize_axis(raw: f32, config: &LaunchConfig) -> f32 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(-config.bound, config.bound) / config.scale
}

/// Точка запуска в simulation space
pub fn launch_target(raw_x: f32, raw_y: f32, config: &LaunchConfig) -> Vec3 {
    let x = normalize_axis(raw_x, config);
    let y = normalize_axis(raw_y, config);
    let z = match config.depth {
        DepthSource::MirrorY => y,
        DepthSource::Fixed(depth) => depth,
    };

    Vec3::new(x, y, z)
}
