//! Launch pipeline: UI → LaunchRequest → Input Normalizer → Projectile Factory
//!
//! Клиент пишет LaunchRequest по клику (значения полей читаются синхронно).
//! Первый запуск убирает resting ball со сцены.

use bevy::prelude::*;

use crate::config::DemoConfig;
use crate::logger;
use crate::projectile::{despawn_pair, ProjectileSlot, RestingBall};

pub mod normalizer;


pub use normalizer::{launch_target, normalize_axis, parse_raw_coordinate};

/// Event: пользователь нажал "Drop" (raw значения полей X/Y, до нормализации)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LaunchRequest {
    pub raw_x: f32,
    pub raw_y: f32,
}

impl LaunchRequest {
    pub fn new(raw_x: f32, raw_y: f32) -> Self {
        Self { raw_x, raw_y }
    }

    /// Из текста полей ввода (не-числа → 0)
    pub fn from_text(raw_x: &str, raw_y: &str) -> Self {
        Self::new(parse_raw_coordinate(raw_x), parse_raw_coordinate(raw_y))
    }
}

/// Сколько запусков обработано с начала процесса
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchCounter(pub u64);

/// System: обработать LaunchRequest события
///
/// 1. counter += 1 (первый запуск → despawn resting ball)
/// 2. normalize raw → simulation-space target
/// 3. ProjectileSlot::replace (старый шар уничтожается)
pub fn handle_launch_requests(
    mut commands: Commands,
    mut requests: EventReader<LaunchRequest>,
    mut counter: ResMut<LaunchCounter>,
    mut slot: ResMut<ProjectileSlot>,
    mut resting: ResMut<RestingBall>,
    config: Res<DemoConfig>,
) {
    for request in requests.read() {
        counter.0 += 1;

        if counter.0 == 1 {
            if let Some(pair) = resting.pair.take() {
                despawn_pair(&mut commands, pair);
                logger::log("🗑️ Resting ball removed (first launch)");
            }
        }

        let target = launch_target(request.raw_x, request.raw_y, &config.launch);
        let pair = slot.replace(
            &mut commands,
            target,
            &config.projectile,
            &config.return_to_origin,
        );

        logger::log_info(&format!(
            "🎯 Launch #{}: raw ({}, {}) → target {:?} (body {:?})",
            counter.0, request.raw_x, request.raw_y, target, pair.body
        ));
    }
}

pub struct LaunchPlugin;

impl Plugin for LaunchPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LaunchRequest>()
            .init_resource::<LaunchCounter>()
            .add_systems(Update, handle_launch_requests);
    }
}
