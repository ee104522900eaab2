//! BALLDROP Simulation Core
//!
//! Headless ECS-симуляция на Bevy 0.16 + Rapier:
//! - Launch pipeline (raw input → normalized target → projectile)
//! - Single active projectile (ProjectileSlot)
//! - Sync loop (Rapier pose → visual entity)
//! - Return-to-origin animator (explicit PositionAuthority)
//! - Impact → hit sound requests
//!
//! Рендер, камера, UI и звук — в balldrop_client. Симуляция только
//! спавнит render handles (BallVisual) и пишет HitSound события.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod animation;
pub mod config;
pub mod launch;
pub mod logger;
pub mod physics;
pub mod projectile;

// Re-exports для удобства
pub use animation::{PositionAuthority, ReturnToOriginPlugin};
pub use config::{
    ContactMaterial, DemoConfig, DepthSource, InvalidConfig, LaunchConfig, ProjectileConfig,
    RestingBallConfig, ReturnConfig, WorldConfig,
};
pub use launch::{LaunchCounter, LaunchPlugin, LaunchRequest};
pub use logger::{LogLevel, LogPrinter, LOGGER_LEVEL};
pub use physics::{HitSound, PhysicsWorldPlugin, ProjectileImpact, WorldClock};
pub use projectile::{
    BallVisual, FloorBody, ProjectileBody, ProjectilePlugin, ProjectileSlot, RestingBall,
    TrackedPair,
};

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: DemoConfig,
}

impl SimulationPlugin {
    pub fn new(config: DemoConfig) -> Self {
        Self { config }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            // Детерминистичный RNG (громкость hit sound)
            .insert_resource(DeterministicRng::new(self.config.world.seed))
            .add_plugins((
                PhysicsWorldPlugin {
                    world: self.config.world,
                },
                ProjectilePlugin,
                LaunchPlugin,
                ReturnToOriginPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт headless Bevy App с полной симуляцией
///
/// Время двигается ровно на `world.fixed_dt` за `app.update()` —
/// траектории воспроизводимы между прогонами. Невалидный конфиг
/// заменяется defaults.
pub fn create_headless_app(config: DemoConfig) -> App {
    let mut app = App::new();
    logger::init_logger();

    let config = match config.validate() {
        Ok(()) => config,
        Err(err) => {
            logger::log_error(&format!("❌ Invalid config: {} — using defaults", err));
            DemoConfig::default()
        }
    };

    let frame = Duration::from_secs_f32(config.world.fixed_dt);
    app.add_plugins((MinimalPlugins, TransformPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(frame))
        .add_plugins(SimulationPlugin::new(config));

    app
}
