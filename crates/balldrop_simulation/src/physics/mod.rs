//! Physics world + Sync Loop
//!
//! Rapier (bevy_rapier3d) делает всю интеграцию и broadphase.
//! Здесь только:
//! - step policy: fixed 1/60 + real delta как accumulator hint, 3 substeps
//! - gravity из конфига
//! - per-frame copy поз body → visual (sync)
//! - contact events → impact speed → hit sound request
//!
//! Порядок в PostUpdate:
//! record_pre_step_velocity → [Rapier SyncBackend → StepSimulation → Writeback]
//! → sync_tracked_pairs, detect_projectile_impacts → trigger_hit_sounds

use bevy::prelude::*;
use bevy::time::TimeSystem;
use bevy::transform::TransformSystem;
use bevy_rapier3d::plugin::PhysicsSet;
use bevy_rapier3d::prelude::*;

use crate::config::{DemoConfig, WorldConfig};
use crate::logger;

pub mod impact;
pub mod sync;

#[cfg(test)]
mod sync_tests;

pub use impact::{
    detect_projectile_impacts, impact_speed_along_normal, record_pre_step_velocity,
    trigger_hit_sounds, HitSound, ImpactTracker, ProjectileImpact,
};
pub use sync::{sync_tracked_pairs, tick_world_clock, WorldClock};

/// Step policy для Rapier: fixed dt, real delta накапливается, `substeps` итераций solver'а
pub fn timestep_mode(world: &WorldConfig) -> TimestepMode {
    TimestepMode::Interpolated {
        dt: world.fixed_dt,
        time_scale: 1.0,
        substeps: world.substeps,
    }
}

/// System: выставить gravity на только что созданный Rapier context
pub fn apply_world_gravity(
    config: Res<DemoConfig>,
    mut contexts: Query<&mut RapierConfiguration, Added<RapierConfiguration>>,
) {
    for mut rapier_config in contexts.iter_mut() {
        rapier_config.gravity = Vec3::new(0.0, config.world.gravity, 0.0);
        logger::log(&format!(
            "⚙️ Rapier gravity set to {:?}",
            rapier_config.gravity
        ));
    }
}

/// Plugin physics world + sync loop
pub struct PhysicsWorldPlugin {
    pub world: WorldConfig,
}

impl Plugin for PhysicsWorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
            .insert_resource(timestep_mode(&self.world))
            .init_resource::<WorldClock>()
            .add_event::<ProjectileImpact>()
            .add_event::<HitSound>();

        app.add_systems(PreUpdate, apply_world_gravity);

        // Clock тикает в First — остальные системы кадра видят актуальный delta
        app.add_systems(First, tick_world_clock.after(TimeSystem));

        app.add_systems(
            PostUpdate,
            (
                record_pre_step_velocity.before(PhysicsSet::SyncBackend),
                sync_tracked_pairs
                    .after(PhysicsSet::Writeback)
                    .before(TransformSystem::TransformPropagate),
                (detect_projectile_impacts, trigger_hit_sounds)
                    .chain()
                    .after(PhysicsSet::Writeback),
            ),
        );
    }
}
