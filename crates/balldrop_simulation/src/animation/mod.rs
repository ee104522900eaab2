//! Return-to-Origin Animator
//!
//! Через `delay` после запуска и в течение `duration` тянет x/z шара к 0,
//! перезаписывая позицию каждый frame. Y остаётся за solver'ом.
//!
//! Владение позицией явное: `PositionAuthority` на body решает каждый frame,
//! чьи x/z авторитетны. Система пишет Transform ДО Rapier SyncBackend,
//! поэтому на время анимации body телепортируется, потом solver снова главный.

use bevy::prelude::*;
use bevy_rapier3d::plugin::PhysicsSet;

use crate::config::DemoConfig;
use crate::logger;
use crate::physics::WorldClock;
use crate::projectile::ProjectileBody;

pub mod return_to_origin;


pub use return_to_origin::{ease_out_quad, PositionAuthority};

/// System: продвинуть return-to-origin анимации и записать x/z в Transform
///
/// Работает в PostUpdate до Rapier SyncBackend (изменённый Transform → teleport body).
/// Delta берётся из WorldClock (тот же frame, что видит sync loop).
pub fn drive_return_to_origin(
    clock: Res<WorldClock>,
    config: Res<DemoConfig>,
    mut bodies: Query<(Entity, &mut PositionAuthority, &mut Transform), With<ProjectileBody>>,
) {
    for (entity, mut authority, mut transform) in bodies.iter_mut() {
        if *authority == PositionAuthority::Physics {
            continue;
        }

        let was_animating = authority.is_animating();
        let current = Vec2::new(transform.translation.x, transform.translation.z);
        let Some(xz) = authority.advance(clock.delta, current, &config.return_to_origin) else {
            continue;
        };

        transform.translation.x = xz.x;
        transform.translation.z = xz.y;

        if !was_animating {
            logger::log(&format!(
                "↩️ Return to origin started: {:?} from ({:.2}, {:.2})",
                entity, current.x, current.y
            ));
        }
        if *authority == PositionAuthority::Physics {
            logger::log(&format!("✓ Return to origin finished: {:?}", entity));
        }
    }
}

pub struct ReturnToOriginPlugin;

impl Plugin for ReturnToOriginPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            drive_return_to_origin.before(PhysicsSet::SyncBackend),
        );
    }
}
