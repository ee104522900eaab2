//! Impact detection → hit sound requests
//!
//! Rapier CollisionEvent::Started не несёт скорость удара, поэтому:
//! 1. До step'а запоминаем linvel каждого projectile (ImpactTracker)
//! 2. На Started берём нормаль контакта из RapierContext
//! 3. impact speed = |(v_a - v_b) · n| по pre-step скоростям
//! 4. Если > threshold → HitSound { volume } (fire-and-forget, клиент играет звук)

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use crate::config::DemoConfig;
use crate::logger;
use crate::projectile::ProjectileBody;
use crate::DeterministicRng;

/// Скорость body перед последним physics step
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ImpactTracker {
    pub pre_step_velocity: Vec3,
}

/// Event: projectile коснулся другого collider'а
#[derive(Event, Debug, Clone)]
pub struct ProjectileImpact {
    pub body: Entity,
    pub other: Entity,
    /// m/s вдоль нормали контакта
    pub impact_speed: f32,
}

/// Event: проиграть hit sound (Simulation → Client)
#[derive(Event, Debug, Clone)]
pub struct HitSound {
    /// [0, 1)
    pub volume: f32,
    pub impact_speed: f32,
}

/// Относительная скорость вдоль нормали контакта
///
/// Без нормали (пара уже без manifold'ов) — модуль относительной скорости.
pub fn impact_speed_along_normal(velocity_a: Vec3, velocity_b: Vec3, normal: Option<Vec3>) -> f32 {
    let relative = velocity_a - velocity_b;
    match normal.and_then(|n| n.try_normalize()) {
        Some(n) => relative.dot(n).abs(),
        None => relative.length(),
    }
}

/// System: запомнить linvel до step'а
pub fn record_pre_step_velocity(mut bodies: Query<(&Velocity, &mut ImpactTracker)>) {
    for (velocity, mut tracker) in bodies.iter_mut() {
        tracker.pre_step_velocity = velocity.linvel;
    }
}

/// System: Rapier CollisionEvent::Started с участием projectile → ProjectileImpact
pub fn detect_projectile_impacts(
    mut collisions: EventReader<CollisionEvent>,
    rapier_context: ReadRapierContext,
    projectiles: Query<(), With<ProjectileBody>>,
    trackers: Query<&ImpactTracker>,
    mut impacts: EventWriter<ProjectileImpact>,
) {
    let Ok(context) = rapier_context.single() else {
        collisions.clear();
        return;
    };

    for event in collisions.read() {
        let (first, second) = match event {
            CollisionEvent::Started(first, second, _) => (*first, *second),
            CollisionEvent::Stopped(..) => continue,
        };

        let (body, other) = if projectiles.contains(first) {
            (first, second)
        } else if projectiles.contains(second) {
            (second, first)
        } else {
            continue;
        };

        let velocity_of = |entity: Entity| {
            trackers
                .get(entity)
                .map(|tracker| tracker.pre_step_velocity)
                .unwrap_or(Vec3::ZERO)
        };

        let normal = context
            .contact_pair(first, second)
            .and_then(|pair| pair.manifolds().next().map(|manifold| manifold.normal()));

        let impact_speed = impact_speed_along_normal(velocity_of(body), velocity_of(other), normal);

        impacts.write(ProjectileImpact {
            body,
            other,
            impact_speed,
        });
    }
}

/// System: ProjectileImpact выше threshold → HitSound со случайной громкостью
pub fn trigger_hit_sounds(
    mut impacts: EventReader<ProjectileImpact>,
    config: Res<DemoConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut sounds: EventWriter<HitSound>,
) {
    let threshold = config.projectile.hit_sound_threshold;

    for impact in impacts.read() {
        if impact.impact_speed <= threshold {
            continue;
        }

        let volume = rng.rng.gen::<f32>();
        sounds.write(HitSound {
            volume,
            impact_speed: impact.impact_speed,
        });

        logger::log(&format!(
            "🔊 Hit sound: {:?} hit {:?} at {:.2} m/s (volume {:.2})",
            impact.body, impact.other, impact.impact_speed, volume
        ));
    }
}
