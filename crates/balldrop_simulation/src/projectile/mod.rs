//! Projectile lifecycle: фабрика шаров + single-slot владелец активной пары
//!
//! Архитектура:
//! - Simulation handle = entity с RigidBody::Dynamic (Rapier владеет позой)
//! - Render handle = entity с BallVisual + Transform (клиент вешает Mesh3d/материал)
//! - Пара (body, visual) живёт в ProjectileSlot; максимум одна активная
//!
//! Replace = одна транзакция через Commands: despawn старой пары и spawn новой
//! применяются в одном flush, до того как sync loop прочитает слот в PostUpdate.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::animation::PositionAuthority;
use crate::config::{ContactMaterial, DemoConfig, ProjectileConfig, ReturnConfig};
use crate::logger;
use crate::physics::ImpactTracker;

/// Связь simulation handle ↔ render handle (relation, не ownership)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedPair {
    pub body: Entity,
    pub visual: Entity,
}

/// Маркер: запускаемый шар (подписан на collision events, синхронизируется каждый frame)
#[derive(Component, Debug, Default)]
pub struct ProjectileBody;

/// Маркер: render handle шара. Клиент добавляет shared mesh/material при `Added<BallVisual>`
#[derive(Component, Debug, Clone, Copy)]
pub struct BallVisual {
    pub radius: f32,
}

/// Маркер: статический пол
#[derive(Component, Debug, Default)]
pub struct FloorBody;

/// Single-slot контейнер активного projectile
///
/// Снаружи выглядит как последовательность tracked pairs (для sync loop),
/// ёмкость ровно 1.
#[derive(Resource, Debug, Default)]
pub struct ProjectileSlot {
    active: Option<TrackedPair>,
}

impl ProjectileSlot {
    pub fn active(&self) -> Option<TrackedPair> {
        self.active
    }

    pub fn tracked_pairs(&self) -> impl Iterator<Item = &TrackedPair> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_none()
    }

    /// Hard replace: старая пара уничтожается, новая становится единственной
    pub fn replace(
        &mut self,
        commands: &mut Commands,
        position: Vec3,
        projectile: &ProjectileConfig,
        return_to_origin: &ReturnConfig,
    ) -> TrackedPair {
        if let Some(old) = self.active.take() {
            despawn_pair(commands, old);
            logger::log(&format!("🗑️ Projectile replaced: body {:?} removed", old.body));
        }

        let pair = spawn_projectile(commands, position, projectile, return_to_origin);
        self.active = Some(pair);
        pair
    }
}

/// Шар, лежащий на полу до первого запуска (не трекается sync loop'ом)
#[derive(Resource, Debug, Default)]
pub struct RestingBall {
    pub pair: Option<TrackedPair>,
}

/// Spawn запускаемого шара (body + visual) в точке `position`
///
/// Body:
/// - RigidBody::Dynamic, масса из конфига, сфера radius
/// - общий contact material (friction/restitution)
/// - ActiveEvents::COLLISION_EVENTS для hit sound
/// - PositionAuthority::PendingReturn — стартует return-to-origin анимацию
pub fn spawn_projectile(
    commands: &mut Commands,
    position: Vec3,
    projectile: &ProjectileConfig,
    return_to_origin: &ReturnConfig,
) -> TrackedPair {
    let (friction, restitution) = contact_components(&projectile.material);

    let body = commands
        .spawn((
            Transform::from_translation(position),
            RigidBody::Dynamic,
            Collider::ball(projectile.radius),
            ColliderMassProperties::Mass(projectile.mass),
            friction,
            restitution,
            Velocity::default(),
            ActiveEvents::COLLISION_EVENTS,
            ProjectileBody,
            ImpactTracker::default(),
            PositionAuthority::schedule_return(return_to_origin),
        ))
        .id();

    let visual = spawn_ball_visual(commands, position, projectile.radius);

    TrackedPair { body, visual }
}

/// Spawn шара, лежащего на полу (reference сцена до первого клика)
pub fn spawn_resting_ball(commands: &mut Commands, config: &DemoConfig) -> TrackedPair {
    let position = Vec3::new(0.0, config.resting_ball.height, 0.0);
    let (friction, restitution) = contact_components(&config.projectile.material);

    let body = commands
        .spawn((
            Transform::from_translation(position),
            RigidBody::Dynamic,
            Collider::ball(config.projectile.radius),
            ColliderMassProperties::Mass(config.resting_ball.mass),
            friction,
            restitution,
        ))
        .id();

    let visual = spawn_ball_visual(commands, position, config.projectile.radius);

    TrackedPair { body, visual }
}

fn spawn_ball_visual(commands: &mut Commands, position: Vec3, radius: f32) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            BallVisual { radius },
        ))
        .id()
}

/// Static пол: тонкий cuboid, верхняя грань на y = 0
pub fn spawn_floor(commands: &mut Commands, config: &DemoConfig) -> Entity {
    const HALF_THICKNESS: f32 = 0.05;
    let half_extent = config.world.floor_half_extent;
    let (friction, restitution) = contact_components(&config.projectile.material);

    commands
        .spawn((
            Transform::from_xyz(0.0, -HALF_THICKNESS, 0.0),
            RigidBody::Fixed,
            Collider::cuboid(half_extent, HALF_THICKNESS, half_extent),
            friction,
            restitution,
            FloorBody,
        ))
        .id()
}

/// Despawn пары: visual (mesh/material handles отпускаются) + body (Rapier удаляет из мира)
pub fn despawn_pair(commands: &mut Commands, pair: TrackedPair) {
    commands.entity(pair.visual).despawn();
    commands.entity(pair.body).despawn();
}

fn contact_components(material: &ContactMaterial) -> (Friction, Restitution) {
    (
        Friction::coefficient(material.friction),
        Restitution::coefficient(material.restitution),
    )
}

/// Startup: пол + resting ball
pub fn spawn_static_scene(
    mut commands: Commands,
    config: Res<DemoConfig>,
    mut resting: ResMut<RestingBall>,
) {
    spawn_floor(&mut commands, &config);

    if config.resting_ball.enabled {
        resting.pair = Some(spawn_resting_ball(&mut commands, &config));
    }

    logger::log_info("✓ Static scene spawned (floor + resting ball)");
}

pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProjectileSlot>()
            .init_resource::<RestingBall>()
            .add_systems(Startup, spawn_static_scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot_app() -> App {
        let mut app = App::new();
        app.init_resource::<ProjectileSlot>();
        app
    }

    fn launch(app: &mut App, position: Vec3) -> TrackedPair {
        let world = app.world_mut();
        let mut slot = world.remove_resource::<ProjectileSlot>().unwrap_or_default();
        let pair = {
            let mut commands = world.commands();
            slot.replace(
                &mut commands,
                position,
                &ProjectileConfig::default(),
                &ReturnConfig::default(),
            )
        };
        world.flush();
        world.insert_resource(slot);
        pair
    }

    #[test]
    fn test_empty_slot() {
        let slot = ProjectileSlot::default();
        assert!(slot.is_empty());
        assert_eq!(slot.len(), 0);
        assert_eq!(slot.tracked_pairs().count(), 0);
    }

    #[test]
    fn test_repeated_launches_keep_single_pair() {
        let mut app = slot_app();

        for i in 0..5 {
            launch(&mut app, Vec3::new(i as f32 * 0.1, 1.0, 0.0));
            assert_eq!(app.world().resource::<ProjectileSlot>().len(), 1);
        }
    }

    #[test]
    fn test_replace_despawns_previous_pair() {
        let mut app = slot_app();

        let first = launch(&mut app, Vec3::new(1.0, 2.0, 2.0));
        let second = launch(&mut app, Vec3::new(-1.0, 1.0, 1.0));

        let world = app.world();
        assert!(world.get_entity(first.body).is_err());
        assert!(world.get_entity(first.visual).is_err());
        assert!(world.get_entity(second.body).is_ok());
        assert!(world.get_entity(second.visual).is_ok());
        assert_eq!(world.resource::<ProjectileSlot>().active(), Some(second));
    }

    #[test]
    fn test_new_pair_positioned_at_target() {
        let mut app = slot_app();
        let target = Vec3::new(0.4, 1.2, 1.2);

        let pair = launch(&mut app, target);

        let world = app.world();
        let body = world.get::<Transform>(pair.body).expect("body transform");
        let visual = world.get::<Transform>(pair.visual).expect("visual transform");
        assert_eq!(body.translation, target);
        assert_eq!(visual.translation, target);
        assert!(world.get::<ProjectileBody>(pair.body).is_some());
        assert!(world.get::<BallVisual>(pair.visual).is_some());
        assert!(matches!(
            world.get::<PositionAuthority>(pair.body),
            Some(PositionAuthority::PendingReturn { .. })
        ));
    }
}
