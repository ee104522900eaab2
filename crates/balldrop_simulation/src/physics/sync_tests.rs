//! Tests for the sync loop.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::config::{ProjectileConfig, ReturnConfig};
    use crate::physics::{sync_tracked_pairs, WorldClock};
    use crate::projectile::{ProjectileSlot, TrackedPair};

    fn app_with_projectile(position: Vec3) -> (App, TrackedPair) {
        let mut app = App::new();
        app.add_systems(Update, sync_tracked_pairs);

        let mut slot = ProjectileSlot::default();
        let pair = {
            let world = app.world_mut();
            let mut commands = world.commands();
            slot.replace(
                &mut commands,
                position,
                &ProjectileConfig::default(),
                &ReturnConfig::default(),
            )
        };
        app.world_mut().flush();
        app.insert_resource(slot);

        (app, pair)
    }

    #[test]
    fn test_visual_copies_body_pose() {
        let (mut app, pair) = app_with_projectile(Vec3::new(0.0, 2.0, 0.0));

        let moved = Transform::from_xyz(0.5, 0.25, -0.3)
            .with_rotation(Quat::from_rotation_z(0.7));
        *app.world_mut().get_mut::<Transform>(pair.body).expect("body") = moved;

        app.update();

        let visual = app.world().get::<Transform>(pair.visual).expect("visual");
        assert_eq!(visual.translation, moved.translation);
        assert_eq!(visual.rotation, moved.rotation);
    }

    #[test]
    fn test_visual_is_never_authoritative() {
        let (mut app, pair) = app_with_projectile(Vec3::new(1.0, 1.0, 1.0));

        // Кто-то сдвинул visual напрямую — следующий frame вернёт позу body
        app.world_mut()
            .get_mut::<Transform>(pair.visual)
            .expect("visual")
            .translation = Vec3::new(9.0, 9.0, 9.0);

        app.update();

        let body = *app.world().get::<Transform>(pair.body).expect("body");
        let visual = app.world().get::<Transform>(pair.visual).expect("visual");
        assert_eq!(visual.translation, body.translation);
        assert_eq!(body.translation, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_missing_visual_is_skipped() {
        let (mut app, pair) = app_with_projectile(Vec3::ONE);
        app.world_mut().despawn(pair.visual);

        // Не паникует
        app.update();

        assert!(app.world().get_entity(pair.body).is_ok());
    }

    #[test]
    fn test_world_clock_delta() {
        let mut clock = WorldClock::default();

        clock.advance_to(0.016);
        clock.advance_to(0.050);

        assert!((clock.delta - 0.034).abs() < 1e-6);
        assert!((clock.elapsed - 0.050).abs() < 1e-6);
        assert_eq!(clock.frame, 2);
    }

    #[test]
    fn test_long_frame_grows_delta() {
        let mut clock = WorldClock::default();

        clock.advance_to(0.016);
        clock.advance_to(1.016);

        assert!((clock.delta - 1.0).abs() < 1e-6);
    }
}
