//! Sync Loop: world clock + копирование поз body → visual.
//!
//! Visual Transform никогда не авторитетен — каждый frame перезаписывается
//! позой из Rapier writeback.

use bevy::prelude::*;

use crate::projectile::{BallVisual, ProjectileBody, ProjectileSlot};

/// World clock (сбрасывается только при старте процесса)
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct WorldClock {
    /// Секунд с начала loop'а
    pub elapsed: f32,
    /// Секунд с предыдущего frame (растёт при длинных frame'ах, frame-drop detection нет)
    pub delta: f32,
    pub frame: u64,
}

impl WorldClock {
    /// Новый frame с абсолютным elapsed временем
    pub fn advance_to(&mut self, elapsed: f32) {
        self.delta = (elapsed - self.elapsed).max(0.0);
        self.elapsed = elapsed;
        self.frame = self.frame.wrapping_add(1);
    }
}

/// System: обновить WorldClock из Bevy Time
pub fn tick_world_clock(time: Res<Time>, mut clock: ResMut<WorldClock>) {
    clock.advance_to(time.elapsed_secs());
}

/// System: для каждой tracked pair скопировать translation + rotation body → visual
///
/// Работает в PostUpdate после Rapier Writeback.
pub fn sync_tracked_pairs(
    slot: Res<ProjectileSlot>,
    bodies: Query<&Transform, (With<ProjectileBody>, Without<BallVisual>)>,
    mut visuals: Query<&mut Transform, (With<BallVisual>, Without<ProjectileBody>)>,
) {
    for pair in slot.tracked_pairs() {
        let Ok(body_transform) = bodies.get(pair.body) else {
            continue;
        };
        let Ok(mut visual_transform) = visuals.get_mut(pair.visual) else {
            continue;
        };

        visual_transform.translation = body_transform.translation;
        visual_transform.rotation = body_transform.rotation;
    }
}
