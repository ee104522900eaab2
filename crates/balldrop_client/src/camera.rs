use bevy::prelude::*;
use bevy::input::mouse::{MouseMotion, MouseWheel};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (
            orbit_camera_controls,
            update_camera_transform,
        ).chain());
    }
}

/// Orbit camera с damping: input копится в pending, применяется долями каждый frame
#[derive(Component, Debug, Clone)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub distance: f32,
    pub yaw: f32,   // Horizontal rotation (radians)
    pub pitch: f32, // Vertical rotation (radians)
    pub pending_yaw: f32,
    pub pending_pitch: f32,
    pub sensitivity: f32,
    pub zoom_speed: f32,
    /// Доля pending rotation, применяемая за frame
    pub damping_factor: f32,
}

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.1;

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            distance: 15.0,
            yaw: std::f32::consts::FRAC_PI_4,       // 45°
            pitch: std::f32::consts::FRAC_PI_6,     // 30°
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            sensitivity: 0.005,
            zoom_speed: 1.0,
            damping_factor: 0.05,
        }
    }
}

impl OrbitCamera {
    /// Orbit параметры из начальной позиции камеры
    pub fn from_position(position: Vec3, focus: Vec3) -> Self {
        let offset = position - focus;
        let distance = offset.length();
        let pitch = if distance > 0.0 { (offset.y / distance).asin() } else { 0.0 };

        Self {
            focus,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch,
            ..default()
        }
    }

    /// Применить долю pending rotation (damping)
    pub fn apply_damping(&mut self) {
        self.yaw += self.pending_yaw * self.damping_factor;
        self.pitch = (self.pitch + self.pending_pitch * self.damping_factor)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);

        self.pending_yaw *= 1.0 - self.damping_factor;
        self.pending_pitch *= 1.0 - self.damping_factor;
    }

    /// Позиция камеры из spherical coordinates
    pub fn translation(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();

        self.focus + Vec3::new(x, y, z)
    }
}

/// Handle mouse input for orbit camera
fn orbit_camera_controls(
    mut query: Query<&mut OrbitCamera>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
) {
    let mut camera = match query.single_mut() {
        Ok(cam) => cam,
        Err(_) => return,
    };

    // Left mouse button: orbit
    if mouse_buttons.pressed(MouseButton::Left) {
        for motion in mouse_motion.read() {
            camera.pending_yaw -= motion.delta.x * camera.sensitivity;
            camera.pending_pitch += motion.delta.y * camera.sensitivity;
        }
    } else {
        // Consume motion events even when not orbiting
        mouse_motion.clear();
    }

    // Mouse wheel: zoom
    for wheel in mouse_wheel.read() {
        camera.distance -= wheel.y * camera.zoom_speed;
        camera.distance = camera.distance.clamp(3.0, 50.0);
    }
}

/// Damping тикает каждый frame (даже без input — камера доезжает)
fn update_camera_transform(
    mut query: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    for (mut camera, mut transform) in query.iter_mut() {
        camera.apply_damping();

        *transform = Transform::from_translation(camera.translation())
            .looking_at(camera.focus, Vec3::Y);
    }
}
