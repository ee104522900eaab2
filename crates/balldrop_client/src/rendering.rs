use bevy::prelude::*;
use balldrop_simulation::{BallVisual, DemoConfig};

use crate::camera::OrbitCamera;

/// Визуальный пол (physics пол больше)
const FLOOR_SIZE: f32 = 6.85;
const BALL_SEGMENTS: u32 = 32;

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (load_ball_assets, setup_scene))
            // PostUpdate: visual заспавнен launch'ем в Update этого же frame
            .add_systems(PostUpdate, attach_ball_meshes);
    }
}

/// Shared geometry/material прототипа шара (все BallVisual используют одни handles)
#[derive(Resource)]
pub struct BallAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

fn load_ball_assets(
    mut commands: Commands,
    config: Res<DemoConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = Sphere::new(config.projectile.radius)
        .mesh()
        .uv(BALL_SEGMENTS, BALL_SEGMENTS);

    commands.insert_resource(BallAssets {
        mesh: meshes.add(mesh),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.0, 0.0, 1.0),
            ..default()
        }),
    });
}

/// Spawn floor, lights, camera
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Floor (6.85 x 6.85, виден с обеих сторон)
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(FLOOR_SIZE * 0.5)))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.0, 0.0),
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::default(),
    ));

    // Directional light (shadows on)
    commands.spawn((
        DirectionalLight {
            color: Color::srgb_u8(0x00, 0xff, 0xee),
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(Vec3::new(4.0, 5.0, 5.0).normalize())
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        affects_lightmapped_meshes: false,
    });

    // Camera (30° FOV, смотрит на origin сзади-сверху)
    let camera_position = Vec3::new(0.0, 5.0, -10.0);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 30.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
            ..default()
        }),
        Transform::from_translation(camera_position).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera::from_position(camera_position, Vec3::ZERO),
    ));
}

/// Новые BallVisual (resting ball, projectiles) получают shared mesh + material
///
/// Despawn visual'а отпускает только его клоны handles — прототип остаётся.
fn attach_ball_meshes(
    mut commands: Commands,
    visuals: Query<Entity, Added<BallVisual>>,
    assets: Res<BallAssets>,
) {
    for entity in visuals.iter() {
        commands.entity(entity).insert((
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
        ));
    }
}
