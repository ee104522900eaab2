//! Конфигурация демо: launch, projectile, return animation, world
//!
//! Все значения по умолчанию = reference behavior браузерного демо.
//! Клиент может переопределить через balldrop.toml (см. balldrop_client::settings).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Корневой конфиг (Resource, вставляется SimulationPlugin)
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub launch: LaunchConfig,
    pub projectile: ProjectileConfig,
    pub resting_ball: RestingBallConfig,
    pub return_to_origin: ReturnConfig,
    pub world: WorldConfig,
}

/// Откуда берётся z-координата точки запуска
///
/// Reference демо ставит z = нормализованный y (z и высота связаны).
/// `Fixed` развязывает оси: высота из Y-поля, глубина фиксирована.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthSource {
    MirrorY,
    Fixed(f32),
}

impl Default for DepthSource {
    fn default() -> Self {
        Self::MirrorY
    }
}

/// Input Normalizer параметры
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Симметричная граница clamp для raw input: [-bound, +bound]
    pub bound: f32,
    /// Делитель UI-range → simulation units
    pub scale: f32,
    pub depth: DepthSource,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            bound: 12.25,
            scale: 5.0,
            depth: DepthSource::MirrorY,
        }
    }
}

impl LaunchConfig {
    /// Максимальная по модулю координата после нормализации (12.25 / 5 = 2.45)
    pub fn normalized_bound(&self) -> f32 {
        self.bound / self.scale
    }
}

/// Параметры запускаемого шара
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// kg
    pub mass: f32,
    /// m
    pub radius: f32,
    pub material: ContactMaterial,
    /// Минимальная скорость удара вдоль нормали для hit sound (m/s, строго больше)
    pub hit_sound_threshold: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            mass: 2.0,
            radius: 0.25,
            material: ContactMaterial::default(),
            hit_sound_threshold: 1.5,
        }
    }
}

/// Friction/restitution профиль, общий для пола и шаров ("default" contact material)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactMaterial {
    pub friction: f32,
    pub restitution: f32,
}

impl Default for ContactMaterial {
    fn default() -> Self {
        Self {
            friction: 0.1,
            restitution: 0.7,
        }
    }
}

/// Шар, лежащий на плоскости до первого запуска
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestingBallConfig {
    pub enabled: bool,
    pub mass: f32,
    /// Высота центра (= радиус, шар касается пола)
    pub height: f32,
}

impl Default for RestingBallConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mass: 5.0,
            height: 0.25,
        }
    }
}

/// Return-to-Origin Animator тайминги (секунды)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnConfig {
    pub delay: f32,
    pub duration: f32,
}

impl Default for ReturnConfig {
    fn default() -> Self {
        Self {
            delay: 1.0,
            duration: 1.5,
        }
    }
}

/// Physics world + step policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// m/s² (по оси Y)
    pub gravity: f32,
    /// Fixed target step (сек)
    pub fixed_dt: f32,
    pub substeps: usize,
    /// Half-extent статического пола (physics). Визуальный пол меньше
    pub floor_half_extent: f32,
    /// Seed для DeterministicRng (громкость hit sound)
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            fixed_dt: 1.0 / 60.0,
            substeps: 3,
            floor_half_extent: 50.0,
            seed: 42,
        }
    }
}

/// Значение конфига вне допустимого диапазона (или не finite)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} = {value} (expected {expected})")]
pub struct InvalidConfig {
    pub field: &'static str,
    pub value: f32,
    pub expected: &'static str,
}

fn require(
    field: &'static str,
    value: f32,
    expected: &'static str,
    ok: bool,
) -> Result<(), InvalidConfig> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(InvalidConfig {
            field,
            value,
            expected,
        })
    }
}

impl DemoConfig {
    /// Проверка значений до того, как они попадут в системы
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        let launch = &self.launch;
        require("launch.bound", launch.bound, ">= 0", launch.bound >= 0.0)?;
        require("launch.scale", launch.scale, "> 0", launch.scale > 0.0)?;
        if let DepthSource::Fixed(depth) = launch.depth {
            require("launch.depth.fixed", depth, "finite", true)?;
        }

        let projectile = &self.projectile;
        require("projectile.mass", projectile.mass, "> 0", projectile.mass > 0.0)?;
        require("projectile.radius", projectile.radius, "> 0", projectile.radius > 0.0)?;

        let timing = &self.return_to_origin;
        require("return_to_origin.delay", timing.delay, ">= 0", timing.delay >= 0.0)?;
        require("return_to_origin.duration", timing.duration, ">= 0", timing.duration >= 0.0)?;

        let world = &self.world;
        require("world.gravity", world.gravity, "finite", true)?;
        require("world.fixed_dt", world.fixed_dt, "> 0", world.fixed_dt > 0.0)?;
        require("world.substeps", world.substeps as f32, ">= 1", world.substeps >= 1)?;

        Ok(())
    }
}
