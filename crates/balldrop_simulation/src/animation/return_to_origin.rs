//! PositionAuthority state machine.
//!
//! `PendingReturn → AnimatingReturn → Physics`. Анимация стартует безусловно
//! после delay, даже если шар ещё падает (settled detection нет).

use bevy::prelude::*;

use crate::config::ReturnConfig;

/// Кто владеет горизонтальной позицией body в текущем frame
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum PositionAuthority {
    /// Solver полностью владеет позой
    Physics,
    /// Solver владеет, анимация ждёт `remaining` секунд
    PendingReturn { remaining: f32 },
    /// Аниматор пишет x/z; `start` захвачен в момент старта анимации
    AnimatingReturn { elapsed: f32, start: Vec2 },
}

impl Default for PositionAuthority {
    fn default() -> Self {
        Self::Physics
    }
}

impl PositionAuthority {
    /// Состояние свежезапущенного шара
    pub fn schedule_return(config: &ReturnConfig) -> Self {
        Self::PendingReturn {
            remaining: config.delay,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self, Self::AnimatingReturn { .. })
    }

    /// Продвинуть state machine на `delta` секунд
    ///
    /// `current` — текущие (x, z) body. Возвращает (x, z), которые нужно
    /// записать в позицию, или None если в этом frame владеет solver.
    pub fn advance(&mut self, delta: f32, current: Vec2, config: &ReturnConfig) -> Option<Vec2> {
        match *self {
            Self::Physics => None,
            Self::PendingReturn { remaining } => {
                let remaining = remaining - delta;
                if remaining > 0.0 {
                    *self = Self::PendingReturn { remaining };
                    return None;
                }

                // Overshoot delay'я сразу идёт в прогресс анимации
                *self = Self::AnimatingReturn {
                    elapsed: 0.0,
                    start: current,
                };
                self.advance(-remaining, current, config)
            }
            Self::AnimatingReturn { elapsed, start } => {
                let elapsed = elapsed + delta;
                let progress = if config.duration > 0.0 {
                    (elapsed / config.duration).min(1.0)
                } else {
                    1.0
                };

                if progress >= 1.0 {
                    *self = Self::Physics;
                    return Some(Vec2::ZERO);
                }

                *self = Self::AnimatingReturn { elapsed, start };
                Some(start * (1.0 - ease_out_quad(progress)))
            }
        }
    }
}

/// Quadratic ease-out (`power1.out`): быстрый старт, мягкое приближение к цели
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}
