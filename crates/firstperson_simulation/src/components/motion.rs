//! Motion компоненты: состояние движения, tunables, marker контроллера

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{CameraRig, InputState};
use crate::physics::CharacterBody;

/// First-person контроллер (marker)
///
/// Автоматически добавляет весь набор состояния через Required Components:
/// InputState, MotionState, ControllerTunables, CharacterBody, CameraRig.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(InputState, MotionState, ControllerTunables, CharacterBody, CameraRig, Transform)]
pub struct FirstPersonController;

/// Состояние движения (персистентно между frames)
///
/// Мутирует ТОЛЬКО MotionController.
///
/// Инвариант: -pitch_limit ≤ current_pitch ≤ pitch_limit
/// Инвариант: horizontal_velocity.y == 0
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct MotionState {
    /// Горизонтальная скорость (world space, m/s)
    pub horizontal_velocity: Vec3,
    /// Вертикальная скорость (m/s, gravity/jump)
    pub vertical_velocity: f32,
    /// Pitch камеры (градусы, > 0 = взгляд вниз)
    pub current_pitch: f32,
    /// |horizontal_velocity| (пересчитывается после move update)
    pub speed: f32,
}

/// Настройки контроллера (author-time, read-only во время игры)
///
/// Углы в градусах. Загружаются из RON через `crate::config::load_tunables`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct ControllerTunables {
    /// Скорость ходьбы (m/s)
    pub walk_speed: f32,
    /// Скорость спринта (m/s)
    pub sprint_speed: f32,
    /// Разгон/торможение (m/s²), шаг move-towards = acceleration * dt
    pub acceleration: f32,
    /// Высота прыжка (m)
    pub jump_height: f32,
    /// Чувствительность мыши (градусы на единицу device delta)
    pub look_sensitivity: Vec2,
    /// Ограничение pitch (градусы)
    pub pitch_limit: f32,
    /// Множитель гравитации
    pub gravity_scale: f32,
    /// FOV в обычном режиме (градусы)
    pub normal_fov: f32,
    /// FOV на полной скорости спринта (градусы)
    pub sprint_fov: f32,
    /// Скорость сглаживания FOV (1/sec)
    pub fov_smoothing: f32,
}

impl Default for ControllerTunables {
    fn default() -> Self {
        Self {
            walk_speed: 3.5,
            sprint_speed: 8.0,
            acceleration: 15.0,
            jump_height: 2.0,
            look_sensitivity: Vec2::new(0.1, 0.1),
            pitch_limit: 85.0,
            gravity_scale: 3.0,
            normal_fov: 60.0,
            sprint_fov: 80.0,
            fov_smoothing: 1.0,
        }
    }
}
