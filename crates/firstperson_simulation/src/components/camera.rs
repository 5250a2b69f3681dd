//! Camera компоненты first-person rig
//!
//! Камера — отдельный child entity контроллера:
//! - Transform камеры = чистый pitch (yaw живёт на body)
//! - CameraLens = FOV в градусах (host синхронизирует в projection)

use bevy::prelude::*;

/// Lens камеры (FOV в градусах)
///
/// Host синхронизирует в свою projection (клиент: `Projection::Perspective`).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraLens {
    pub field_of_view: f32,
}

impl Default for CameraLens {
    fn default() -> Self {
        Self { field_of_view: 60.0 }
    }
}

/// Явная ссылка контроллер → камера
///
/// `None` = не связано при spawn, `resolve_rig_wiring` ищет среди children
/// entity с `CameraLens` (fallback на этапе конфигурации).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct CameraRig {
    pub camera: Option<Entity>,
}

impl CameraRig {
    pub fn new(camera: Entity) -> Self {
        Self {
            camera: Some(camera),
        }
    }
}
