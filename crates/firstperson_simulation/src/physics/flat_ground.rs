//! Headless host: горизонтальная плоскость вместо полноценной физики
//!
//! Используется в headless симуляции и тестах (Rapier не подключен).
//! Коллизия одна: тело не проходит ниже `FlatGround::height`.

use bevy::prelude::*;

use super::sweep::{CharacterBody, CollisionSweep};
use crate::FirstPersonSet;

/// Допуск для grounded проверки (numerical errors)
const GROUND_CONTACT_EPSILON: f32 = 1e-4;

/// Высота пола (world Y) для headless host'а
#[derive(Resource, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Resource)]
pub struct FlatGround {
    pub height: f32,
}

/// Резолв смещения против плоскости пола
///
/// Возвращает (фактическое смещение, grounded).
pub fn resolve_against_plane(position: Vec3, displacement: Vec3, ground_height: f32) -> (Vec3, bool) {
    let mut target = position + displacement;
    let grounded = target.y <= ground_height + GROUND_CONTACT_EPSILON;

    if target.y < ground_height {
        target.y = ground_height;
    }

    (target - position, grounded)
}

/// `CollisionSweep` без ECS (explicit DI для `MotionController::advance`)
#[derive(Debug, Clone, Copy)]
pub struct FlatGroundSweep {
    pub position: Vec3,
    pub ground_height: f32,
    grounded: bool,
}

impl FlatGroundSweep {
    pub fn new(position: Vec3, ground_height: f32) -> Self {
        Self {
            position,
            ground_height,
            grounded: position.y <= ground_height + GROUND_CONTACT_EPSILON,
        }
    }
}

impl CollisionSweep for FlatGroundSweep {
    fn sweep_move(&mut self, displacement: Vec3) -> Vec3 {
        let (achieved, grounded) = resolve_against_plane(self.position, displacement, self.ground_height);
        self.position += achieved;
        self.grounded = grounded;
        achieved
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }
}

/// Система: резолв pending displacement против плоскости
///
/// Работает после MotionController (FirstPersonSet::Sweep).
pub fn resolve_flat_ground(
    ground: Res<FlatGround>,
    mut query: Query<(&mut Transform, &mut CharacterBody)>,
) {
    for (mut transform, mut body) in query.iter_mut() {
        let Some(displacement) = body.take_pending() else {
            continue;
        };

        let (achieved, grounded) = resolve_against_plane(transform.translation, displacement, ground.height);
        transform.translation += achieved;
        body.report(achieved, grounded);
    }
}

/// Plugin headless host'а (пол на `FlatGround::height`)
pub struct FlatGroundPlugin;

impl Plugin for FlatGroundPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<FlatGround>()
            .init_resource::<FlatGround>()
            .add_systems(Update, resolve_flat_ground.in_set(FirstPersonSet::Sweep));
    }
}
