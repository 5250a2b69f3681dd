//! Контракт collision-sweep примитива host'а

use bevy::prelude::*;

/// Стандартная гравитация (m/s²)
pub const STANDARD_GRAVITY: f32 = -9.81;

/// Collision-sweep примитив host'а
///
/// `sweep_move` возвращает фактически пройденное смещение (с учётом коллизий).
/// Контроллер результат НЕ использует для коррекции velocity.
pub trait CollisionSweep {
    fn sweep_move(&mut self, displacement: Vec3) -> Vec3;
    fn is_grounded(&self) -> bool;
}

/// Глобальная гравитация host'а (направление + величина)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct WorldGravity(pub Vec3);

impl Default for WorldGravity {
    fn default() -> Self {
        Self(Vec3::new(0.0, STANDARD_GRAVITY, 0.0))
    }
}

/// ECS-сторона collision-sweep примитива
///
/// Flow:
/// 1. MotionController → `sweep_move()` кладёт displacement в `pending_displacement`
/// 2. Host система (flat ground / rapier) забирает displacement, двигает тело
/// 3. Host пишет `report()`: фактическое смещение + grounded (для следующего frame)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterBody {
    /// На земле (результат ground probe host'а после последнего sweep)
    pub grounded: bool,
    /// Смещение, ожидающее резолва host'ом
    pub pending_displacement: Option<Vec3>,
    /// Фактическое смещение последнего sweep
    pub last_achieved: Vec3,
}

impl CharacterBody {
    /// Host забирает displacement на резолв
    pub fn take_pending(&mut self) -> Option<Vec3> {
        self.pending_displacement.take()
    }

    /// Host сообщает результат резолва
    pub fn report(&mut self, achieved: Vec3, grounded: bool) {
        self.last_achieved = achieved;
        self.grounded = grounded;
    }
}

impl CollisionSweep for CharacterBody {
    /// Резолв отложен до host stage: возвращаем запрошенное смещение
    fn sweep_move(&mut self, displacement: Vec3) -> Vec3 {
        self.pending_displacement = Some(displacement);
        displacement
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }
}
