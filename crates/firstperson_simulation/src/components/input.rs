//! Input state: последний известный input от host (move/look/sprint/jump)

use bevy::prelude::*;

/// Последнее известное состояние input
///
/// Пишется ТОЛЬКО через `InputRouter` (см. `crate::input`).
/// `MotionController` читает snapshot раз в frame и потребляет jump edge.
///
/// # Coordinate System
/// - `move_axis.x`: -1.0 (left) → +1.0 (right)
/// - `move_axis.y`: -1.0 (backward) → +1.0 (forward)
/// - `look_axis`: device delta за frame, `y > 0` = взгляд вверх
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct InputState {
    /// Move axis в [-1, 1]² (значения вне диапазона терпим, normalize разберётся)
    pub move_axis: Vec2,
    /// Look axis (unbounded device delta)
    pub look_axis: Vec2,
    /// Sprint удерживается
    pub sprint_held: bool,
    /// Jump edge (выставляется на press, сбрасывается контроллером)
    pub jump_requested: bool,
}

impl InputState {
    /// Забрать jump edge (true максимум один раз на press)
    pub fn take_jump_request(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }
}
