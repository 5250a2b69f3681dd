//! Player input events
//!
//! Генерируются host'ом (клиент: keyboard/mouse), обрабатываются `route_player_input`.

use bevy::prelude::*;

/// Player input event — одно дискретное изменение input
///
/// # Coordinate System
/// - `Move`: x = strafe (-1 left, +1 right), y = forward (+1) / backward (-1)
/// - `Look`: device delta за frame, y > 0 = взгляд вверх
///
/// # Примечание
/// Look шлётся каждый frame (включая `Vec2::ZERO`), иначе последний delta
/// продолжит крутить камеру.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PlayerInputEvent {
    /// Move axis (WASD / left stick)
    Move(Vec2),
    /// Look axis (mouse delta / right stick)
    Look(Vec2),
    /// Sprint hold (press → true, release → false)
    Sprint { pressed: bool },
    /// Jump button (только press триггерит прыжок)
    Jump { pressed: bool },
}
