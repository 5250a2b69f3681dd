//! Player control marker component
//!
//! Отмечает entity которым управляет игрок через input.

use bevy::prelude::*;

/// Marker component для player-controlled entity
///
/// `route_player_input` пишет `PlayerInputEvent` только в `InputState`
/// entity с этим компонентом.
///
/// # Single-player
/// В single-player режиме обычно только один entity имеет этот компонент.
///
/// # Possession
/// Для переключения контроля между контроллерами:
/// ```ignore
/// commands.entity(old_body).remove::<Player>();
/// commands.entity(new_body).insert(Player);
/// ```
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;
