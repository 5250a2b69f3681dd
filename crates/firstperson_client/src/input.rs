use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use firstperson_simulation::{FirstPersonSet, PlayerInputEvent};

/// Keyboard/mouse → PlayerInputEvent
///
/// Key map: WASD move, mouse look, Left Shift sprint, Space jump.
pub struct PlayerInputPlugin;

impl Plugin for PlayerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (emit_move_input, emit_look_input, emit_button_input).before(FirstPersonSet::Input),
        );
    }
}

/// WASD → Move (только при изменении оси)
fn emit_move_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut last_axis: Local<Vec2>,
    mut events: EventWriter<PlayerInputEvent>,
) {
    let mut axis = Vec2::ZERO;

    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }

    if axis != *last_axis {
        *last_axis = axis;
        events.write(PlayerInputEvent::Move(axis));
    }
}

/// Mouse delta → Look (каждый frame, включая ноль)
///
/// Screen Y растёт вниз → инвертируем (look.y > 0 = вверх).
/// Курсор не захвачен → look не шлём (мышь управляет системным курсором).
fn emit_look_input(
    mut mouse_motion: EventReader<MouseMotion>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut events: EventWriter<PlayerInputEvent>,
) {
    let delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();

    let captured = windows
        .single()
        .map(|window| window.cursor_options.grab_mode != CursorGrabMode::None)
        .unwrap_or(false);

    let look = if captured { Vec2::new(delta.x, -delta.y) } else { Vec2::ZERO };
    events.write(PlayerInputEvent::Look(look));
}

/// Shift/Space → Sprint/Jump (press и release)
fn emit_button_input(keys: Res<ButtonInput<KeyCode>>, mut events: EventWriter<PlayerInputEvent>) {
    if keys.just_pressed(KeyCode::ShiftLeft) {
        events.write(PlayerInputEvent::Sprint { pressed: true });
    }
    if keys.just_released(KeyCode::ShiftLeft) {
        events.write(PlayerInputEvent::Sprint { pressed: false });
    }

    if keys.just_pressed(KeyCode::Space) {
        events.write(PlayerInputEvent::Jump { pressed: true });
    }
    if keys.just_released(KeyCode::Space) {
        events.write(PlayerInputEvent::Jump { pressed: false });
    }
}
