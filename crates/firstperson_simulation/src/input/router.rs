//! InputRouter: setters поверх InputState
//!
//! Pure assignment, без валидации — host input считается доверенным.

use bevy::prelude::*;

use super::events::PlayerInputEvent;
use crate::components::{InputState, Player};

/// InputRouter — единственный writer InputState
pub struct InputRouter<'a> {
    state: &'a mut InputState,
}

impl<'a> InputRouter<'a> {
    pub fn new(state: &'a mut InputState) -> Self {
        Self { state }
    }

    pub fn set_move(&mut self, axis: Vec2) {
        self.state.move_axis = axis;
    }

    pub fn set_look(&mut self, axis: Vec2) {
        self.state.look_axis = axis;
    }

    pub fn set_sprint(&mut self, held: bool) {
        self.state.sprint_held = held;
    }

    /// Jump edge: прыжок на press, а не по удержанию
    ///
    /// MotionController забирает request в начале следующего `advance`.
    pub fn on_jump_pressed(&mut self) {
        self.state.jump_requested = true;
    }

    /// Применить host event
    pub fn apply(&mut self, event: PlayerInputEvent) {
        match event {
            PlayerInputEvent::Move(axis) => self.set_move(axis),
            PlayerInputEvent::Look(axis) => self.set_look(axis),
            PlayerInputEvent::Sprint { pressed } => self.set_sprint(pressed),
            PlayerInputEvent::Jump { pressed: true } => self.on_jump_pressed(),
            PlayerInputEvent::Jump { pressed: false } => {}
        }
    }
}

/// Система: PlayerInputEvent → InputState всех player-controlled контроллеров
///
/// Работает в FirstPersonSet::Input (до MotionController).
pub fn route_player_input(
    mut events: EventReader<PlayerInputEvent>,
    mut players: Query<&mut InputState, With<Player>>,
) {
    for event in events.read() {
        for mut state in players.iter_mut() {
            InputRouter::new(&mut state).apply(*event);
        }
    }
}
