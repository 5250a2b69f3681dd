//! Movement domain — MotionController и его ECS адаптер
//!
//! Содержит:
//! - controller: чистая per-frame логика (move/look/camera), explicit DI
//! - systems: ECS системы (advance контроллеров, wiring fallback)

pub mod controller;
pub mod systems;

mod controller_tests;

// Re-export основных типов
pub use controller::{
    jump_velocity, lerp_clamped, move_towards, FrameOutput, LookUpdate, MotionBasis, MotionController,
    ASCENDING_THRESHOLD, GROUND_STICK_VELOCITY, MIN_MOVE_INPUT_SQR, SPRINT_SPEED_THRESHOLD,
};
pub use systems::{advance_first_person_controllers, resolve_rig_wiring};
