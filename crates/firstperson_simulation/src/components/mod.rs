//! ECS Components для first-person контроллера
//!
//! Организация по доменам:
//! - player: player control marker (Player)
//! - input: последний известный input (InputState)
//! - motion: состояние движения и настройки (FirstPersonController, MotionState, ControllerTunables)
//! - camera: camera rig (CameraLens, CameraRig)

pub mod camera;
pub mod input;
pub mod motion;
pub mod player;

// Re-exports для удобного импорта
pub use camera::*;
pub use input::*;
pub use motion::*;
pub use player::*;
