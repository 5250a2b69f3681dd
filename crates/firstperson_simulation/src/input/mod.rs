//! Player input module (InputRouter)
//!
//! Принимает дискретные input события от host и хранит последнее состояние.
//!
//! # Архитектура
//!
//! ```text
//! Host input (keyboard/mouse/gamepad)
//!     ↓
//! PlayerInputEvent (ECS event) - events.rs
//!     ↓
//! route_player_input → InputRouter (setters) - router.rs
//!     ↓
//! InputState (component) → MotionController
//! ```

pub mod events;
pub mod router;

// Re-exports для external use
pub use events::*;
pub use router::*;
