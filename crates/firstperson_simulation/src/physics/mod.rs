//! Physics seam: host collision-sweep primitive
//!
//! Контроллер НЕ резолвит коллизии сам — только просит host сдвинуть тело:
//! - `CollisionSweep` — контракт примитива (sweep_move + is_grounded)
//! - `CharacterBody` — ECS-сторона контракта (pending displacement → host → grounded)
//! - `FlatGroundPlugin` — headless host (горизонтальная плоскость)
//! - `RapierSweepPlugin` — host через Rapier KinematicCharacterController

pub mod flat_ground;
pub mod rapier;
pub mod sweep;

// Re-export основных типов
pub use flat_ground::{resolve_against_plane, FlatGround, FlatGroundPlugin, FlatGroundSweep};
pub use rapier::{rapier_character_bundle, RapierSweepPlugin};
pub use sweep::{CharacterBody, CollisionSweep, WorldGravity, STANDARD_GRAVITY};
