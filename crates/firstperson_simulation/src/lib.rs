//! FirstPerson Simulation Core
//!
//! First-person контроллер на Bevy 0.16 ECS:
//! - InputRouter: host input events → InputState
//! - MotionController: velocity (разгон/торможение), gravity/jump, look (pitch clamp), FOV
//!
//! HOST BOUNDARY:
//! - Контроллер = поведение (интеграция velocity, look, FOV)
//! - Host = коллизии (CollisionSweep), рендер, устройства ввода

use bevy::prelude::*;
use rand::SeedableRng;
use serde::Serialize;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod components;
pub mod config;
pub mod input;
pub mod logger;
pub mod movement;
pub mod physics;

// Re-export базовых типов для удобства
pub use components::*;
pub use config::{load_tunables, parse_tunables, validate_tunables, ConfigError};
pub use input::{route_player_input, InputRouter, PlayerInputEvent};
pub use logger::{init_logger, log, log_info, log_warning, set_log_level, LogLevel};
pub use movement::{jump_velocity, move_towards, FrameOutput, LookUpdate, MotionBasis, MotionController};
pub use physics::{
    rapier_character_bundle, CharacterBody, CollisionSweep, FlatGround, FlatGroundPlugin, RapierSweepPlugin,
    WorldGravity,
};

/// Порядок per-frame стадий (Update)
///
/// 1. HostFeedback — host сообщает результат прошлого sweep (grounded)
/// 2. Input — InputRouter применяет события
/// 3. Motion — MotionController (jump → move → look → camera)
/// 4. Sweep — host резолвит pending displacement
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FirstPersonSet {
    HostFeedback,
    Input,
    Motion,
    Sweep,
}

/// Главный plugin контроллера (без host'а коллизий)
///
/// Host добавляется отдельно: `FlatGroundPlugin` (headless) или `RapierSweepPlugin`.
pub struct FirstPersonPlugin;

impl Plugin for FirstPersonPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<FirstPersonController>()
            .register_type::<Player>()
            .register_type::<InputState>()
            .register_type::<MotionState>()
            .register_type::<ControllerTunables>()
            .register_type::<CameraLens>()
            .register_type::<CameraRig>()
            .register_type::<CharacterBody>()
            .register_type::<WorldGravity>()
            .init_resource::<WorldGravity>()
            .add_event::<PlayerInputEvent>()
            .configure_sets(
                Update,
                (
                    FirstPersonSet::HostFeedback,
                    FirstPersonSet::Input,
                    FirstPersonSet::Motion,
                    FirstPersonSet::Sweep,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    (movement::resolve_rig_wiring, route_player_input).in_set(FirstPersonSet::Input),
                    movement::advance_first_person_controllers.in_set(FirstPersonSet::Motion),
                ),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Фиксированный dt headless прогона (60 FPS)
pub const HEADLESS_FRAME_SECS: f64 = 1.0 / 60.0;

/// Создаёт Bevy App для headless симуляции контроллера
///
/// - MinimalPlugins + FirstPersonPlugin + FlatGroundPlugin (пол на y = 0)
/// - Time шагает ровно на `HEADLESS_FRAME_SECS` за update (детерминизм)
pub fn create_headless_app(seed: u64) -> App {
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            HEADLESS_FRAME_SECS,
        )))
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins((FirstPersonPlugin, FlatGroundPlugin));

    app
}

/// Spawn first-person контроллера с камерой (child entity)
///
/// Камера связывается явно через CameraRig. Возвращает (body, camera).
pub fn spawn_first_person(
    commands: &mut Commands,
    position: Vec3,
    tunables: ControllerTunables,
    eye_height: f32,
) -> (Entity, Entity) {
    let camera = commands
        .spawn((
            Transform::from_xyz(0.0, eye_height, 0.0),
            CameraLens {
                field_of_view: tunables.normal_fov,
            },
        ))
        .id();

    let body = commands
        .spawn((
            FirstPersonController,
            Player,
            tunables,
            CameraRig::new(camera),
            Transform::from_translation(position),
        ))
        .add_child(camera)
        .id();

    (body, camera)
}

/// Snapshot компонентов `T` в RON (детерминизм: сравнение строк между прогонами)
///
/// Порядок по Entity index, чтобы порядок итерации query не влиял на результат.
/// Формат: `[(index, component), ...]`.
pub fn world_snapshot<T>(world: &mut World) -> Result<String, ron::Error>
where
    T: Component + Serialize,
{
    let mut query = world.query::<(Entity, &T)>();
    let mut entries: Vec<(u32, &T)> = query
        .iter(world)
        .map(|(entity, component)| (entity.index(), component))
        .collect();
    entries.sort_by_key(|(index, _)| *index);

    ron::to_string(&entries)
}
