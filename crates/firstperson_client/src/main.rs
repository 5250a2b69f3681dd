use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use firstperson_simulation::{
    init_logger, load_tunables, log_info, log_warning, rapier_character_bundle, set_log_level,
    spawn_first_person, ConfigError, ControllerTunables, FirstPersonPlugin, LogLevel, RapierSweepPlugin,
};

mod camera;
mod input;

use camera::CameraPlugin;
use input::PlayerInputPlugin;

/// Путь к tunables (переопределяется env `FIRSTPERSON_TUNABLES`)
const DEFAULT_TUNABLES_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/controller.ron");

/// Высота глаз над центром капсулы (центр на 0.9m → глаза на 1.6m)
const EYE_OFFSET: f32 = 0.7;

/// Центр капсулы над полом (half-height 0.5 + radius 0.4)
const CAPSULE_CENTER_HEIGHT: f32 = 0.9;

/// Tunables, загруженные до старта App
#[derive(Resource, Clone, Copy)]
struct PlayerTunables(ControllerTunables);

fn main() {
    init_logger();
    if let Ok(level) = std::env::var("FIRSTPERSON_LOG") {
        match LogLevel::parse(&level) {
            Some(level) => set_log_level(level),
            None => log_warning(&format!("Unknown FIRSTPERSON_LOG level '{}', keeping default", level)),
        }
    }

    let tunables = load_player_tunables();

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "First Person Controller".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Collision host
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        // Controller + Rapier sweep
        .add_plugins((FirstPersonPlugin, RapierSweepPlugin))
        // Keyboard/mouse → PlayerInputEvent
        .add_plugins(PlayerInputPlugin)
        // FOV → projection, cursor lock
        .add_plugins(CameraPlugin)
        .insert_resource(PlayerTunables(tunables))
        .add_systems(Startup, (setup_scene, spawn_player))
        .run();
}

/// Tunables из RON, при ошибке — defaults
fn load_player_tunables() -> ControllerTunables {
    let path = std::env::var("FIRSTPERSON_TUNABLES").unwrap_or_else(|_| DEFAULT_TUNABLES_PATH.to_string());

    match load_tunables(&path) {
        Ok(tunables) => {
            log_info(&format!("Loaded controller tunables from {}", path));
            tunables
        }
        Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            log_info(&format!("No tunables at {}, using defaults", path));
            ControllerTunables::default()
        }
        Err(err) => {
            log_warning(&format!("Ignoring tunables at {}: {}", path, err));
            ControllerTunables::default()
        }
    }
}

/// Spawn ground, препятствия (стены/ступени/платформа), свет
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground (40x40m) + collider (тонкий cuboid, верх на y = 0)
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(20.0)))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));
    commands.spawn((
        Transform::from_xyz(0.0, -0.1, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(20.0, 0.1, 20.0),
    ));

    let block_material = materials.add(Color::srgb(0.6, 0.6, 0.65));

    // (center, half extents)
    let blocks = [
        // Стена впереди
        (Vec3::new(0.0, 1.5, -12.0), Vec3::new(6.0, 1.5, 0.5)),
        // Ступени
        (Vec3::new(5.0, 0.15, -4.0), Vec3::new(1.0, 0.15, 1.0)),
        (Vec3::new(5.0, 0.45, -6.0), Vec3::new(1.0, 0.45, 1.0)),
        // Платформа (достижима прыжком ~2m)
        (Vec3::new(-5.0, 0.75, -6.0), Vec3::new(2.0, 0.75, 2.0)),
    ];

    for (center, half_extents) in blocks {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(half_extents * 2.0))),
            MeshMaterial3d(block_material.clone()),
            Transform::from_translation(center),
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
        ));
    }

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });
}

/// Spawn player: контроллер + Rapier капсула, Camera3d на child entity
fn spawn_player(mut commands: Commands, tunables: Res<PlayerTunables>) {
    let tunables = tunables.0;
    let normal_fov = tunables.normal_fov;

    let (body, camera) = spawn_first_person(
        &mut commands,
        Vec3::new(0.0, CAPSULE_CENTER_HEIGHT, 0.0),
        tunables,
        EYE_OFFSET,
    );

    commands.entity(body).insert(rapier_character_bundle());
    commands.entity(camera).insert((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: normal_fov.to_radians(),
            ..default()
        }),
    ));

    log_info(&format!("Player spawned: body {:?}, camera {:?}", body, camera));
}
