//! Тесты детерминизма контроллера
//!
//! Одинаковый seed + одинаковый input → идентичное состояние после N frames

use bevy::prelude::*;
use rand::Rng;
use firstperson_simulation::*;

/// Рандомизированный (но seeded) input: move/look/sprint/jump
fn random_input(rng: &mut impl Rng) -> Vec<PlayerInputEvent> {
    let mut events = vec![PlayerInputEvent::Look(Vec2::new(
        rng.gen_range(-50.0..50.0),
        rng.gen_range(-50.0..50.0),
    ))];

    if rng.gen_bool(0.05) {
        events.push(PlayerInputEvent::Move(Vec2::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        )));
    }
    if rng.gen_bool(0.02) {
        events.push(PlayerInputEvent::Sprint { pressed: rng.gen_bool(0.5) });
    }
    if rng.gen_bool(0.01) {
        events.push(PlayerInputEvent::Jump { pressed: true });
    }

    events
}

/// Запускает симуляцию и возвращает RON snapshot MotionState
fn run_simulation(seed: u64, tick_count: usize) -> String {
    let mut app = create_headless_app(seed);

    let player = {
        let world = app.world_mut();
        let mut commands = world.commands();
        let (player, _) = spawn_first_person(&mut commands, Vec3::ZERO, ControllerTunables::default(), 1.6);
        drop(commands);
        world.flush();
        player
    };

    for _ in 0..tick_count {
        let events = {
            let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
            random_input(&mut rng.rng)
        };
        app.world_mut().send_event_batch(events);
        app.update();

        // Инварианты на каждом frame
        let state = app.world().get::<MotionState>(player).expect("MotionState");
        let tunables = app.world().get::<ControllerTunables>(player).expect("ControllerTunables");
        assert!(state.current_pitch.abs() <= tunables.pitch_limit);
        assert!(state.speed <= tunables.sprint_speed + 1e-4, "speed = {}", state.speed);
        assert_eq!(state.horizontal_velocity.y, 0.0);
    }

    world_snapshot::<MotionState>(app.world_mut()).expect("MotionState snapshot")
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 1000;

    let first = run_simulation(SEED, TICK_COUNT);
    let second = run_simulation(SEED, TICK_COUNT);

    assert_eq!(
        first, second,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 500;

    let runs: Vec<_> = (0..3).map(|_| run_simulation(SEED, TICK_COUNT)).collect();

    for (i, run) in runs.iter().enumerate().skip(1) {
        assert_eq!(runs[0], *run, "Прогон {} дал результат отличный от прогона 0", i);
    }
}

#[test]
fn test_snapshot_round_trips() {
    let snapshot = run_simulation(7, 200);

    let restored: Vec<(u32, MotionState)> = ron::from_str(&snapshot).expect("snapshot deserializes");
    assert_eq!(restored.len(), 1, "один контроллер в мире");
    assert_eq!(ron::to_string(&restored).expect("snapshot serializes"), snapshot);
}
