//! Headless симуляция first-person контроллера
//!
//! Прогоняет скриптованный input (walk → sprint → jump → stop) без рендера
//! и печатает состояние контроллера.

use bevy::prelude::*;
use rand::Rng;
use firstperson_simulation::{
    create_headless_app, log_info, spawn_first_person, CameraLens, ControllerTunables, DeterministicRng,
    MotionState, PlayerInputEvent,
};

/// Скриптованный input на тик
fn scripted_input(tick: u32) -> Vec<PlayerInputEvent> {
    match tick {
        0 => vec![PlayerInputEvent::Move(Vec2::new(0.0, 1.0))],
        120 => vec![PlayerInputEvent::Sprint { pressed: true }],
        240 => vec![PlayerInputEvent::Jump { pressed: true }],
        241 => vec![PlayerInputEvent::Jump { pressed: false }],
        360 => vec![
            PlayerInputEvent::Move(Vec2::ZERO),
            PlayerInputEvent::Sprint { pressed: false },
        ],
        _ => Vec::new(),
    }
}

fn main() {
    let seed = 42;
    println!("Starting first-person headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);

    let (body, camera) = {
        let world = app.world_mut();
        let mut commands = world.commands();
        let spawned = spawn_first_person(&mut commands, Vec3::ZERO, ControllerTunables::default(), 1.6);
        drop(commands);
        world.flush();
        spawned
    };

    for tick in 0..600 {
        let mut events = scripted_input(tick);

        // Небольшой детерминированный "дрожащий" look (как реальная мышь)
        let jitter = {
            let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
            Vec2::new(rng.rng.gen_range(-5.0..5.0), rng.rng.gen_range(-2.0..2.0))
        };
        events.push(PlayerInputEvent::Look(jitter));

        app.world_mut().send_event_batch(events);
        app.update();

        if tick % 60 == 0 {
            let world = app.world();
            let (Some(state), Some(transform), Some(lens)) = (
                world.get::<MotionState>(body),
                world.get::<Transform>(body),
                world.get::<CameraLens>(camera),
            ) else {
                continue;
            };

            log_info(&format!(
                "Tick {}: pos={:.2} speed={:.2} vy={:.2} pitch={:.1} fov={:.1}",
                tick, transform.translation, state.speed, state.vertical_velocity, state.current_pitch, lens.field_of_view
            ));
        }
    }

    println!("Simulation complete!");
}
