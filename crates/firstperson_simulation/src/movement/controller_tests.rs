//! Tests for MotionController.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::components::{CameraLens, ControllerTunables, InputState, MotionState};
    use crate::movement::controller::*;
    use crate::physics::{CollisionSweep, FlatGroundSweep, STANDARD_GRAVITY};

    const DT: f32 = 1.0 / 60.0;

    fn gravity() -> Vec3 {
        Vec3::new(0.0, STANDARD_GRAVITY, 0.0)
    }

    fn forward_input() -> InputState {
        InputState {
            move_axis: Vec2::new(0.0, 1.0),
            ..default()
        }
    }

    /// Sweep, который всегда отвечает заданным grounded и ничего не резолвит
    struct FixedSweep {
        grounded: bool,
        submitted: Vec<Vec3>,
    }

    impl FixedSweep {
        fn new(grounded: bool) -> Self {
            Self {
                grounded,
                submitted: Vec::new(),
            }
        }
    }

    impl CollisionSweep for FixedSweep {
        fn sweep_move(&mut self, displacement: Vec3) -> Vec3 {
            self.submitted.push(displacement);
            displacement
        }

        fn is_grounded(&self) -> bool {
            self.grounded
        }
    }

    #[test]
    fn test_move_towards_caps_step() {
        let result = move_towards(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 0.25);
        assert_eq!(result, Vec3::new(0.25, 0.0, 0.0));

        // Близко к target → snap без overshoot
        let result = move_towards(Vec3::new(9.9, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0), 0.25);
        assert_eq!(result, Vec3::new(10.0, 0.0, 0.0));

        // Уже на месте
        let result = move_towards(Vec3::ONE, Vec3::ONE, 0.0);
        assert_eq!(result, Vec3::ONE);
    }

    #[test]
    fn test_desired_direction_flattens_and_normalizes() {
        // Взгляд вниз на 45°: forward имеет Y компоненту
        let transform = Transform::IDENTITY.looking_to(Vec3::new(0.0, -1.0, -1.0), Vec3::Y);
        let basis = MotionBasis::from_transform(&transform);

        let direction = basis.desired_direction(Vec2::new(0.0, 1.0));

        assert_eq!(direction.y, 0.0);
        assert!((direction.length() - 1.0).abs() < 1e-5);
        assert!((direction.z + 1.0).abs() < 1e-5, "direction = {:?}", direction);

        // Диагональ не быстрее прямого движения
        let diagonal = MotionBasis::default().desired_direction(Vec2::new(1.0, 1.0));
        assert!((diagonal.length() - 1.0).abs() < 1e-5);

        // Нулевой input → нулевое направление
        assert_eq!(MotionBasis::default().desired_direction(Vec2::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_pitch_clamped_at_limit() {
        let tunables = ControllerTunables::default(); // pitch_limit = 85
        let mut state = MotionState::default();
        let mut controller = MotionController::new(&tunables, &mut state, gravity());

        // look.y = -1000 * 0.1 = -100 за frame → pitch растёт (взгляд вниз)
        let look_down = InputState {
            look_axis: Vec2::new(0.0, -1000.0),
            ..default()
        };
        for _ in 0..10 {
            controller.look_update(&look_down);
            assert!(controller.state().current_pitch <= 85.0);
        }
        assert_eq!(controller.state().current_pitch, 85.0);

        let look_up = InputState {
            look_axis: Vec2::new(0.0, 1000.0),
            ..default()
        };
        for _ in 0..10 {
            controller.look_update(&look_up);
            assert!(controller.state().current_pitch >= -85.0);
        }
        assert_eq!(controller.state().current_pitch, -85.0);
    }

    #[test]
    fn test_pitch_invariant_random_input() {
        let tunables = ControllerTunables::default();
        let mut state = MotionState::default();
        let mut controller = MotionController::new(&tunables, &mut state, gravity());
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..5000 {
            let input = InputState {
                look_axis: Vec2::new(rng.gen_range(-2000.0..2000.0), rng.gen_range(-2000.0..2000.0)),
                ..default()
            };
            controller.look_update(&input);

            let pitch = controller.state().current_pitch;
            assert!((-85.0..=85.0).contains(&pitch), "pitch = {}", pitch);
        }
    }

    #[test]
    fn test_look_yaw_and_camera_rotation() {
        let tunables = ControllerTunables::default();
        let mut state = MotionState::default();
        let mut controller = MotionController::new(&tunables, &mut state, gravity());

        let input = InputState {
            look_axis: Vec2::new(100.0, 0.0),
            ..default()
        };
        let look = controller.look_update(&input);

        // 100 * 0.1 = 10° вправо
        assert!((look.yaw_delta - 10.0).abs() < 1e-5);
        // Поворот вправо: forward (-Z) уходит в +X
        let turned = look.yaw_rotation() * Vec3::NEG_Z;
        assert!(turned.x > 0.0, "turned = {:?}", turned);

        // Pitch не менялся → camera rotation = identity
        assert!(look.camera_rotation.angle_between(Quat::IDENTITY) < 1e-5);
    }

    #[test]
    fn test_positive_pitch_looks_down() {
        let tunables = ControllerTunables::default();
        let mut state = MotionState::default();
        let mut controller = MotionController::new(&tunables, &mut state, gravity());

        controller.set_pitch(30.0);
        let look = controller.look_update(&InputState::default());

        let view = look.camera_rotation * Vec3::NEG_Z;
        assert!(view.y < 0.0, "view = {:?}", view);
    }

    #[test]
    fn test_jump_velocity_from_height() {
        let tunables = ControllerTunables {
            jump_height: 2.0,
            gravity_scale: 3.0,
            ..default()
        };
        let mut state = MotionState::default();
        let mut controller = MotionController::new(&tunables, &mut state, gravity());

        assert!(controller.try_jump(&FixedSweep::new(true)));

        let expected = (2.0_f32 * 2.0 * 9.81 * 3.0).sqrt();
        assert!((controller.state().vertical_velocity - expected).abs() < 1e-4);
    }

    #[test]
    fn test_no_air_jump() {
        let tunables = ControllerTunables::default();
        let mut state = MotionState {
            vertical_velocity: -4.2,
            ..default()
        };
        let mut controller = MotionController::new(&tunables, &mut state, gravity());

        assert!(!controller.try_jump(&FixedSweep::new(false)));
        assert_eq!(controller.state().vertical_velocity, -4.2);
    }

    #[test]
    fn test_jump_apex_matches_jump_height() {
        let tunables = ControllerTunables::default(); // jump_height = 2.0
        let mut state = MotionState::default();
        let mut controller = MotionController::new(&tunables, &mut state, gravity());
        let mut sweep = FlatGroundSweep::new(Vec3::ZERO, 0.0);
        let basis = MotionBasis::default();

        let dt = 1.0 / 240.0;
        let mut input = InputState {
            jump_requested: true,
            ..default()
        };

        let first = controller.advance(dt, &mut input, &basis, &mut sweep, None);
        assert!(first.jumped);
        assert!(!input.jump_requested, "jump edge должен быть потреблён");

        let mut apex: f32 = sweep.position.y;
        for _ in 0..480 {
            controller.advance(dt, &mut input, &basis, &mut sweep, None);
            apex = apex.max(sweep.position.y);
        }

        // Semi-implicit Euler недолетает примерно на v0 * dt / 2
        assert!((apex - 2.0).abs() < 0.05, "apex = {}", apex);
        // И приземлились обратно
        assert!(sweep.is_grounded());
        assert_eq!(sweep.position.y, 0.0);
    }

    #[test]
    fn test_ground_stick_when_grounded() {
        let tunables = ControllerTunables::default();
        let mut state = MotionState::default();
        let mut controller = MotionController::new(&tunables, &mut state, gravity());
        let mut sweep = FixedSweep::new(true);

        controller.move_update(DT, &InputState::default(), &MotionBasis::default(), &mut sweep);

        assert_eq!(controller.state().vertical_velocity, GROUND_STICK_VELOCITY);
        assert!((sweep.submitted[0].y - GROUND_STICK_VELOCITY * DT).abs() < 1e-6);
    }

    #[test]
    fn test_gravity_integration_when_airborne() {
        let tunables = ControllerTunables::default(); // gravity_scale = 3
        let mut state = MotionState::default();
        let mut controller = MotionController::new(&tunables, &mut state, gravity());
        let mut sweep = FixedSweep::new(false);

        controller.move_update(DT, &InputState::default(), &MotionBasis::default(), &mut sweep);

        // -9.81 * 3 / 60 ≈ -0.4905
        let expected = -9.81 * 3.0 * DT;
        assert!((controller.state().vertical_velocity - expected).abs() < 1e-5);
    }

    #[test]
    fn test_ascending_ignores_ground_stick() {
        let tunables = ControllerTunables::default();
        let mut state = MotionState {
            vertical_velocity: 5.0,
            ..default()
        };
        let mut controller = MotionController::new(&tunables, &mut state, gravity());

        // Grounded, но поднимаемся (сразу после прыжка) → гравитация, не stick
        controller.move_update(DT, &InputState::default(), &MotionBasis::default(), &mut FixedSweep::new(true));

        assert!(controller.state().vertical_velocity < 5.0);
        assert!(controller.state().vertical_velocity > 4.0);
    }

    #[test]
    fn test_acceleration_reaches_walk_speed() {
        let tunables = ControllerTunables::default(); // walk 3.5, accel 15
        let mut state = MotionState::default();
        let mut controller = MotionController::new(&tunables, &mut state, gravity());
        let mut sweep = FixedSweep::new(true);
        let input = forward_input();

        // 3.5 / 15 ≈ 0.233 sec ≈ 14 frames при 60Hz
        let frames = (tunables.walk_speed / tunables.acceleration / DT).ceil() as usize + 1;
        for _ in 0..frames {
            controller.move_update(DT, &input, &MotionBasis::default(), &mut sweep);
            assert!(controller.state().speed <= tunables.walk_speed + 1e-5);
        }

        assert!((controller.state().speed - 3.5).abs() < 1e-4, "speed = {}", controller.state().speed);
        // Forward = -Z
        assert!(controller.state().horizontal_velocity.z < 0.0);
        assert_eq!(controller.state().horizontal_velocity.y, 0.0);
    }

    #[test]
    fn test_sprint_speed_cap() {
        let tunables = ControllerTunables::default();
        let mut state = MotionState::default();
        let mut controller = MotionController::new(&tunables, &mut state, gravity());
        let mut sweep = FixedSweep::new(true);
        let input = InputState {
            move_axis: Vec2::new(1.0, 1.0),
            sprint_held: true,
            ..default()
        };

        assert_eq!(controller.max_speed(&input), 8.0);

        for _ in 0..120 {
            controller.move_update(DT, &input, &MotionBasis::default(), &mut sweep);
            assert!(controller.state().speed <= 8.0 + 1e-4);
        }
        assert!((controller.state().speed - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_deceleration_to_zero_without_overshoot() {
        let tunables = ControllerTunables::default();
        let mut state = MotionState {
            horizontal_velocity: Vec3::new(2.0, 0.0, -3.0),
            ..default()
        };
        let mut controller = MotionController::new(&tunables, &mut state, gravity());
        let mut sweep = FixedSweep::new(true);

        let initial = Vec3::new(2.0, 0.0, -3.0);
        for _ in 0..60 {
            controller.move_update(DT, &InputState::default(), &MotionBasis::default(), &mut sweep);

            // Направление не переворачивается
            let velocity = controller.state().horizontal_velocity;
            assert!(velocity.dot(initial) >= 0.0, "velocity = {:?}", velocity);
        }

        assert_eq!(controller.state().horizontal_velocity, Vec3::ZERO);
        assert_eq!(controller.state().speed, 0.0);
    }

    #[test]
    fn test_stationary_sprint_is_not_sprinting() {
        let tunables = ControllerTunables::default();
        let mut state = MotionState::default();
        let controller = MotionController::new(&tunables, &mut state, gravity());
        let input = InputState {
            sprint_held: true,
            ..default()
        };

        assert!(!controller.is_sprinting(&input));
        assert_eq!(controller.target_fov(&input), tunables.normal_fov);
    }

    #[test]
    fn test_target_fov_follows_speed() {
        let tunables = ControllerTunables::default(); // 60 → 80, sprint 8
        let mut state = MotionState {
            speed: 4.0,
            ..default()
        };
        let controller = MotionController::new(&tunables, &mut state, gravity());

        let sprinting = InputState {
            sprint_held: true,
            ..default()
        };
        // Половина sprint speed → половина диапазона FOV
        assert!((controller.target_fov(&sprinting) - 70.0).abs() < 1e-4);

        // Без sprint → normal FOV даже на скорости
        assert_eq!(controller.target_fov(&InputState::default()), 60.0);
    }

    #[test]
    fn test_camera_fov_smoothing() {
        let tunables = ControllerTunables {
            fov_smoothing: 6.0,
            ..default()
        };
        let mut state = MotionState {
            speed: 8.0,
            ..default()
        };
        let controller = MotionController::new(&tunables, &mut state, gravity());
        let input = InputState {
            sprint_held: true,
            ..default()
        };
        let mut lens = CameraLens { field_of_view: 60.0 };

        // t = 6 / 60 = 0.1 → 60 + (80 - 60) * 0.1 = 62
        controller.camera_update(DT, &input, &mut lens);
        assert!((lens.field_of_view - 62.0).abs() < 1e-3, "fov = {}", lens.field_of_view);

        // Монотонно к target, без overshoot
        let mut previous = lens.field_of_view;
        for _ in 0..600 {
            controller.camera_update(DT, &input, &mut lens);
            assert!(lens.field_of_view >= previous);
            assert!(lens.field_of_view <= 80.0);
            previous = lens.field_of_view;
        }
        assert!((lens.field_of_view - 80.0).abs() < 0.01);
    }

    #[test]
    fn test_equilibrium_is_idempotent() {
        let tunables = ControllerTunables::default();
        let mut state = MotionState::default();
        let mut controller = MotionController::new(&tunables, &mut state, gravity());
        let mut sweep = FlatGroundSweep::new(Vec3::ZERO, 0.0);
        let basis = MotionBasis::default();
        let mut lens = CameraLens { field_of_view: tunables.normal_fov };
        let mut input = InputState::default();

        // Первый frame выставляет ground stick
        controller.advance(DT, &mut input, &basis, &mut sweep, Some(&mut lens));
        let settled_state = *controller.state();
        let settled_position = sweep.position;

        for _ in 0..100 {
            let output = controller.advance(DT, &mut input, &basis, &mut sweep, Some(&mut lens));
            assert_eq!(output.look.yaw_delta, 0.0);
        }

        assert_eq!(*controller.state(), settled_state);
        assert_eq!(sweep.position, settled_position);
        assert_eq!(lens.field_of_view, tunables.normal_fov);
    }

    #[test]
    fn test_collision_result_does_not_correct_velocity() {
        let tunables = ControllerTunables::default();
        let mut state = MotionState {
            horizontal_velocity: Vec3::new(0.0, 0.0, -3.5),
            speed: 3.5,
            ..default()
        };
        let mut controller = MotionController::new(&tunables, &mut state, gravity());

        /// Стена: всё смещение поглощается
        struct Wall;
        impl CollisionSweep for Wall {
            fn sweep_move(&mut self, _displacement: Vec3) -> Vec3 {
                Vec3::ZERO
            }
            fn is_grounded(&self) -> bool {
                true
            }
        }

        let achieved = controller.move_update(DT, &forward_input(), &MotionBasis::default(), &mut Wall);

        assert_eq!(achieved, Vec3::ZERO);
        assert!((controller.state().speed - 3.5).abs() < 1e-5);
    }
}
