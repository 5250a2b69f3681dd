//! MotionController — per-frame интеграция движения, look и FOV
//!
//! Чистая логика без ECS: все зависимости передаются явно
//! (tunables, state, gravity, collision sweep, camera lens).
//! ECS адаптер: `movement::systems::advance_first_person_controllers`.
//!
//! Порядок внутри frame: pending jump → move → look → camera.

use bevy::prelude::*;

use crate::components::{CameraLens, ControllerTunables, InputState, MotionState};
use crate::physics::CollisionSweep;

/// Vertical velocity на земле (прижимает тело к полу для стабильного ground probe)
pub const GROUND_STICK_VELOCITY: f32 = -3.0;

/// Выше этого vertical velocity считаем что тело поднимается (ground stick не применяем)
pub const ASCENDING_THRESHOLD: f32 = 0.01;

/// Минимальный |direction|² чтобы считать input движением
pub const MIN_MOVE_INPUT_SQR: f32 = 0.01;

/// Sprint без реальной скорости не считается (стоим с зажатым Shift → FOV не расширяется)
pub const SPRINT_SPEED_THRESHOLD: f32 = 0.1;

/// Векторы ниже этой длины при normalize считаем нулевыми
const NORMALIZE_EPSILON: f32 = 1e-5;

/// Move-towards: шаг к target не длиннее `max_delta`, без overshoot
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();

    if distance == 0.0 || distance <= max_delta {
        return target;
    }

    current + delta / distance * max_delta
}

/// Linear interpolation с t ∈ [0, 1]
pub fn lerp_clamped(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Начальная скорость прыжка из v² = 2·g·h
pub fn jump_velocity(jump_height: f32, gravity_y: f32, gravity_scale: f32) -> f32 {
    (jump_height * 2.0 * gravity_y.abs() * gravity_scale).sqrt()
}

/// Ориентация тела (forward/right) на момент frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl MotionBasis {
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            forward: *transform.forward(),
            right: *transform.right(),
        }
    }

    /// Желаемое горизонтальное направление из move axis
    ///
    /// Y обнуляется ДО normalize. Нулевой вектор остаётся нулевым.
    pub fn desired_direction(&self, move_axis: Vec2) -> Vec3 {
        let mut motion = self.forward * move_axis.y + self.right * move_axis.x;
        motion.y = 0.0;

        let length = motion.length();
        if length > NORMALIZE_EPSILON {
            motion / length
        } else {
            Vec3::ZERO
        }
    }
}

impl Default for MotionBasis {
    fn default() -> Self {
        Self::from_transform(&Transform::IDENTITY)
    }
}

/// Результат look update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookUpdate {
    /// Локальный rotation камеры (чистый pitch)
    pub camera_rotation: Quat,
    /// Приращение yaw тела (градусы, > 0 = поворот вправо)
    pub yaw_delta: f32,
}

impl LookUpdate {
    /// Yaw как rotation вокруг world up
    ///
    /// Bevy right-handed: поворот вправо = отрицательный угол вокруг +Y.
    pub fn yaw_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw_delta.to_radians())
    }
}

/// Результат одного frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    /// Смещение, которое вернул collision sweep (в velocity НЕ учитывается)
    pub achieved_displacement: Vec3,
    /// Был ли jump request в этом frame
    pub jump_requested: bool,
    /// Прыжок выполнен (false если request был в воздухе)
    pub jumped: bool,
    pub look: LookUpdate,
}

/// MotionController: продвигает MotionState на один frame
///
/// Создаётся на frame с явными ссылками на настройки и состояние:
/// ```ignore
/// let mut controller = MotionController::new(&tunables, &mut state, gravity.0);
/// let output = controller.advance(dt, &mut input, &basis, &mut body, Some(&mut lens));
/// ```
pub struct MotionController<'a> {
    tunables: &'a ControllerTunables,
    state: &'a mut MotionState,
    gravity: Vec3,
}

impl<'a> MotionController<'a> {
    pub fn new(tunables: &'a ControllerTunables, state: &'a mut MotionState, gravity: Vec3) -> Self {
        Self {
            tunables,
            state,
            gravity,
        }
    }

    pub fn state(&self) -> &MotionState {
        self.state
    }

    pub fn tunables(&self) -> &ControllerTunables {
        self.tunables
    }

    /// Текущая максимальная скорость (walk или sprint)
    pub fn max_speed(&self, input: &InputState) -> f32 {
        if input.sprint_held {
            self.tunables.sprint_speed
        } else {
            self.tunables.walk_speed
        }
    }

    /// Sprint = зажат sprint И реально движемся
    pub fn is_sprinting(&self, input: &InputState) -> bool {
        input.sprint_held && self.state.speed > SPRINT_SPEED_THRESHOLD
    }

    /// Pitch с clamp в [-pitch_limit, pitch_limit]
    pub fn set_pitch(&mut self, pitch: f32) {
        let limit = self.tunables.pitch_limit.abs();
        self.state.current_pitch = pitch.clamp(-limit, limit);
    }

    /// Прыжок (только с земли: ни double-jump, ни буфера)
    ///
    /// Возвращает true если прыжок выполнен.
    pub fn try_jump<S: CollisionSweep + ?Sized>(&mut self, sweep: &S) -> bool {
        if !sweep.is_grounded() {
            return false;
        }

        self.state.vertical_velocity = jump_velocity(
            self.tunables.jump_height,
            self.gravity.y,
            self.tunables.gravity_scale,
        );
        true
    }

    /// Move update: horizontal velocity, vertical velocity, sweep
    ///
    /// Возвращает смещение от collision sweep.
    pub fn move_update<S: CollisionSweep + ?Sized>(
        &mut self,
        delta: f32,
        input: &InputState,
        basis: &MotionBasis,
        sweep: &mut S,
    ) -> Vec3 {
        let direction = basis.desired_direction(input.move_axis);
        let max_step = self.tunables.acceleration * delta;

        let target = if direction.length_squared() >= MIN_MOVE_INPUT_SQR {
            direction * self.max_speed(input)
        } else {
            Vec3::ZERO
        };
        self.state.horizontal_velocity = move_towards(self.state.horizontal_velocity, target, max_step);

        if sweep.is_grounded() && self.state.vertical_velocity <= ASCENDING_THRESHOLD {
            self.state.vertical_velocity = GROUND_STICK_VELOCITY;
        } else {
            // Explicit Euler (gravity.y < 0)
            self.state.vertical_velocity += self.gravity.y * self.tunables.gravity_scale * delta;
        }

        let velocity = Vec3::new(
            self.state.horizontal_velocity.x,
            self.state.vertical_velocity,
            self.state.horizontal_velocity.z,
        );
        let achieved = sweep.sweep_move(velocity * delta);

        self.state.speed = self.state.horizontal_velocity.length();
        achieved
    }

    /// Look update: pitch (clamp) на камеру, yaw на тело
    pub fn look_update(&mut self, input: &InputState) -> LookUpdate {
        let look = input.look_axis * self.tunables.look_sensitivity;

        // Вверх/вниз
        self.set_pitch(self.state.current_pitch - look.y);

        LookUpdate {
            camera_rotation: Quat::from_rotation_x(-self.state.current_pitch.to_radians()),
            yaw_delta: look.x,
        }
    }

    /// Целевой FOV: растёт с фактической скоростью, а не с намерением
    pub fn target_fov(&self, input: &InputState) -> f32 {
        if !self.is_sprinting(input) {
            return self.tunables.normal_fov;
        }

        let speed_ratio = if self.tunables.sprint_speed > 0.0 {
            self.state.speed / self.tunables.sprint_speed
        } else {
            1.0
        };

        lerp_clamped(self.tunables.normal_fov, self.tunables.sprint_fov, speed_ratio)
    }

    /// Camera update: FOV плавно к target
    ///
    /// Линейный lerp с фактором smoothing * dt (слегка зависит от frame rate).
    pub fn camera_update(&self, delta: f32, input: &InputState, lens: &mut CameraLens) {
        let target = self.target_fov(input);
        lens.field_of_view = lerp_clamped(lens.field_of_view, target, self.tunables.fov_smoothing * delta);
    }

    /// Полный frame: jump → move → look → camera
    ///
    /// `lens = None` → камера не связана, FOV не трогаем.
    pub fn advance<S: CollisionSweep + ?Sized>(
        &mut self,
        delta: f32,
        input: &mut InputState,
        basis: &MotionBasis,
        sweep: &mut S,
        lens: Option<&mut CameraLens>,
    ) -> FrameOutput {
        let jump_requested = input.take_jump_request();
        let jumped = jump_requested && self.try_jump(&*sweep);

        let achieved_displacement = self.move_update(delta, input, basis, sweep);
        let look = self.look_update(input);

        if let Some(lens) = lens {
            self.camera_update(delta, input, lens);
        }

        FrameOutput {
            achieved_displacement,
            jump_requested,
            jumped,
            look,
        }
    }
}
