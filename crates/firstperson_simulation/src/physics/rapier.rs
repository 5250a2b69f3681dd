//! Rapier host: KinematicCharacterController как collision-sweep примитив
//!
//! Архитектура:
//! - Rapier для коллизий (RigidBody::KinematicPositionBased + KinematicCharacterController)
//! - Velocity интегрируем сами (MotionController), Rapier только двигает с учётом коллизий
//! - Output (grounded, effective_translation) читаем в начале следующего frame
//!
//! `RapierPhysicsPlugin` добавляет host (клиент), этот plugin только связывает
//! CharacterBody ↔ KinematicCharacterController.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::sweep::CharacterBody;
use crate::FirstPersonSet;

/// Capsule: half-height 0.5m + radius 0.4m (рост 1.8m)
const CAPSULE_HALF_HEIGHT: f32 = 0.5;
const CAPSULE_RADIUS: f32 = 0.4;

/// Система: pending displacement → KinematicCharacterController.translation
///
/// Rapier резолвит в PhysicsSet::SyncBackend (PostUpdate).
pub fn submit_displacement_to_rapier(
    mut query: Query<(&mut CharacterBody, &mut KinematicCharacterController)>,
) {
    for (mut body, mut controller) in query.iter_mut() {
        if let Some(displacement) = body.take_pending() {
            controller.translation = Some(displacement);
        }
    }
}

/// Система: KinematicCharacterControllerOutput → CharacterBody (grounded + achieved)
pub fn read_rapier_output(
    mut query: Query<
        (&mut CharacterBody, &KinematicCharacterControllerOutput),
        Changed<KinematicCharacterControllerOutput>,
    >,
) {
    for (mut body, output) in query.iter_mut() {
        body.report(output.effective_translation, output.grounded);
    }
}

/// Rapier компоненты для first-person тела
///
/// Origin entity = центр капсулы.
pub fn rapier_character_bundle() -> impl Bundle {
    (
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS),
        KinematicCharacterController {
            up: Vec3::Y,
            offset: CharacterLength::Absolute(0.01),
            // Ground stick (-3 m/s) уже прижимает к полу, snap не нужен
            snap_to_ground: None,
            ..default()
        },
    )
}

/// Plugin: CharacterBody ↔ Rapier KinematicCharacterController
pub struct RapierSweepPlugin;

impl Plugin for RapierSweepPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                read_rapier_output.in_set(FirstPersonSet::HostFeedback),
                submit_displacement_to_rapier.in_set(FirstPersonSet::Sweep),
            ),
        );
    }
}
