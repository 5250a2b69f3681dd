//! Movement systems (ECS адаптер MotionController)
//!
//! Системы:
//! - `resolve_rig_wiring`: fallback связи контроллер → камера (этап конфигурации)
//! - `advance_first_person_controllers`: один frame MotionController для каждого контроллера

use bevy::prelude::*;

use super::controller::{MotionBasis, MotionController};
use crate::components::{CameraLens, CameraRig, ControllerTunables, FirstPersonController, InputState, MotionState};
use crate::physics::{CharacterBody, WorldGravity};

/// Fallback wiring: камера не связана → ищем среди children entity с CameraLens
///
/// Срабатывает при spawn контроллера и при любом изменении CameraRig.
/// Не найдено → контроллер двигается без камеры (look/FOV на камеру не пишутся).
pub fn resolve_rig_wiring(
    mut rigs: Query<(Entity, &mut CameraRig, Option<&Children>), (With<FirstPersonController>, Changed<CameraRig>)>,
    lenses: Query<(), With<CameraLens>>,
) {
    for (entity, mut rig, children) in rigs.iter_mut() {
        if let Some(camera) = rig.camera {
            if lenses.contains(camera) {
                continue;
            }

            crate::log_warning(&format!(
                "CameraRig {:?}: camera {:?} has no CameraLens, resolving from children",
                entity, camera
            ));
        }

        let candidates: &[Entity] = children.map(|children| &**children).unwrap_or(&[]);
        let resolved = candidates.iter().copied().find(|child| lenses.contains(*child));

        match resolved {
            Some(camera) => {
                crate::log(&format!("CameraRig {:?}: resolved camera {:?} from children", entity, camera));
                rig.camera = Some(camera);
            }
            None => {
                if rig.camera.is_some() {
                    rig.camera = None;
                }
                crate::log_warning(&format!(
                    "CameraRig {:?}: no child with CameraLens, look/FOV camera updates disabled",
                    entity
                ));
            }
        }
    }
}

/// Один frame MotionController для каждого first-person контроллера
///
/// # Flow
/// 1. Jump edge из InputState (router выставил на press)
/// 2. Move: velocity → CharacterBody.pending_displacement (host резолвит в FirstPersonSet::Sweep)
/// 3. Look: yaw → Transform тела, pitch → Transform камеры
/// 4. Camera: FOV → CameraLens камеры
///
/// dt = `Time` (per rendered frame), grounded = результат host'а с прошлого frame.
pub fn advance_first_person_controllers(
    time: Res<Time>,
    gravity: Res<WorldGravity>,
    mut controllers: Query<
        (
            Entity,
            &ControllerTunables,
            &mut MotionState,
            &mut InputState,
            &mut CharacterBody,
            &mut Transform,
            &CameraRig,
        ),
        With<FirstPersonController>,
    >,
    mut cameras: Query<(&mut Transform, &mut CameraLens), Without<FirstPersonController>>,
) {
    let delta = time.delta_secs();

    for (entity, tunables, mut state, mut input, mut body, mut transform, rig) in controllers.iter_mut() {
        let basis = MotionBasis::from_transform(&transform);
        let mut camera = rig.camera.and_then(|camera| cameras.get_mut(camera).ok());

        let mut controller = MotionController::new(tunables, &mut *state, gravity.0);
        let output = controller.advance(
            delta,
            &mut input,
            &basis,
            &mut *body,
            camera.as_mut().map(|(_, lens)| &mut **lens),
        );

        if output.jump_requested && !output.jumped {
            crate::log(&format!("Controller {:?}: jump ignored (airborne)", entity));
        }

        // Yaw относительный (композиция с текущей ориентацией)
        if output.look.yaw_delta != 0.0 {
            transform.rotate(output.look.yaw_rotation());
        }

        if let Some((camera_transform, _)) = camera.as_mut() {
            camera_transform.rotation = output.look.camera_rotation;
        }
    }
}
