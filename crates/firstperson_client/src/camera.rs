use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use firstperson_simulation::{CameraLens, FirstPersonSet};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, grab_cursor)
            .add_systems(Update, (
                toggle_cursor_grab,
                sync_lens_to_projection.after(FirstPersonSet::Motion),
            ));
    }
}

/// CameraLens (градусы) → PerspectiveProjection.fov (радианы)
fn sync_lens_to_projection(
    mut query: Query<(&CameraLens, &mut Projection), Changed<CameraLens>>,
) {
    for (lens, mut projection) in query.iter_mut() {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.fov = lens.field_of_view.to_radians();
        }
    }
}

fn set_cursor_grab(window: &mut Window, grabbed: bool) {
    window.cursor_options.visible = !grabbed;
    window.cursor_options.grab_mode = if grabbed {
        CursorGrabMode::Locked
    } else {
        CursorGrabMode::None
    };
}

/// Курсор скрыт и захвачен с первого frame
fn grab_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    set_cursor_grab(&mut window, true);
}

/// Escape → отпустить курсор, LMB → снова захватить
fn toggle_cursor_grab(
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    if keys.just_pressed(KeyCode::Escape) {
        set_cursor_grab(&mut window, false);
        firstperson_simulation::log_info("Cursor released (click to capture)");
    } else if mouse_buttons.just_pressed(MouseButton::Left)
        && window.cursor_options.grab_mode == CursorGrabMode::None
    {
        set_cursor_grab(&mut window, true);
    }
}
