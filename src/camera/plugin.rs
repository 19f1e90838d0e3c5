use bevy::prelude::*;

use super::{effects::*, look::*};

/// Plugin for FPS camera look and climbing effects
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<CameraResetMessage>();

        app.add_systems(
            Update,
            (apply_mouse_look, apply_climb_effects, handle_camera_reset).chain(),
        );
    }
}
