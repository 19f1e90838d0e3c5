mod effects;
mod look;
mod plugin;
mod smoothing;

pub use effects::{apply_climb_effects, handle_camera_reset, CameraResetMessage, ClimbBob};
pub use look::{
    apply_mouse_look, body_yaw_degrees, BodyYaw, CameraConfig, CameraPitch, CameraRig, FpsCamera,
    LookState,
};
pub use plugin::CameraPlugin;
pub use smoothing::{exp_smooth, wrap_degrees};
