mod animation;
mod audio;
pub mod input;
mod locomotion;
mod plugin;
mod sprint;
mod state;

pub use animation::{movement_targets, AnimationDriver, MovementAnimation, PARAMETER_DAMP_TIME};
pub use audio::{emit_player_audio_messages, AudioCue, AudioTracker, PlayerAudioMessage};
pub use input::{InteractPressed, JumpPressed, LookInput, MoveInput, SprintInput};
pub use locomotion::{
    jump_velocity, select_speed, update_locomotion, LocomotionInput, LocomotionStep,
    AXIS_DEADZONE,
};
pub use plugin::{spawn_player, PlayerPlugin};
pub use sprint::SprintStamina;
pub use state::*;
