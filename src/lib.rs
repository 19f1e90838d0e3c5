pub mod camera;
pub mod interaction;
pub mod ladder;
pub mod physics;
pub mod player;

pub use camera::CameraPlugin;
pub use interaction::InteractionPlugin;
pub use ladder::LadderGizmosPlugin;
pub use physics::PhysicsPlugin;
pub use player::PlayerPlugin;

use bevy::prelude::*;

/// Unified plugin that adds physics, player controller, interaction and camera systems.
///
/// [`LadderGizmosPlugin`] is not included.
pub struct ClimbControllerPlugin;

impl Plugin for ClimbControllerPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<PhysicsPlugin>() {
            app.add_plugins(PhysicsPlugin);
        }
        if !app.is_plugin_added::<InteractionPlugin>() {
            app.add_plugins(InteractionPlugin);
        }
        if !app.is_plugin_added::<PlayerPlugin>() {
            app.add_plugins(PlayerPlugin);
        }
        if !app.is_plugin_added::<CameraPlugin>() {
            app.add_plugins(CameraPlugin);
        }
    }
}

pub mod prelude {
    pub use crate::camera::{
        CameraConfig, CameraPlugin, CameraResetMessage, CameraRig, ClimbBob, FpsCamera, LookState,
    };
    pub use crate::interaction::{
        spawn_reticle, InteractMessage, Interactable, InteractionPlugin, Interactor, Pickable,
        Reticle, ReticleState,
    };
    pub use crate::ladder::{Ladder, LadderAnchors, LadderError, LadderGizmosPlugin};
    pub use crate::physics::{GameLayer, PhysicsPlugin};
    pub use crate::player::{
        spawn_player, AnimationDriver, AudioCue, Locomotion, MovementAnimation, Player,
        PlayerAudioMessage, PlayerConfig, PlayerPlugin, SprintStamina,
    };
    pub use crate::ClimbControllerPlugin;
}
