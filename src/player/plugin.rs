use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::animation::{AnimationDriver, MovementAnimation};
use super::audio::{emit_player_audio_messages, AudioTracker, PlayerAudioMessage};
use super::input::*;
use super::locomotion::update_locomotion;
use super::sprint::SprintStamina;
use super::state::*;
use crate::camera::{CameraConfig, CameraPitch, CameraRig, ClimbBob, FpsCamera, LookState};
use crate::interaction::{
    detect_interactions, handle_pickable_interactions, InteractionPlugin, Interactor, ReticleState,
};
use crate::ladder::handle_ladder_interactions;
use crate::physics::GameLayer;

/// Plugin for the first-person player controller
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EnhancedInputPlugin>() {
            app.add_plugins(EnhancedInputPlugin);
        }
        if !app.is_plugin_added::<InteractionPlugin>() {
            app.add_plugins(InteractionPlugin);
        }

        // Register input context for player
        app.add_input_context::<Player>();

        // Input observers
        app.add_observer(handle_move_input);
        app.add_observer(handle_move_end);
        app.add_observer(handle_look_input);
        app.add_observer(handle_sprint_start);
        app.add_observer(handle_sprint_end);
        app.add_observer(handle_jump_start);
        app.add_observer(handle_interact_start);

        app.add_message::<PlayerAudioMessage>();

        app.add_systems(
            FixedUpdate,
            (
                update_locomotion,
                detect_interactions,
                handle_ladder_interactions,
                handle_pickable_interactions,
                emit_player_audio_messages,
            )
                .chain(),
        );

        // Clear look input at end of frame (jump and interact are consumed in FixedUpdate)
        app.add_systems(Last, clear_look_input);
    }
}

/// Spawns a player at `position` and returns the body entity.
///
/// Hierarchy: body → pitch pivot → camera → hold point. The interactor casts
/// from the camera and carries objects at the hold point.
pub fn spawn_player(commands: &mut Commands, config: PlayerConfig, position: Vec3) -> Entity {
    let camera_config = CameraConfig {
        eye_offset: Vec3::Y * (config.stand_height / 2.0 - 0.1),
        ..default()
    };
    let fps_camera = FpsCamera::default();

    let pitch = commands
        .spawn((
            CameraPitch,
            Transform::from_translation(camera_config.eye_offset),
            Visibility::default(),
        ))
        .id();

    let camera = commands
        .spawn((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: fps_camera.fov.to_radians(),
                ..default()
            }),
            fps_camera,
            Transform::default(),
        ))
        .id();

    let hold_point = commands
        .spawn((
            Name::new("Hold Point"),
            Transform::from_xyz(0.0, -0.3, -1.0),
            Visibility::default(),
        ))
        .id();

    commands.entity(pitch).add_child(camera);
    commands.entity(camera).add_child(hold_point);

    let capsule_height = config.stand_height - config.radius * 2.0;

    let body = commands
        .spawn((
            Player,
            config,
            Locomotion::default(),
            SprintStamina::new(config.max_sprint_time, config.sprint_cooldown),
            MovementAnimation::default(),
            AnimationDriver::default(),
            AudioTracker::default(),
        ))
        .insert((
            // Input state
            MoveInput::default(),
            LookInput::default(),
            SprintInput::default(),
            JumpPressed::default(),
            InteractPressed::default(),
        ))
        .insert((
            // Camera and interaction
            camera_config,
            LookState::default(),
            ClimbBob::default(),
            CameraRig { pitch, camera },
            Interactor::new(camera).with_hold_point(hold_point),
            ReticleState::default(),
        ))
        .insert((
            // Physics - kinematic body moved by the character motor
            RigidBody::Kinematic,
            Collider::capsule(config.radius, capsule_height),
            CollisionLayers::new(GameLayer::Player, [GameLayer::World, GameLayer::Interactable]),
        ))
        .insert((
            Transform::from_translation(position),
            Visibility::default(),
        ))
        .insert(
            // Input bindings
            actions!(Player[
                (
                    Action::<MoveAction>::new(),
                    bindings![
                        (KeyCode::KeyW, SwizzleAxis::YXZ),
                        (KeyCode::KeyS, SwizzleAxis::YXZ, Negate::all()),
                        KeyCode::KeyD,
                        (KeyCode::KeyA, Negate::all()),
                    ],
                ),
                (
                    Action::<LookAction>::new(),
                    bindings![
                        Binding::mouse_motion(),
                    ],
                ),
                (
                    Action::<JumpAction>::new(),
                    bindings![KeyCode::Space, GamepadButton::South],
                ),
                (
                    Action::<SprintAction>::new(),
                    bindings![KeyCode::ShiftLeft, GamepadButton::LeftTrigger],
                ),
                (
                    Action::<InteractAction>::new(),
                    bindings![KeyCode::KeyE, GamepadButton::West],
                ),
            ]),
        )
        .id();

    commands.entity(body).add_child(pitch);
    body
}
