use bevy::prelude::*;

use super::smoothing::wrap_degrees;
use crate::player::{Locomotion, LookInput, Player};

/// Marker for the pitch pivot between the body and the camera
#[derive(Component)]
pub struct CameraPitch;

/// Marker for the player camera
#[derive(Component)]
pub struct FpsCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Default for FpsCamera {
    fn default() -> Self {
        Self { fov: 90.0 }
    }
}

/// Explicit handles from the player body to its camera entities
#[derive(Component, Debug, Clone, Copy)]
pub struct CameraRig {
    pub pitch: Entity,
    pub camera: Entity,
}

/// Look and climbing camera configuration. Angles are in degrees, positive
/// pitch looks up.
#[derive(Component, Debug, Clone)]
pub struct CameraConfig {
    /// Degrees per pixel of mouse motion
    pub sensitivity: f32,
    /// (min, max) pitch on foot
    pub pitch_range: Vec2,
    /// (min, max) pitch while climbing
    pub climbing_pitch_range: Vec2,
    /// (min, max) yaw while climbing, relative to the ladder facing
    pub climbing_yaw_range: Vec2,
    /// Vertical bob amplitude in meters
    pub bob_amount: f32,
    /// Bob phase advance per second
    pub bob_speed: f32,
    /// Bob easing rate per second
    pub bob_smoothing: f32,
    pub disable_animator_while_climbing: bool,
    /// Rest position of the pitch pivot relative to the body
    pub eye_offset: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.1,
            pitch_range: Vec2::new(-70.0, 60.0),
            climbing_pitch_range: Vec2::new(-20.0, 80.0),
            climbing_yaw_range: Vec2::new(-45.0, 45.0),
            bob_amount: 0.15,
            bob_speed: 8.0,
            bob_smoothing: 6.0,
            disable_animator_while_climbing: true,
            eye_offset: Vec3::new(0.0, 0.8, 0.0),
        }
    }
}

/// How the body yaw should change this frame, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyYaw {
    /// Rotate by this amount
    Relative(f32),
    /// Set to this heading
    Absolute(f32),
}

/// Tracked look angles in degrees
#[derive(Component, Debug, Clone, Default)]
pub struct LookState {
    yaw: f32,
    pitch: f32,
    /// Body yaw captured when climbing began
    climb_base: Option<f32>,
}

impl LookState {
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Forgets the climbing reference and takes the body heading as yaw
    pub fn resync(&mut self, body_yaw: f32) {
        self.climb_base = None;
        self.yaw = wrap_degrees(body_yaw);
    }

    /// Applies a mouse delta in pixels and returns the body rotation to make.
    ///
    /// `body_yaw` is the current heading of the body in degrees.
    pub fn apply(
        &mut self,
        config: &CameraConfig,
        delta: Vec2,
        climbing: bool,
        body_yaw: f32,
    ) -> BodyYaw {
        let yaw_delta = -delta.x * config.sensitivity;
        let pitch_delta = -delta.y * config.sensitivity;

        let pitch_range = if climbing {
            config.climbing_pitch_range
        } else {
            config.pitch_range
        };
        self.pitch = (self.pitch + pitch_delta).clamp(pitch_range.x, pitch_range.y);

        if !climbing {
            self.climb_base = None;
            self.yaw = wrap_degrees(body_yaw + yaw_delta);
            return BodyYaw::Relative(yaw_delta);
        }

        let base = *self.climb_base.get_or_insert_with(|| {
            self.yaw = body_yaw;
            body_yaw
        });
        let relative = (self.yaw + yaw_delta - base)
            .clamp(config.climbing_yaw_range.x, config.climbing_yaw_range.y);
        self.yaw = base + relative;
        BodyYaw::Absolute(self.yaw)
    }
}

/// Heading of `rotation` around world up, in degrees
pub fn body_yaw_degrees(rotation: Quat) -> f32 {
    rotation.to_euler(EulerRot::YXZ).0.to_degrees()
}

/// Turns the body for yaw and the pitch pivot for pitch.
pub fn apply_mouse_look(
    mut players: Query<
        (
            &LookInput,
            &Locomotion,
            &CameraConfig,
            &CameraRig,
            &mut LookState,
            &mut Transform,
        ),
        With<Player>,
    >,
    mut pitches: Query<&mut Transform, (With<CameraPitch>, Without<Player>)>,
) {
    for (look_input, locomotion, config, rig, mut look, mut transform) in &mut players {
        let body_yaw = body_yaw_degrees(transform.rotation);

        match look.apply(config, look_input.0, locomotion.is_climbing(), body_yaw) {
            BodyYaw::Relative(delta) => transform.rotate_y(delta.to_radians()),
            BodyYaw::Absolute(yaw) => transform.rotation = Quat::from_rotation_y(yaw.to_radians()),
        }

        if let Ok(mut pitch_transform) = pitches.get_mut(rig.pitch) {
            pitch_transform.rotation = Quat::from_rotation_x(look.pitch().to_radians());
        }
    }
}
