use bevy::prelude::*;

use super::locomotion::AXIS_DEADZONE;
use super::state::Locomotion;

/// Damp time for the float parameters, in seconds
pub const PARAMETER_DAMP_TIME: f32 = 0.1;

/// Animation parameters derived from locomotion each tick.
///
/// The crate does not drive skeletal animation itself; a consumer reads these
/// values and feeds them to whatever blend tree it uses. Nothing is written
/// while the actor is climbing.
#[derive(Component, Debug, Default, Clone, PartialEq)]
pub struct MovementAnimation {
    /// -0.5 backward, 0.5 walk, 1.0 sprint, 0.0 idle or strafing
    pub speed: f32,
    /// -1.0 strafing left, 1.0 strafing right
    pub strafe: f32,
    pub jumping: bool,
    pub falling: bool,
    pub just_landed: bool,
}

/// Switch for an external animation driver.
///
/// Cleared by the camera while climbing so locomotion clips do not play on
/// the ladder.
#[derive(Component, Debug, Clone)]
pub struct AnimationDriver {
    pub enabled: bool,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Raw speed/strafe targets for the given input axes (x = right, y = forward).
pub fn movement_targets(axes: Vec2, grounded: bool, sprinting: bool) -> (f32, f32) {
    let moving = axes.x.abs() > AXIS_DEADZONE || axes.y.abs() > AXIS_DEADZONE;
    if !moving || !grounded {
        return (0.0, 0.0);
    }

    let pure_strafe = axes.y.abs() < AXIS_DEADZONE;
    if pure_strafe && axes.x < -AXIS_DEADZONE {
        (0.0, -1.0)
    } else if pure_strafe && axes.x > AXIS_DEADZONE {
        (0.0, 1.0)
    } else if sprinting {
        (1.0, 0.0)
    } else if axes.y > 0.0 {
        (0.5, 0.0)
    } else if axes.y < 0.0 {
        (-0.5, 0.0)
    } else {
        (0.0, 0.0)
    }
}

impl MovementAnimation {
    /// Pushes the current locomotion state, easing the float parameters.
    pub fn update(&mut self, locomotion: &Locomotion, axes: Vec2, dt: f32) {
        let (speed, strafe) =
            movement_targets(axes, locomotion.is_grounded(), locomotion.is_sprinting());

        let blend = damp_factor(dt);
        self.speed += (speed - self.speed) * blend;
        self.strafe += (strafe - self.strafe) * blend;
        self.jumping = locomotion.is_jumping();
        self.falling = locomotion.is_falling();
        self.just_landed = locomotion.just_landed();
    }
}

fn damp_factor(dt: f32) -> f32 {
    if dt <= 0.0 {
        return 0.0;
    }
    1.0 - (-dt / PARAMETER_DAMP_TIME).exp()
}
