use avian3d::prelude::*;
use bevy::prelude::*;

use super::animation::MovementAnimation;
use super::input::{JumpPressed, MoveInput, SprintInput};
use super::sprint::SprintStamina;
use super::state::*;
use crate::ladder::{ClimbStep, Ladder};
use crate::physics::{check_ground, foot_anchor, CharacterMotor};

/// Axis magnitude below which an input direction counts as released
pub const AXIS_DEADZONE: f32 = 0.1;

/// Everything the locomotion tick reads from the outside world
#[derive(Debug, Clone, Copy, Default)]
pub struct LocomotionInput {
    /// x = right, y = forward
    pub axes: Vec2,
    /// Sprint key held
    pub sprint: bool,
    /// Jump pressed since the last tick
    pub jump: bool,
    /// Result of the ground overlap probe
    pub grounded: bool,
}

/// Displacements produced by one tick, applied as two separate moves
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionStep {
    /// Body-local planar displacement (x = right, y = forward) in meters
    pub planar: Vec2,
    /// Vertical displacement in meters
    pub vertical: f32,
}

/// Initial upward velocity that peaks at `jump_height` under `gravity`.
pub fn jump_velocity(jump_height: f32, gravity: f32) -> f32 {
    (2.0 * jump_height.max(0.0) * gravity.abs()).sqrt()
}

/// Picks the planar speed for the given input axes.
///
/// Priority: sprinting forward, pure strafe, backward, forward, then diagonals
/// by the sign of the forward axis.
pub fn select_speed(config: &PlayerConfig, axes: Vec2, sprinting: bool) -> f32 {
    let (x, z) = (axes.x, axes.y);
    let strafing = x.abs() > AXIS_DEADZONE && z.abs() < AXIS_DEADZONE;

    if sprinting && z > 0.0 {
        config.sprint_speed
    } else if strafing {
        config.strafe_speed
    } else if z < -AXIS_DEADZONE {
        config.backward_speed
    } else if z > AXIS_DEADZONE {
        config.walk_speed
    } else if x.abs() > AXIS_DEADZONE && z.abs() > AXIS_DEADZONE {
        if z > 0.0 && sprinting {
            config.sprint_speed
        } else if z > 0.0 {
            config.walk_speed
        } else {
            config.backward_speed
        }
    } else {
        config.walk_speed
    }
}

impl Locomotion {
    /// Advances grounded/airborne state, sprint, jump and gravity by one tick.
    ///
    /// Does nothing while climbing: the owning ladder moves the body and
    /// vertical velocity is left untouched.
    pub fn tick(
        &mut self,
        config: &PlayerConfig,
        stamina: &mut SprintStamina,
        input: &LocomotionInput,
        dt: f32,
    ) -> LocomotionStep {
        if self.is_climbing() {
            return LocomotionStep::default();
        }

        self.tick += 1;

        let was_grounded = self.grounded;
        self.grounded = input.grounded;
        if self.grounded && !was_grounded {
            self.landed_tick = Some(self.tick);
            self.falling = false;
            self.time_off_ground = 0.0;
        } else if !self.grounded && was_grounded {
            self.time_off_ground = 0.0;
        }

        if self.grounded && self.vertical_velocity < 0.0 {
            self.vertical_velocity = config.ground_stick_velocity;
        }

        if !self.grounded {
            self.time_off_ground += dt;
        }

        if !self.grounded
            && !self.jumping
            && self.vertical_velocity < config.fall_threshold
            && self.time_off_ground > config.coyote_time
        {
            self.falling = true;
        } else if self.grounded || self.jumping {
            self.falling = false;
        }

        self.sprinting = stamina.tick(input.sprint && input.axes.y > 0.0, dt);
        let speed = select_speed(config, input.axes, self.sprinting);

        if input.jump && self.grounded {
            self.vertical_velocity = jump_velocity(config.jump_height, config.gravity);
            self.jumping = true;
        }

        if self.grounded && self.vertical_velocity <= 0.0 {
            self.jumping = false;
        }

        self.vertical_velocity += config.gravity * dt;

        let velocity = input.axes * speed;
        self.planar_speed = velocity.length();

        LocomotionStep {
            planar: velocity * dt,
            vertical: self.vertical_velocity * dt,
        }
    }
}

/// Runs one locomotion tick per player, or hands it to the owning ladder.
///
/// Planar and vertical displacement go through the motor as two separate
/// moves. Bodies without a collider are moved directly.
pub fn update_locomotion(
    motor: CharacterMotor,
    mut players: Query<
        (
            Entity,
            &PlayerConfig,
            &mut Transform,
            &mut Locomotion,
            &mut SprintStamina,
            &MoveInput,
            &SprintInput,
            &mut JumpPressed,
            Option<&Collider>,
            Option<&mut MovementAnimation>,
        ),
        (With<Player>, Without<Ladder>),
    >,
    mut ladders: Query<(&mut Ladder, &Transform), Without<Player>>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (
        entity,
        config,
        mut transform,
        mut locomotion,
        mut stamina,
        move_input,
        sprint_input,
        mut jump_pressed,
        collider,
        animation,
    ) in &mut players
    {
        if let Some(ladder_entity) = locomotion.current_ladder() {
            // Jumps pressed on the ladder are dropped, not buffered for the dismount
            jump_pressed.0 = false;

            let Ok((mut ladder, ladder_transform)) = ladders.get_mut(ladder_entity) else {
                warn!("Ladder {ladder_entity:?} no longer exists, releasing climber {entity:?}");
                locomotion.set_climbing_state(None);
                continue;
            };

            match ladder.climb_step(ladder_transform, transform.translation, move_input.y, dt) {
                ClimbStep::Exit => {
                    ladder.end_climb(entity, &mut locomotion);
                }
                ClimbStep::Move(target) => match collider {
                    Some(shape) => {
                        let delta = target - transform.translation;
                        motor.move_by(entity, shape, &mut transform, delta, config.world_layer);
                    }
                    None => transform.translation = target,
                },
                ClimbStep::Hold => {}
            }
            continue;
        }

        let grounded = check_ground(
            &motor.spatial_query,
            foot_anchor(&transform, config.foot_offset),
            config.ground_check_radius,
            config.world_layer,
        );

        let input = LocomotionInput {
            axes: move_input.0,
            sprint: sprint_input.0,
            jump: std::mem::take(&mut jump_pressed.0),
            grounded,
        };
        let step = locomotion.tick(config, &mut stamina, &input, dt);

        let planar = transform.right() * step.planar.x + transform.forward() * step.planar.y;
        let vertical = Vec3::Y * step.vertical;

        match collider {
            Some(shape) => {
                motor.move_by(entity, shape, &mut transform, planar, config.world_layer);
                motor.move_by(entity, shape, &mut transform, vertical, config.world_layer);
            }
            None => transform.translation += planar + vertical,
        }

        if let Some(mut animation) = animation {
            animation.update(&locomotion, move_input.0, dt);
        }
    }
}
