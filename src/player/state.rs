use avian3d::prelude::LayerMask;
use bevy::prelude::*;

use crate::physics::GameLayer;

/// Marker component for the player entity (also used as input context)
#[derive(Component, Default)]
pub struct Player;

/// Player movement configuration
#[derive(Component, Clone, Copy)]
pub struct PlayerConfig {
    /// Forward walking speed in m/s
    pub walk_speed: f32,
    /// Forward sprinting speed in m/s
    pub sprint_speed: f32,
    /// Pure sideways speed in m/s
    pub strafe_speed: f32,
    /// Backward speed in m/s
    pub backward_speed: f32,
    /// Vertical acceleration in m/s² (negative is down)
    pub gravity: f32,
    /// Apex height of a jump in meters
    pub jump_height: f32,
    /// Vertical velocity held while standing, keeps the body pressed into the ground
    pub ground_stick_velocity: f32,
    /// Radius of the ground overlap sphere
    pub ground_check_radius: f32,
    /// Ground overlap sphere centre, relative to the body
    pub foot_offset: Vec3,
    /// Seconds of sprint available from full stamina
    pub max_sprint_time: f32,
    /// Lockout in seconds after stamina runs out
    pub sprint_cooldown: f32,
    /// Vertical velocity below which an airborne body counts as falling
    pub fall_threshold: f32,
    /// Grace window after leaving the ground before falling can be reported
    pub coyote_time: f32,
    /// Standing collider height
    pub stand_height: f32,
    /// Collider radius
    pub radius: f32,
    /// Layers the body collides with and stands on
    pub world_layer: LayerMask,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 12.0,
            sprint_speed: 18.0,
            strafe_speed: 8.0,
            backward_speed: 6.0,
            gravity: -9.81,
            jump_height: 3.0,
            ground_stick_velocity: -2.0,
            ground_check_radius: 0.4,
            foot_offset: Vec3::new(0.0, -0.9, 0.0),
            max_sprint_time: 3.0,
            sprint_cooldown: 2.0,
            fall_threshold: -5.0,
            coyote_time: 0.2,
            stand_height: 1.8,
            radius: 0.4,
            world_layer: GameLayer::World.into(),
        }
    }
}

/// Per-actor locomotion state.
///
/// Owns the climbing flag: the actor is climbing exactly when it references a
/// ladder, and [`Locomotion::set_climbing_state`] is the only way to change
/// that reference.
#[derive(Component, Debug, Default)]
pub struct Locomotion {
    pub(super) vertical_velocity: f32,
    pub(super) grounded: bool,
    pub(super) jumping: bool,
    pub(super) falling: bool,
    pub(super) sprinting: bool,
    pub(super) time_off_ground: f32,
    pub(super) tick: u64,
    pub(super) landed_tick: Option<u64>,
    pub(super) planar_speed: f32,
    pub(super) ladder: Option<Entity>,
}

impl Locomotion {
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    pub fn is_falling(&self) -> bool {
        self.falling
    }

    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    /// True only on the tick the body touched down.
    pub fn just_landed(&self) -> bool {
        self.landed_tick == Some(self.tick)
    }

    pub fn time_off_ground(&self) -> f32 {
        self.time_off_ground
    }

    /// Planar speed selected on the last non-climbing tick, in m/s
    pub fn planar_speed(&self) -> f32 {
        self.planar_speed
    }

    pub fn is_climbing(&self) -> bool {
        self.ladder.is_some()
    }

    /// The ladder currently owning this actor
    pub fn current_ladder(&self) -> Option<Entity> {
        self.ladder
    }

    /// Hands the actor to `ladder`, or back to normal movement with `None`.
    ///
    /// Entering a ladder zeroes vertical velocity so nothing carries over into
    /// the climb.
    pub fn set_climbing_state(&mut self, ladder: Option<Entity>) {
        self.ladder = ladder;
        match ladder {
            Some(ladder) => {
                self.vertical_velocity = 0.0;
                debug!("Started climbing {ladder:?}, normal movement suspended");
            }
            None => debug!("Stopped climbing, normal movement resumed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn climbing_flag_tracks_ladder_reference() {
        let mut locomotion = Locomotion::default();
        assert!(!locomotion.is_climbing());
        assert_eq!(locomotion.current_ladder(), None);

        let ladder = World::new().spawn_empty().id();
        locomotion.set_climbing_state(Some(ladder));
        assert!(locomotion.is_climbing());
        assert_eq!(locomotion.current_ladder(), Some(ladder));

        locomotion.set_climbing_state(None);
        assert!(!locomotion.is_climbing());
        assert_eq!(locomotion.current_ladder(), None);
    }

    #[test]
    fn entering_climb_zeroes_vertical_velocity() {
        let mut locomotion = Locomotion {
            vertical_velocity: -12.0,
            ..default()
        };
        locomotion.set_climbing_state(Some(World::new().spawn_empty().id()));
        assert_eq!(locomotion.vertical_velocity(), 0.0);
    }
}
