use bevy::prelude::*;

use super::look::{body_yaw_degrees, CameraConfig, CameraPitch, CameraRig, LookState};
use super::smoothing::exp_smooth;
use crate::player::{AnimationDriver, Locomotion, MoveInput, Player};

/// Vertical input magnitude that counts as moving on a ladder
const BOB_INPUT_THRESHOLD: f32 = 0.1;

/// Puts the actor's camera back at its rest pose and restores the animator
#[derive(Message, Debug, Clone, Copy)]
pub struct CameraResetMessage {
    pub actor: Entity,
}

/// Procedural head bob while climbing
#[derive(Component, Debug, Clone, Default)]
pub struct ClimbBob {
    phase: f32,
    vertical: f32,
    climbing: bool,
}

impl ClimbBob {
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Records the climbing flag and returns it when it changed.
    ///
    /// Leaving the ladder resets the bob.
    pub fn set_climbing(&mut self, climbing: bool) -> Option<bool> {
        if self.climbing == climbing {
            return None;
        }
        self.climbing = climbing;
        if !climbing {
            self.reset();
        }
        Some(climbing)
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.vertical = 0.0;
    }

    /// Offset from the eye rest position for this frame
    pub fn offset(&mut self, config: &CameraConfig, vertical_input: f32, dt: f32) -> Vec3 {
        if !self.climbing {
            return Vec3::ZERO;
        }

        if vertical_input.abs() <= BOB_INPUT_THRESHOLD {
            self.vertical = exp_smooth(self.vertical, 0.0, config.bob_smoothing * 2.0, dt);
            return Vec3::new(0.0, self.vertical, 0.0);
        }

        self.phase += dt * config.bob_speed;
        let target = self.phase.sin() * config.bob_amount;
        self.vertical = exp_smooth(self.vertical, target, config.bob_smoothing, dt);

        Vec3::new(
            (self.phase * 0.7).sin() * config.bob_amount * 0.3,
            self.vertical,
            (self.phase * 1.2).sin() * config.bob_amount * 0.2,
        )
    }
}

/// Bobs the pitch pivot while climbing and toggles the animation driver on
/// ladder transitions.
pub fn apply_climb_effects(
    mut players: Query<
        (
            Entity,
            &Locomotion,
            &MoveInput,
            &CameraConfig,
            &CameraRig,
            &mut ClimbBob,
            Option<&mut AnimationDriver>,
        ),
        With<Player>,
    >,
    mut pitches: Query<&mut Transform, With<CameraPitch>>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (entity, locomotion, move_input, config, rig, mut bob, driver) in &mut players {
        if let Some(climbing) = bob.set_climbing(locomotion.is_climbing())
            && config.disable_animator_while_climbing
        {
            match driver {
                Some(mut driver) => {
                    driver.enabled = !climbing;
                    debug!("Animation driver of {entity:?} enabled: {}", driver.enabled);
                }
                None => debug!("{entity:?} has no animation driver to toggle"),
            }
        }

        let offset = bob.offset(config, move_input.y, dt);
        if let Ok(mut pitch_transform) = pitches.get_mut(rig.pitch) {
            pitch_transform.translation = config.eye_offset + offset;
        }
    }
}

pub fn handle_camera_reset(
    mut reader: MessageReader<CameraResetMessage>,
    mut players: Query<
        (
            &Transform,
            &CameraConfig,
            &CameraRig,
            &mut ClimbBob,
            &mut LookState,
            Option<&mut AnimationDriver>,
        ),
        With<Player>,
    >,
    mut pitches: Query<&mut Transform, (With<CameraPitch>, Without<Player>)>,
) {
    for message in reader.read() {
        let Ok((transform, config, rig, mut bob, mut look, driver)) = players.get_mut(message.actor)
        else {
            continue;
        };

        bob.reset();
        look.resync(body_yaw_degrees(transform.rotation));
        if let Some(mut driver) = driver {
            driver.enabled = true;
        }
        if let Ok(mut pitch_transform) = pitches.get_mut(rig.pitch) {
            pitch_transform.translation = config.eye_offset;
        }
        debug!("Camera of {:?} reset", message.actor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn no_offset_when_not_climbing() {
        let mut bob = ClimbBob::default();
        assert_eq!(bob.offset(&CameraConfig::default(), 1.0, DT), Vec3::ZERO);
        assert_eq!(bob.phase(), 0.0);
    }

    #[test]
    fn transitions_are_reported_once() {
        let mut bob = ClimbBob::default();
        assert_eq!(bob.set_climbing(true), Some(true));
        assert_eq!(bob.set_climbing(true), None);
        assert_eq!(bob.set_climbing(false), Some(false));
        assert_eq!(bob.set_climbing(false), None);
    }

    #[test]
    fn moving_on_ladder_advances_phase_and_sways() {
        let config = CameraConfig::default();
        let mut bob = ClimbBob::default();
        bob.set_climbing(true);

        let mut offset = Vec3::ZERO;
        for _ in 0..10 {
            offset = bob.offset(&config, 1.0, DT);
        }
        assert!((bob.phase() - 10.0 * DT * config.bob_speed).abs() < 1e-5);
        assert!(offset.x > 0.0);
        assert!(offset.y > 0.0);
        assert!(offset.z > 0.0);
        assert!(offset.y < config.bob_amount);
    }

    #[test]
    fn idle_on_ladder_relaxes_vertical_and_drops_sway() {
        let config = CameraConfig::default();
        let mut bob = ClimbBob::default();
        bob.set_climbing(true);
        for _ in 0..10 {
            bob.offset(&config, 1.0, DT);
        }
        let phase = bob.phase();

        let first = bob.offset(&config, 0.0, DT);
        assert_eq!(first.x, 0.0);
        assert_eq!(first.z, 0.0);
        for _ in 0..120 {
            bob.offset(&config, 0.0, DT);
        }
        let settled = bob.offset(&config, 0.0, DT);
        assert!(settled.y.abs() < first.y.abs());
        assert!(settled.y.abs() < 1e-4);
        assert_eq!(bob.phase(), phase);
    }

    #[test]
    fn leaving_ladder_resets_bob() {
        let config = CameraConfig::default();
        let mut bob = ClimbBob::default();
        bob.set_climbing(true);
        for _ in 0..10 {
            bob.offset(&config, 1.0, DT);
        }
        bob.set_climbing(false);
        assert_eq!(bob.phase(), 0.0);
        assert_eq!(bob.offset(&config, 1.0, DT), Vec3::ZERO);
    }
}
