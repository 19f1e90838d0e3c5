use bevy::prelude::*;

use super::sprint::SprintStamina;
use super::state::*;

/// Audio event emitted by the player controller for one actor.
///
/// Consumers subscribe with `MessageReader<PlayerAudioMessage>` to trigger
/// sound effects, particles, or other feedback.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct PlayerAudioMessage {
    pub actor: Entity,
    pub cue: AudioCue,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AudioCue {
    Footstep { speed: f32 },
    Landed { impact_speed: f32 },
    Jumped,
    LadderEnter,
    LadderExit,
    SprintExhausted,
}

/// Previous-tick state of one actor, for edge detection in audio emission.
#[derive(Component, Default)]
pub struct AudioTracker {
    pub was_grounded: bool,
    pub was_jumping: bool,
    pub was_climbing: bool,
    pub was_cooling_down: bool,
    pub last_vertical_velocity: f32,
    pub footstep_timer: f32,
}

/// Base footstep interval at walking speed, in seconds
const FOOTSTEP_INTERVAL: f32 = 0.5;

impl AudioTracker {
    /// Compares the current player state against the previous tick and
    /// returns a cue for every transition.
    pub fn observe(
        &mut self,
        config: &PlayerConfig,
        locomotion: &Locomotion,
        stamina: &SprintStamina,
        dt: f32,
    ) -> Vec<AudioCue> {
        let mut cues = Vec::new();
        let grounded = locomotion.is_grounded();
        let climbing = locomotion.is_climbing();

        // --- Ladder ---
        if !self.was_climbing && climbing {
            cues.push(AudioCue::LadderEnter);
        }
        if self.was_climbing && !climbing {
            cues.push(AudioCue::LadderExit);
        }

        if !climbing {
            // --- Landing ---
            if !self.was_grounded && grounded {
                let impact_speed = (-self.last_vertical_velocity).max(0.0);
                if impact_speed > 1.0 {
                    cues.push(AudioCue::Landed { impact_speed });
                }
                self.footstep_timer = 0.0;
            }

            // --- Jumped ---
            if !self.was_jumping && locomotion.is_jumping() {
                cues.push(AudioCue::Jumped);
            }

            // --- Footsteps ---
            let speed = locomotion.planar_speed();
            if grounded && speed > 0.5 && config.walk_speed > 0.0 {
                let interval = FOOTSTEP_INTERVAL * config.walk_speed / speed;
                self.footstep_timer += dt;
                if self.footstep_timer >= interval {
                    self.footstep_timer -= interval;
                    cues.push(AudioCue::Footstep { speed });
                }
            } else {
                self.footstep_timer = 0.0;
            }
        }

        // --- Sprint ---
        if !self.was_cooling_down && stamina.is_cooling_down() {
            cues.push(AudioCue::SprintExhausted);
        }

        // --- Update tracker ---
        self.was_grounded = grounded;
        self.was_jumping = locomotion.is_jumping();
        self.was_climbing = climbing;
        self.was_cooling_down = stamina.is_cooling_down();
        self.last_vertical_velocity = locomotion.vertical_velocity();

        cues
    }
}

/// Emits `PlayerAudioMessage`s for every tracked actor's state transitions.
pub fn emit_player_audio_messages(
    mut players: Query<
        (Entity, &PlayerConfig, &Locomotion, &SprintStamina, &mut AudioTracker),
        With<Player>,
    >,
    mut writer: MessageWriter<PlayerAudioMessage>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    for (actor, config, locomotion, stamina, mut tracker) in &mut players {
        for cue in tracker.observe(config, locomotion, stamina, dt) {
            writer.write(PlayerAudioMessage { actor, cue });
        }
    }
}
