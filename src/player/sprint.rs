use bevy::prelude::*;

/// Depletable sprint resource.
///
/// Stamina drains one second per second of sprinting and regenerates at half
/// that rate. Running dry locks sprinting out for the cooldown; regeneration is
/// frozen during the lockout and stamina snaps back to full when it ends.
#[derive(Component, Debug, Clone)]
pub struct SprintStamina {
    current: f32,
    max: f32,
    cooldown_duration: f32,
    /// Remaining lockout, `None` when sprint is available
    cooldown: Option<f32>,
}

impl SprintStamina {
    pub fn new(max: f32, cooldown_duration: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: max,
            max,
            cooldown_duration: cooldown_duration.max(0.0),
            cooldown: None,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Stamina as a fraction of max, for HUD bars
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }

    pub fn is_cooling_down(&self) -> bool {
        self.cooldown.is_some()
    }

    /// Advances the resource by `dt` and returns whether the actor sprints this tick.
    ///
    /// `wants_sprint` is the sprint key held together with positive forward input.
    /// The tick that empties the pool does not count as sprinting.
    pub fn tick(&mut self, wants_sprint: bool, dt: f32) -> bool {
        if let Some(remaining) = self.cooldown.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.cooldown = None;
                self.current = self.max;
            }
        }

        if wants_sprint && self.current > 0.0 && self.cooldown.is_none() {
            self.current -= dt;
            if self.current <= 0.0 {
                self.current = 0.0;
                self.cooldown = Some(self.cooldown_duration);
                debug!("Sprint exhausted, cooling down for {}s", self.cooldown_duration);
                return false;
            }
            return true;
        }

        if self.cooldown.is_none() && self.current < self.max {
            self.current = (self.current + dt * 0.5).min(self.max);
        }
        false
    }
}

impl Default for SprintStamina {
    fn default() -> Self {
        Self::new(3.0, 2.0)
    }
}
