mod detector;
mod pickable;
mod reticle;

pub use detector::*;
pub use pickable::*;
pub use pickable::Pickable;
pub use reticle::*;

use bevy::prelude::*;

/// Registers interact messages and reticle tinting.
///
/// Detection and the per-variant handlers run in the player's fixed tick, see
/// [`crate::player::PlayerPlugin`].
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<InteractMessage>();
        app.add_systems(Update, tint_reticle);
    }
}
