use bevy::prelude::{Entity, Vec3};

/// Reasons a ladder refuses to be built or climbed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LadderError {
    #[error("ladder anchors coincide, the climb direction is undefined")]
    DegenerateAnchors,

    #[error("ladder top anchor {top} must be higher than bottom anchor {bottom}")]
    InvertedAnchors { bottom: Vec3, top: Vec3 },

    #[error("ladder is already occupied by {occupant:?}")]
    Occupied { occupant: Entity },

    #[error("actor is already climbing {ladder:?}")]
    AlreadyClimbing { ladder: Entity },
}
