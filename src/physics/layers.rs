use avian3d::prelude::*;

/// Collision layers for the physics simulation
#[derive(PhysicsLayer, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Player character
    Player,
    /// Static world geometry the player walks on and collides with
    World,
    /// Ladders, pickables and anything else the interactor can target
    Interactable,
}
