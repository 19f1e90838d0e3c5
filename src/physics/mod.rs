mod ground;
mod layers;
mod motor;
mod plugin;

pub use ground::*;
pub use layers::GameLayer;
pub use motor::*;
pub use plugin::PhysicsPlugin;
