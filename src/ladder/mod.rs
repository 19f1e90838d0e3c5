mod climb;
mod error;
mod gizmos;
mod path;

pub use climb::*;
pub use error::LadderError;
pub use gizmos::LadderGizmosPlugin;
pub use path::*;
