use avian3d::prelude::*;
use bevy::prelude::*;

/// Plugin that sets up the Avian3D physics engine
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            PhysicsPlugins::default()
                .with_length_unit(1.0), // 1 unit = 1 meter
        );

        // Only affects dynamic bodies (thrown pickables); the player integrates
        // its own gravity from `PlayerConfig::gravity`.
        app.insert_resource(Gravity(Vec3::NEG_Y * 9.81));
    }
}
