use avian3d::prelude::*;
use bevy::prelude::*;

use super::detector::InteractMessage;

/// An object that can be carried at an interactor's hold point
#[derive(Component, Debug, Clone)]
pub struct Pickable {
    held: bool,
    /// Speed in m/s along the aim direction when dropped
    pub throw_speed: f32,
}

impl Default for Pickable {
    fn default() -> Self {
        Self {
            held: false,
            throw_speed: 2.0,
        }
    }
}

impl Pickable {
    pub fn with_throw_speed(mut self, throw_speed: f32) -> Self {
        self.throw_speed = throw_speed;
        self
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Velocity given to the object when it is let go
    pub fn release_velocity(&self, aim: Option<Dir3>) -> Vec3 {
        aim.map_or(Vec3::ZERO, |aim| aim.as_vec3() * self.throw_speed)
    }
}

/// Picks up or drops every pickable addressed by an interact.
pub fn handle_pickable_interactions(
    mut commands: Commands,
    mut reader: MessageReader<InteractMessage>,
    mut pickables: Query<(&mut Pickable, &GlobalTransform)>,
) {
    for message in reader.read() {
        let Ok((mut pickable, global)) = pickables.get_mut(message.target) else {
            continue;
        };

        if pickable.held {
            pickable.held = false;
            commands
                .entity(message.target)
                .remove::<(ChildOf, ColliderDisabled)>()
                .insert((
                    global.compute_transform(),
                    RigidBody::Dynamic,
                    LinearVelocity(pickable.release_velocity(message.aim)),
                ));
            debug!("{:?} dropped {:?}", message.actor, message.target);
            continue;
        }

        let Some(hold_point) = message.hold_point else {
            warn!(
                "{:?} has no hold point, cannot pick up {:?}",
                message.actor, message.target
            );
            continue;
        };

        pickable.held = true;
        commands.entity(message.target).insert((
            ChildOf(hold_point),
            Transform::IDENTITY,
            RigidBody::Kinematic,
            ColliderDisabled,
            LinearVelocity::ZERO,
            AngularVelocity::ZERO,
        ));
        debug!("{:?} picked up {:?}", message.actor, message.target);
    }
}
