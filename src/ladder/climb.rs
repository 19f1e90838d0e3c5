use bevy::prelude::*;

use super::error::LadderError;
use super::path::{facing_rotation, resolve_position, ClimbPose, LadderAnchors};
use crate::interaction::InteractMessage;
use crate::player::{Locomotion, Player};

/// Height changes smaller than this are not applied
const MIN_CLIMB_STEP: f32 = 0.001;

/// A climbable ladder.
///
/// Anchors are in world space. Their heights are compared against the
/// climber's body origin (its `Transform` translation), not its feet, so a
/// capsule body needs anchors half its height above the floor and the landing
/// it climbs onto. The ladder's own `Transform` is used for the non-following
/// pose and as the facing fallback for vertical ladders: its forward axis
/// should point towards the side the climber stands on.
///
/// At most one actor climbs a ladder at a time.
#[derive(Component, Debug, Clone)]
pub struct Ladder {
    anchors: LadderAnchors,
    /// Climb rate in m/s at full vertical input
    pub climb_speed: f32,
    /// Added to every climb position
    pub offset: Vec3,
    /// Follow the bottom→top run instead of sitting on the ladder transform
    pub follow_angle: bool,
    /// How far out along ladder-forward the climber is held
    pub distance: f32,
    occupant: Option<Entity>,
}

/// Outcome of one climbing tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClimbStep {
    /// Bottom or top reached, the climber gets off
    Exit,
    /// Move the climber to this position
    Move(Vec3),
    /// No meaningful movement this tick
    Hold,
}

impl Ladder {
    pub fn new(bottom: Vec3, top: Vec3) -> Result<Self, LadderError> {
        Ok(Self::from_anchors(LadderAnchors::new(bottom, top)?))
    }

    pub fn from_anchors(anchors: LadderAnchors) -> Self {
        Self {
            anchors,
            climb_speed: 5.0,
            offset: Vec3::ZERO,
            follow_angle: true,
            distance: 0.5,
            occupant: None,
        }
    }

    pub fn with_climb_speed(mut self, climb_speed: f32) -> Self {
        self.climb_speed = climb_speed;
        self
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_follow_angle(mut self, follow_angle: bool) -> Self {
        self.follow_angle = follow_angle;
        self
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    pub fn anchors(&self) -> &LadderAnchors {
        &self.anchors
    }

    /// The actor currently climbing this ladder
    pub fn occupant(&self) -> Option<Entity> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Climb pose at `height` for a ladder placed at `base`
    pub fn pose_at(&self, base: &Transform, height: f32) -> ClimbPose {
        resolve_position(
            Some(&self.anchors),
            base,
            self.follow_angle,
            self.offset,
            self.distance,
            height,
        )
    }

    /// Puts `actor` on the ladder at its current height.
    ///
    /// The actor is snapped onto the climb path, turned to face the ladder and
    /// handed over through [`Locomotion::set_climbing_state`].
    pub fn begin_climb(
        &mut self,
        this: Entity,
        base: &Transform,
        actor: Entity,
        actor_transform: &mut Transform,
        locomotion: &mut Locomotion,
    ) -> Result<(), LadderError> {
        if let Some(occupant) = self.occupant {
            return Err(LadderError::Occupied { occupant });
        }
        if let Some(ladder) = locomotion.current_ladder() {
            return Err(LadderError::AlreadyClimbing { ladder });
        }

        let height = actor_transform.translation.y;
        let pose = self.pose_at(base, height);
        actor_transform.translation = pose.position;
        if let Some(rotation) = facing_rotation(-pose.forward) {
            actor_transform.rotation = rotation;
        }

        self.occupant = Some(actor);
        locomotion.set_climbing_state(Some(this));
        debug!("{actor:?} started climbing {this:?} at height {height:.2}");
        Ok(())
    }

    /// Takes `actor` off the ladder.
    ///
    /// Returns `false` without side effects when `actor` is not the occupant.
    pub fn end_climb(&mut self, actor: Entity, locomotion: &mut Locomotion) -> bool {
        if self.occupant != Some(actor) {
            return false;
        }
        self.occupant = None;
        locomotion.set_climbing_state(None);
        debug!("{actor:?} stopped climbing");
        true
    }

    /// Resolves one climbing tick for a climber at `position`.
    ///
    /// Leaving at the bottom or top takes priority over clamping to the span.
    pub fn climb_step(
        &self,
        base: &Transform,
        position: Vec3,
        vertical_input: f32,
        dt: f32,
    ) -> ClimbStep {
        let current = position.y;
        let candidate = current + vertical_input * self.climb_speed * dt;
        let bottom = self.anchors.bottom().y;
        let top = self.anchors.top().y;

        if vertical_input < 0.0 && candidate <= bottom {
            return ClimbStep::Exit;
        }
        if vertical_input > 0.0 && candidate >= top {
            return ClimbStep::Exit;
        }

        let height = candidate.clamp(bottom, top);
        if (height - current).abs() <= MIN_CLIMB_STEP {
            return ClimbStep::Hold;
        }
        ClimbStep::Move(self.pose_at(base, height).position)
    }
}

/// Toggles climbing for every interact addressed to a ladder.
///
/// The occupant interacting again gets off; anyone else is put on if the
/// ladder is free. Rejections are logged and change nothing.
pub fn handle_ladder_interactions(
    mut reader: MessageReader<InteractMessage>,
    mut ladders: Query<(&mut Ladder, &Transform), Without<Player>>,
    mut actors: Query<(&mut Transform, &mut Locomotion), With<Player>>,
) {
    for message in reader.read() {
        let Ok((mut ladder, base)) = ladders.get_mut(message.target) else {
            continue;
        };
        let Ok((mut actor_transform, mut locomotion)) = actors.get_mut(message.actor) else {
            warn!("Interact from {:?} has no locomotion to hand over", message.actor);
            continue;
        };

        if ladder.occupant() == Some(message.actor) {
            ladder.end_climb(message.actor, &mut locomotion);
            continue;
        }

        if let Err(error) = ladder.begin_climb(
            message.target,
            base,
            message.actor,
            &mut actor_transform,
            &mut locomotion,
        ) {
            warn!("Cannot climb {:?}: {error}", message.target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerConfig;

    const DT: f32 = 1.0 / 60.0;

    fn entities() -> (Entity, Entity, Entity) {
        let mut world = World::new();
        (
            world.spawn_empty().id(),
            world.spawn_empty().id(),
            world.spawn_empty().id(),
        )
    }

    fn ladder() -> Ladder {
        Ladder::new(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0)).unwrap()
    }

    #[test]
    fn begin_climb_snaps_and_faces_the_ladder() {
        let (this, actor, _) = entities();
        let mut ladder = ladder();
        let mut transform = Transform::from_xyz(0.3, 1.0, -2.0);
        let mut locomotion = Locomotion::default();

        ladder
            .begin_climb(this, &Transform::IDENTITY, actor, &mut transform, &mut locomotion)
            .unwrap();

        assert!((transform.translation - Vec3::new(0.0, 1.0, -0.5)).length() < 1e-5);
        // Ladder-forward is -Z, so the climber looks along +Z
        assert!((transform.forward().as_vec3() - Vec3::Z).length() < 1e-5);
        assert_eq!(ladder.occupant(), Some(actor));
        assert_eq!(locomotion.current_ladder(), Some(this));
        assert!(locomotion.is_climbing());
    }

    #[test]
    fn second_actor_is_rejected() {
        let (this, first, second) = entities();
        let mut ladder = ladder();
        let mut first_locomotion = Locomotion::default();
        let mut second_locomotion = Locomotion::default();

        ladder
            .begin_climb(
                this,
                &Transform::IDENTITY,
                first,
                &mut Transform::default(),
                &mut first_locomotion,
            )
            .unwrap();

        let mut second_transform = Transform::from_xyz(4.0, 1.0, 4.0);
        let result = ladder.begin_climb(
            this,
            &Transform::IDENTITY,
            second,
            &mut second_transform,
            &mut second_locomotion,
        );

        assert_eq!(result, Err(LadderError::Occupied { occupant: first }));
        assert_eq!(second_transform.translation, Vec3::new(4.0, 1.0, 4.0));
        assert!(!second_locomotion.is_climbing());
        assert_eq!(ladder.occupant(), Some(first));
    }

    #[test]
    fn actor_on_another_ladder_is_rejected() {
        let (this, actor, other_ladder) = entities();
        let mut ladder = ladder();
        let mut locomotion = Locomotion::default();
        locomotion.set_climbing_state(Some(other_ladder));

        let result = ladder.begin_climb(
            this,
            &Transform::IDENTITY,
            actor,
            &mut Transform::default(),
            &mut locomotion,
        );
        assert_eq!(result, Err(LadderError::AlreadyClimbing { ladder: other_ladder }));
        assert!(!ladder.is_occupied());
        assert_eq!(locomotion.current_ladder(), Some(other_ladder));
    }

    #[test]
    fn end_climb_when_idle_is_a_no_op() {
        let (_, actor, _) = entities();
        let mut ladder = ladder();
        let mut locomotion = Locomotion::default();

        assert!(!ladder.end_climb(actor, &mut locomotion));
        assert!(!ladder.is_occupied());
        assert!(!locomotion.is_climbing());
    }

    #[test]
    fn end_climb_releases_both_sides() {
        let (this, actor, _) = entities();
        let mut ladder = ladder();
        let mut locomotion = Locomotion::default();
        ladder
            .begin_climb(
                this,
                &Transform::IDENTITY,
                actor,
                &mut Transform::default(),
                &mut locomotion,
            )
            .unwrap();

        assert!(ladder.end_climb(actor, &mut locomotion));
        assert!(!ladder.is_occupied());
        assert!(!locomotion.is_climbing());
        assert!(!ladder.end_climb(actor, &mut locomotion));
    }

    #[test]
    fn stepping_below_bottom_exits_instead_of_clamping() {
        let ladder = ladder();
        let position = Vec3::new(0.0, 0.01, -0.5);
        assert_eq!(
            ladder.climb_step(&Transform::IDENTITY, position, -1.0, DT),
            ClimbStep::Exit
        );
    }

    #[test]
    fn standing_body_exits_at_body_origin_bottom() {
        let config = PlayerConfig::default();
        let half_height = config.stand_height / 2.0;
        let ladder = Ladder::new(Vec3::Y * half_height, Vec3::Y * (5.0 + half_height)).unwrap();

        // Capsule centre of a body resting on the floor
        let position = Vec3::new(0.0, half_height + 0.01, -0.5);
        assert_eq!(
            ladder.climb_step(&Transform::IDENTITY, position, -1.0, DT),
            ClimbStep::Exit
        );

        let position = Vec3::new(0.0, 5.0 + half_height - 0.01, -0.5);
        assert_eq!(
            ladder.climb_step(&Transform::IDENTITY, position, 1.0, DT),
            ClimbStep::Exit
        );
    }

    #[test]
    fn stepping_above_top_exits() {
        let ladder = ladder();
        let position = Vec3::new(0.0, 4.99, -0.5);
        assert_eq!(
            ladder.climb_step(&Transform::IDENTITY, position, 1.0, DT),
            ClimbStep::Exit
        );
    }

    #[test]
    fn climbing_moves_along_the_path() {
        let ladder = ladder();
        let position = Vec3::new(0.0, 2.0, -0.5);
        let ClimbStep::Move(target) = ladder.climb_step(&Transform::IDENTITY, position, 1.0, 0.1)
        else {
            panic!("expected movement");
        };
        assert!((target - Vec3::new(0.0, 2.5, -0.5)).length() < 1e-5);
    }

    #[test]
    fn idle_input_holds_position() {
        let ladder = ladder();
        let position = Vec3::new(0.0, 2.0, -0.5);
        assert_eq!(
            ladder.climb_step(&Transform::IDENTITY, position, 0.0, DT),
            ClimbStep::Hold
        );
        assert_eq!(
            ladder.climb_step(&Transform::IDENTITY, position, 0.005, DT),
            ClimbStep::Hold
        );
    }

    #[test]
    fn below_span_climbing_up_is_clamped_to_bottom() {
        let ladder = Ladder::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 6.0, 0.0)).unwrap();
        let position = Vec3::new(0.0, 0.2, -0.5);
        let ClimbStep::Move(target) = ladder.climb_step(&Transform::IDENTITY, position, 1.0, DT)
        else {
            panic!("expected movement");
        };
        assert_eq!(target.y, 1.0);
    }
}
