use bevy::prelude::*;

use super::error::LadderError;

/// Anchor pairs closer than this are rejected as degenerate
const MIN_ANCHOR_SEPARATION: f32 = 1e-4;

/// Below this, the ladder axis is treated as parallel to world up
const PARALLEL_EPSILON: f32 = 1e-6;

/// Validated world-space bottom/top pair of a ladder.
///
/// The top anchor is always strictly higher than the bottom anchor, so the
/// climb axis and height span are well defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderAnchors {
    bottom: Vec3,
    top: Vec3,
}

impl LadderAnchors {
    pub fn new(bottom: Vec3, top: Vec3) -> Result<Self, LadderError> {
        if bottom.distance_squared(top) < MIN_ANCHOR_SEPARATION * MIN_ANCHOR_SEPARATION {
            return Err(LadderError::DegenerateAnchors);
        }
        if top.y <= bottom.y {
            return Err(LadderError::InvertedAnchors { bottom, top });
        }
        Ok(Self { bottom, top })
    }

    pub fn bottom(&self) -> Vec3 {
        self.bottom
    }

    pub fn top(&self) -> Vec3 {
        self.top
    }

    /// Normalised [0, 1] position of `height` along the vertical span
    pub fn progress(&self, height: f32) -> f32 {
        ((height - self.bottom.y) / (self.top.y - self.bottom.y)).clamp(0.0, 1.0)
    }

    /// Unit vector from bottom to top
    pub fn up(&self) -> Vec3 {
        (self.top - self.bottom).normalize()
    }

    /// Outward normal of the climbing plane, or `None` for a vertical ladder.
    pub fn forward(&self) -> Option<Vec3> {
        let up = self.up();
        let right = up.cross(Vec3::Y);
        if right.length_squared() < PARALLEL_EPSILON {
            return None;
        }
        Some(right.normalize().cross(up).normalize())
    }
}

/// Where a climber stands at a given height, and which way the ladder faces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimbPose {
    pub position: Vec3,
    /// Ladder-forward: points from the ladder towards the climber
    pub forward: Vec3,
}

/// Computes the climb pose at `height`.
///
/// With `follow_angle` and anchors, the horizontal position tracks the ladder
/// run between the anchors and is pushed `distance` out along ladder-forward.
/// Otherwise the pose sits on the ladder's own transform. `offset` is added in
/// both cases and `y` is always `height`.
///
/// Vertical ladders and ladders without anchors take their forward from the
/// flattened `Transform::forward` of `base`.
pub fn resolve_position(
    anchors: Option<&LadderAnchors>,
    base: &Transform,
    follow_angle: bool,
    offset: Vec3,
    distance: f32,
    height: f32,
) -> ClimbPose {
    let forward = anchors
        .and_then(LadderAnchors::forward)
        .unwrap_or_else(|| fallback_forward(base));

    let mut position = match anchors {
        Some(anchors) if follow_angle => {
            let progress = anchors.progress(height);
            let bottom = anchors.bottom().with_y(0.0);
            let top = anchors.top().with_y(0.0);
            bottom.lerp(top, progress) + forward * distance + offset
        }
        _ => base.translation + offset,
    };
    position.y = height;

    ClimbPose { position, forward }
}

fn fallback_forward(base: &Transform) -> Vec3 {
    let forward = base.forward().as_vec3();
    let flat = forward.with_y(0.0).normalize_or_zero();
    if flat == Vec3::ZERO { forward } else { flat }
}

/// Body rotation that looks along the horizontal part of `direction`.
///
/// Returns `None` when `direction` has no horizontal component.
pub fn facing_rotation(direction: Vec3) -> Option<Quat> {
    let flat = direction.with_y(0.0);
    if flat.length_squared() < PARALLEL_EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical() -> LadderAnchors {
        LadderAnchors::new(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0)).unwrap()
    }

    fn leaning() -> LadderAnchors {
        // Top rests against a wall further along +Z
        LadderAnchors::new(Vec3::ZERO, Vec3::new(0.0, 4.0, 2.0)).unwrap()
    }

    #[test]
    fn rejects_degenerate_anchors() {
        assert_eq!(
            LadderAnchors::new(Vec3::ONE, Vec3::ONE),
            Err(LadderError::DegenerateAnchors)
        );
    }

    #[test]
    fn rejects_inverted_and_flat_anchors() {
        assert!(matches!(
            LadderAnchors::new(Vec3::new(0.0, 3.0, 0.0), Vec3::ZERO),
            Err(LadderError::InvertedAnchors { .. })
        ));
        assert!(matches!(
            LadderAnchors::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)),
            Err(LadderError::InvertedAnchors { .. })
        ));
    }

    #[test]
    fn progress_is_clamped_to_span() {
        let anchors = vertical();
        assert_eq!(anchors.progress(0.0), 0.0);
        assert_eq!(anchors.progress(5.0), 1.0);
        assert_eq!(anchors.progress(-3.0), 0.0);
        assert_eq!(anchors.progress(9.0), 1.0);
        assert!((anchors.progress(2.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn vertical_ladder_uses_transform_forward() {
        let anchors = vertical();
        assert_eq!(anchors.forward(), None);

        let pose =
            resolve_position(Some(&anchors), &Transform::IDENTITY, true, Vec3::ZERO, 0.5, 2.5);
        assert!((pose.forward - Vec3::NEG_Z).length() < 1e-5);
        assert!((pose.position - Vec3::new(0.0, 2.5, -0.5)).length() < 1e-5);
    }

    #[test]
    fn leaning_ladder_faces_away_from_the_wall() {
        let forward = leaning().forward().unwrap();
        assert!((forward.length() - 1.0).abs() < 1e-5);
        assert!(forward.z < 0.0);
        assert!(forward.dot(leaning().up()).abs() < 1e-5);
        assert!(forward.x.abs() < 1e-5);
    }

    #[test]
    fn follow_angle_tracks_the_run() {
        let anchors = leaning();
        let forward = anchors.forward().unwrap();
        let pose =
            resolve_position(Some(&anchors), &Transform::IDENTITY, true, Vec3::ZERO, 0.5, 2.0);

        let expected = Vec3::new(0.0, 0.0, 1.0) + forward * 0.5;
        assert!((pose.position.x - expected.x).abs() < 1e-5);
        assert!((pose.position.z - expected.z).abs() < 1e-5);
        assert_eq!(pose.position.y, 2.0);
    }

    #[test]
    fn horizontal_progress_is_monotonic_and_continuous() {
        let anchors = leaning();
        let at = |height| {
            resolve_position(Some(&anchors), &Transform::IDENTITY, true, Vec3::ZERO, 0.5, height)
        };
        let mut previous = at(0.0);
        for step in 1..=400 {
            let pose = at(step as f32 * 0.01);
            assert!(pose.position.z >= previous.position.z);
            assert!(pose.position.with_y(0.0).distance(previous.position.with_y(0.0)) < 0.01);
            previous = pose;
        }
    }

    #[test]
    fn without_follow_angle_sits_on_transform() {
        let anchors = leaning();
        let base = Transform::from_xyz(3.0, 1.0, -2.0);
        let offset = Vec3::new(0.1, 7.0, 0.2);
        let pose = resolve_position(Some(&anchors), &base, false, offset, 0.5, 1.5);
        assert!((pose.position - Vec3::new(3.1, 1.5, -1.8)).length() < 1e-5);
        assert_eq!(pose.forward, anchors.forward().unwrap());
    }

    #[test]
    fn missing_anchors_fall_back_to_transform() {
        let base = Transform::from_xyz(1.0, 0.0, 1.0)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let pose = resolve_position(None, &base, true, Vec3::ZERO, 0.5, 3.0);
        assert!((pose.position - Vec3::new(1.0, 3.0, 1.0)).length() < 1e-5);
        assert!((pose.forward - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn facing_rotation_looks_along_direction() {
        let rotation = facing_rotation(Vec3::new(1.0, 0.3, 0.0)).unwrap();
        assert!(((rotation * Vec3::NEG_Z) - Vec3::X).length() < 1e-5);
        assert_eq!(facing_rotation(Vec3::Y), None);
    }
}
