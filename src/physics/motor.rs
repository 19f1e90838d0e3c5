use avian3d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

/// Gap kept between the swept shape and whatever it hits
pub const SKIN_WIDTH: f32 = 0.01;

/// Number of sweep/slide iterations per move
pub const MAX_SLIDES: usize = 4;

/// Moves below this length are dropped
const MIN_MOVE: f32 = 1e-5;

/// Move-by-delta primitive for kinematic characters.
///
/// Sweeps the character's collider along the requested delta, stops short of
/// the first hit and slides the remainder along the hit surface. Each call is
/// resolved independently, so planar and vertical motion can be applied as two
/// separate moves.
#[derive(SystemParam)]
pub struct CharacterMotor<'w, 's> {
    pub spatial_query: SpatialQuery<'w, 's>,
}

impl CharacterMotor<'_, '_> {
    /// Moves `transform` by `delta`, resolving against colliders on `mask`.
    ///
    /// Returns the displacement that was actually applied.
    pub fn move_by(
        &self,
        body: Entity,
        shape: &Collider,
        transform: &mut Transform,
        delta: Vec3,
        mask: LayerMask,
    ) -> Vec3 {
        let filter = SpatialQueryFilter::default()
            .with_mask(mask)
            .with_excluded_entities([body]);

        let start = transform.translation;
        let mut position = start;
        let mut remaining = delta;

        for _ in 0..MAX_SLIDES {
            let Ok((direction, length)) = Dir3::new_and_length(remaining) else {
                break;
            };
            if length < MIN_MOVE {
                break;
            }

            let config = ShapeCastConfig {
                max_distance: length + SKIN_WIDTH,
                ..default()
            };

            let Some(hit) = self.spatial_query.cast_shape(
                shape,
                position,
                transform.rotation,
                direction,
                &config,
                &filter,
            ) else {
                position += remaining;
                break;
            };

            let travel = (hit.distance - SKIN_WIDTH).clamp(0.0, length);
            position += direction * travel;
            remaining = clip_to_surface(remaining - direction * travel, hit.normal1);
        }

        transform.translation = position;
        position - start
    }
}

/// Removes the part of `motion` that pushes into a surface with `normal`.
pub fn clip_to_surface(motion: Vec3, normal: Vec3) -> Vec3 {
    let normal = normal.normalize_or_zero();
    motion - normal * motion.dot(normal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_against_wall_keeps_tangent_motion() {
        let clipped = clip_to_surface(Vec3::new(-5.0, 0.0, 3.0), Vec3::X);
        assert!(clipped.x.abs() < 1e-5);
        assert!((clipped.z - 3.0).abs() < 1e-5);
    }

    #[test]
    fn clip_is_independent_of_normal_sign() {
        let motion = Vec3::new(1.0, -2.0, 0.5);
        let a = clip_to_surface(motion, Vec3::Y);
        let b = clip_to_surface(motion, Vec3::NEG_Y);
        assert!((a - b).length() < 1e-5);
        assert!(a.y.abs() < 1e-5);
    }

    #[test]
    fn clip_with_zero_normal_is_identity() {
        let motion = Vec3::new(0.3, 0.2, 0.1);
        assert_eq!(clip_to_surface(motion, Vec3::ZERO), motion);
    }
}
