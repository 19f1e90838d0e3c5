use avian3d::prelude::*;
use bevy::prelude::*;

/// Checks whether a sphere centred on the foot anchor overlaps walkable geometry.
///
/// This is a plain overlap test, not a cast: any collider on `world_layer`
/// touching the sphere counts as ground, regardless of its slope.
pub fn check_ground(
    spatial_query: &SpatialQuery,
    foot_position: Vec3,
    radius: f32,
    world_layer: LayerMask,
) -> bool {
    let shape = Collider::sphere(radius);
    let filter = SpatialQueryFilter::default().with_mask(world_layer);

    !spatial_query
        .shape_intersections(&shape, foot_position, Quat::IDENTITY, &filter)
        .is_empty()
}

/// World-space position of the foot anchor for a body at `transform`.
pub fn foot_anchor(transform: &Transform, local_offset: Vec3) -> Vec3 {
    transform.transform_point(local_offset)
}
