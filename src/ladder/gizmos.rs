use bevy::prelude::*;

use super::climb::Ladder;

/// Number of segments used to draw the climb path
const PATH_SAMPLES: usize = 16;

/// Draws ladder axes, anchors and climb paths. Not added by default.
pub struct LadderGizmosPlugin;

impl Plugin for LadderGizmosPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, draw_ladder_gizmos);
    }
}

fn draw_ladder_gizmos(mut gizmos: Gizmos, ladders: Query<(&Ladder, &Transform)>) {
    let axis_color = Color::srgb(0.2, 0.6, 1.0);
    let path_color = Color::srgb(1.0, 0.8, 0.2);
    let forward_color = Color::srgb(1.0, 0.3, 0.3);

    for (ladder, base) in &ladders {
        let bottom = ladder.anchors().bottom();
        let top = ladder.anchors().top();
        gizmos.line(bottom, top, axis_color);
        draw_cross(&mut gizmos, bottom, 0.1, axis_color);
        draw_cross(&mut gizmos, top, 0.1, axis_color);

        let height_at = |i: usize| bottom.y + (top.y - bottom.y) * i as f32 / PATH_SAMPLES as f32;
        for i in 0..PATH_SAMPLES {
            let from = ladder.pose_at(base, height_at(i)).position;
            let to = ladder.pose_at(base, height_at(i + 1)).position;
            gizmos.line(from, to, path_color);
        }

        let middle = ladder.pose_at(base, (bottom.y + top.y) * 0.5);
        gizmos.line(middle.position, middle.position + middle.forward * 0.5, forward_color);
    }
}

fn draw_cross(gizmos: &mut Gizmos, center: Vec3, arm: f32, color: Color) {
    gizmos.line(center - Vec3::X * arm, center + Vec3::X * arm, color);
    gizmos.line(center - Vec3::Z * arm, center + Vec3::Z * arm, color);
}
