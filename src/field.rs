// Local wall repulsion: sample a small square of the wall grid around a point
// and sum inverse-square pushes away from every wall (or out-of-bounds) pixel.
// Nearby walls dominate, which gives smooth avoidance without any pathfinding.

use crate::vec2::Vec2;
use crate::walls::WallMap;

/// How hard a wall pixel at distance 1 pushes.
pub const REPEL_FACTOR: f32 = 0.5;

pub struct RepulsionField<'a> {
    walls: &'a WallMap,
    repel_factor: f32,
}

impl<'a> RepulsionField<'a> {
    pub fn new(walls: &'a WallMap) -> Self {
        Self { walls, repel_factor: REPEL_FACTOR }
    }

    /// Resultant repulsion at `center` from a `diameter x diameter` pixel
    /// window. The center is rounded to the nearest pixel and the window's
    /// top-left sits at `center - floor(diameter / 2)` on each axis.
    pub fn repulsion_at(&self, center: Vec2, diameter: i32) -> Vec2 {
        let half = diameter / 2;
        let cx = center.x.round() as i32;
        let cy = center.y.round() as i32;
        let left = cx - half;
        let top = cy - half;

        let mut resultant = Vec2::ZERO;
        for y in top..top + diameter {
            for x in left..left + diameter {
                if !self.walls.blocks(x, y) {
                    continue;
                }
                // Vector from the wall pixel back to the (rounded) center.
                let mut push = Vec2::new((cx - x) as f32, (cy - y) as f32);
                let d2 = push.distance_squared();
                if d2 != 0.0 {
                    push.multiply(self.repel_factor / d2);
                    resultant.add(push);
                }
            }
        }
        resultant
    }
}
