// The player-controlled dot. Each frame it picks a target (keys beat pointer,
// pointer beats standing still), steps toward it, then gets shoved by nearby
// walls. Visual: a small crimson dot that slides around the maze.

use tracing::debug;

use crate::draw::fill_circle;
use crate::field::RepulsionField;
use crate::input::{InputState, direction_from_keys};
use crate::types::FrameBuffer;
use crate::vec2::Vec2;

/// Goal-seeking step per frame, in pixels.
pub const MOVE_SPEED: f32 = 1.1;
/// Side length of the square wall-sample window around the mover.
pub const SAMPLE_DIAMETER: i32 = 7;
/// Per-axis cap on the repulsion step, so a strong local field cannot
/// teleport the mover through a thin wall.
pub const REPULSION_TRIM: f32 = 1.5;

const MOVER_RADIUS: i32 = 2;
const MOVER_COLOR: u32 = 0x00DC143C; // crimson

pub struct Mover {
    pub pos: Vec2,
}

impl Mover {
    pub fn new(x: f32, y: f32) -> Self {
        Self { pos: Vec2::new(x, y) }
    }

    /// Where the mover wants to go this frame. First match wins:
    /// 1. any steering key held -> one step in the implied direction
    ///    (this also takes the pointer out of following mode);
    /// 2. pointer following -> the last recorded pointer position;
    /// 3. otherwise -> stay put.
    pub fn steer_target(&self, input: &mut InputState) -> Vec2 {
        if input.any_key_held() {
            input.following = false;
            let mut target = self.pos;
            target.add(direction_from_keys(input.held));
            return target;
        }
        if input.following {
            return input.pointer;
        }
        self.pos
    }

    /// Advance one frame: seek the target, apply wall repulsion, draw.
    pub fn update(&mut self, input: &mut InputState, field: &RepulsionField, fb: &mut FrameBuffer) {
        let target = self.steer_target(input);

        // Step toward the target. When target == pos the direction normalises
        // to zero and goal-seeking contributes no motion this frame.
        let mut dir = target;
        dir.subtract(self.pos).normalise().multiply(MOVE_SPEED);
        self.pos.add(dir);

        // Shove away from nearby walls, capped per axis.
        let mut repulsion = field.repulsion_at(self.pos, SAMPLE_DIAMETER);
        repulsion.trim(REPULSION_TRIM);
        if repulsion.distance_squared() > 5.0 {
            debug!(x = repulsion.x, y = repulsion.y, "strong wall repulsion");
        }
        self.pos.add(repulsion);

        self.draw(fb);
    }

    /// Visual: a filled crimson dot at the current position.
    pub fn draw(&self, fb: &mut FrameBuffer) {
        fill_circle(
            fb,
            self.pos.x.round() as i32,
            self.pos.y.round() as i32,
            MOVER_RADIUS,
            MOVER_COLOR,
        );
    }
}
