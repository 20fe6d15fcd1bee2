// One maze session: wall map, mover, trail, goal, and the per-frame step.
// Everything a maze needs lives on this struct, so sessions are independent
// and a second maze can never read the first one's state.

use image::RgbaImage;
use tracing::info;

use crate::draw::{blend_rect, fill_circle};
use crate::field::RepulsionField;
use crate::input::InputState;
use crate::mover::Mover;
use crate::trail::TrailBuffer;
use crate::types::FrameBuffer;
use crate::vec2::Vec2;
use crate::walls::WallMap;

/// Default edge length of the goal square, in pixels.
pub const DEFAULT_GOAL_SIZE: f32 = 15.0;
/// Default wall luminosity threshold (0-255); at or below is a wall.
pub const DEFAULT_WALL_THRESHOLD: f32 = 190.0;

const GOAL_COLOR: u32 = 0x0032CD32; // limegreen
const START_MARKER_COLOR: u32 = 0x00DC143C; // crimson, same as the mover
const WALL_PREVIEW_COLOR: u32 = 0x00000000;
const FLOOR_PREVIEW_COLOR: u32 = 0x00FFFFFF;

/// Maze configuration. `goal_x`/`goal_y` default to the bottom-right corner
/// minus the goal size once the image dimensions are known.
#[derive(Clone, Copy, Debug)]
pub struct MazeOptions {
    pub start_x: f32,
    pub start_y: f32,
    pub goal_x: Option<f32>,
    pub goal_y: Option<f32>,
    pub goal_width: f32,
    pub goal_height: f32,
    pub wall_threshold: f32,
}

impl Default for MazeOptions {
    fn default() -> Self {
        Self {
            start_x: 2.0,
            start_y: 2.0,
            goal_x: None,
            goal_y: None,
            goal_width: DEFAULT_GOAL_SIZE,
            goal_height: DEFAULT_GOAL_SIZE,
            wall_threshold: DEFAULT_WALL_THRESHOLD,
        }
    }
}

/// Axis-aligned goal rectangle. Entering it wins the maze.
#[derive(Clone, Copy, Debug)]
pub struct GoalRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl GoalRegion {
    /// Inclusive on all four sides.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x
            && p.x <= self.x + self.width
            && p.y >= self.y
            && p.y <= self.y + self.height
    }
}

/// One-shot notifications a step can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MazeEvent {
    /// The mover entered the goal region. Emitted at most once per session.
    Won,
}

pub struct MazeSession {
    walls: WallMap,
    mover: Mover,
    trail: TrailBuffer,
    goal: GoalRegion,
    start: Vec2,
    won: bool,
}

impl MazeSession {
    /// Build the wall map and goal once from the loaded image and options.
    pub fn new(image: &RgbaImage, options: &MazeOptions) -> Self {
        let walls = WallMap::from_image(image, options.wall_threshold);
        let goal = GoalRegion {
            x: options
                .goal_x
                .unwrap_or(walls.width() as f32 - options.goal_width),
            y: options
                .goal_y
                .unwrap_or(walls.height() as f32 - options.goal_height),
            width: options.goal_width,
            height: options.goal_height,
        };
        info!(
            width = walls.width(),
            height = walls.height(),
            "started a maze"
        );
        Self {
            walls,
            mover: Mover::new(options.start_x, options.start_y),
            trail: TrailBuffer::new(),
            goal,
            start: Vec2::new(options.start_x, options.start_y),
            won: false,
        }
    }

    /// Advance one frame: age and draw the trail, update and draw the mover,
    /// recycle the oldest trail slot onto the mover, then check the goal.
    /// Returns `Some(Won)` on the first frame the mover is inside the goal.
    pub fn step(&mut self, input: &mut InputState, fb: &mut FrameBuffer) -> Option<MazeEvent> {
        self.trail.update_and_render(fb);

        let field = RepulsionField::new(&self.walls);
        self.mover.update(input, &field, fb);

        self.trail.recycle(self.mover.pos);

        if !self.won && self.goal.contains(self.mover.pos) {
            self.won = true;
            info!(x = self.mover.pos.x, y = self.mover.pos.y, "maze won");
            return Some(MazeEvent::Won);
        }
        None
    }

    /// Diagnostic render: the wall map as black-on-white, the start marker,
    /// and the goal rectangle. No simulation runs.
    /// Visual: exactly what the builder classified as wall vs floor.
    pub fn preview(&self, fb: &mut FrameBuffer) {
        for y in 0..self.walls.height().min(fb.height) {
            for x in 0..self.walls.width().min(fb.width) {
                fb.pixels[y * fb.width + x] = if self.walls.is_wall(x, y) {
                    WALL_PREVIEW_COLOR
                } else {
                    FLOOR_PREVIEW_COLOR
                };
            }
        }
        self.draw_goal(fb);
        fill_circle(
            fb,
            self.start.x.round() as i32,
            self.start.y.round() as i32,
            3,
            START_MARKER_COLOR,
        );
    }

    /// Visual: a see-through green square marking the goal.
    pub fn draw_goal(&self, fb: &mut FrameBuffer) {
        blend_rect(
            fb,
            self.goal.x.round() as i32,
            self.goal.y.round() as i32,
            self.goal.width.round() as i32,
            self.goal.height.round() as i32,
            GOAL_COLOR,
        );
    }

    pub fn walls(&self) -> &WallMap {
        &self.walls
    }

    pub fn goal(&self) -> &GoalRegion {
        &self.goal
    }

    pub fn mover_pos(&self) -> Vec2 {
        self.mover.pos
    }

    pub fn won(&self) -> bool {
        self.won
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn white_image(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, WHITE)
    }

    #[test]
    fn goal_defaults_to_bottom_right_corner() {
        let session = MazeSession::new(&white_image(100, 80), &MazeOptions::default());
        let goal = session.goal();
        assert_eq!(goal.x, 85.0);
        assert_eq!(goal.y, 65.0);
        assert_eq!(goal.width, DEFAULT_GOAL_SIZE);
        assert_eq!(goal.height, DEFAULT_GOAL_SIZE);
    }

    #[test]
    fn goal_contains_is_inclusive_on_all_sides() {
        let goal = GoalRegion { x: 8.0, y: 8.0, width: 2.0, height: 2.0 };
        assert!(goal.contains(Vec2::new(8.0, 8.0)));
        assert!(goal.contains(Vec2::new(10.0, 10.0)));
        assert!(goal.contains(Vec2::new(8.0, 10.0)));
        assert!(goal.contains(Vec2::new(10.0, 8.0)));
        assert!(!goal.contains(Vec2::new(7.99, 9.0)));
        assert!(!goal.contains(Vec2::new(10.01, 9.0)));
    }

    #[test]
    fn win_fires_exactly_once() {
        // Start inside the goal; the mover never leaves it.
        let options = MazeOptions {
            start_x: 20.0,
            start_y: 20.0,
            goal_x: Some(15.0),
            goal_y: Some(15.0),
            goal_width: 10.0,
            goal_height: 10.0,
            ..MazeOptions::default()
        };
        let mut session = MazeSession::new(&white_image(40, 40), &options);
        let mut input = InputState::default();
        let mut fb = FrameBuffer::new(40, 40);

        let mut wins = 0;
        for _ in 0..10 {
            if session.step(&mut input, &mut fb) == Some(MazeEvent::Won) {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
        assert!(session.won());
    }

    #[test]
    fn no_input_means_no_motion_away_from_edges() {
        // Interior start: the 7x7 sample window is fully in-bounds and the
        // image is all floor, so repulsion is zero and the idle target rule
        // keeps the mover exactly where it started.
        let options = MazeOptions { start_x: 15.0, start_y: 15.0, ..MazeOptions::default() };
        let mut session = MazeSession::new(&white_image(30, 30), &options);
        let mut input = InputState::default();
        let mut fb = FrameBuffer::new(30, 30);

        for _ in 0..20 {
            let _ = session.step(&mut input, &mut fb);
        }
        assert_eq!(session.mover_pos(), Vec2::new(15.0, 15.0));
    }

    #[test]
    fn corner_start_gets_pushed_off_the_edges() {
        // Near (2,2) the sample window pokes past the map edge, and
        // out-of-bounds counts as wall, so the mover drifts inward.
        let options = MazeOptions { start_x: 2.0, start_y: 2.0, ..MazeOptions::default() };
        let mut session = MazeSession::new(&white_image(30, 30), &options);
        let mut input = InputState::default();
        let mut fb = FrameBuffer::new(30, 30);

        let _ = session.step(&mut input, &mut fb);
        let pos = session.mover_pos();
        assert!(pos.x > 2.0 && pos.y > 2.0);
    }

    #[test]
    fn preview_paints_walls_and_floor() {
        let mut img = white_image(20, 20);
        img.put_pixel(5, 5, Rgba([0, 0, 0, 255]));
        // Keep the goal tint clear of the pixels asserted below.
        let options = MazeOptions {
            goal_x: Some(16.0),
            goal_y: Some(16.0),
            goal_width: 4.0,
            goal_height: 4.0,
            ..MazeOptions::default()
        };
        let session = MazeSession::new(&img, &options);
        let mut fb = FrameBuffer::new(20, 20);
        session.preview(&mut fb);

        assert_eq!(fb.pixels[5 * 20 + 5], 0x00000000);
        assert_eq!(fb.pixels[10 * 20 + 10], 0x00FFFFFF);
    }
}
