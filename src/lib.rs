// Turn any image into a maze: dark pixels repel a steerable dot, a pointer
// click or WASD/arrows attract it, and reaching the green goal square wins.
// The binary in main.rs owns the window; everything simulated lives here.

pub mod celebrate;
pub mod draw;
pub mod error;
pub mod field;
pub mod input;
pub mod maze;
pub mod mover;
pub mod trail;
pub mod types;
pub mod vec2;
pub mod walls;

pub use error::Error;
pub use input::{HeldKeys, InputState};
pub use maze::{MazeEvent, MazeOptions, MazeSession};
pub use types::FrameBuffer;
pub use vec2::Vec2;
pub use walls::WallMap;
