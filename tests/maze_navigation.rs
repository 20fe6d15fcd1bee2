// End-to-end steering through the public API: a session driven frame by
// frame, the way the binary's loop drives it.

use image::{Rgba, RgbaImage};
use pixel_maze::input::HeldKeys;
use pixel_maze::maze::{MazeEvent, MazeOptions, MazeSession};
use pixel_maze::mover::MOVE_SPEED;
use pixel_maze::{FrameBuffer, InputState};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

#[test]
fn held_key_drives_the_mover_into_the_goal_once() {
    let img = RgbaImage::from_pixel(40, 40, WHITE);
    let options = MazeOptions {
        start_x: 20.0,
        start_y: 20.0,
        goal_x: Some(28.0),
        goal_y: Some(16.0),
        goal_width: 8.0,
        goal_height: 8.0,
        ..MazeOptions::default()
    };
    let mut session = MazeSession::new(&img, &options);
    let mut input = InputState::default();
    input.held = HeldKeys::D;
    let mut fb = FrameBuffer::new(40, 40);

    let mut wins = 0;
    let mut win_frame = None;
    for frame in 1..=12 {
        if session.step(&mut input, &mut fb) == Some(MazeEvent::Won) {
            wins += 1;
            win_frame.get_or_insert(frame);
        }
    }

    assert_eq!(wins, 1, "the win notification is one-shot");
    assert!(session.won());
    // Eight steps of MOVE_SPEED cover the 8 pixels to the goal's left edge.
    assert_eq!(win_frame, Some(8));
    assert!((session.mover_pos().x - (20.0 + 12.0 * MOVE_SPEED)).abs() < 1e-3);
    assert!((session.mover_pos().y - 20.0).abs() < 1e-3);
}

#[test]
fn a_solid_wall_line_cannot_be_crossed() {
    // Full-height wall at x = 25 between the mover and its pointer target.
    let mut img = RgbaImage::from_pixel(41, 41, WHITE);
    for y in 0..41 {
        img.put_pixel(25, y, BLACK);
    }
    let options = MazeOptions { start_x: 20.0, start_y: 20.0, ..MazeOptions::default() };
    let mut session = MazeSession::new(&img, &options);
    let mut input = InputState::default();
    input.point_at(35.0, 20.0);
    let mut fb = FrameBuffer::new(41, 41);

    for _ in 0..300 {
        let _ = session.step(&mut input, &mut fb);
        let pos = session.mover_pos();
        assert!(pos.x < 25.0, "wall repulsion must hold the mover back");
        // The wall is vertically symmetric around the path, so no y drift.
        assert!((pos.y - 20.0).abs() < 1e-3);
    }
    // It still pressed toward the target and stalled near the wall.
    assert!(session.mover_pos().x > 21.0);
}

#[test]
fn pointer_steers_until_a_key_takes_over() {
    let img = RgbaImage::from_pixel(41, 41, WHITE);
    let options = MazeOptions { start_x: 20.0, start_y: 20.0, ..MazeOptions::default() };
    let mut session = MazeSession::new(&img, &options);
    let mut input = InputState::default();
    let mut fb = FrameBuffer::new(41, 41);

    // Chase a pointer target to the right.
    input.point_at(30.0, 20.0);
    for _ in 0..4 {
        let _ = session.step(&mut input, &mut fb);
    }
    let after_pointer = session.mover_pos();
    assert!(after_pointer.x > 20.0);
    assert!(input.following);

    // A held key overrides the pointer and switches following off.
    input.held = HeldKeys::W;
    let _ = session.step(&mut input, &mut fb);
    assert!(!input.following);
    assert!(session.mover_pos().y < after_pointer.y);

    // Releasing the key leaves the mover idle: target = own position.
    input.held = HeldKeys::empty();
    let parked = session.mover_pos();
    for _ in 0..5 {
        let _ = session.step(&mut input, &mut fb);
    }
    assert_eq!(session.mover_pos(), parked);
}
