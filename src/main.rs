// What you SEE when you run this:
// • A window showing your image. A crimson dot sits at the start position.
// • Click somewhere: the dot heads there, sliding around dark pixels (walls).
// • Hold WASD or the arrows to steer directly; keys override the pointer.
// • The dot leaves a fading red trail. Reaching the green square wins, and
//   confetti rises until you close the window. ESC quits.
// • --preview shows the detected walls, start and goal without simulating.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use image::RgbaImage;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pixel_maze::celebrate::Celebration;
use pixel_maze::draw::{Drawer, blit_image, draw_text_5x7};
use pixel_maze::error::Error;
use pixel_maze::maze::{DEFAULT_GOAL_SIZE, DEFAULT_WALL_THRESHOLD, MazeEvent, MazeOptions, MazeSession};
use pixel_maze::types::FrameBuffer;
use pixel_maze::InputState;

const BASE_COLOR: u32 = 0x00FFFFFF; // transparent image pixels render white
const HUD_COLOR: u32 = 0x00FFFFFF;

/// Steer a dot through any image. Dark pixels are walls; reach the green goal.
#[derive(Parser, Debug)]
#[command(name = "pixel-maze", version)]
struct Cli {
    /// Path to the maze image (anything the image crate can decode).
    image: PathBuf,

    /// Start position of the mover, in image pixels.
    #[arg(long, default_value_t = 2.0)]
    start_x: f32,
    #[arg(long, default_value_t = 2.0)]
    start_y: f32,

    /// Goal rectangle position. Defaults to the bottom-right corner.
    #[arg(long)]
    goal_x: Option<f32>,
    #[arg(long)]
    goal_y: Option<f32>,
    #[arg(long, default_value_t = DEFAULT_GOAL_SIZE)]
    goal_width: f32,
    #[arg(long, default_value_t = DEFAULT_GOAL_SIZE)]
    goal_height: f32,

    /// Pixels with luminosity at or below this are walls (0-255).
    #[arg(long, default_value_t = DEFAULT_WALL_THRESHOLD)]
    wall_threshold: f32,

    /// Render the wall map, start marker and goal, then wait instead of playing.
    #[arg(long)]
    preview: bool,
}

impl Cli {
    fn maze_options(&self) -> MazeOptions {
        MazeOptions {
            start_x: self.start_x,
            start_y: self.start_y,
            goal_x: self.goal_x,
            goal_y: self.goal_y,
            goal_width: self.goal_width,
            goal_height: self.goal_height,
            wall_threshold: self.wall_threshold,
        }
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    /* --- Load the maze raster ---
       Visual: nothing yet; decode failures end the run with the path. */
    let image = image::open(&cli.image)
        .map_err(|source| Error::ImageLoad { path: cli.image.clone(), source })?
        .to_rgba8();
    info!(path = %cli.image.display(), width = image.width(), height = image.height(), "maze image loaded");

    let session = MazeSession::new(&image, &cli.maze_options());

    if cli.preview {
        preview_maze(session)
    } else {
        start_maze(session, &image)
    }
}

/// Show the diagnostic view until the window is closed.
fn preview_maze(session: MazeSession) -> Result<(), Error> {
    let (w, h) = (session.walls().width(), session.walls().height());
    let mut drawer = Drawer::new("pixel-maze — preview", w, h)?;
    let mut screen = FrameBuffer::new(w, h);

    session.preview(&mut screen);
    draw_text_5x7(&mut screen, 8, 8, "PREVIEW", HUD_COLOR);
    info!("preview mode: close the window or press ESC to exit");

    while drawer.is_open() && !drawer.esc_pressed() {
        drawer.present(&screen)?;
    }
    Ok(())
}

/// Run the simulation loop until the window is closed.
fn start_maze(mut session: MazeSession, image: &RgbaImage) -> Result<(), Error> {
    let (w, h) = (session.walls().width(), session.walls().height());
    let mut drawer = Drawer::new("pixel-maze", w, h)?;

    /* --- Reusable buffers ---
       Visual: `screen` is the image you actually see each frame. */
    let mut screen = FrameBuffer::new(w, h);
    let mut input = InputState::default();
    let mut party: Option<Celebration> = None;

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");
    let mut last_frame_time = Instant::now();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32(); // drives the confetti timing
        last_frame_time = now;

        /* 1) Base image: white, then the maze raster over it. */
        screen.fill(BASE_COLOR);
        blit_image(&mut screen, image);
        session.draw_goal(&mut screen);

        /* 2) Inputs: steering keys + pointer target for this frame. */
        drawer.poll_input(&mut input);

        /* 3) One simulation step: trail, mover, recycle, win check. */
        if session.step(&mut input, &mut screen) == Some(MazeEvent::Won) {
            party = Some(Celebration::new(w, h));
        }

        /* 4) Celebration overlay + HUD on top. */
        let mut hud = hud_fps_text.clone();
        if let Some(party) = party.as_mut() {
            party.update_and_render(&mut screen, dt);
            hud.push_str(" | WIN!");
        }
        draw_text_5x7(&mut screen, 8, 8, &hud, HUD_COLOR);

        /* 5) Present to the window. */
        drawer.present(&screen)?;

        /* 6) FPS counter, refreshed once per second. */
        frames_this_second += 1;
        let elapsed = now.duration_since(last_fps_time).as_secs_f32();
        if elapsed >= 1.0 {
            hud_fps_text = format!("FPS: {:.1}", frames_this_second as f32 / elapsed);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
