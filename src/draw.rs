// Window + software drawing utilities.
// Provided here:
// 1) A window sized to the maze image that displays our pixel buffer.
// 2) Per-frame input polling (steering keys + pointer) into an InputState.
// 3) Immediate-mode primitives: pixel, filled circle, rectangles, image blit,
//    and a tiny 5x7 bitmap font for the HUD.

use image::RgbaImage;
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::Error;
use crate::input::{HeldKeys, InputState};
use crate::types::{FrameBuffer, pack_rgb};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the maze image.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        // One simulation step per displayed frame.
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Snapshot the steering keys and pointer into `input`.
    /// Keys are read as held-down state; the pointer target is re-recorded
    /// every frame the left button is down, so a click sets it once and a
    /// drag steers continuously.
    pub fn poll_input(&self, input: &mut InputState) {
        let mut held = HeldKeys::empty();
        for (key, flag) in [
            (Key::Left, HeldKeys::LEFT),
            (Key::Right, HeldKeys::RIGHT),
            (Key::Up, HeldKeys::UP),
            (Key::Down, HeldKeys::DOWN),
            (Key::A, HeldKeys::A),
            (Key::D, HeldKeys::D),
            (Key::W, HeldKeys::W),
            (Key::S, HeldKeys::S),
        ] {
            if self.window.is_key_down(key) {
                held |= flag;
            }
        }
        input.held = held;

        if self.window.get_mouse_down(MouseButton::Left) {
            if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
                input.point_at(mx, my);
            }
        }
    }
}

/* ---------- Software drawing: pixels, shapes, image blit, tiny font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    fb.pixels[y * fb.width + x] = color;
}

/// Filled circle, scanning just the bounding box.
/// Visual: a solid dot of `color` centered at (cx,cy).
pub fn fill_circle(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    if radius <= 0 {
        put_pixel(fb, cx, cy, color);
        return;
    }
    let r2 = radius * radius;
    for y in (cy - radius)..=(cy + radius) {
        for x in (cx - radius)..=(cx + radius) {
            let dx = x - cx;
            let dy = y - cy;
            if dx * dx + dy * dy <= r2 {
                put_pixel(fb, x, y, color);
            }
        }
    }
}

/// Axis-aligned filled rectangle, clipped to the buffer.
pub fn fill_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    for yy in y..y + h {
        for xx in x..x + w {
            put_pixel(fb, xx, yy, color);
        }
    }
}

/// Rectangle mixed 50/50 with what is already on screen.
/// Visual: a see-through tint, used for the goal region.
pub fn blend_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    let cr = (color >> 16) & 0xFF;
    let cg = (color >> 8) & 0xFF;
    let cb = color & 0xFF;
    for yy in y.max(0)..(y + h).min(fb.height as i32) {
        for xx in x.max(0)..(x + w).min(fb.width as i32) {
            let idx = yy as usize * fb.width + xx as usize;
            let old = fb.pixels[idx];
            let or = (old >> 16) & 0xFF;
            let og = (old >> 8) & 0xFF;
            let ob = old & 0xFF;
            fb.pixels[idx] = pack_rgb((or + cr) / 2, (og + cg) / 2, (ob + cb) / 2);
        }
    }
}

/// Copy a decoded RGBA image onto the buffer at (0,0).
/// Fully transparent pixels leave the buffer untouched, so whatever base
/// color was filled first shows through them.
pub fn blit_image(fb: &mut FrameBuffer, image: &RgbaImage) {
    let w = (image.width() as usize).min(fb.width);
    let h = (image.height() as usize).min(fb.height);
    for y in 0..h {
        for x in 0..w {
            let [r, g, b, a] = image.get_pixel(x as u32, y as u32).0;
            if a == 0 {
                continue;
            }
            fb.pixels[y * fb.width + x] = pack_rgb(r as u32, g as u32, b as u32);
        }
    }
}

/* ---------- 5x7 bitmap font (ASCII subset for "FPS: 0.0 | WIN!" etc.) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Letters for the HUD words: FPS, WIN, PREVIEW
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),

        // Punctuation: space, vertical bar, colon, dot, bang
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y).
/// Visual: a tiny glyph with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass: offset by (1,1) in black to improve readability
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32 + 1, y + ry as i32 + 1, 0x00000000);
                }
            }
        }

        // Foreground pass: actual glyph in chosen color
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact HUD string; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
