// Win celebration: confetti glows launched from the bottom edge, rising and
// fading, respawned continuously for as long as the window stays open.
// Fully software-drawn with additive blending over the finished maze frame.

use crate::types::FrameBuffer;

// ----------------------------- tiny RNG (no external crate) -----------------------------

/// Deterministic xorshift32 RNG for lightweight randomness.
/// Controls launch positions, velocities and per-particle color.
#[derive(Clone)]
struct Rng32 {
    state: u32,
}

impl Rng32 {
    fn from_seed(seed: u32) -> Self {
        Self { state: seed | 1 }
    }

    #[inline]
    fn next_u32(&mut self) -> u32 {
        // Xorshift: fast, and plenty for visual noise.
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    #[inline]
    fn next_f32(&mut self) -> f32 {
        // Uniform [0,1)
        (self.next_u32() >> 8) as f32 / ((1u32 << 24) as f32)
    }

    #[inline]
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }
}

// ----------------------------- additive drawing helpers --------------------------------

/// Additive blend one RGB triplet at (x,y) with saturation to 255.
#[inline]
fn add_rgb_saturating(fb: &mut FrameBuffer, x: i32, y: i32, r: u8, g: u8, b: u8) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }

    let idx = y * fb.width + x;
    let old = fb.pixels[idx];

    let or = ((old >> 16) & 0xFF) as u16;
    let og = ((old >> 8) & 0xFF) as u16;
    let ob = (old & 0xFF) as u16;

    let nr = (or + r as u16).min(255) as u32;
    let ng = (og + g as u16).min(255) as u32;
    let nb = (ob + b as u16).min(255) as u32;

    fb.pixels[idx] = (nr << 16) | (ng << 8) | nb;
}

/// Soft round glow disc with Gaussian falloff, drawn additively.
/// Visual: a fuzzy dot of light, brighter in the middle.
fn draw_glow_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: (u8, u8, u8), strength: f32) {
    if radius <= 0 {
        return;
    }
    let r2 = (radius * radius) as f32;
    let sigma = radius as f32 * 0.5;
    let denom = 2.0 * sigma * sigma;

    for y in (cy - radius)..=(cy + radius) {
        for x in (cx - radius)..=(cx + radius) {
            let dx = (x - cx) as f32;
            let dy = (y - cy) as f32;
            let d2 = dx * dx + dy * dy;
            if d2 > r2 {
                continue;
            }
            let w = (-d2 / denom).exp() * strength;
            let r = (color.0 as f32 * w).round().clamp(0.0, 255.0) as u8;
            let g = (color.1 as f32 * w).round().clamp(0.0, 255.0) as u8;
            let b = (color.2 as f32 * w).round().clamp(0.0, 255.0) as u8;
            add_rgb_saturating(fb, x, y, r, g, b);
        }
    }
}

// ----------------------------- confetti particles ---------------------------------------

const PALETTE: [(u8, u8, u8); 4] = [
    (255, 200, 80),  // warm gold
    (255, 90, 120),  // rose
    (120, 255, 140), // mint
    (130, 190, 255), // sky
];

struct Spark {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,      // negative = rising
    life: f32,    // remaining lifetime in seconds
    max_life: f32,
    color: (u8, u8, u8),
}

impl Spark {
    #[inline]
    fn alive(&self) -> bool {
        self.life > 0.0
    }
}

/// The celebration overlay. Owns its particles; never touches the maze state.
pub struct Celebration {
    rng: Rng32,
    sparks: Vec<Spark>,
    max_sparks: usize,
    width: f32,
    height: f32,
}

impl Celebration {
    /// Prepare an overlay for a frame of the given size.
    /// Visual: nothing yet; sparks appear on the first update.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rng: Rng32::from_seed(0xCE1EB8A7),
            sparks: Vec::with_capacity(240),
            max_sparks: 240,
            width: width as f32,
            height: height as f32,
        }
    }

    /// Launch one spark from a random spot along the bottom edge.
    fn spawn(&mut self) {
        let x = self.rng.range(0.0, self.width);
        let rise = self.rng.range(0.4, 0.8) * self.height; // 40-80% of the frame
        let max_life = self.rng.range(1.0, 2.0);
        let color = PALETTE[(self.rng.next_u32() % PALETTE.len() as u32) as usize];
        self.sparks.push(Spark {
            x,
            y: self.height,
            vx: self.rng.range(-12.0, 12.0),
            vy: -rise / max_life,
            life: max_life,
            max_life,
            color,
        });
    }

    /// Step and render the overlay. Expired sparks are replaced, so the
    /// celebration loops until the window goes away.
    pub fn update_and_render(&mut self, fb: &mut FrameBuffer, dt: f32) {
        // Keep the pool topped up with a small trickle per frame.
        for _ in 0..4 {
            if self.sparks.len() >= self.max_sparks {
                break;
            }
            self.spawn();
        }

        let mut i = 0;
        while i < self.sparks.len() {
            let s = &mut self.sparks[i];
            s.x += s.vx * dt;
            s.y += s.vy * dt;
            s.life -= dt;

            if s.alive() {
                // Opaque for most of the ride, fading out near the end.
                let life01 = (s.life / s.max_life).clamp(0.0, 1.0);
                let strength = (life01 * 4.0).min(1.0);
                let radius = 3 + (life01 * 3.0) as i32;
                draw_glow_disc(fb, s.x as i32, s.y as i32, radius, s.color, strength);
                i += 1;
            } else {
                // Remove dead spark (swap-remove, O(1)); the trickle refills.
                let _ = self.sparks.swap_remove(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_stays_bounded() {
        let mut fb = FrameBuffer::new(32, 32);
        let mut party = Celebration::new(32, 32);
        for _ in 0..1000 {
            party.update_and_render(&mut fb, 1.0 / 60.0);
            assert!(party.sparks.len() <= party.max_sparks);
        }
        // After a while the pool is actually populated and cycling.
        assert!(!party.sparks.is_empty());
    }

    #[test]
    fn sparks_rise_and_expire() {
        let mut party = Celebration::new(64, 64);
        party.spawn();
        let (y0, life0) = (party.sparks[0].y, party.sparks[0].life);
        assert!(party.sparks[0].vy < 0.0);
        assert!(y0 == 64.0 && life0 > 0.0);

        let mut fb = FrameBuffer::new(64, 64);
        party.update_and_render(&mut fb, 0.1);
        assert!(party.sparks[0].y < y0, "sparks move upward");
    }

    #[test]
    fn additive_blend_saturates() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.pixels[0] = 0x00F0F0F0;
        add_rgb_saturating(&mut fb, 0, 0, 200, 200, 200);
        assert_eq!(fb.pixels[0], 0x00FFFFFF);
    }
}
