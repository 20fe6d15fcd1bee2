// Steering input: the pointer target plus the set of held directional keys.
// Event wiring lives in the window layer; this module is plain state and a
// pure keys -> direction function so the steering rules stay testable.

use bitflags::bitflags;

use crate::vec2::Vec2;

bitflags! {
    /// The eight steering keys. WASD and the arrows act as two aliases per
    /// direction; opposite directions cancel per axis.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct HeldKeys: u8 {
        const LEFT  = 1 << 0;
        const RIGHT = 1 << 1;
        const UP    = 1 << 2;
        const DOWN  = 1 << 3;
        const A     = 1 << 4;
        const D     = 1 << 5;
        const W     = 1 << 6;
        const S     = 1 << 7;
    }
}

/// Read once per frame by the simulation step; written by the window layer.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    /// Last recorded pointer position, in maze pixel coordinates.
    pub pointer: Vec2,
    /// True once the pointer has been pressed; the mover chases `pointer`
    /// until a steering key takes over.
    pub following: bool,
    /// Currently held directional keys.
    pub held: HeldKeys,
}

impl InputState {
    /// Record a pointer press. Visual: the mover starts heading to that spot.
    pub fn point_at(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
        self.following = true;
    }

    pub fn any_key_held(&self) -> bool {
        !self.held.is_empty()
    }
}

/// Unit direction implied by the held keys, or zero when nothing is held
/// (or when opposite keys cancel on both axes).
pub fn direction_from_keys(held: HeldKeys) -> Vec2 {
    let minus_x = held.intersects(HeldKeys::LEFT | HeldKeys::A);
    let plus_x = held.intersects(HeldKeys::RIGHT | HeldKeys::D);
    let minus_y = held.intersects(HeldKeys::UP | HeldKeys::W);
    let plus_y = held.intersects(HeldKeys::DOWN | HeldKeys::S);

    let mut dir = Vec2::new(
        (plus_x as i32 - minus_x as i32) as f32,
        (plus_y as i32 - minus_y as i32) as f32,
    );
    dir.normalise();
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn single_keys_map_to_axis_deltas() {
        assert_eq!(direction_from_keys(HeldKeys::D), Vec2::new(1.0, 0.0));
        assert_eq!(direction_from_keys(HeldKeys::LEFT), Vec2::new(-1.0, 0.0));
        assert_eq!(direction_from_keys(HeldKeys::W), Vec2::new(0.0, -1.0));
        assert_eq!(direction_from_keys(HeldKeys::DOWN), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn wasd_and_arrows_agree() {
        assert_eq!(
            direction_from_keys(HeldKeys::A),
            direction_from_keys(HeldKeys::LEFT)
        );
        assert_eq!(
            direction_from_keys(HeldKeys::S),
            direction_from_keys(HeldKeys::DOWN)
        );
    }

    #[test]
    fn diagonals_are_unit_length() {
        let dir = direction_from_keys(HeldKeys::D | HeldKeys::S);
        assert!(close(dir.distance_squared(), 1.0));
        assert!(dir.x > 0.0 && dir.y > 0.0);
    }

    #[test]
    fn opposite_keys_cancel_per_axis() {
        let dir = direction_from_keys(HeldKeys::A | HeldKeys::RIGHT);
        assert_eq!(dir, Vec2::ZERO);

        // Cancel on x, still move on y.
        let dir = direction_from_keys(HeldKeys::A | HeldKeys::D | HeldKeys::W);
        assert_eq!(dir, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn point_at_records_and_follows() {
        let mut input = InputState::default();
        assert!(!input.following);
        input.point_at(12.0, 34.0);
        assert!(input.following);
        assert_eq!(input.pointer, Vec2::new(12.0, 34.0));
    }
}
