// =============================================================================
// GEOMETRY.RS — Orientation and pixel-space helpers
//
// Everything here is pure so the per-tick pipeline can be tested without a
// window: orientation resolution from velocity, whole-pixel rounding, and
// the screen-edge clamp used by the character controller.
// =============================================================================

use glam::Vec2;

/// The four facing directions a sprite sheet can carry frames for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Up,
    Down,
    Left,
    Right,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Up,
        Orientation::Down,
        Orientation::Left,
        Orientation::Right,
    ];

    /// Unit vector pointing along this orientation, screen coordinates
    /// (y grows downward, so `Up` is `(0, -1)`).
    pub fn unit(self) -> Vec2 {
        match self {
            Orientation::Up => Vec2::new(0.0, -1.0),
            Orientation::Down => Vec2::new(0.0, 1.0),
            Orientation::Left => Vec2::new(-1.0, 0.0),
            Orientation::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Resolve a facing direction from a velocity vector.
///
/// The vertical axis wins ties: any `|vy| > epsilon` resolves to Up/Down
/// regardless of the horizontal component. A velocity inside the epsilon
/// box on both axes returns `previous` unchanged — standing still never
/// turns the character around.
pub fn orientation_from_velocity(previous: Orientation, v: Vec2, epsilon: f32) -> Orientation {
    if v.y < -epsilon {
        Orientation::Up
    } else if v.y > epsilon {
        Orientation::Down
    } else if v.x < -epsilon {
        Orientation::Left
    } else if v.x > epsilon {
        Orientation::Right
    } else {
        previous
    }
}

/// Round a velocity to whole pixels, component-wise. OS windows sit on
/// integer coordinates; integrating fractional velocity directly makes the
/// window shimmer as it accumulates sub-pixel error.
pub fn round_to_pixels(v: Vec2) -> Vec2 {
    Vec2::new(v.x.round(), v.y.round())
}

/// Clamp `position` so the character's pivot stays on screen.
///
/// `pivot` is the half scaled frame size. Each axis is clamped independently
/// into `[-window + pivot, screen - pivot]`: the window may hang off an edge
/// as long as the pivot point remains visible.
pub fn clamp_to_screen(position: Vec2, pivot: Vec2, window: Vec2, screen: Vec2) -> Vec2 {
    Vec2::new(
        position.x.clamp(-window.x + pivot.x, screen.x - pivot.x),
        position.y.clamp(-window.y + pivot.y, screen.y - pivot.y),
    )
}
