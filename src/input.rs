use std::collections::HashSet;

use glam::Vec2;
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

// ── Raw input state ─────────────────────────────────────────────────────────

/// Raw hardware state for a single frame, filled from winit events.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,

    /// Pointer position in window-space pixels.
    pub mouse_pos: [f32; 2],
    pub mouse_held: HashSet<MouseButton>,
    pub mouse_pressed: HashSet<MouseButton>,
    pub mouse_released: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the per-frame press/release edges. Call once at the end of each
    /// frame, after the simulation tick has consumed them.
    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }

    pub fn is_mouse_held(&self, button: MouseButton) -> bool { self.mouse_held.contains(&button) }
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool { self.mouse_pressed.contains(&button) }

    /// Snapshot of the left pointer button for the character's drag logic.
    pub fn pointer(&self) -> PointerSnapshot {
        PointerSnapshot {
            position: Vec2::new(self.mouse_pos[0], self.mouse_pos[1]),
            pressed: self.is_mouse_held(MouseButton::Left),
            just_pressed: self.is_mouse_pressed(MouseButton::Left),
        }
    }

    /// Direction requested by the arrow keys, or `None` when no movement key
    /// is held. Opposing keys cancel out.
    pub fn movement_direction(&self) -> Option<Vec2> {
        let mut dir = Vec2::ZERO;
        if self.is_key_held(KeyCode::ArrowUp) { dir.y -= 1.0; }
        if self.is_key_held(KeyCode::ArrowDown) { dir.y += 1.0; }
        if self.is_key_held(KeyCode::ArrowLeft) { dir.x -= 1.0; }
        if self.is_key_held(KeyCode::ArrowRight) { dir.x += 1.0; }
        (dir != Vec2::ZERO).then(|| dir.normalize())
    }

    /// True while either Shift key is held (walk → run modifier).
    pub fn run_modifier(&self) -> bool {
        self.is_key_held(KeyCode::ShiftLeft) || self.is_key_held(KeyCode::ShiftRight)
    }
}

// ── Pointer snapshot ────────────────────────────────────────────────────────

/// The slice of input the character controller consumes each tick.
#[derive(Copy, Clone, Debug, Default)]
pub struct PointerSnapshot {
    /// Window-space pointer position.
    pub position: Vec2,
    /// Left button currently down.
    pub pressed: bool,
    /// Left button went down this frame.
    pub just_pressed: bool,
}
