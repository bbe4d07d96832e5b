use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::ORIENTATION_EPSILON;
use crate::bus::AppEvent;
use crate::fsm::StateMachine;
use crate::geometry::{Orientation, clamp_to_screen, orientation_from_velocity, round_to_pixels};
use crate::input::PointerSnapshot;
use crate::sprite::AnimatedSprite;
use crate::states::Idle;
use crate::window::WindowSurface;

// ── Sprite selection ────────────────────────────────────────────────────────

/// Which of the character's three animation sets is showing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Idle,
    Walk,
    Run,
}

// ── CharacterBody ───────────────────────────────────────────────────────────

/// Everything the behavior states mutate: motion, sprites, toggles, and the
/// character's own random source. Kept separate from [`Character`] so the
/// state machine can borrow the body while living next to it.
pub struct CharacterBody {
    /// Window top-left corner in screen pixels.
    pub position: Vec2,
    /// Pixels per tick, written by the active state.
    pub velocity: Vec2,
    pub scale: Vec2,
    pub orientation: Orientation,

    pub idle_sprite: AnimatedSprite,
    pub walk_sprite: AnimatedSprite,
    pub run_sprite: AnimatedSprite,
    current: SpriteKind,

    pub dragging: bool,
    pub auto_orient: bool,
    pub idle_movement: bool,

    /// User movement request for this tick, fed by the host from keyboard
    /// state. `None` = no input.
    pub input_direction: Option<Vec2>,
    pub run_modifier: bool,
    /// True when the boundary clamp corrected the position last tick.
    pub clamped: bool,

    pub walk_speed: f32,
    pub run_speed: f32,
    pub wander_speed: f32,

    pub rng: SmallRng,
}

impl CharacterBody {
    /// Switch the visible animation set. Orientation carries over; the clock
    /// of the previous set keeps its phase (switching back mid-walk does not
    /// restart the strip).
    pub fn select_sprite(&mut self, kind: SpriteKind) {
        if self.current == kind {
            return;
        }
        self.current = kind;
        let o = self.orientation;
        self.current_sprite_mut().set_orientation(o);
    }

    pub fn current_kind(&self) -> SpriteKind {
        self.current
    }

    pub fn current_sprite(&self) -> &AnimatedSprite {
        match self.current {
            SpriteKind::Idle => &self.idle_sprite,
            SpriteKind::Walk => &self.walk_sprite,
            SpriteKind::Run => &self.run_sprite,
        }
    }

    pub fn current_sprite_mut(&mut self) -> &mut AnimatedSprite {
        match self.current {
            SpriteKind::Idle => &mut self.idle_sprite,
            SpriteKind::Walk => &mut self.walk_sprite,
            SpriteKind::Run => &mut self.run_sprite,
        }
    }

    /// Window size needed to fit any frame of any sprite set at the current
    /// scale. Oriented sheets are measured across all four facings.
    pub fn window_size(&self) -> Vec2 {
        let max = self
            .idle_sprite
            .max_frame_size()
            .max(self.walk_sprite.max_frame_size())
            .max(self.run_sprite.max_frame_size());
        max * self.scale
    }
}

// ── Drag helper ─────────────────────────────────────────────────────────────

/// New window position while dragging: the pointer's screen location minus
/// half the window, so the window center follows the cursor.
pub fn drag_position(position: Vec2, pointer_window: Vec2, window_size: Vec2) -> Vec2 {
    position + pointer_window - window_size * 0.5
}

// ── Character ───────────────────────────────────────────────────────────────

/// A character and its state machine, plus the window-sync bookkeeping.
pub struct Character {
    pub body: CharacterBody,
    machine: StateMachine<CharacterBody>,
    last_pushed: Option<(i32, i32)>,
}

/// Constant parameters a character type supplies.
pub struct CharacterParams {
    pub name: String,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub wander_speed: f32,
    pub idle_sprite: AnimatedSprite,
    pub walk_sprite: AnimatedSprite,
    pub run_sprite: AnimatedSprite,
}

impl Character {
    pub fn new(params: CharacterParams, position: Vec2, scale: f32, seed: u64) -> Self {
        let mut body = CharacterBody {
            position,
            velocity: Vec2::ZERO,
            scale: Vec2::splat(scale),
            orientation: Orientation::Down,
            idle_sprite: params.idle_sprite,
            walk_sprite: params.walk_sprite,
            run_sprite: params.run_sprite,
            current: SpriteKind::Idle,
            dragging: false,
            auto_orient: true,
            idle_movement: true,
            input_direction: None,
            run_modifier: false,
            clamped: false,
            walk_speed: params.walk_speed,
            run_speed: params.run_speed,
            wander_speed: params.wander_speed,
            rng: SmallRng::seed_from_u64(seed),
        };
        let machine = StateMachine::new(Box::new(Idle), &mut body);
        Self { body, machine, last_pushed: None }
    }

    pub fn state_name(&self) -> &'static str {
        self.machine.current_name()
    }

    /// One simulation tick. The step order is load-bearing: drag must land
    /// after integration and before the clamp, so a drag that drops the
    /// character off-screen is corrected the same tick.
    pub fn update(&mut self, pointer: &PointerSnapshot, surface: &mut dyn WindowSurface, dt: f32) {
        let body = &mut self.body;

        // 1. Behavior state decides velocity and sprite.
        if let Some(t) = self.machine.update(body, dt) {
            debug!(from = t.from, to = t.to, "state transition");
        }

        // 2. Face where we are moving. Zero velocity keeps the old facing.
        if body.auto_orient {
            body.orientation =
                orientation_from_velocity(body.orientation, body.velocity, ORIENTATION_EPSILON);
        }

        // 3. Push the facing into the sprite when it has directional strips.
        if body.current_sprite().is_oriented() {
            let o = body.orientation;
            body.current_sprite_mut().set_orientation(o);
        }

        // 4. Integrate on whole pixels.
        let pre_integration = body.position;
        body.position += round_to_pixels(body.velocity);

        // 5. Drag override: replaces the integrated position entirely, so
        // it is computed from where the window actually is this tick.
        let window = surface.viewport_size();
        if pointer.just_pressed
            && pointer.position.x >= 0.0
            && pointer.position.y >= 0.0
            && pointer.position.x < window.x
            && pointer.position.y < window.y
        {
            body.dragging = true;
            surface.grab_focus();
        }
        if body.dragging {
            if pointer.pressed {
                body.position = drag_position(pre_integration, pointer.position, window);
            } else {
                body.dragging = false;
            }
        }

        // 6. Keep the pivot on screen.
        let pivot = body.current_sprite().frame_size() * body.scale * 0.5;
        let clamped = clamp_to_screen(body.position, pivot, window, surface.display_size());
        body.clamped = clamped != body.position;
        body.position = clamped;

        // 7. Only touch the OS window when the position actually moved.
        let pushed = (body.position.x as i32, body.position.y as i32);
        if self.last_pushed != Some(pushed) {
            surface.set_position(pushed.0, pushed.1);
            self.last_pushed = Some(pushed);
        }

        // 8. Animate.
        body.current_sprite_mut().update(dt);
    }

    /// Apply a bus notification. Called between ticks, never mid-pipeline.
    pub fn handle_event(&mut self, event: &AppEvent, surface: &mut dyn WindowSurface) {
        match *event {
            AppEvent::ScaleChange(factor) => self.rescale(factor, surface),
            AppEvent::IdleMovementToggle(enabled) => {
                info!(enabled, "idle movement toggled");
                self.body.idle_movement = enabled;
            }
            AppEvent::DistractionLevelSet(_) => {}
        }
    }

    /// Recompute scale and window size, shifting the position by half the
    /// size delta so the character's apparent center stays put.
    fn rescale(&mut self, factor: f32, surface: &mut dyn WindowSurface) {
        let factor = factor.clamp(0.1, 10.0);
        let old_size = self.body.window_size();
        self.body.scale = Vec2::splat(factor);
        let new_size = self.body.window_size();
        self.body.position += (old_size - new_size) * 0.5;
        surface.set_size(new_size.x.ceil() as u32, new_size.y.ceil() as u32);
        info!(factor, "character rescaled");
    }
}
