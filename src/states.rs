use glam::Vec2;
use rand::Rng;

use crate::character::{CharacterBody, SpriteKind};
use crate::fsm::BehaviorState;
use crate::geometry::Orientation;

/// Seconds a wandering character stands still between random walks.
const WANDER_WAIT_SECS: (f32, f32) = (2.0, 6.0);
/// Seconds a random walk lasts before pausing again.
const WANDER_MOVE_SECS: (f32, f32) = (1.0, 3.0);

type Next = Option<Box<dyn BehaviorState<CharacterBody>>>;

/// Shared stimulus check: user movement input trumps whatever the current
/// state was doing. Returns the state to hand off to, if any.
fn input_stimulus(body: &CharacterBody) -> Next {
    body.input_direction?;
    if body.run_modifier {
        Some(Box::new(Run::new(body.run_speed)))
    } else {
        Some(Box::new(Walk::new(body.walk_speed)))
    }
}

// ── Idle ────────────────────────────────────────────────────────────────────

/// Standing still. Leaves only on user input, or hands off to the wander
/// cycle when idle movement is enabled.
pub struct Idle;

impl BehaviorState<CharacterBody> for Idle {
    fn enter(&mut self, body: &mut CharacterBody) {
        body.velocity = Vec2::ZERO;
        body.select_sprite(SpriteKind::Idle);
    }

    fn update(&mut self, body: &mut CharacterBody, _dt: f32) -> Next {
        if let Some(next) = input_stimulus(body) {
            return Some(next);
        }
        if body.idle_movement {
            return Some(Box::new(RandomMovementWait::new(body)));
        }
        None
    }

    fn name(&self) -> &'static str {
        "idle"
    }
}

// ── Walk ────────────────────────────────────────────────────────────────────

/// Moving under user control at walking speed.
pub struct Walk {
    speed: f32,
}

impl Walk {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }
}

impl BehaviorState<CharacterBody> for Walk {
    fn enter(&mut self, body: &mut CharacterBody) {
        body.select_sprite(SpriteKind::Walk);
    }

    fn update(&mut self, body: &mut CharacterBody, _dt: f32) -> Next {
        let Some(dir) = body.input_direction else {
            return Some(Box::new(Idle));
        };
        if body.run_modifier {
            return Some(Box::new(Run::new(body.run_speed)));
        }
        body.velocity = dir * self.speed;
        None
    }

    fn name(&self) -> &'static str {
        "walk"
    }
}

// ── Run ─────────────────────────────────────────────────────────────────────

/// Moving under user control at running speed.
pub struct Run {
    speed: f32,
}

impl Run {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }
}

impl BehaviorState<CharacterBody> for Run {
    fn enter(&mut self, body: &mut CharacterBody) {
        body.select_sprite(SpriteKind::Run);
    }

    fn update(&mut self, body: &mut CharacterBody, _dt: f32) -> Next {
        let Some(dir) = body.input_direction else {
            return Some(Box::new(Idle));
        };
        if !body.run_modifier {
            return Some(Box::new(Walk::new(body.walk_speed)));
        }
        body.velocity = dir * self.speed;
        None
    }

    fn name(&self) -> &'static str {
        "run"
    }
}

// ── RandomMovementWait ──────────────────────────────────────────────────────

/// Pause phase of the wander cycle: hold position for a randomized span,
/// then strike out in a freshly rolled direction.
pub struct RandomMovementWait {
    remaining: f32,
}

impl RandomMovementWait {
    pub fn new(body: &mut CharacterBody) -> Self {
        let (lo, hi) = WANDER_WAIT_SECS;
        Self { remaining: body.rng.gen_range(lo..hi) }
    }
}

impl BehaviorState<CharacterBody> for RandomMovementWait {
    fn enter(&mut self, body: &mut CharacterBody) {
        body.velocity = Vec2::ZERO;
        body.select_sprite(SpriteKind::Idle);
    }

    fn update(&mut self, body: &mut CharacterBody, dt: f32) -> Next {
        if let Some(next) = input_stimulus(body) {
            return Some(next);
        }
        if !body.idle_movement {
            return Some(Box::new(Idle));
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            let dir = Orientation::ALL[body.rng.gen_range(0..4)].unit();
            return Some(Box::new(RandomMovement::new(dir, body)));
        }
        None
    }

    fn name(&self) -> &'static str {
        "random_movement_wait"
    }
}

// ── RandomMovement ──────────────────────────────────────────────────────────

/// Move phase of the wander cycle: drift in one direction until the timer
/// runs out or the screen-edge clamp kicks in.
pub struct RandomMovement {
    direction: Vec2,
    remaining: f32,
}

impl RandomMovement {
    pub fn new(direction: Vec2, body: &mut CharacterBody) -> Self {
        let (lo, hi) = WANDER_MOVE_SECS;
        Self { direction, remaining: body.rng.gen_range(lo..hi) }
    }
}

impl BehaviorState<CharacterBody> for RandomMovement {
    fn enter(&mut self, body: &mut CharacterBody) {
        body.select_sprite(SpriteKind::Walk);
    }

    fn update(&mut self, body: &mut CharacterBody, dt: f32) -> Next {
        if let Some(next) = input_stimulus(body) {
            return Some(next);
        }
        if !body.idle_movement {
            return Some(Box::new(Idle));
        }
        self.remaining -= dt;
        // `clamped` is set by the previous tick's boundary step: walking
        // into a screen edge ends the stroll early.
        if self.remaining <= 0.0 || body.clamped {
            return Some(Box::new(RandomMovementWait::new(body)));
        }
        body.velocity = self.direction * body.wander_speed;
        None
    }

    fn name(&self) -> &'static str {
        "random_movement"
    }
}
