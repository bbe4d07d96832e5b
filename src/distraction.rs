use glam::Vec2;
use rand::Rng;
use rand::rngs::SmallRng;
use tracing::{debug, warn};

use crate::geometry::Orientation;
use crate::sprite::AnimatedSprite;

/// Distraction level is an integer in `0..=MAX_DISTRACTION_LEVEL`;
/// 0 means off.
pub const MAX_DISTRACTION_LEVEL: u32 = 8;

/// Mean seconds between spawns at level 1.
pub const MAX_SECS_BETWEEN: f32 = 45.0;
/// Mean seconds between spawns at the maximum level.
pub const MIN_SECS_BETWEEN: f32 = 8.0;

// ── Distraction entity ──────────────────────────────────────────────────────

/// One transient overlay animation. Lives until its non-looping sprite
/// finishes, then is marked disposed and swept on a later update.
pub struct Distraction {
    pub position: Vec2,
    pub scale: Vec2,
    pub orientation: Orientation,
    pub sprite: AnimatedSprite,
    pub disposed: bool,
}

impl Distraction {
    pub fn new(position: Vec2, scale: Vec2, orientation: Orientation, sprite: AnimatedSprite) -> Self {
        Self { position, scale, orientation, sprite, disposed: false }
    }

    pub fn update(&mut self, dt: f32) {
        self.sprite.update(dt);
        if self.sprite.finished() {
            self.disposed = true;
        }
    }
}

// ── Patterns ────────────────────────────────────────────────────────────────

/// Stateless spawn logic: given the target bounds and scale, produce the
/// distractions for one firing.
pub trait DistractionPattern {
    fn name(&self) -> &'static str;
    fn spawn(&self, bounds: Vec2, scale: Vec2, rng: &mut SmallRng) -> Vec<Distraction>;
}

/// A pair of overlays on the top and bottom edges, facing each other.
pub struct UpDownOpposite {
    pub sprite: AnimatedSprite,
}

impl DistractionPattern for UpDownOpposite {
    fn name(&self) -> &'static str {
        "up_down_opposite"
    }

    fn spawn(&self, bounds: Vec2, scale: Vec2, rng: &mut SmallRng) -> Vec<Distraction> {
        let size = self.sprite.frame_size() * scale;
        let x = rng.gen_range(0.0..(bounds.x - size.x).max(1.0));
        vec![
            Distraction::new(Vec2::new(x, 0.0), scale, Orientation::Down, self.sprite.clone()),
            Distraction::new(
                Vec2::new(x, bounds.y - size.y),
                scale,
                Orientation::Up,
                self.sprite.clone(),
            ),
        ]
    }
}

/// A pair of overlays on the left and right edges, facing each other.
pub struct LeftRightOpposite {
    pub sprite: AnimatedSprite,
}

impl DistractionPattern for LeftRightOpposite {
    fn name(&self) -> &'static str {
        "left_right_opposite"
    }

    fn spawn(&self, bounds: Vec2, scale: Vec2, rng: &mut SmallRng) -> Vec<Distraction> {
        let size = self.sprite.frame_size() * scale;
        let y = rng.gen_range(0.0..(bounds.y - size.y).max(1.0));
        vec![
            Distraction::new(Vec2::new(0.0, y), scale, Orientation::Right, self.sprite.clone()),
            Distraction::new(
                Vec2::new(bounds.x - size.x, y),
                scale,
                Orientation::Left,
                self.sprite.clone(),
            ),
        ]
    }
}

// ── Scheduling helpers ──────────────────────────────────────────────────────

/// Base seconds between spawns for a level in `1..=MAX_DISTRACTION_LEVEL`:
/// linear from `MAX_SECS_BETWEEN` at level 1 down to `MIN_SECS_BETWEEN` at
/// the top.
pub fn base_interval(level: u32) -> f32 {
    let t = (level.saturating_sub(1)) as f32 / (MAX_DISTRACTION_LEVEL - 1) as f32;
    MAX_SECS_BETWEEN + (MIN_SECS_BETWEEN - MAX_SECS_BETWEEN) * t.clamp(0.0, 1.0)
}

/// Uniform pattern pick that never lands on `exclude` while more than one
/// pattern is registered.
fn pick_index(rng: &mut SmallRng, len: usize, exclude: Option<usize>) -> usize {
    match exclude {
        Some(prev) if len > 1 => {
            let mut idx = rng.gen_range(0..len - 1);
            if idx >= prev {
                idx += 1;
            }
            idx
        }
        _ => rng.gen_range(0..len),
    }
}

// ── DistractionManager ──────────────────────────────────────────────────────

/// Spawns and retires ambient overlays on a jittered, level-driven schedule.
pub struct DistractionManager {
    patterns: Vec<Box<dyn DistractionPattern>>,
    active: Vec<Distraction>,
    level: u32,
    /// Accumulated simulation seconds; deadlines compare against this,
    /// not wall-clock time.
    clock: f32,
    next_spawn_at: f32,
    last_pattern: Option<usize>,
    rng: SmallRng,
}

impl DistractionManager {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            patterns: Vec::new(),
            active: Vec::new(),
            level: 0,
            clock: 0.0,
            next_spawn_at: 0.0,
            last_pattern: None,
            rng,
        }
    }

    pub fn register(&mut self, pattern: Box<dyn DistractionPattern>) {
        self.patterns.push(pattern);
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn active(&self) -> &[Distraction] {
        &self.active
    }

    /// Index of the most recently fired pattern.
    pub fn last_pattern(&self) -> Option<usize> {
        self.last_pattern
    }

    /// Change the distraction level. Out-of-range values are rejected.
    /// Level 0 schedules every active distraction for removal; raising the
    /// level resets the spawn deadline so the change feels immediate instead
    /// of waiting out the old interval.
    pub fn set_level(&mut self, level: u32) {
        if level > MAX_DISTRACTION_LEVEL {
            warn!(level, max = MAX_DISTRACTION_LEVEL, "distraction level out of range, ignored");
            return;
        }
        if level == 0 {
            for d in &mut self.active {
                d.disposed = true;
            }
        } else if level > self.level {
            self.next_spawn_at = self.clock;
        }
        self.level = level;
    }

    /// One tick: maybe spawn, sweep the disposed, update the survivors.
    pub fn update(&mut self, dt: f32, bounds: Vec2, scale: Vec2) {
        self.clock += dt;

        if self.level > 0 && !self.patterns.is_empty() && self.clock >= self.next_spawn_at {
            let idx = pick_index(&mut self.rng, self.patterns.len(), self.last_pattern);
            let spawned = self.patterns[idx].spawn(bounds, scale, &mut self.rng);
            debug!(pattern = self.patterns[idx].name(), count = spawned.len(), "distraction spawned");
            self.active.extend(spawned);
            self.last_pattern = Some(idx);

            let jitter = self.rng.gen_range(0.8..1.2);
            self.next_spawn_at = self.clock + base_interval(self.level) * jitter;
        }

        // Two-phase lifecycle: updates below only mark `disposed`; removal
        // happens here, never during iteration.
        self.active.retain(|d| !d.disposed);

        for d in &mut self.active {
            d.update(dt);
        }
    }
}
