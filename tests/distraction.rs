/// Distraction scheduler tests with a seeded rng: pattern selection,
/// level-driven intervals, and the two-phase disposal sweep.
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use deskmate::distraction::{
    Distraction, DistractionManager, DistractionPattern, MAX_DISTRACTION_LEVEL, MAX_SECS_BETWEEN,
    MIN_SECS_BETWEEN, base_interval,
};
use deskmate::geometry::Orientation;
use deskmate::sprite::{AnimatedSprite, FrameSet, Frames};

const BOUNDS: Vec2 = Vec2::new(1920.0, 1080.0);
const SCALE: Vec2 = Vec2::ONE;

/// Pattern that spawns nothing; used to watch index selection in isolation.
struct NullPattern;

impl DistractionPattern for NullPattern {
    fn name(&self) -> &'static str {
        "null"
    }
    fn spawn(&self, _bounds: Vec2, _scale: Vec2, _rng: &mut SmallRng) -> Vec<Distraction> {
        Vec::new()
    }
}

/// Pattern that spawns one long-lived overlay per firing.
struct OnePattern;

fn long_sprite() -> AnimatedSprite {
    // 4 frames at 1 fps, non-looping: alive for 4 simulated seconds.
    AnimatedSprite::new(
        Frames::Uniform(FrameSet { frame_w: 32.0, frame_h: 32.0, frames: 4 }),
        1.0,
        false,
    )
}

impl DistractionPattern for OnePattern {
    fn name(&self) -> &'static str {
        "one"
    }
    fn spawn(&self, _bounds: Vec2, scale: Vec2, _rng: &mut SmallRng) -> Vec<Distraction> {
        vec![Distraction::new(Vec2::ZERO, scale, Orientation::Down, long_sprite())]
    }
}

fn manager(seed: u64) -> DistractionManager {
    DistractionManager::new(SmallRng::seed_from_u64(seed))
}

// ── Pattern selection ───────────────────────────────────────────────────────

/// With more than one pattern registered, the scheduler never fires the same
/// index twice in a row.
#[test]
fn never_repeats_pattern_index() {
    let mut m = manager(9);
    for _ in 0..3 {
        m.register(Box::new(NullPattern));
    }
    m.set_level(MAX_DISTRACTION_LEVEL);

    // Big steps so every update crosses the deadline and fires once.
    let mut fired = Vec::new();
    for _ in 0..200 {
        m.update(MAX_SECS_BETWEEN * 2.0, BOUNDS, SCALE);
        fired.push(m.last_pattern().expect("every oversized step should fire"));
    }
    for pair in fired.windows(2) {
        assert_ne!(pair[0], pair[1], "pattern index repeated back to back");
    }
}

// ── Level semantics ─────────────────────────────────────────────────────────

#[test]
fn level_zero_never_spawns() {
    let mut m = manager(1);
    m.register(Box::new(OnePattern));
    for _ in 0..100 {
        m.update(10.0, BOUNDS, SCALE);
    }
    assert!(m.active().is_empty());
    assert_eq!(m.last_pattern(), None);
}

#[test]
fn setting_level_zero_empties_active_set() {
    let mut m = manager(2);
    m.register(Box::new(OnePattern));
    m.set_level(3);
    m.update(0.1, BOUNDS, SCALE);
    assert!(!m.active().is_empty(), "expected an immediate first spawn");

    m.set_level(0);
    m.update(0.1, BOUNDS, SCALE);
    assert!(m.active().is_empty(), "disposal sweep should clear everything");
}

#[test]
fn out_of_range_level_is_rejected() {
    let mut m = manager(3);
    m.register(Box::new(OnePattern));
    m.set_level(MAX_DISTRACTION_LEVEL + 1);
    assert_eq!(m.level(), 0);
    m.update(10.0, BOUNDS, SCALE);
    assert!(m.active().is_empty());
}

/// Raising the level mid-cooldown resets the deadline: the next tick spawns
/// instead of waiting out the old interval.
#[test]
fn raising_level_reschedules_immediately() {
    let mut m = manager(4);
    m.register(Box::new(OnePattern));
    m.set_level(1);
    m.update(0.1, BOUNDS, SCALE); // first spawn, deadline pushed far out
    let after_first = m.active().len();
    assert_eq!(after_first, 1);

    // Mid-cooldown at level 1 nothing fires for a short step.
    m.update(0.1, BOUNDS, SCALE);
    assert_eq!(m.active().len(), after_first);

    m.set_level(3);
    m.update(0.1, BOUNDS, SCALE);
    assert_eq!(m.active().len(), after_first + 1, "raise should fire on the next tick");
}

#[test]
fn lowering_level_keeps_old_deadline() {
    let mut m = manager(5);
    m.register(Box::new(OnePattern));
    m.set_level(5);
    m.update(0.1, BOUNDS, SCALE);
    let count = m.active().len();

    m.set_level(2);
    m.update(0.1, BOUNDS, SCALE);
    assert_eq!(m.active().len(), count, "lowering must not force a spawn");
}

// ── Lifecycle sweep ─────────────────────────────────────────────────────────

/// Overlays mark themselves disposed when their animation finishes and are
/// removed on the following update.
#[test]
fn finished_overlays_are_swept() {
    let mut m = manager(6);
    m.register(Box::new(OnePattern));
    m.set_level(1);
    m.update(0.1, BOUNDS, SCALE);
    assert_eq!(m.active().len(), 1);

    // Sprite lives 4 simulated seconds; run it out.
    m.update(5.0, BOUNDS, SCALE);
    assert!(m.active().is_empty() || m.active()[0].disposed);
    m.update(0.1, BOUNDS, SCALE);
    assert!(m.active().is_empty());
}

// ── Interval interpolation ──────────────────────────────────────────────────

#[test]
fn interval_interpolates_between_bounds() {
    assert_eq!(base_interval(1), MAX_SECS_BETWEEN);
    assert_eq!(base_interval(MAX_DISTRACTION_LEVEL), MIN_SECS_BETWEEN);
    let mid = base_interval(MAX_DISTRACTION_LEVEL / 2);
    assert!(mid < MAX_SECS_BETWEEN && mid > MIN_SECS_BETWEEN);
}
