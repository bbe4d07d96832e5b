/// Per-tick pipeline tests: integration, orientation, drag override,
/// boundary clamp, and window-sync dedup, run against a recording surface.
use glam::Vec2;

use deskmate::character::{Character, CharacterParams, SpriteKind, drag_position};
use deskmate::input::PointerSnapshot;
use deskmate::sprite::{AnimatedSprite, FrameSet, Frames};
use deskmate::window::WindowSurface;

// ── Recording surface ───────────────────────────────────────────────────────

struct TestSurface {
    viewport: Vec2,
    display: Vec2,
    positions: Vec<(i32, i32)>,
    sizes: Vec<(u32, u32)>,
}

impl TestSurface {
    fn new(viewport: Vec2, display: Vec2) -> Self {
        Self { viewport, display, positions: Vec::new(), sizes: Vec::new() }
    }
}

impl WindowSurface for TestSurface {
    fn set_position(&mut self, x: i32, y: i32) {
        self.positions.push((x, y));
    }
    fn set_size(&mut self, width: u32, height: u32) {
        self.sizes.push((width, height));
        self.viewport = Vec2::new(width as f32, height as f32);
    }
    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }
    fn display_size(&self) -> Vec2 {
        self.display
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────────

const DT: f32 = 1.0 / 60.0;

fn strip() -> AnimatedSprite {
    AnimatedSprite::new(
        Frames::Uniform(FrameSet { frame_w: 50.0, frame_h: 50.0, frames: 4 }),
        8.0,
        true,
    )
}

fn character_at(position: Vec2) -> Character {
    let params = CharacterParams {
        name: "test".into(),
        walk_speed: 2.0,
        run_speed: 5.0,
        wander_speed: 1.0,
        idle_sprite: strip(),
        walk_sprite: strip(),
        run_sprite: strip(),
    };
    let mut c = Character::new(params, position, 1.0, 7);
    // Keep the wander cycle out of pipeline tests.
    c.body.idle_movement = false;
    c
}

fn surface() -> TestSurface {
    TestSurface::new(Vec2::new(50.0, 50.0), Vec2::new(1920.0, 1080.0))
}

fn no_pointer() -> PointerSnapshot {
    PointerSnapshot::default()
}

// ── Integration + orientation ───────────────────────────────────────────────

/// Character at (100,100) with velocity (0,-5) ends the tick at (100,95)
/// facing Up.
#[test]
fn integrates_velocity_and_faces_up() {
    let mut c = character_at(Vec2::new(100.0, 100.0));
    let mut s = surface();
    c.body.velocity = Vec2::new(0.0, -5.0);

    c.update(&no_pointer(), &mut s, DT);

    assert_eq!(c.body.position, Vec2::new(100.0, 95.0));
    assert_eq!(c.body.orientation, deskmate::geometry::Orientation::Up);
}

#[test]
fn zero_velocity_does_not_change_facing() {
    let mut c = character_at(Vec2::new(100.0, 100.0));
    let mut s = surface();
    c.body.velocity = Vec2::new(3.0, 0.0);
    c.update(&no_pointer(), &mut s, DT);
    assert_eq!(c.body.orientation, deskmate::geometry::Orientation::Right);

    c.body.velocity = Vec2::ZERO;
    c.update(&no_pointer(), &mut s, DT);
    assert_eq!(c.body.orientation, deskmate::geometry::Orientation::Right);
}

// ── Boundary clamp ──────────────────────────────────────────────────────────

/// Window 50×50 on a 1920×1080 display, position (-60,10): X is pulled back
/// to `-window + pivot` where pivot is half the scaled frame size.
#[test]
fn clamp_corrects_offscreen_x() {
    let mut c = character_at(Vec2::new(-60.0, 10.0));
    let mut s = surface();

    c.update(&no_pointer(), &mut s, DT);

    let pivot_x = 50.0 * 0.5;
    assert_eq!(c.body.position.x, -50.0 + pivot_x);
    assert_eq!(c.body.position.y, 10.0);
    assert!(c.body.clamped, "clamp event flag should be set");
}

#[test]
fn clamp_is_noop_in_bounds() {
    let mut c = character_at(Vec2::new(300.0, 300.0));
    let mut s = surface();
    c.update(&no_pointer(), &mut s, DT);
    assert_eq!(c.body.position, Vec2::new(300.0, 300.0));
    assert!(!c.body.clamped);
}

// ── Drag override ───────────────────────────────────────────────────────────

/// While dragging, the position comes from the pointer alone; the velocity
/// integrated the same tick never shows up.
#[test]
fn drag_overrides_velocity_motion() {
    let mut c = character_at(Vec2::new(100.0, 100.0));
    let mut s = surface();
    c.body.velocity = Vec2::new(5.0, 0.0);

    let pointer = PointerSnapshot {
        position: Vec2::new(10.0, 10.0),
        pressed: true,
        just_pressed: true,
    };
    c.update(&pointer, &mut s, DT);

    let expected = drag_position(Vec2::new(100.0, 100.0), pointer.position, s.viewport);
    assert_eq!(c.body.position, expected);
    assert!(c.body.dragging);
}

#[test]
fn drag_ends_on_release() {
    let mut c = character_at(Vec2::new(100.0, 100.0));
    let mut s = surface();

    let grab = PointerSnapshot {
        position: Vec2::new(25.0, 25.0),
        pressed: true,
        just_pressed: true,
    };
    c.update(&grab, &mut s, DT);
    assert!(c.body.dragging);

    let release = PointerSnapshot { position: Vec2::new(25.0, 25.0), ..Default::default() };
    c.update(&release, &mut s, DT);
    assert!(!c.body.dragging);
}

/// A drag that drops the character off-screen is corrected by the clamp in
/// the same tick (drag runs before clamp).
#[test]
fn drag_offscreen_is_clamped_same_tick() {
    let mut c = character_at(Vec2::new(-20.0, -20.0));
    let mut s = surface();

    let pointer = PointerSnapshot {
        position: Vec2::new(2.0, 2.0),
        pressed: true,
        just_pressed: true,
    };
    // Drag target is (-43,-43), past the -25 floor on both axes.
    c.update(&pointer, &mut s, DT);

    assert_eq!(c.body.position, Vec2::new(-25.0, -25.0));
    assert!(c.body.clamped);
}

#[test]
fn pointer_press_outside_viewport_does_not_grab() {
    let mut c = character_at(Vec2::new(100.0, 100.0));
    let mut s = surface();
    let pointer = PointerSnapshot {
        position: Vec2::new(120.0, 10.0), // outside the 50×50 window
        pressed: true,
        just_pressed: true,
    };
    c.update(&pointer, &mut s, DT);
    assert!(!c.body.dragging);
}

// ── Window sync ─────────────────────────────────────────────────────────────

#[test]
fn window_position_pushed_only_on_change() {
    let mut c = character_at(Vec2::new(200.0, 200.0));
    let mut s = surface();

    c.update(&no_pointer(), &mut s, DT);
    c.update(&no_pointer(), &mut s, DT);
    c.update(&no_pointer(), &mut s, DT);

    assert_eq!(s.positions, vec![(200, 200)], "stationary character moves the window once");
}

// ── Scale change ────────────────────────────────────────────────────────────

#[test]
fn rescale_resizes_window_and_preserves_center() {
    let mut c = character_at(Vec2::new(100.0, 100.0));
    let mut s = surface();
    let old_center = c.body.position + c.body.window_size() * 0.5;

    c.handle_event(&deskmate::bus::AppEvent::ScaleChange(2.0), &mut s);

    assert_eq!(s.sizes, vec![(100, 100)]);
    let new_center = c.body.position + c.body.window_size() * 0.5;
    assert_eq!(old_center, new_center);
}

#[test]
fn idle_movement_toggle_event_flips_flag() {
    let mut c = character_at(Vec2::new(100.0, 100.0));
    let mut s = surface();
    assert!(!c.body.idle_movement);
    c.handle_event(&deskmate::bus::AppEvent::IdleMovementToggle(true), &mut s);
    assert!(c.body.idle_movement);
}

// ── Sprite selection ────────────────────────────────────────────────────────

#[test]
fn starts_on_idle_sprite() {
    let c = character_at(Vec2::new(0.0, 0.0));
    assert_eq!(c.body.current_kind(), SpriteKind::Idle);
    assert_eq!(c.state_name(), "idle");
}
