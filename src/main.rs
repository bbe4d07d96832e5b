use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::WindowId;

use deskmate::TARGET_UPS;
use deskmate::assets;
use deskmate::bus::{AppEvent, EventBus};
use deskmate::character::Character;
use deskmate::distraction::{
    DistractionManager, LeftRightOpposite, MAX_DISTRACTION_LEVEL, UpDownOpposite,
};
use deskmate::input::{InputState, KeyCode};
use deskmate::settings::Settings;
use deskmate::sprite::{AnimatedSprite, FrameSet, Frames};
use deskmate::window::{DesktopSurface, WindowSurface, companion_window_attributes};

const SETTINGS_FILE: &str = "settings.json";
const CHARACTER_DIR: &str = "assets/characters";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("deskmate=info")),
        )
        .init();

    let settings = Settings::load_or_default(Path::new(SETTINGS_FILE));
    let event_loop = EventLoop::new().context("create event loop")?;
    let mut app = App::new(settings);
    event_loop.run_app(&mut app).context("run event loop")?;
    app.save_settings();
    Ok(())
}

// ── App ─────────────────────────────────────────────────────────────────────

struct App {
    settings: Settings,
    bus: EventBus,
    input: InputState,
    character: Option<Character>,
    distractions: DistractionManager,
    surface: Option<DesktopSurface>,
    last_instant: Option<Instant>,
    accumulator: f32,
    fixed_dt: f32,
}

impl App {
    fn new(settings: Settings) -> Self {
        let mut distractions = DistractionManager::new(SmallRng::from_entropy());
        // Overlay metadata only; the overlays are invisible until a renderer
        // collaborator draws them, but their lifecycle still runs.
        let overlay = AnimatedSprite::new(
            Frames::Uniform(FrameSet { frame_w: 64.0, frame_h: 64.0, frames: 10 }),
            12.0,
            false,
        );
        distractions.register(Box::new(UpDownOpposite { sprite: overlay.clone() }));
        distractions.register(Box::new(LeftRightOpposite { sprite: overlay }));
        distractions.set_level(settings.distraction_level);

        Self {
            settings,
            bus: EventBus::new(),
            input: InputState::new(),
            character: None,
            distractions,
            surface: None,
            last_instant: None,
            accumulator: 0.0,
            fixed_dt: 1.0 / TARGET_UPS as f32,
        }
    }

    fn save_settings(&self) {
        if let Err(err) = self.settings.save(Path::new(SETTINGS_FILE)) {
            warn!(%err, "failed to save settings");
        }
    }

    /// Find the configured character on disk, or fall back to the first
    /// discovered one, or to the placeholder.
    fn load_character_params(&self) -> deskmate::character::CharacterParams {
        let dirs = assets::discover_characters(Path::new(CHARACTER_DIR));
        let mut fallback = None;
        for dir in dirs {
            match assets::load_character(&dir) {
                Ok(params) if params.name == self.settings.character => return params,
                Ok(params) => fallback = fallback.or(Some(params)),
                Err(err) => warn!(dir = %dir.display(), %err, "skipping unreadable character"),
            }
        }
        fallback.unwrap_or_else(|| {
            warn!("no characters found under {CHARACTER_DIR}, using placeholder");
            assets::placeholder_params()
        })
    }

    /// Hotkeys publish bus events; handled once per frame so a single press
    /// never double-fires across fixed-timestep ticks.
    fn poll_hotkeys(&mut self) {
        if self.input.is_key_pressed(KeyCode::KeyI) {
            self.bus.publish(AppEvent::IdleMovementToggle(!self.settings.idle_movement));
        }
        if self.input.is_key_pressed(KeyCode::Equal) {
            self.bus.publish(AppEvent::ScaleChange(self.settings.scale + 0.25));
        }
        if self.input.is_key_pressed(KeyCode::Minus) {
            self.bus.publish(AppEvent::ScaleChange((self.settings.scale - 0.25).max(0.25)));
        }
        const LEVEL_KEYS: [KeyCode; 9] = [
            KeyCode::Digit0,
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
            KeyCode::Digit6,
            KeyCode::Digit7,
            KeyCode::Digit8,
        ];
        for (level, key) in LEVEL_KEYS.iter().enumerate() {
            if self.input.is_key_pressed(*key) {
                self.bus.publish(AppEvent::DistractionLevelSet(level as u32));
            }
        }
    }

    /// Drain the bus and deliver every event before the tick pipeline runs.
    fn deliver_events(&mut self) {
        let (Some(character), Some(surface)) = (self.character.as_mut(), self.surface.as_mut())
        else {
            return;
        };
        for event in self.bus.drain() {
            match event {
                AppEvent::ScaleChange(factor) => self.settings.scale = factor.clamp(0.1, 10.0),
                AppEvent::IdleMovementToggle(enabled) => self.settings.idle_movement = enabled,
                AppEvent::DistractionLevelSet(level) => {
                    if level <= MAX_DISTRACTION_LEVEL {
                        self.settings.distraction_level = level;
                    }
                    self.distractions.set_level(level);
                }
            }
            character.handle_event(&event, surface);
        }
    }

    fn tick(&mut self) {
        self.deliver_events();
        let (Some(character), Some(surface)) = (self.character.as_mut(), self.surface.as_mut())
        else {
            return;
        };

        character.body.input_direction = self.input.movement_direction();
        character.body.run_modifier = self.input.run_modifier();
        character.update(&self.input.pointer(), surface, self.fixed_dt);

        let scale = character.body.scale;
        self.distractions.update(self.fixed_dt, surface.display_size(), scale);
    }
}

// ── winit plumbing ──────────────────────────────────────────────────────────

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let params = self.load_character_params();

        // Size the window for the largest frame up front; rescale events
        // adjust it later.
        let mut probe = Character::new(params, Vec2::ZERO, self.settings.scale, rand::random());
        let size = probe.body.window_size();
        let (w, h) = (size.x.ceil() as u32, size.y.ceil() as u32);

        let window = Arc::new(
            event_loop
                .create_window(companion_window_attributes(w, h))
                .expect("create companion window"),
        );
        let mut surface = DesktopSurface::new(window);

        // Start centered on the bottom edge of the display.
        let display = surface.display_size();
        let start = Vec2::new((display.x - size.x) * 0.5, display.y - size.y);
        surface.set_position(start.x as i32, start.y as i32);
        probe.body.position = start;
        probe.body.idle_movement = self.settings.idle_movement;

        info!(scale = self.settings.scale, "companion started");
        self.character = Some(probe);
        self.surface = Some(surface);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Keep ticking even though nothing is drawn: the simulation drives
        // the window itself.
        if let Some(surface) = self.surface.as_ref() {
            surface.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.save_settings();
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.input.mouse_pos = [position.x as f32, position.y as f32];
            }

            WindowEvent::MouseInput { button, state, .. } => match state {
                ElementState::Pressed => {
                    if self.input.mouse_held.insert(button) {
                        self.input.mouse_pressed.insert(button);
                    }
                }
                ElementState::Released => {
                    self.input.mouse_held.remove(&button);
                    self.input.mouse_released.insert(button);
                }
            },

            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key: PhysicalKey::Code(code), state, .. },
                ..
            } => match state {
                ElementState::Pressed => {
                    if self.input.keys_held.insert(code) {
                        self.input.keys_pressed.insert(code);
                    }
                }
                ElementState::Released => {
                    self.input.keys_held.remove(&code);
                    self.input.keys_released.insert(code);
                }
            },

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let elapsed = match self.last_instant {
                    Some(prev) => now.duration_since(prev).as_secs_f32().min(0.25),
                    None => self.fixed_dt,
                };
                self.last_instant = Some(now);
                self.accumulator += elapsed;

                self.poll_hotkeys();
                while self.accumulator >= self.fixed_dt {
                    self.tick();
                    self.accumulator -= self.fixed_dt;
                }

                self.input.clear_frame_state();
            }

            _ => {}
        }
    }
}
