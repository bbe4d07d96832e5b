use std::sync::Arc;

use glam::Vec2;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::window::{Window, WindowAttributes, WindowLevel};

// ── WindowSurface ───────────────────────────────────────────────────────────

/// The slice of window control the simulation needs. The character treats
/// the sizes reported here as authoritative for boundary clamping; tests
/// substitute a recording stub.
pub trait WindowSurface {
    /// Move the OS window so its top-left corner sits at `(x, y)` in screen
    /// pixels.
    fn set_position(&mut self, x: i32, y: i32);

    /// Resize the window's client area.
    fn set_size(&mut self, width: u32, height: u32);

    /// Current client-area size in pixels.
    fn viewport_size(&self) -> Vec2;

    /// Size of the display the window currently sits on.
    fn display_size(&self) -> Vec2;

    /// Bring the window to the user's attention after a drag grab.
    fn grab_focus(&mut self) {}
}

// ── Winit adapter ───────────────────────────────────────────────────────────

/// Window attributes for a desktop companion: borderless, transparent,
/// always on top, not resizable by the user.
pub fn companion_window_attributes(width: u32, height: u32) -> WindowAttributes {
    Window::default_attributes()
        .with_title("deskmate")
        .with_inner_size(LogicalSize::new(width, height))
        .with_decorations(false)
        .with_transparent(true)
        .with_resizable(false)
        .with_window_level(WindowLevel::AlwaysOnTop)
}

/// [`WindowSurface`] backed by a real winit window.
pub struct DesktopSurface {
    window: Arc<Window>,
    /// Fallback display size when no monitor handle is available
    /// (some Wayland compositors).
    fallback_display: Vec2,
}

impl DesktopSurface {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window, fallback_display: Vec2::new(1920.0, 1080.0) }
    }

    /// Ask winit for another frame; the host loop ticks from RedrawRequested.
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

impl WindowSurface for DesktopSurface {
    fn set_position(&mut self, x: i32, y: i32) {
        self.window.set_outer_position(PhysicalPosition::new(x, y));
    }

    fn set_size(&mut self, width: u32, height: u32) {
        // `request_inner_size` may apply asynchronously; the next
        // `viewport_size` query reflects whatever the OS settled on.
        let _ = self.window.request_inner_size(PhysicalSize::new(width, height));
    }

    fn viewport_size(&self) -> Vec2 {
        let size = self.window.inner_size();
        Vec2::new(size.width as f32, size.height as f32)
    }

    fn display_size(&self) -> Vec2 {
        match self.window.current_monitor() {
            Some(monitor) => {
                let s = monitor.size();
                Vec2::new(s.width as f32, s.height as f32)
            }
            None => self.fallback_display,
        }
    }

    fn grab_focus(&mut self) {
        self.window.focus_window();
    }
}
