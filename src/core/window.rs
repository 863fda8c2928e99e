use glam::DVec2;

use super::controller::Controller;

/// Window dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDimensions {
    pub width: u32,
    pub height: u32,
}

impl WindowDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, e.g. while the window is minimized
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Notifications gathered by `WindowBackend::poll_events`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// Framebuffer size changed
    Resized(WindowDimensions),
    /// The user asked for the window to close
    CloseRequested,
}

/// Windowing and input backend.
///
/// Key state comes through the `Controller` supertrait. Resize notifications are returned
/// from `poll_events` as values instead of being delivered through a callback.
pub trait WindowBackend: Controller {
    /// Process pending OS events without blocking and return the notifications among them
    fn poll_events(&mut self) -> Vec<PlatformEvent>;

    /// Cursor position in window coordinates
    fn cursor_position(&self) -> DVec2;

    /// Seconds since the backend was created, monotonic
    fn time(&self) -> f64;

    /// Framebuffer size in physical pixels
    fn dimensions(&self) -> WindowDimensions;

    /// Called once per frame right before the render backend presents
    fn swap_buffers(&mut self);

    /// Whether a close has been requested
    fn should_close(&self) -> bool;

    /// Release the window. Nothing else may be called afterwards.
    fn terminate(&mut self);
}
