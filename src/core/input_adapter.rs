use std::collections::HashSet;

use glam::DVec2;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller};
use super::window::{PlatformEvent, WindowDimensions};

/// Adapter that bridges Winit events to the Controller trait
#[derive(Debug, Clone)]
pub struct WinitController {
    /// Currently pressed buttons
    pressed_keys: HashSet<Button>,
    /// Last raw cursor position reported by the window
    last_raw_cursor: Option<DVec2>,
    /// Sum of all observed cursor motion
    cursor: DVec2,
    /// Notifications not yet handed to the render loop
    pending: Vec<PlatformEvent>,
    close_requested: bool,
}

impl WinitController {
    /// Create a new WinitController with no pressed keys
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            last_raw_cursor: None,
            cursor: DVec2::ZERO,
            pending: Vec::new(),
            close_requested: false,
        }
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        self.set_button(button, event.state);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor(DVec2::new(position.x, position.y));
            }
            WindowEvent::CursorLeft { .. } => self.leave_window(),
            WindowEvent::Resized(size) => {
                self.pending
                    .push(PlatformEvent::Resized(WindowDimensions::new(size.width, size.height)));
            }
            WindowEvent::CloseRequested => self.request_close(),
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    /// Track a raw cursor position. The first position after the cursor enters the
    /// window only re-anchors, so it never produces motion.
    pub fn move_cursor(&mut self, raw: DVec2) {
        if let Some(last) = self.last_raw_cursor {
            self.cursor += raw - last;
        }
        self.last_raw_cursor = Some(raw);
    }

    /// Forget the raw anchor so re-entering the window doesn't jump
    pub fn leave_window(&mut self) {
        self.last_raw_cursor = None;
    }

    /// Update key state. Pressing Escape also requests close.
    pub fn set_button(&mut self, button: Button, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.pressed_keys.insert(button);
                if button == Button::Escape {
                    self.request_close();
                }
            }
            ElementState::Released => {
                self.pressed_keys.remove(&button);
            }
        }
    }

    pub fn request_close(&mut self) {
        if !self.close_requested {
            self.close_requested = true;
            self.pending.push(PlatformEvent::CloseRequested);
        }
    }

    /// Drop key state, e.g. when focus is lost and releases would go unseen
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
    }

    /// Take the notifications gathered since the last call
    pub fn take_events(&mut self) -> Vec<PlatformEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Accumulated cursor position
    pub fn cursor_position(&self) -> DVec2 {
        self.cursor
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Map Winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::KeyW),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyD => Some(Button::KeyD),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }
}

impl Default for WinitController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Winit key events carry platform-specific fields that can't be built here, so these
    // tests drive the adapter through its helper methods.

    #[test]
    fn test_new_controller_empty() {
        let controller = WinitController::new();
        assert!(!controller.is_down(Button::KeyW));
        assert_eq!(controller.cursor_position(), DVec2::ZERO);
        assert!(!controller.close_requested());
    }

    #[test]
    fn test_press_and_release() {
        let mut controller = WinitController::new();
        controller.set_button(Button::KeyW, ElementState::Pressed);
        controller.set_button(Button::KeyW, ElementState::Pressed);
        controller.set_button(Button::KeyA, ElementState::Pressed);

        assert!(controller.is_down(Button::KeyW));
        assert!(controller.is_down(Button::KeyA));

        controller.set_button(Button::KeyW, ElementState::Released);
        assert!(!controller.is_down(Button::KeyW));
        assert!(controller.is_down(Button::KeyA));
        assert!(!controller.close_requested(), "movement keys never close");
    }

    #[test]
    fn test_first_cursor_position_does_not_move() {
        let mut controller = WinitController::new();
        controller.move_cursor(DVec2::new(320.0, 240.0));
        assert_eq!(controller.cursor_position(), DVec2::ZERO);

        controller.move_cursor(DVec2::new(330.0, 235.0));
        assert_eq!(controller.cursor_position(), DVec2::new(10.0, -5.0));
    }

    #[test]
    fn test_cursor_reentry_reanchors() {
        let mut controller = WinitController::new();
        controller.move_cursor(DVec2::new(0.0, 0.0));
        controller.move_cursor(DVec2::new(5.0, 0.0));
        controller.leave_window();
        controller.move_cursor(DVec2::new(600.0, 400.0));

        assert_eq!(controller.cursor_position(), DVec2::new(5.0, 0.0));
    }

    #[test]
    fn test_resize_becomes_pending_event() {
        let mut controller = WinitController::new();
        controller.process_event(&WindowEvent::Resized(winit::dpi::PhysicalSize::new(800, 600)));

        assert_eq!(
            controller.take_events(),
            vec![PlatformEvent::Resized(WindowDimensions::new(800, 600))]
        );
        assert!(controller.take_events().is_empty());
    }

    #[test]
    fn test_close_reported_once() {
        let mut controller = WinitController::new();
        controller.process_event(&WindowEvent::CloseRequested);
        controller.request_close();

        assert!(controller.close_requested());
        assert_eq!(controller.take_events(), vec![PlatformEvent::CloseRequested]);
    }

    #[test]
    fn test_escape_press_requests_close() {
        let mut controller = WinitController::new();
        controller.set_button(Button::Escape, ElementState::Released);
        assert!(!controller.close_requested(), "release alone must not close");

        controller.set_button(Button::Escape, ElementState::Pressed);
        controller.set_button(Button::Escape, ElementState::Pressed);

        assert!(controller.close_requested());
        assert_eq!(controller.take_events(), vec![PlatformEvent::CloseRequested]);
    }

    #[test]
    fn test_focus_loss_releases_keys() {
        let mut controller = WinitController::new();
        controller.set_button(Button::KeyS, ElementState::Pressed);
        controller.process_event(&WindowEvent::Focused(false));

        assert!(!controller.is_down(Button::KeyS));
    }
}
