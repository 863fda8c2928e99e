use std::sync::Arc;
use std::time::Duration;

use glam::DVec2;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::OsError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use super::clock::Clock;
use super::controller::{Button, Controller};
use super::input_adapter::WinitController;
use super::window::{PlatformEvent, WindowBackend, WindowDimensions};
use crate::error::InitError;

/// Pumps allowed for the platform to deliver `resumed` and create the window
const WINDOW_CREATION_PUMPS: usize = 16;

/// Receives winit callbacks while events are pumped
struct PlatformHandler {
    attributes: WindowAttributes,
    window: Option<Arc<Window>>,
    create_error: Option<OsError>,
    input: WinitController,
}

impl ApplicationHandler for PlatformHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.create_error.is_some() {
            return;
        }

        match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => {
                let size = window.inner_size();
                log::info!("Window created: {}x{}", size.width, size.height);
                self.window = Some(Arc::new(window));
            }
            Err(e) => self.create_error = Some(e),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        self.input.process_event(&event);
    }
}

/// `WindowBackend` over a winit event loop that is pumped once per frame
pub struct WinitPlatform {
    event_loop: EventLoop<()>,
    handler: PlatformHandler,
    window: Arc<Window>,
    clock: Clock,
    exited: bool,
}

impl WinitPlatform {
    /// Open a window of `width` x `height` logical pixels
    pub fn create(width: u32, height: u32, title: &str) -> Result<Self, InitError> {
        let mut event_loop = EventLoop::new()?;
        let mut handler = PlatformHandler {
            attributes: Window::default_attributes()
                .with_title(title)
                .with_inner_size(LogicalSize::new(width, height)),
            window: None,
            create_error: None,
            input: WinitController::new(),
        };

        for _ in 0..WINDOW_CREATION_PUMPS {
            if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), &mut handler) {
                log::error!("Event loop exited with code {} during startup", code);
                break;
            }
            if let Some(e) = handler.create_error.take() {
                return Err(e.into());
            }
            if handler.window.is_some() {
                break;
            }
        }

        let window = handler.window.clone().ok_or(InitError::NoWindow)?;

        Ok(Self {
            event_loop,
            handler,
            window,
            clock: Clock::new(),
            exited: false,
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }
}

impl Controller for WinitPlatform {
    fn is_down(&self, button: Button) -> bool {
        self.handler.input.is_down(button)
    }
}

impl WindowBackend for WinitPlatform {
    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        if !self.exited {
            if let PumpStatus::Exit(code) = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.handler) {
                log::debug!("Event loop exited with code {}", code);
                self.exited = true;
                self.handler.input.request_close();
            }
        }
        self.handler.input.take_events()
    }

    fn cursor_position(&self) -> DVec2 {
        self.handler.input.cursor_position()
    }

    fn time(&self) -> f64 {
        self.clock.elapsed()
    }

    fn dimensions(&self) -> WindowDimensions {
        let size = self.window.inner_size();
        WindowDimensions::new(size.width, size.height)
    }

    fn swap_buffers(&mut self) {
        self.window.pre_present_notify();
    }

    fn should_close(&self) -> bool {
        self.exited || self.handler.input.close_requested()
    }

    fn terminate(&mut self) {
        self.window.set_visible(false);
        self.exited = true;
    }
}
