use crate::camera::{Camera, CameraSettings, MovementState};
use crate::core::{PlatformEvent, RenderBackend, WindowBackend};
use crate::frame::{FrameStats, FrameTiming};
use crate::program::ProgramManager;
use crate::shader::{FULLSCREEN_QUAD, VERTEX_SOURCE};

/// Lifecycle of the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Initializing,
    Running,
    Terminating,
}

/// Drives one frame per iteration: input, camera, uniforms, draw, present.
///
/// Owns every piece of per-frame state. The window and render backends are borrowed
/// per call so the same loop runs against winit/wgpu or against test doubles.
#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    camera: Camera,
    timing: FrameTiming,
    program: ProgramManager,
    pending_events: Vec<PlatformEvent>,
    stats: FrameStats,
}

impl RenderLoop {
    /// One-time setup once a window and rendering context exist.
    ///
    /// A fragment source that fails to compile is logged and leaves an invalid program;
    /// the loop still starts.
    pub fn initialize<W: WindowBackend, R: RenderBackend>(
        window: &W,
        backend: &mut R,
        fragment_source: &str,
        settings: CameraSettings,
    ) -> Self {
        let program = ProgramManager::compile(backend, VERTEX_SOURCE, fragment_source);
        program.activate(backend);
        backend.upload_geometry(&FULLSCREEN_QUAD);
        program.resize(backend, window.dimensions());

        let timing = FrameTiming::new(window.time(), window.cursor_position());

        let mut render_loop = Self {
            state: LoopState::Initializing,
            camera: Camera::new(settings),
            timing,
            program,
            pending_events: Vec::new(),
            stats: FrameStats::new(),
        };
        render_loop.transition(LoopState::Running);
        render_loop
    }

    fn transition(&mut self, next: LoopState) {
        if self.state != next {
            log::debug!("Render loop {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn program(&self) -> &ProgramManager {
        &self.program
    }

    pub fn timing(&self) -> &FrameTiming {
        &self.timing
    }

    /// Run one iteration and return the state to continue in
    pub fn frame<W: WindowBackend, R: RenderBackend>(&mut self, window: &mut W, backend: &mut R) -> LoopState {
        if self.state != LoopState::Running {
            return self.state;
        }

        let time = window.time();
        let mouse = window.cursor_position();
        let delta = self.timing.delta(time, mouse);

        let movement = MovementState::from_controller(&*window);
        self.camera.update(delta.mouse_delta, delta.dt, movement);

        for event in self.pending_events.drain(..) {
            match event {
                PlatformEvent::Resized(dimensions) => {
                    if dimensions.is_empty() {
                        log::debug!("Window minimized");
                    } else {
                        log::debug!("Resized to {}x{}", dimensions.width, dimensions.height);
                    }
                    self.program.resize(backend, dimensions);
                }
                PlatformEvent::CloseRequested => log::debug!("Close requested"),
            }
        }

        self.program.set_mat4(backend, "view", &self.camera.view_matrix());
        self.program.set_float(backend, "time", delta.time);

        backend.clear();
        backend.draw_triangles(FULLSCREEN_QUAD.len() as u32);

        window.swap_buffers();
        backend.present();
        self.pending_events.extend(window.poll_events());

        self.timing.advance(time, mouse);

        if let Some(fps) = self.stats.record(delta.dt) {
            log::debug!("Frame {}: {:.1} FPS", delta.number, fps);
        }

        if window.should_close() {
            self.transition(LoopState::Terminating);
        }
        self.state
    }

    /// Iterate until the window asks to close, then release it
    pub fn run<W: WindowBackend, R: RenderBackend>(&mut self, window: &mut W, backend: &mut R) {
        while self.frame(window, backend) == LoopState::Running {}
        self.terminate(window);
    }

    pub fn terminate<W: WindowBackend>(&mut self, window: &mut W) {
        self.transition(LoopState::Terminating);
        window.terminate();
        log::info!("Viewer closed after {} frames", self.timing.frame_number());
    }
}
