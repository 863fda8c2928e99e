#![allow(dead_code)]

use std::collections::VecDeque;

use glam::DVec2;
use shader_viewer::core::{
    Button, Controller, PlatformEvent, ProgramHandle, RenderBackend, ShaderHandle, UniformLocation,
    WindowBackend, WindowDimensions,
};
use shader_viewer::shader::{ShaderError, ShaderStage};
use shader_viewer::{CameraSettings, RenderLoop};
use shader_viewer::types::Globals;

/// Everything a `RecordingBackend` was asked to do, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CompileShader(ShaderStage),
    CreateProgram,
    ReleaseShader(ShaderHandle),
    UseProgram(ProgramHandle),
    Uniform1f(String, f32),
    Uniform2f(String, f32, f32),
    UniformMatrix4(String, [f32; 16]),
    UploadGeometry(usize),
    Viewport(u32, u32, u32, u32),
    Clear,
    Draw(u32),
    Present,
}

/// Backend double. Fragment sources without `void main` fail to compile.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
    pub fail_link: bool,
    pub live_shaders: Vec<ShaderHandle>,
    next_handle: u32,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_link() -> Self {
        Self {
            fail_link: true,
            ..Self::default()
        }
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn position(&self, predicate: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls.iter().position(predicate)
    }

    fn name_at(location: UniformLocation) -> String {
        ["view", "size", "time"]
            .into_iter()
            .find(|name| Globals::locate(name) == Some(location))
            .unwrap_or("?")
            .to_string()
    }
}

impl RenderBackend for RecordingBackend {
    fn compile_shader(&mut self, source: &str, stage: ShaderStage) -> Result<ShaderHandle, ShaderError> {
        self.calls.push(Call::CompileShader(stage));
        if !source.contains("void main") {
            return Err(ShaderError::Compile {
                stage,
                log: "no entry point".to_string(),
            });
        }
        self.next_handle += 1;
        let handle = ShaderHandle(self.next_handle);
        self.live_shaders.push(handle);
        Ok(handle)
    }

    fn create_program(&mut self, _vertex: ShaderHandle, _fragment: ShaderHandle) -> Result<ProgramHandle, ShaderError> {
        self.calls.push(Call::CreateProgram);
        if self.fail_link {
            return Err(ShaderError::Link {
                log: "mismatched interface".to_string(),
            });
        }
        self.next_handle += 1;
        Ok(ProgramHandle(self.next_handle))
    }

    fn release_shader(&mut self, shader: ShaderHandle) {
        self.calls.push(Call::ReleaseShader(shader));
        self.live_shaders.retain(|&live| live != shader);
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.calls.push(Call::UseProgram(program));
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        if !program.is_valid() {
            return None;
        }
        Globals::locate(name)
    }

    fn set_uniform_1f(&mut self, _program: ProgramHandle, location: UniformLocation, value: f32) {
        self.calls.push(Call::Uniform1f(Self::name_at(location), value));
    }

    fn set_uniform_2f(&mut self, _program: ProgramHandle, location: UniformLocation, x: f32, y: f32) {
        self.calls.push(Call::Uniform2f(Self::name_at(location), x, y));
    }

    fn set_uniform_matrix4(&mut self, _program: ProgramHandle, location: UniformLocation, value: &[f32; 16]) {
        self.calls.push(Call::UniformMatrix4(Self::name_at(location), *value));
    }

    fn upload_geometry(&mut self, vertices: &[[f32; 3]]) {
        self.calls.push(Call::UploadGeometry(vertices.len()));
    }

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.calls.push(Call::Viewport(x, y, width, height));
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn draw_triangles(&mut self, vertex_count: u32) {
        self.calls.push(Call::Draw(vertex_count));
    }

    fn present(&mut self) {
        self.calls.push(Call::Present);
    }
}

/// One scripted frame of platform state, consumed when the loop polls events
#[derive(Debug, Clone, Default)]
pub struct ScriptedFrame {
    pub time: f64,
    pub cursor: DVec2,
    pub keys: Vec<Button>,
    pub events: Vec<PlatformEvent>,
}

/// Window double replaying a script: each `poll_events` advances to the next frame.
/// A poll that finds the script empty makes it ask to close.
#[derive(Debug)]
pub struct MockWindow {
    current: ScriptedFrame,
    script: VecDeque<ScriptedFrame>,
    dimensions: WindowDimensions,
    pub swaps: usize,
    pub terminated: bool,
    close_when_exhausted: bool,
    exhausted: bool,
}

impl MockWindow {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            current: ScriptedFrame::default(),
            script: VecDeque::new(),
            dimensions: WindowDimensions::new(width, height),
            swaps: 0,
            terminated: false,
            close_when_exhausted: true,
            exhausted: false,
        }
    }

    /// State observed while the loop initializes
    pub fn with_start(mut self, frame: ScriptedFrame) -> Self {
        self.current = frame;
        self
    }

    /// State observed after each successive poll
    pub fn then(mut self, frame: ScriptedFrame) -> Self {
        self.script.push_back(frame);
        self
    }

    pub fn keep_open(mut self) -> Self {
        self.close_when_exhausted = false;
        self
    }

    /// Fixed time step frames holding `keys`
    pub fn steady(width: u32, height: u32, dt: f64, frames: usize, keys: &[Button]) -> Self {
        let mut window = Self::new(width, height).with_start(ScriptedFrame {
            time: 0.0,
            ..Default::default()
        });
        for i in 1..=frames {
            window = window.then(ScriptedFrame {
                time: dt * i as f64,
                keys: keys.to_vec(),
                ..Default::default()
            });
        }
        window
    }
}

impl Controller for MockWindow {
    fn is_down(&self, button: Button) -> bool {
        self.current.keys.contains(&button)
    }
}

impl WindowBackend for MockWindow {
    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        match self.script.pop_front() {
            Some(next) => {
                self.current = next;
                let events = std::mem::take(&mut self.current.events);
                for event in &events {
                    if let PlatformEvent::Resized(dimensions) = event {
                        self.dimensions = *dimensions;
                    }
                }
                events
            }
            None => {
                self.exhausted = true;
                Vec::new()
            }
        }
    }

    fn cursor_position(&self) -> DVec2 {
        self.current.cursor
    }

    fn time(&self) -> f64 {
        self.current.time
    }

    fn dimensions(&self) -> WindowDimensions {
        self.dimensions
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    fn should_close(&self) -> bool {
        self.close_when_exhausted && self.exhausted
    }

    fn terminate(&mut self) {
        self.terminated = true;
    }
}

/// Minimal fragment stage the recording backend accepts
pub const VALID_FRAGMENT: &str = "layout(location = 0) out v4 color;\nvoid main(void) { color = v4(1.0); }\n";

/// Initialize against the window's start state, then advance it to the first frame
pub fn start(window: &mut MockWindow, backend: &mut RecordingBackend, fragment: &str) -> RenderLoop {
    let render_loop = RenderLoop::initialize(&*window, backend, fragment, CameraSettings::default());
    assert!(window.poll_events().is_empty(), "start state must not carry events");
    render_loop
}
