use glam::{Mat4, Vec2};

use crate::core::{ProgramHandle, RenderBackend, ShaderHandle, UniformLocation, WindowDimensions};
use crate::shader::{with_prelude, ShaderError, ShaderStage};

/// Owns the single GPU program of the viewer and publishes uniforms to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramManager {
    program: ProgramHandle,
}

impl ProgramManager {
    /// Compile both stages and link them.
    ///
    /// Failures are logged and leave the manager holding `ProgramHandle::INVALID`; uniform
    /// pushes against it are no-ops and draws are inert.
    pub fn compile<R: RenderBackend>(backend: &mut R, vertex_source: &str, fragment_source: &str) -> Self {
        let program = match Self::build(backend, vertex_source, fragment_source) {
            Ok(program) => {
                log::info!("Shader program {:?} linked", program);
                program
            }
            Err(e) => {
                log::error!("{}", e);
                ProgramHandle::INVALID
            }
        };

        Self { program }
    }

    fn build<R: RenderBackend>(
        backend: &mut R,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramHandle, ShaderError> {
        let vertex = backend.compile_shader(&with_prelude(vertex_source), ShaderStage::Vertex)?;
        let fragment = match backend.compile_shader(&with_prelude(fragment_source), ShaderStage::Fragment) {
            Ok(fragment) => fragment,
            Err(e) => {
                backend.release_shader(vertex);
                return Err(e);
            }
        };

        let linked = backend.create_program(vertex, fragment);
        Self::release_stages(backend, [vertex, fragment]);
        linked
    }

    fn release_stages<R: RenderBackend>(backend: &mut R, stages: [ShaderHandle; 2]) {
        for stage in stages {
            backend.release_shader(stage);
        }
    }

    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    pub fn is_valid(&self) -> bool {
        self.program.is_valid()
    }

    /// Make this program the one used by draws
    pub fn activate<R: RenderBackend>(&self, backend: &mut R) {
        backend.use_program(self.program);
    }

    pub fn set_float<R: RenderBackend>(&self, backend: &mut R, name: &str, value: f32) {
        if let Some(location) = self.locate(backend, name) {
            backend.set_uniform_1f(self.program, location, value);
        }
    }

    pub fn set_vec2<R: RenderBackend>(&self, backend: &mut R, name: &str, value: Vec2) {
        if let Some(location) = self.locate(backend, name) {
            backend.set_uniform_2f(self.program, location, value.x, value.y);
        }
    }

    pub fn set_mat4<R: RenderBackend>(&self, backend: &mut R, name: &str, value: &Mat4) {
        if let Some(location) = self.locate(backend, name) {
            backend.set_uniform_matrix4(self.program, location, &value.to_cols_array());
        }
    }

    /// Match the viewport to the framebuffer and republish `size`
    pub fn resize<R: RenderBackend>(&self, backend: &mut R, dimensions: WindowDimensions) {
        backend.set_viewport(0, 0, dimensions.width, dimensions.height);
        self.set_vec2(
            backend,
            "size",
            Vec2::new(dimensions.width as f32, dimensions.height as f32),
        );
    }

    fn locate<R: RenderBackend>(&self, backend: &R, name: &str) -> Option<UniformLocation> {
        let location = backend.uniform_location(self.program, name);
        if location.is_none() {
            log::trace!("Uniform '{}' not found in program {:?}", name, self.program);
        }
        location
    }
}
