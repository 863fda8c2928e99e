use crate::shader::{ShaderError, ShaderStage};

/// Compiled shader stage owned by a `RenderBackend`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Linked program owned by a `RenderBackend`. Zero is never a valid program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

impl ProgramHandle {
    pub const INVALID: ProgramHandle = ProgramHandle(0);

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// Binding slot of a named uniform inside a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// Rendering backend: shader compilation, uniform storage and draw submission.
///
/// Operations against `ProgramHandle::INVALID` are inert. Frame operations never fail
/// from the caller's point of view; a backend that cannot acquire a frame skips it.
pub trait RenderBackend {
    /// Compile one stage from complete source text
    fn compile_shader(&mut self, source: &str, stage: ShaderStage) -> Result<ShaderHandle, ShaderError>;

    /// Link a vertex and a fragment stage into a program
    fn create_program(
        &mut self,
        vertex: ShaderHandle,
        fragment: ShaderHandle,
    ) -> Result<ProgramHandle, ShaderError>;

    /// Free a stage object. Programs already linked from it stay usable.
    fn release_shader(&mut self, shader: ShaderHandle);

    /// Select the program used by subsequent draws
    fn use_program(&mut self, program: ProgramHandle);

    /// Look up a uniform by name, `None` if the program does not declare it
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;

    fn set_uniform_1f(&mut self, program: ProgramHandle, location: UniformLocation, value: f32);

    fn set_uniform_2f(&mut self, program: ProgramHandle, location: UniformLocation, x: f32, y: f32);

    /// Upload a 4x4 matrix given in column-major order
    fn set_uniform_matrix4(&mut self, program: ProgramHandle, location: UniformLocation, value: &[f32; 16]);

    /// Upload static vertex positions for subsequent draws
    fn upload_geometry(&mut self, vertices: &[[f32; 3]]);

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32);

    /// Clear the color buffer of the current frame
    fn clear(&mut self);

    /// Draw non-indexed triangles from the uploaded geometry
    fn draw_triangles(&mut self, vertex_count: u32);

    /// Submit recorded work and present the frame
    fn present(&mut self);
}
