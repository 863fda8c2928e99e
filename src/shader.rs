//! GLSL sources shared by every program: the prelude prepended to each stage,
//! the built-in vertex stage and the full-screen quad it expects.

use thiserror::Error;

/// Pipeline stage a source is compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex shader",
            ShaderStage::Fragment => "fragment shader",
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Compile and link diagnostics reported by a render backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShaderError {
    #[error("failed to compile {stage}: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("failed to link program: {log}")]
    Link { log: String },
}

/// Prepended to every stage. Declares the type aliases user shaders are written with and
/// the uniform block holding `view`, `size` and `time`.
pub const PRELUDE: &str = "#version 450\n\
#define v2 vec2\n\
#define v3 vec3\n\
#define v4 vec4\n\
#define m4x4 mat4\n\
#define f32 float\n\
#define u32 uint\n\
#define i32 int\n\
layout(set = 0, binding = 0) uniform Globals {\n\
    m4x4 view;\n\
    v2 size;\n\
    f32 time;\n\
};\n";

/// Built-in vertex stage passing quad positions straight to clip space
pub const VERTEX_SOURCE: &str = "layout(location = 0) in v3 pos;\n\
void main(void) {\n\
    gl_Position = v4(pos, 1.0);\n\
}\n";

/// Two triangles covering clip space
pub const FULLSCREEN_QUAD: [[f32; 3]; 6] = [
    // first triangle
    [1.0, 1.0, 0.0],   // top right
    [1.0, -1.0, 0.0],  // bottom right
    [-1.0, 1.0, 0.0],  // top left
    // second triangle
    [1.0, -1.0, 0.0],  // bottom right
    [-1.0, -1.0, 0.0], // bottom left
    [-1.0, 1.0, 0.0],  // top left
];

/// Complete source for a stage: prelude followed by the user text
pub fn with_prelude(source: &str) -> String {
    let mut full = String::with_capacity(PRELUDE.len() + source.len());
    full.push_str(PRELUDE);
    full.push_str(source);
    full
}
