pub mod shader_source;

pub use shader_source::read_shader_source;
