pub mod clock;
pub mod controller;
pub mod gpu_context;
pub mod input_adapter;
pub mod render_backend;
pub mod wgpu_backend;
pub mod window;
pub mod winit_platform;

pub use clock::*;
pub use controller::*;
pub use gpu_context::*;
pub use input_adapter::*;
pub use render_backend::*;
pub use wgpu_backend::*;
pub use window::*;
pub use winit_platform::*;
