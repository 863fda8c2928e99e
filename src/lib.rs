pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod frame;
pub mod loaders;
pub mod math;
pub mod program;
pub mod render_loop;
pub mod shader;
pub mod types;

pub use camera::{Camera, CameraSettings, MovementState, Orientation};
pub use config::ViewerConfig;
pub use program::ProgramManager;
pub use render_loop::{LoopState, RenderLoop};
