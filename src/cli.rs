// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "shader-viewer")]
#[command(about = "Full-screen fragment shader viewer with a free-look camera", long_about = None)]
pub struct Cli {
    /// Fragment shader source [default: main.glsl]
    pub shader: Option<PathBuf>,

    /// JSON file with window and camera settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Initial window width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Window title
    #[arg(long)]
    pub title: Option<String>,
}
