use std::process::ExitCode;

use clap::Parser;
use shader_viewer::cli::Cli;
use shader_viewer::core::{WgpuBackend, WinitPlatform};
use shader_viewer::loaders::read_shader_source;
use shader_viewer::{RenderLoop, ViewerConfig};

fn run(config: ViewerConfig) -> anyhow::Result<()> {
    let mut platform = WinitPlatform::create(
        config.window.width,
        config.window.height,
        &config.window.title,
    )?;
    let mut backend = pollster::block_on(WgpuBackend::new(platform.window().clone()))?;

    let fragment_source = read_shader_source(&config.shader_path);
    let mut render_loop = RenderLoop::initialize(&platform, &mut backend, &fragment_source, config.camera);

    log::info!("Shader Viewer - Controls: mouse to look, WASD to move, Escape to quit");
    render_loop.run(&mut platform, &mut backend);

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = ViewerConfig::from_cli(&cli).and_then(run);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
