//! Indexed quad with an animated color
//!
//! Loads `shaders/basic.vert` and `shaders/basic.frag`, draws a quad from four
//! vertices and six indices, and cycles the red channel of `u_Color` every
//! frame.
//!
//! Shaders are looked up in `shaders/` under the working directory first, then
//! next to this crate's manifest.

use std::path::{Path, PathBuf};
use std::process;

use gl_primer::engine_error;
use gl_primer::primer::render::{Config, WindowConfig};
use gl_primer::primer::render_loop::{LoopConfig, RenderLoop, Scene};
use gl_primer::primer::shader::ShaderSource;
use gl_primer::primer::Result;
use gl_primer_renderer_opengl::primer::OpenGlWindow;
use gl_primer_renderer_opengl::print_debug_stats_report;

const LOG_SOURCE: &str = "primer::demo";

/// First of `candidates` holding `basic.vert`, else the last one
fn resolve_shader_dir(candidates: &[PathBuf]) -> PathBuf {
    candidates
        .iter()
        .find(|dir| dir.join("basic.vert").is_file())
        .or(candidates.last())
        .cloned()
        .unwrap_or_default()
}

fn shader_dir() -> PathBuf {
    resolve_shader_dir(&[
        PathBuf::from("shaders"),
        Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders"),
    ])
}

fn run() -> Result<()> {
    let config = Config {
        window: WindowConfig {
            title: "Color Quad".to_string(),
            ..WindowConfig::default()
        },
        ..Config::default()
    };

    let shader_dir = shader_dir();
    let vertex = ShaderSource::file(shader_dir.join("basic.vert"));
    let fragment = ShaderSource::file(shader_dir.join("basic.frag"));

    let (mut window, mut device) = OpenGlWindow::new(&config)?;
    let scene = Scene::color_quad(&mut device, &vertex, &fragment)?;

    RenderLoop::new(LoopConfig::from(&config)).run(&mut device, &mut window, scene)?;

    if config.debug_output {
        print_debug_stats_report();
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        engine_error!(LOG_SOURCE, "{}", e);
        process::exit(1);
    }
}
