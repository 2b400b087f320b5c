//! Yellow triangle
//!
//! Opens a window, builds the triangle scene from the built-in shaders and
//! draws it until the window is closed or Escape is pressed.

use std::process;

use gl_primer::engine_error;
use gl_primer::primer::render::{Config, WindowConfig};
use gl_primer::primer::render_loop::{LoopConfig, RenderLoop, Scene};
use gl_primer::primer::Result;
use gl_primer_renderer_opengl::primer::OpenGlWindow;

const LOG_SOURCE: &str = "primer::demo";

fn run() -> Result<()> {
    let config = Config {
        window: WindowConfig {
            title: "Hello Triangle".to_string(),
            ..WindowConfig::default()
        },
        ..Config::default()
    };

    let (mut window, mut device) = OpenGlWindow::new(&config)?;
    let scene = Scene::triangle(&mut device)?;

    RenderLoop::new(LoopConfig::from(&config)).run(&mut device, &mut window, scene)?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        engine_error!(LOG_SOURCE, "{}", e);
        process::exit(1);
    }
}
