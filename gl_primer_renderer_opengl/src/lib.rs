/*!
# GL Primer - OpenGL Backend

OpenGL implementation of the GL Primer pipeline.

This crate provides an OpenGL 3.3+ core profile backend that implements the
gl_primer `GraphicsDevice` and `Window` traits, using the `gl` crate for
function loading and glutin/winit for the window, surface and context.

Creating an `OpenGlWindow` makes its context current on the calling thread and
returns the matching `OpenGlDevice`; both must stay on that thread.
*/

// OpenGL implementation modules
mod opengl_format;
mod opengl_device;
mod opengl_window;
mod opengl_debug;

pub use opengl_device::OpenGlDevice;
pub use opengl_window::OpenGlWindow;

// Re-export debug utilities
pub use opengl_debug::{enable_debug_output, get_debug_stats, print_debug_stats_report, DebugStats};

/// Backend namespace mirroring `gl_primer::primer`
///
/// # Example
///
/// ```no_run
/// use gl_primer::primer::render::Config;
/// use gl_primer_renderer_opengl::primer::OpenGlWindow;
///
/// let (window, device) = OpenGlWindow::new(&Config::default())?;
/// # Ok::<(), gl_primer::primer::Error>(())
/// ```
pub mod primer {
    pub use crate::opengl_device::OpenGlDevice;
    pub use crate::opengl_window::OpenGlWindow;
    pub use crate::opengl_debug::{get_debug_stats, print_debug_stats_report, DebugStats};
}
