/// Render loop - window seam, color animation, built-in scenes and the frame loop

// Module declarations
pub mod window;
pub mod color_cycle;
pub mod scene;
pub mod render_loop;

// Re-export
pub use window::*;
pub use color_cycle::*;
pub use scene::*;
pub use render_loop::*;

// Scripted window for tests
#[cfg(test)]
pub mod mock_window;

/// Log source shared by the render loop
pub(crate) const LOG_SOURCE: &str = "primer::render_loop";
