/// Window trait - the windowing collaborator driven by the render loop

use crate::error::Result;

/// Window owning the presentation surface of the current context
///
/// Implemented by backend windows (e.g., OpenGlWindow). All calls happen on
/// the thread that owns the context.
pub trait Window {
    /// True once the user (or the platform) asked the window to close
    fn should_close(&self) -> bool;

    /// Present the back buffer
    ///
    /// May block until the display accepts the frame (vsync). This is the only
    /// blocking point of the render loop.
    fn swap_buffers(&mut self) -> Result<()>;

    /// Process pending window events without blocking
    fn poll_events(&mut self);

    /// Framebuffer size reported by the last resize, if any since the last call
    fn take_resize(&mut self) -> Option<(u32, u32)>;

    /// Current framebuffer size in pixels
    fn framebuffer_size(&self) -> (u32, u32);
}
