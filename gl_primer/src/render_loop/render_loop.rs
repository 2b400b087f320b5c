//! Render loop - Running/Closing state machine
//!
//! One iteration: check the close signal, apply a pending resize, clear, update
//! the animated uniform, bind program and mesh, draw, optionally drain GL
//! errors, swap, poll events. Strictly single-threaded; the swap is the only
//! point where the loop may block.

use glam::Vec4;

use crate::error::{Error, Result};
use crate::geometry::DrawCall;
use crate::graphics_device::{check_errors, clear_errors, ClearMask, Config, GraphicsDevice};
use crate::render_loop::{Scene, Window, COLOR_UNIFORM, LOG_SOURCE};
use crate::{engine_debug, engine_error, engine_info};

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Drawing frames
    Running,
    /// Close requested: no more draws, resources are being released
    Closing,
}

/// Render loop settings
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    /// Framebuffer clear color
    pub clear_color: Vec4,
    /// Drain and log GL errors after every draw
    pub check_errors: bool,
    /// Stop after this many frames even without a close request
    pub max_frames: Option<u64>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for LoopConfig {
    fn from(config: &Config) -> Self {
        Self {
            clear_color: Vec4::from_array(config.clear_color),
            check_errors: config.check_errors,
            max_frames: None,
        }
    }
}

/// Counters accumulated over one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Frames presented
    pub frames: u64,
    pub draw_calls: u64,
    /// Vertices consumed by draws (index count for indexed draws)
    pub vertices: u64,
    pub triangles: u64,
    /// GL errors drained (0 when error checks are off)
    pub gl_errors: u64,
}

pub struct RenderLoop {
    config: LoopConfig,
    state: LoopState,
    stats: FrameStats,
}

impl RenderLoop {
    pub fn new(config: LoopConfig) -> Self {
        Self {
            config,
            state: LoopState::Running,
            stats: FrameStats::default(),
        }
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Draw `scene` until `window` asks to close, then release the scene
    ///
    /// A scene whose program is not usable is validated once more with its
    /// mesh bound; if it still fails the scene is released and
    /// `Error::ProgramValidate` is returned without drawing.
    pub fn run(
        &mut self,
        device: &mut dyn GraphicsDevice,
        window: &mut dyn Window,
        mut scene: Scene,
    ) -> Result<FrameStats> {
        self.state = LoopState::Running;
        self.stats = FrameStats::default();

        if !scene.program().is_usable() {
            scene.mesh().bind(device);
            if let Err(e) = scene.program_mut().validate(device) {
                engine_error!(LOG_SOURCE, "Program is not usable, nothing will be drawn: {}", e);
                scene.release(device);
                self.state = LoopState::Closing;
                return Err(e);
            }
        }

        let (width, height) = window.framebuffer_size();
        device.viewport(0, 0, width, height);
        device.clear_color(self.config.clear_color);
        if self.config.check_errors {
            clear_errors(device);
        }
        engine_info!(LOG_SOURCE, "Render loop started ({}x{})", width, height);

        while self.state == LoopState::Running {
            if window.should_close() || self.frame_limit_reached() {
                self.state = LoopState::Closing;
                break;
            }

            if let Some((width, height)) = window.take_resize() {
                device.viewport(0, 0, width, height);
                engine_debug!(LOG_SOURCE, "Viewport resized to {}x{}", width, height);
            }

            if let Err(e) = self.render_frame(device, &mut scene) {
                scene.release(device);
                self.state = LoopState::Closing;
                return Err(e);
            }

            if let Err(e) = window.swap_buffers() {
                engine_error!(LOG_SOURCE, "Failed to present frame: {}", e);
                scene.release(device);
                self.state = LoopState::Closing;
                return Err(e);
            }
            self.stats.frames += 1;

            window.poll_events();
        }

        scene.release(device);
        engine_info!(
            LOG_SOURCE,
            "Render loop finished: {} frames, {} draw calls, {} triangles",
            self.stats.frames,
            self.stats.draw_calls,
            self.stats.triangles
        );
        Ok(self.stats)
    }

    /// Record one frame (no present)
    ///
    /// GL errors drained here are logged once per distinct code and never
    /// cancel the frame.
    pub fn render_frame(&mut self, device: &mut dyn GraphicsDevice, scene: &mut Scene) -> Result<DrawCall> {
        if !scene.program().is_usable() {
            return Err(Error::InvalidResource(
                "cannot draw with a program that is not linked and validated".to_string(),
            ));
        }

        device.clear(ClearMask::COLOR);

        scene.program().bind(device);
        if let Some(color) = scene.advance_color() {
            scene.program_mut().set_uniform_vec4(device, COLOR_UNIFORM, color);
        }

        scene.mesh().bind(device);
        let call = scene.mesh().draw(device);

        self.stats.draw_calls += 1;
        self.stats.vertices += call.vertex_count() as u64;
        self.stats.triangles += scene.mesh().primitive_count() as u64;

        if self.config.check_errors {
            self.stats.gl_errors += check_errors(device, LOG_SOURCE).len() as u64;
        }

        Ok(call)
    }

    fn frame_limit_reached(&self) -> bool {
        self.config.max_frames.is_some_and(|max| self.stats.frames >= max)
    }
}

#[cfg(test)]
#[path = "render_loop_tests.rs"]
mod tests;
