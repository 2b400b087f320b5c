//! Built-in scenes
//!
//! A `Scene` is everything the render loop draws: one program, one mesh and
//! an optional color animation fed to the `u_Color` uniform.

use glam::Vec4;

use crate::error::Result;
use crate::geometry::Mesh;
use crate::graphics_device::{GraphicsDevice, VertexLayout};
use crate::render_loop::{ColorCycle, LOG_SOURCE};
use crate::shader::{ShaderProgram, ShaderSource};
use crate::engine_debug;

/// Triangle corners (x, y)
pub const TRIANGLE_POSITIONS: [f32; 6] = [
    -0.5, -0.5,
     0.0,  0.5,
     0.5, -0.5,
];

/// Quad corners (x, y), counter-clockwise from bottom-left
pub const QUAD_POSITIONS: [f32; 8] = [
    -0.5, -0.5,
     0.5, -0.5,
     0.5,  0.5,
    -0.5,  0.5,
];

/// Two triangles covering the quad
pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 2,
    2, 3, 0,
];

/// Passes the position straight to clip space
pub const TRIANGLE_VERTEX_SHADER: &str = "#version 330 core

layout(location = 0) in vec4 position;

void main()
{
    gl_Position = position;
}
";

/// Constant yellow
pub const TRIANGLE_FRAGMENT_SHADER: &str = "#version 330 core

layout(location = 0) out vec4 color;

void main()
{
    color = vec4(1.0, 1.0, 0.0, 1.0);
}
";

/// Uniform receiving the animated color
pub const COLOR_UNIFORM: &str = "u_Color";

/// Program + mesh drawn every frame
#[derive(Debug)]
pub struct Scene {
    program: ShaderProgram,
    mesh: Mesh,
    color_cycle: Option<ColorCycle>,
}

impl Scene {
    pub fn new(program: ShaderProgram, mesh: Mesh) -> Self {
        Self { program, mesh, color_cycle: None }
    }

    /// Animate `u_Color` with `cycle`
    pub fn with_color_cycle(mut self, cycle: ColorCycle) -> Self {
        self.color_cycle = Some(cycle);
        self
    }

    /// Yellow triangle from the built-in literal shaders
    pub fn triangle(device: &mut dyn GraphicsDevice) -> Result<Self> {
        let mesh = Mesh::new(device, &TRIANGLE_POSITIONS, VertexLayout::positions_2d(), None)?;
        let scene = Self::assemble(
            device,
            mesh,
            &ShaderSource::literal(TRIANGLE_VERTEX_SHADER),
            &ShaderSource::literal(TRIANGLE_FRAGMENT_SHADER),
        )?;

        engine_debug!(LOG_SOURCE, "Triangle scene ready");
        Ok(scene)
    }

    /// Indexed quad colored through `u_Color`
    pub fn color_quad(
        device: &mut dyn GraphicsDevice,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
    ) -> Result<Self> {
        let mesh = Mesh::new(
            device,
            &QUAD_POSITIONS,
            VertexLayout::positions_2d(),
            Some(&QUAD_INDICES),
        )?;
        let scene = Self::assemble(device, mesh, vertex, fragment)?;

        engine_debug!(LOG_SOURCE, "Color quad scene ready");
        Ok(scene.with_color_cycle(ColorCycle::default()))
    }

    /// Build the program while `mesh` is bound, so validation sees its vertex array
    ///
    /// The mesh is released if the program cannot be built.
    fn assemble(
        device: &mut dyn GraphicsDevice,
        mesh: Mesh,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
    ) -> Result<Self> {
        mesh.bind(device);
        match ShaderProgram::build(device, vertex, fragment) {
            Ok(program) => Ok(Self::new(program, mesh)),
            Err(e) => {
                mesh.release(device);
                Err(e)
            }
        }
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    pub fn program_mut(&mut self) -> &mut ShaderProgram {
        &mut self.program
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn color_cycle(&self) -> Option<&ColorCycle> {
        self.color_cycle.as_ref()
    }

    /// Advance the color animation one frame (None without animation)
    pub fn advance_color(&mut self) -> Option<Vec4> {
        self.color_cycle.as_mut().map(|cycle| {
            cycle.advance();
            cycle.color()
        })
    }

    /// Unbind and delete the program, vertex array and buffers
    pub fn release(self, device: &mut dyn GraphicsDevice) {
        device.use_program(None);
        self.program.release(device);
        self.mesh.release(device);
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
