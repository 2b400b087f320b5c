/*!
# GL Primer

Core traits and types for a minimal OpenGL rendering pipeline.

This crate provides the platform-agnostic part of the pipeline: loading shader
text, compiling and linking shader programs, uploading geometry, and driving a
synchronous render loop. Every GPU call goes through the `GraphicsDevice`
trait, so the whole pipeline can be exercised against a backend (OpenGL via the
`gl_primer_renderer_opengl` crate) or against a mock device in unit tests.

## Architecture

- **GraphicsDevice**: Thin trait over the graphics API calls the pipeline needs
- **ShaderSource / compile_stage**: Shader text loading and per-stage compilation
- **ShaderProgram**: Link, validate, uniform location cache
- **Mesh**: Vertex/index buffer upload and attribute layout
- **RenderLoop**: Running/Closing state machine driven by a `Window`
- **gl_error**: Draining and naming of pending GL error codes
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod shader;
pub mod geometry;
pub mod render_loop;

#[cfg(test)]
mod test_support;

// Main primer namespace module
pub mod primer {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging singleton
    pub use crate::engine::Engine;

    // Device trait
    pub use crate::graphics_device::GraphicsDevice;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Device sub-module with handles, descriptors and configuration
    pub mod render {
        pub use crate::graphics_device::*;
    }

    // Shader pipeline sub-module
    pub mod shader {
        pub use crate::shader::*;
    }

    // Geometry sub-module
    pub mod geometry {
        pub use crate::geometry::*;
    }

    // Render loop sub-module
    pub mod render_loop {
        pub use crate::render_loop::*;
    }
}

// Re-export math library at crate root
pub use glam;

