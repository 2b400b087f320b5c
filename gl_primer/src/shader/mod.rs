/// Shader pipeline - source loading, per-stage compilation, program link and validation

// Module declarations
pub mod shader_source;
pub mod shader_compiler;
pub mod shader_program;

// Re-export
pub use shader_source::*;
pub use shader_compiler::*;
pub use shader_program::*;

/// Log source shared by the shader pipeline
pub(crate) const LOG_SOURCE: &str = "primer::shader";
