/// Geometry - vertex/index buffer upload and vertex array setup

// Module declarations
pub mod geometry_buffer;
pub mod mesh;

// Re-export
pub use geometry_buffer::*;
pub use mesh::*;

/// Log source shared by the geometry module
pub(crate) const LOG_SOURCE: &str = "primer::geometry";
