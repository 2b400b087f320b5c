/// GraphicsDevice trait - the graphics API surface used by the pipeline

use bitflags::bitflags;
use glam::Vec4;

use crate::error::Result;
use crate::graphics_device::{BufferTarget, BufferUsage, IndexType, ShaderStage, VertexAttribute};

// ============================================================================
// Handles
// ============================================================================

/// Driver-assigned shader object name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Driver-assigned program object name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Driver-assigned buffer object name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// Driver-assigned vertex array object name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(pub u32);

/// Resolved uniform location inside a linked program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

// ============================================================================
// Draw state
// ============================================================================

bitflags! {
    /// Buffers cleared by `GraphicsDevice::clear`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearMask: u32 {
        const COLOR = 0b001;
        const DEPTH = 0b010;
        const STENCIL = 0b100;
    }
}

/// Primitive topology for draw calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    /// Triangle list
    TriangleList,
    /// Triangle strip
    TriangleStrip,
    /// Line list
    LineList,
    /// Point list
    PointList,
}

impl PrimitiveTopology {
    /// Number of primitives produced by `vertex_count` vertices
    pub fn primitive_count(&self, vertex_count: u32) -> u32 {
        match self {
            PrimitiveTopology::TriangleList => vertex_count / 3,
            PrimitiveTopology::TriangleStrip => vertex_count.saturating_sub(2),
            PrimitiveTopology::LineList => vertex_count / 2,
            PrimitiveTopology::PointList => vertex_count,
        }
    }
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Graphics device trait
///
/// One method per graphics API entry point the pipeline needs. Implemented by
/// backend devices (e.g., OpenGlDevice) and by the mock device used in tests.
///
/// The device is bound to the single thread owning the current context.
/// Binding state is global to that context: whichever buffer, vertex array or
/// program was bound last is the one later calls refer to.
pub trait GraphicsDevice {
    /// Driver version string (GL_VERSION)
    fn version(&self) -> String;

    // ===== SHADERS =====

    /// Create an empty shader object for `stage`
    fn create_shader(&mut self, stage: ShaderStage) -> Result<ShaderHandle>;

    /// Replace the source text of a shader object
    fn shader_source(&mut self, shader: ShaderHandle, source: &str);

    /// Compile the current source of a shader object
    fn compile_shader(&mut self, shader: ShaderHandle);

    /// Status of the last compilation
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;

    /// Full compile diagnostic log
    ///
    /// Backends size the returned text from the driver-reported log length.
    fn shader_info_log(&self, shader: ShaderHandle) -> String;

    /// Release a shader object
    fn delete_shader(&mut self, shader: ShaderHandle);

    // ===== PROGRAMS =====

    /// Create an empty program object
    fn create_program(&mut self) -> Result<ProgramHandle>;

    /// Attach a compiled shader to a program
    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle);

    /// Link all attached shaders
    fn link_program(&mut self, program: ProgramHandle);

    /// Status of the last link
    fn program_link_status(&self, program: ProgramHandle) -> bool;

    /// Check the program can execute against the current context state
    fn validate_program(&mut self, program: ProgramHandle);

    /// Status of the last validation
    fn program_validate_status(&self, program: ProgramHandle) -> bool;

    /// Full link/validate diagnostic log
    fn program_info_log(&self, program: ProgramHandle) -> String;

    /// Bind a program for subsequent draws (None unbinds)
    fn use_program(&mut self, program: Option<ProgramHandle>);

    /// Release a program object
    fn delete_program(&mut self, program: ProgramHandle);

    /// Resolve a uniform by name (None when the program has no such active uniform)
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;

    /// Set a vec4 uniform on the bound program
    fn uniform_4f(&mut self, location: UniformLocation, value: Vec4);

    // ===== BUFFERS AND VERTEX ARRAYS =====

    /// Create a vertex array object
    fn create_vertex_array(&mut self) -> Result<VertexArrayHandle>;

    /// Bind a vertex array object (None unbinds)
    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayHandle>);

    /// Release a vertex array object
    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle);

    /// Create a buffer object
    fn create_buffer(&mut self) -> Result<BufferHandle>;

    /// Bind a buffer to a target (None unbinds)
    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferHandle>);

    /// Upload `data` to the buffer bound at `target`, replacing its storage
    fn buffer_data(&mut self, target: BufferTarget, data: &[u8], usage: BufferUsage);

    /// Read back the first `len` bytes of a buffer
    ///
    /// Must not disturb the array or element bindings.
    fn read_buffer(&mut self, buffer: BufferHandle, len: usize) -> Vec<u8>;

    /// Enable a vertex attribute slot on the bound vertex array
    fn enable_vertex_attribute(&mut self, location: u32);

    /// Describe a float attribute sourced from the bound array buffer
    fn vertex_attribute_pointer(&mut self, attribute: &VertexAttribute, stride: u32);

    /// Release a buffer object
    fn delete_buffer(&mut self, buffer: BufferHandle);

    // ===== FRAME =====

    /// Set the viewport rectangle
    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Set the color used by `clear`
    fn clear_color(&mut self, color: Vec4);

    /// Clear the selected buffers of the bound framebuffer
    fn clear(&mut self, mask: ClearMask);

    /// Non-indexed draw of `count` vertices starting at `first`
    fn draw_arrays(&mut self, topology: PrimitiveTopology, first: u32, count: u32);

    /// Indexed draw of `count` indices from the bound element buffer
    fn draw_elements(&mut self, topology: PrimitiveTopology, count: u32, index_type: IndexType);

    /// Read RGBA8 pixels from the bound framebuffer (bottom-left origin)
    fn read_pixels(&mut self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8>;

    /// Pop one pending error code (0 when the queue is empty)
    fn get_error(&mut self) -> u32;
}
