//! GPU buffers holding vertex attributes and element indices
//!
//! Each upload creates one buffer object and binds it. Binding state belongs
//! to the context, so the order of uploads decides what later draw calls read:
//! vertex attribute pointers are recorded into the vertex array bound at the
//! time of `upload_vertices`, and so is the element buffer bound by
//! `upload_indices`.

use crate::error::{Error, Result};
use crate::graphics_device::{
    drain_errors, BufferHandle, BufferTarget, BufferUsage, GlError, GraphicsDevice, IndexType,
    VertexLayout,
};
use crate::geometry::LOG_SOURCE;
use crate::{engine_error, engine_trace, engine_warn};

// ============================================================================
// GEOMETRY BUFFER
// ============================================================================

/// Vertex attribute data resident on the GPU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryBuffer {
    handle: BufferHandle,
    layout: VertexLayout,
    usage: BufferUsage,
    byte_len: usize,
    vertex_count: u32,
}

impl GeometryBuffer {
    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    /// Uploaded size in bytes
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Whole vertices in the buffer according to the layout
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Read the uploaded bytes back from the GPU
    pub fn read_back(&self, device: &mut dyn GraphicsDevice) -> Vec<u8> {
        device.read_buffer(self.handle, self.byte_len)
    }

    /// Delete the buffer object
    pub fn release(self, device: &mut dyn GraphicsDevice) {
        device.delete_buffer(self.handle);
    }
}

/// Upload float vertex data and declare its attribute layout
///
/// A vertex array must be bound: the attribute pointers are recorded into it.
/// A layout that does not match the data is logged at warn level and uploaded
/// anyway; the graphics API does not check it either.
pub fn upload_vertices(
    device: &mut dyn GraphicsDevice,
    vertices: &[f32],
    layout: VertexLayout,
    usage: BufferUsage,
) -> Result<GeometryBuffer> {
    let bytes: &[u8] = bytemuck::cast_slice(vertices);
    for problem in layout.mismatches(bytes.len()) {
        engine_warn!(LOG_SOURCE, "Vertex layout mismatch: {}", problem);
    }

    report_pending_errors(device, "vertex");
    let handle = device.create_buffer()?;
    device.bind_buffer(BufferTarget::Array, Some(handle));
    device.buffer_data(BufferTarget::Array, bytes, usage);

    for attribute in &layout.attributes {
        device.enable_vertex_attribute(attribute.location);
        device.vertex_attribute_pointer(attribute, layout.stride);
    }

    if let Err(e) = check_upload(device, "vertex") {
        device.delete_buffer(handle);
        return Err(e);
    }

    let vertex_count = layout.vertex_count(bytes.len());
    engine_trace!(
        LOG_SOURCE,
        "Vertex buffer {} uploaded: {} bytes, {} vertices",
        handle.0,
        bytes.len(),
        vertex_count
    );

    Ok(GeometryBuffer {
        handle,
        layout,
        usage,
        byte_len: bytes.len(),
        vertex_count,
    })
}

// ============================================================================
// INDEX BUFFER
// ============================================================================

/// Element indices resident on the GPU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBuffer {
    handle: BufferHandle,
    index_count: u32,
    index_type: IndexType,
}

impl IndexBuffer {
    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn index_type(&self) -> IndexType {
        self.index_type
    }

    /// Uploaded size in bytes
    pub fn byte_len(&self) -> usize {
        self.index_count as usize * self.index_type.size_bytes() as usize
    }

    /// Read the uploaded bytes back from the GPU
    pub fn read_back(&self, device: &mut dyn GraphicsDevice) -> Vec<u8> {
        device.read_buffer(self.handle, self.byte_len())
    }

    /// Delete the buffer object
    pub fn release(self, device: &mut dyn GraphicsDevice) {
        device.delete_buffer(self.handle);
    }
}

/// Upload 32-bit element indices
///
/// The element binding is part of the bound vertex array, so one must be bound.
pub fn upload_indices(device: &mut dyn GraphicsDevice, indices: &[u32]) -> Result<IndexBuffer> {
    let bytes: &[u8] = bytemuck::cast_slice(indices);

    report_pending_errors(device, "index");
    let handle = device.create_buffer()?;
    device.bind_buffer(BufferTarget::ElementArray, Some(handle));
    device.buffer_data(BufferTarget::ElementArray, bytes, BufferUsage::Static);

    if let Err(e) = check_upload(device, "index") {
        device.delete_buffer(handle);
        return Err(e);
    }

    engine_trace!(LOG_SOURCE, "Index buffer {} uploaded: {} indices", handle.0, indices.len());

    Ok(IndexBuffer {
        handle,
        index_count: indices.len() as u32,
        index_type: IndexType::U32,
    })
}

/// Drain errors left by earlier calls so they are not blamed on the upload
///
/// Logged at warn level, never fatal.
fn report_pending_errors(device: &mut dyn GraphicsDevice, kind: &str) {
    for error in distinct(drain_errors(device)) {
        engine_warn!(LOG_SOURCE, "OpenGL error pending before {} upload: {}", kind, error);
    }
}

/// Drain errors raised by an upload
///
/// Out of memory fails the upload, anything else is a warning.
fn check_upload(device: &mut dyn GraphicsDevice, kind: &str) -> Result<()> {
    let errors = distinct(drain_errors(device));
    if errors.contains(&GlError::OutOfMemory) {
        engine_error!(LOG_SOURCE, "Out of GPU memory while uploading {} data", kind);
        return Err(Error::OutOfMemory);
    }

    for error in errors {
        engine_warn!(LOG_SOURCE, "OpenGL error after {} upload: {}", kind, error);
    }
    Ok(())
}

fn distinct(errors: Vec<GlError>) -> Vec<GlError> {
    let mut unique: Vec<GlError> = Vec::new();
    for error in errors {
        if !unique.contains(&error) {
            unique.push(error);
        }
    }
    unique
}

#[cfg(test)]
#[path = "geometry_buffer_tests.rs"]
mod tests;
