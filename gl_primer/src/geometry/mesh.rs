/// Mesh - a vertex array with its vertex buffer and optional index buffer

use crate::error::Result;
use crate::graphics_device::{
    BufferUsage, GraphicsDevice, PrimitiveTopology, VertexArrayHandle, VertexLayout,
};
use crate::geometry::{upload_indices, upload_vertices, GeometryBuffer, IndexBuffer, LOG_SOURCE};
use crate::engine_debug;

/// Parameters of the draw call a mesh issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    /// Non-indexed draw of `count` vertices starting at `first`
    Arrays { first: u32, count: u32 },
    /// Indexed draw over `count` indices of the element buffer
    Indexed { count: u32 },
}

impl DrawCall {
    /// Vertices consumed by the draw (index count for indexed draws)
    pub fn vertex_count(&self) -> u32 {
        match self {
            DrawCall::Arrays { count, .. } => *count,
            DrawCall::Indexed { count } => *count,
        }
    }
}

/// Drawable geometry
///
/// Creating a mesh leaves its vertex array bound.
#[derive(Debug)]
pub struct Mesh {
    vertex_array: VertexArrayHandle,
    vertices: GeometryBuffer,
    indices: Option<IndexBuffer>,
    topology: PrimitiveTopology,
}

impl Mesh {
    /// Create a vertex array and upload static geometry into it
    ///
    /// Order: bind the vertex array, upload vertices and attribute pointers,
    /// then the element buffer. On failure everything created so far is
    /// deleted.
    pub fn new(
        device: &mut dyn GraphicsDevice,
        vertices: &[f32],
        layout: VertexLayout,
        indices: Option<&[u32]>,
    ) -> Result<Self> {
        let vertex_array = device.create_vertex_array()?;
        device.bind_vertex_array(Some(vertex_array));

        let vertex_buffer = match upload_vertices(device, vertices, layout, BufferUsage::Static) {
            Ok(buffer) => buffer,
            Err(e) => {
                discard_vertex_array(device, vertex_array);
                return Err(e);
            }
        };

        let index_buffer = match indices {
            Some(indices) => match upload_indices(device, indices) {
                Ok(buffer) => Some(buffer),
                Err(e) => {
                    vertex_buffer.release(device);
                    discard_vertex_array(device, vertex_array);
                    return Err(e);
                }
            },
            None => None,
        };

        engine_debug!(
            LOG_SOURCE,
            "Mesh created: vertex array {}, {} vertices, {} indices",
            vertex_array.0,
            vertex_buffer.vertex_count(),
            index_buffer.map(|b| b.index_count()).unwrap_or(0)
        );

        Ok(Self {
            vertex_array,
            vertices: vertex_buffer,
            indices: index_buffer,
            topology: PrimitiveTopology::TriangleList,
        })
    }

    /// Use another primitive topology (default: triangle list)
    pub fn with_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    /// Bind the vertex array (attribute layout and element buffer)
    pub fn bind(&self, device: &mut dyn GraphicsDevice) {
        device.bind_vertex_array(Some(self.vertex_array));
    }

    /// Draw call covering the whole mesh
    pub fn draw_call(&self) -> DrawCall {
        match &self.indices {
            Some(indices) => DrawCall::Indexed { count: indices.index_count() },
            None => DrawCall::Arrays { first: 0, count: self.vertices.vertex_count() },
        }
    }

    /// Issue the draw call; the mesh and a program must be bound
    pub fn draw(&self, device: &mut dyn GraphicsDevice) -> DrawCall {
        match &self.indices {
            Some(indices) => {
                device.draw_elements(self.topology, indices.index_count(), indices.index_type());
            }
            None => device.draw_arrays(self.topology, 0, self.vertices.vertex_count()),
        }
        self.draw_call()
    }

    /// Delete the vertex array and both buffers
    pub fn release(self, device: &mut dyn GraphicsDevice) {
        discard_vertex_array(device, self.vertex_array);
        self.vertices.release(device);
        if let Some(indices) = self.indices {
            indices.release(device);
        }
    }

    pub fn vertex_array(&self) -> VertexArrayHandle {
        self.vertex_array
    }

    pub fn vertex_buffer(&self) -> &GeometryBuffer {
        &self.vertices
    }

    pub fn index_buffer(&self) -> Option<&IndexBuffer> {
        self.indices.as_ref()
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    /// Primitives produced by one draw
    pub fn primitive_count(&self) -> u32 {
        self.topology.primitive_count(self.draw_call().vertex_count())
    }
}

fn discard_vertex_array(device: &mut dyn GraphicsDevice, vertex_array: VertexArrayHandle) {
    device.bind_vertex_array(None);
    device.delete_vertex_array(vertex_array);
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
