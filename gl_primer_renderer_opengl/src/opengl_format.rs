/// Conversions from gl_primer enums to GL enumerants

use gl::types::{GLboolean, GLenum};
use gl_primer::primer::render::{BufferTarget, BufferUsage, IndexType, PrimitiveTopology, ShaderStage};

pub(crate) fn shader_stage_to_gl(stage: ShaderStage) -> GLenum {
    match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
    }
}

pub(crate) fn buffer_target_to_gl(target: BufferTarget) -> GLenum {
    match target {
        BufferTarget::Array => gl::ARRAY_BUFFER,
        BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
    }
}

pub(crate) fn buffer_usage_to_gl(usage: BufferUsage) -> GLenum {
    match usage {
        BufferUsage::Static => gl::STATIC_DRAW,
        BufferUsage::Dynamic => gl::DYNAMIC_DRAW,
        BufferUsage::Stream => gl::STREAM_DRAW,
    }
}

pub(crate) fn index_type_to_gl(index_type: IndexType) -> GLenum {
    match index_type {
        IndexType::U16 => gl::UNSIGNED_SHORT,
        IndexType::U32 => gl::UNSIGNED_INT,
    }
}

pub(crate) fn topology_to_gl(topology: PrimitiveTopology) -> GLenum {
    match topology {
        PrimitiveTopology::TriangleList => gl::TRIANGLES,
        PrimitiveTopology::TriangleStrip => gl::TRIANGLE_STRIP,
        PrimitiveTopology::LineList => gl::LINES,
        PrimitiveTopology::PointList => gl::POINTS,
    }
}

pub(crate) fn bool_to_gl(value: bool) -> GLboolean {
    if value { gl::TRUE } else { gl::FALSE }
}

#[cfg(test)]
#[path = "opengl_format_tests.rs"]
mod tests;
