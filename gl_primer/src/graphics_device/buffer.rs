/// Buffer targets, usage hints and vertex attribute layout

/// Buffer binding target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data (GL_ARRAY_BUFFER)
    Array,
    /// Element indices (GL_ELEMENT_ARRAY_BUFFER), recorded into the bound vertex array
    ElementArray,
}

/// Buffer usage hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferUsage {
    /// Uploaded once, drawn many times
    #[default]
    Static,
    /// Updated occasionally
    Dynamic,
    /// Updated every frame
    Stream,
}

/// Element index type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    /// 16-bit unsigned indices
    U16,
    /// 32-bit unsigned indices
    U32,
}

impl IndexType {
    /// Size in bytes of one index
    pub fn size_bytes(&self) -> u32 {
        match self {
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }
}

/// One float vertex attribute inside an interleaved vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location (`layout(location = N)`)
    pub location: u32,
    /// Float components per vertex (1..=4)
    pub components: u32,
    /// Normalize integer data (kept for API parity, floats ignore it)
    pub normalized: bool,
    /// Byte offset inside one vertex
    pub offset: u32,
}

impl VertexAttribute {
    /// Size in bytes of this attribute (saturates on absurd component counts)
    pub fn size_bytes(&self) -> u32 {
        self.components.saturating_mul(std::mem::size_of::<f32>() as u32)
    }

    /// First byte past this attribute inside one vertex
    pub fn end_byte(&self) -> u64 {
        self.offset as u64 + self.components as u64 * std::mem::size_of::<f32>() as u64
    }
}

/// Byte layout of interleaved vertex data
///
/// The layout is a contract with the uploaded data: the graphics API does not
/// check it, a mismatch only produces wrong output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Bytes between the starts of two consecutive vertices
    pub stride: u32,
    /// Attributes in the vertex
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Build a tightly packed layout from per-attribute component counts
    ///
    /// Locations are assigned in order starting at 0.
    pub fn packed(components: &[u32]) -> Self {
        let mut offset = 0;
        let attributes = components
            .iter()
            .enumerate()
            .map(|(location, &count)| {
                let attribute = VertexAttribute {
                    location: location as u32,
                    components: count,
                    normalized: false,
                    offset,
                };
                offset = offset.saturating_add(attribute.size_bytes());
                attribute
            })
            .collect();

        Self { stride: offset, attributes }
    }

    /// Single 2D position at location 0 (stride 8 bytes)
    pub fn positions_2d() -> Self {
        Self::packed(&[2])
    }

    /// Number of whole vertices contained in `byte_len` bytes
    pub fn vertex_count(&self, byte_len: usize) -> u32 {
        if self.stride == 0 {
            return 0;
        }
        (byte_len / self.stride as usize) as u32
    }

    /// Describe every inconsistency between this layout and `byte_len` bytes of data
    ///
    /// Empty when the layout is consistent.
    pub fn mismatches(&self, byte_len: usize) -> Vec<String> {
        let mut problems = Vec::new();

        if self.attributes.is_empty() {
            problems.push("layout has no attributes".to_string());
        }
        if self.stride == 0 {
            problems.push("stride is zero".to_string());
        } else if byte_len % self.stride as usize != 0 {
            problems.push(format!(
                "{} bytes is not a whole number of {}-byte vertices",
                byte_len, self.stride
            ));
        }
        for attribute in &self.attributes {
            if attribute.components == 0 || attribute.components > 4 {
                problems.push(format!(
                    "attribute {} has {} components (expected 1..=4)",
                    attribute.location, attribute.components
                ));
            }
            let end = attribute.end_byte();
            if end > self.stride as u64 {
                problems.push(format!(
                    "attribute {} ends at byte {} past stride {}",
                    attribute.location, end, self.stride
                ));
            }
        }

        problems
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
