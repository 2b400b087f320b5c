/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Keeps every object the pipeline creates in plain maps so tests can check
/// lifetimes (what was deleted), buffer contents (readback), binding state and
/// the draw calls issued. Compilation is simulated with a few syntax checks;
/// link, validate and object creation failures can be injected.

use std::cell::Cell;
use std::collections::{HashMap, VecDeque};

use glam::Vec4;

use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, ShaderHandle, ProgramHandle, BufferHandle, VertexArrayHandle,
    UniformLocation, ClearMask, PrimitiveTopology, ShaderStage, BufferTarget,
    BufferUsage, IndexType, VertexAttribute,
};

const GL_INVALID_OPERATION: u32 = 0x0502;

// ============================================================================
// Mock objects
// ============================================================================

#[derive(Debug, Clone)]
pub struct MockShader {
    pub stage: ShaderStage,
    pub source: String,
    pub compiled: bool,
    pub log: String,
    pub deleted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MockProgram {
    pub attached: Vec<ShaderHandle>,
    pub linked: bool,
    pub validated: bool,
    pub log: String,
    /// Active uniforms, location = index
    pub uniforms: Vec<String>,
    pub deleted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MockVertexArray {
    pub element_buffer: Option<BufferHandle>,
    pub enabled: Vec<u32>,
    /// (attribute, stride, source array buffer)
    pub attributes: Vec<(VertexAttribute, u32, Option<BufferHandle>)>,
}

#[derive(Debug, Clone)]
pub struct MockBuffer {
    pub data: Vec<u8>,
    pub usage: Option<BufferUsage>,
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub topology: PrimitiveTopology,
    /// Vertices consumed (index count for indexed draws)
    pub count: u32,
    pub indexed: bool,
    pub program: Option<ProgramHandle>,
    pub vertex_array: Option<VertexArrayHandle>,
}

// ============================================================================
// Mock device
// ============================================================================

#[derive(Debug)]
pub struct MockGraphicsDevice {
    /// Names of every call, in order
    pub commands: Vec<String>,
    pub shaders: HashMap<u32, MockShader>,
    pub programs: HashMap<u32, MockProgram>,
    pub buffers: HashMap<u32, MockBuffer>,
    pub deleted_buffers: Vec<BufferHandle>,
    pub vertex_arrays: HashMap<u32, MockVertexArray>,
    pub deleted_vertex_arrays: Vec<VertexArrayHandle>,
    pub bound_array_buffer: Option<BufferHandle>,
    pub bound_vertex_array: Option<VertexArrayHandle>,
    pub current_program: Option<ProgramHandle>,
    pub uniform_values: HashMap<i32, Vec4>,
    pub draws: Vec<DrawRecord>,
    pub viewport: (i32, i32, u32, u32),
    pub clear_color: Vec4,
    /// Number of `uniform_location` calls
    pub uniform_queries: Cell<u32>,

    /// Forced compile failure per stage (log text)
    pub compile_failures: HashMap<ShaderStage, String>,
    /// Forced link failure (log text)
    pub link_failure: Option<String>,
    /// Forced validate failure (log text)
    pub validate_failure: Option<String>,
    /// Make every create_* call fail
    pub fail_object_creation: bool,
    /// Error code queued after every buffer_data call
    pub buffer_data_error: Option<u32>,

    errors: VecDeque<u32>,
    next_name: u32,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            shaders: HashMap::new(),
            programs: HashMap::new(),
            buffers: HashMap::new(),
            deleted_buffers: Vec::new(),
            vertex_arrays: HashMap::new(),
            deleted_vertex_arrays: Vec::new(),
            bound_array_buffer: None,
            bound_vertex_array: None,
            current_program: None,
            uniform_values: HashMap::new(),
            draws: Vec::new(),
            viewport: (0, 0, 640, 480),
            clear_color: Vec4::ZERO,
            uniform_queries: Cell::new(0),
            compile_failures: HashMap::new(),
            link_failure: None,
            validate_failure: None,
            fail_object_creation: false,
            buffer_data_error: None,
            errors: VecDeque::new(),
            next_name: 1,
        }
    }

    /// Queue a raw error code for `get_error`
    pub fn push_error(&mut self, code: u32) {
        self.errors.push_back(code);
    }

    /// Number of recorded calls named `name`
    pub fn count(&self, name: &str) -> usize {
        self.commands.iter().filter(|c| c.as_str() == name).count()
    }

    /// Shaders not yet deleted
    pub fn live_shader_count(&self) -> usize {
        self.shaders.values().filter(|s| !s.deleted).count()
    }

    /// Programs not yet deleted
    pub fn live_program_count(&self) -> usize {
        self.programs.values().filter(|p| !p.deleted).count()
    }

    /// Buffers not yet deleted
    pub fn live_buffer_count(&self) -> usize {
        self.buffers.len()
    }

    fn allocate_name(&mut self) -> Result<u32> {
        if self.fail_object_creation {
            return Err(Error::BackendError("mock object creation disabled".to_string()));
        }
        let name = self.next_name;
        self.next_name += 1;
        Ok(name)
    }

    fn bound_element_buffer(&self) -> Option<BufferHandle> {
        self.bound_vertex_array
            .and_then(|vao| self.vertex_arrays.get(&vao.0))
            .and_then(|vao| vao.element_buffer)
    }

    fn bound_buffer(&self, target: BufferTarget) -> Option<BufferHandle> {
        match target {
            BufferTarget::Array => self.bound_array_buffer,
            BufferTarget::ElementArray => self.bound_element_buffer(),
        }
    }

    /// Simulated GLSL front end: a few structural checks with driver-like messages
    fn check_source(source: &str) -> std::result::Result<(), String> {
        if !source.lines().any(|line| line.trim_start().starts_with("#version")) {
            return Err("0:1(1): error: missing #version directive".to_string());
        }
        if !source.contains("main") {
            return Err("0:1(1): error: no function with name 'main'".to_string());
        }

        let mut depth: i32 = 0;
        for (index, raw) in source.lines().enumerate() {
            let line = raw.trim();
            let inside_block = depth > 0;
            depth += line.matches('{').count() as i32;
            depth -= line.matches('}').count() as i32;

            if depth < 0 {
                return Err(format!("0:{}(1): error: syntax error, unexpected '}}'", index + 1));
            }
            if !inside_block || line.is_empty() || line.starts_with("//") || line.starts_with('#') {
                continue;
            }
            if !(line.ends_with(';') || line.ends_with('{') || line.ends_with('}')) {
                return Err(format!(
                    "0:{}(1): error: syntax error, unexpected end of statement, expecting ';'",
                    index + 1
                ));
            }
        }

        if depth != 0 {
            return Err("0:1(1): error: syntax error, unexpected end of file".to_string());
        }
        Ok(())
    }

    /// Names declared with `uniform <type> <name>;`
    fn declared_uniforms(source: &str) -> Vec<String> {
        source
            .lines()
            .filter_map(|line| {
                let mut tokens = line.split_whitespace();
                match (tokens.next(), tokens.next(), tokens.next()) {
                    (Some("uniform"), Some(_), Some(name)) => {
                        Some(name.trim_end_matches(';').to_string())
                    }
                    _ => None,
                }
            })
            .collect()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn version(&self) -> String {
        "3.3.0 Mock".to_string()
    }

    // ===== SHADERS =====

    fn create_shader(&mut self, stage: ShaderStage) -> Result<ShaderHandle> {
        let name = self.allocate_name()?;
        self.commands.push("create_shader".to_string());
        self.shaders.insert(name, MockShader {
            stage,
            source: String::new(),
            compiled: false,
            log: String::new(),
            deleted: false,
        });
        Ok(ShaderHandle(name))
    }

    fn shader_source(&mut self, shader: ShaderHandle, source: &str) {
        self.commands.push("shader_source".to_string());
        if let Some(record) = self.shaders.get_mut(&shader.0) {
            record.source = source.to_string();
        }
    }

    fn compile_shader(&mut self, shader: ShaderHandle) {
        self.commands.push("compile_shader".to_string());
        let forced = self
            .shaders
            .get(&shader.0)
            .and_then(|record| self.compile_failures.get(&record.stage).cloned());
        if let Some(record) = self.shaders.get_mut(&shader.0) {
            let outcome = match forced {
                Some(log) => Err(log),
                None => Self::check_source(&record.source),
            };
            match outcome {
                Ok(()) => {
                    record.compiled = true;
                    record.log.clear();
                }
                Err(log) => {
                    record.compiled = false;
                    record.log = log;
                }
            }
        }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        self.shaders.get(&shader.0).map(|s| s.compiled).unwrap_or(false)
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        self.shaders.get(&shader.0).map(|s| s.log.clone()).unwrap_or_default()
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        self.commands.push("delete_shader".to_string());
        if let Some(record) = self.shaders.get_mut(&shader.0) {
            record.deleted = true;
        }
    }

    // ===== PROGRAMS =====

    fn create_program(&mut self) -> Result<ProgramHandle> {
        let name = self.allocate_name()?;
        self.commands.push("create_program".to_string());
        self.programs.insert(name, MockProgram::default());
        Ok(ProgramHandle(name))
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
        self.commands.push("attach_shader".to_string());
        if let Some(record) = self.programs.get_mut(&program.0) {
            record.attached.push(shader);
        }
    }

    fn link_program(&mut self, program: ProgramHandle) {
        self.commands.push("link_program".to_string());
        let Some(record) = self.programs.get(&program.0) else {
            return;
        };

        let attached: Vec<&MockShader> = record
            .attached
            .iter()
            .filter_map(|handle| self.shaders.get(&handle.0))
            .collect();
        let has_stage = |stage: ShaderStage| attached.iter().any(|s| s.stage == stage && s.compiled);

        let outcome = if let Some(log) = &self.link_failure {
            Err(log.clone())
        } else if !has_stage(ShaderStage::Vertex) {
            Err("error: no compiled vertex shader attached".to_string())
        } else if !has_stage(ShaderStage::Fragment) {
            Err("error: no compiled fragment shader attached".to_string())
        } else {
            Ok(attached.iter().flat_map(|s| Self::declared_uniforms(&s.source)).collect::<Vec<_>>())
        };

        if let Some(record) = self.programs.get_mut(&program.0) {
            match outcome {
                Ok(mut uniforms) => {
                    uniforms.dedup();
                    record.linked = true;
                    record.uniforms = uniforms;
                    record.log.clear();
                }
                Err(log) => {
                    record.linked = false;
                    record.log = log;
                }
            }
        }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        self.programs.get(&program.0).map(|p| p.linked).unwrap_or(false)
    }

    fn validate_program(&mut self, program: ProgramHandle) {
        self.commands.push("validate_program".to_string());
        let no_vertex_array = self.bound_vertex_array.is_none();
        let forced = self.validate_failure.clone();
        if let Some(record) = self.programs.get_mut(&program.0) {
            let outcome = if let Some(log) = forced {
                Err(log)
            } else if !record.linked {
                Err("error: program is not successfully linked".to_string())
            } else if no_vertex_array {
                Err("Validation Failed: No vertex array object bound.".to_string())
            } else {
                Ok(())
            };
            match outcome {
                Ok(()) => record.validated = true,
                Err(log) => {
                    record.validated = false;
                    record.log = log;
                }
            }
        }
    }

    fn program_validate_status(&self, program: ProgramHandle) -> bool {
        self.programs.get(&program.0).map(|p| p.validated).unwrap_or(false)
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        self.programs.get(&program.0).map(|p| p.log.clone()).unwrap_or_default()
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        self.commands.push("use_program".to_string());
        self.current_program = program;
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.commands.push("delete_program".to_string());
        if let Some(record) = self.programs.get_mut(&program.0) {
            record.deleted = true;
        }
        if self.current_program == Some(program) {
            self.current_program = None;
        }
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        self.uniform_queries.set(self.uniform_queries.get() + 1);
        let record = self.programs.get(&program.0)?;
        if !record.linked {
            return None;
        }
        record
            .uniforms
            .iter()
            .position(|uniform| uniform == name)
            .map(|index| UniformLocation(index as i32))
    }

    fn uniform_4f(&mut self, location: UniformLocation, value: Vec4) {
        self.commands.push("uniform_4f".to_string());
        if self.current_program.is_none() {
            self.push_error(GL_INVALID_OPERATION);
            return;
        }
        self.uniform_values.insert(location.0, value);
    }

    // ===== BUFFERS AND VERTEX ARRAYS =====

    fn create_vertex_array(&mut self) -> Result<VertexArrayHandle> {
        let name = self.allocate_name()?;
        self.commands.push("create_vertex_array".to_string());
        self.vertex_arrays.insert(name, MockVertexArray::default());
        Ok(VertexArrayHandle(name))
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayHandle>) {
        self.commands.push("bind_vertex_array".to_string());
        self.bound_vertex_array = vertex_array;
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.commands.push("delete_vertex_array".to_string());
        self.vertex_arrays.remove(&vertex_array.0);
        self.deleted_vertex_arrays.push(vertex_array);
        if self.bound_vertex_array == Some(vertex_array) {
            self.bound_vertex_array = None;
        }
    }

    fn create_buffer(&mut self) -> Result<BufferHandle> {
        let name = self.allocate_name()?;
        self.commands.push("create_buffer".to_string());
        self.buffers.insert(name, MockBuffer { data: Vec::new(), usage: None });
        Ok(BufferHandle(name))
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferHandle>) {
        self.commands.push("bind_buffer".to_string());
        match target {
            BufferTarget::Array => self.bound_array_buffer = buffer,
            BufferTarget::ElementArray => match self.bound_vertex_array {
                Some(vao) => {
                    if let Some(record) = self.vertex_arrays.get_mut(&vao.0) {
                        record.element_buffer = buffer;
                    }
                }
                None => self.push_error(GL_INVALID_OPERATION),
            },
        }
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        self.commands.push("buffer_data".to_string());
        let Some(buffer) = self.bound_buffer(target) else {
            self.push_error(GL_INVALID_OPERATION);
            return;
        };
        if let Some(record) = self.buffers.get_mut(&buffer.0) {
            record.data = data.to_vec();
            record.usage = Some(usage);
        }
        if let Some(code) = self.buffer_data_error {
            self.push_error(code);
        }
    }

    fn read_buffer(&mut self, buffer: BufferHandle, len: usize) -> Vec<u8> {
        self.commands.push("read_buffer".to_string());
        self.buffers
            .get(&buffer.0)
            .map(|record| record.data.iter().copied().take(len).collect())
            .unwrap_or_default()
    }

    fn enable_vertex_attribute(&mut self, location: u32) {
        self.commands.push("enable_vertex_attribute".to_string());
        match self.bound_vertex_array.and_then(|vao| self.vertex_arrays.get_mut(&vao.0)) {
            Some(record) => record.enabled.push(location),
            None => self.push_error(GL_INVALID_OPERATION),
        }
    }

    fn vertex_attribute_pointer(&mut self, attribute: &VertexAttribute, stride: u32) {
        self.commands.push("vertex_attribute_pointer".to_string());
        let source = self.bound_array_buffer;
        match self.bound_vertex_array.and_then(|vao| self.vertex_arrays.get_mut(&vao.0)) {
            Some(record) => record.attributes.push((*attribute, stride, source)),
            None => self.push_error(GL_INVALID_OPERATION),
        }
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        self.commands.push("delete_buffer".to_string());
        self.buffers.remove(&buffer.0);
        self.deleted_buffers.push(buffer);
        if self.bound_array_buffer == Some(buffer) {
            self.bound_array_buffer = None;
        }
    }

    // ===== FRAME =====

    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.commands.push("viewport".to_string());
        self.viewport = (x, y, width, height);
    }

    fn clear_color(&mut self, color: Vec4) {
        self.commands.push("clear_color".to_string());
        self.clear_color = color;
    }

    fn clear(&mut self, _mask: ClearMask) {
        self.commands.push("clear".to_string());
    }

    fn draw_arrays(&mut self, topology: PrimitiveTopology, _first: u32, count: u32) {
        self.commands.push("draw_arrays".to_string());
        if self.bound_vertex_array.is_none() {
            self.push_error(GL_INVALID_OPERATION);
            return;
        }
        self.draws.push(DrawRecord {
            topology,
            count,
            indexed: false,
            program: self.current_program,
            vertex_array: self.bound_vertex_array,
        });
    }

    fn draw_elements(&mut self, topology: PrimitiveTopology, count: u32, _index_type: IndexType) {
        self.commands.push("draw_elements".to_string());
        if self.bound_element_buffer().is_none() {
            self.push_error(GL_INVALID_OPERATION);
            return;
        }
        self.draws.push(DrawRecord {
            topology,
            count,
            indexed: true,
            program: self.current_program,
            vertex_array: self.bound_vertex_array,
        });
    }

    fn read_pixels(&mut self, _x: i32, _y: i32, width: u32, height: u32) -> Vec<u8> {
        // No rasterizer: every pixel reads back as the clear color
        self.commands.push("read_pixels".to_string());
        let rgba = (self.clear_color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
        let pixel = [rgba.x as u8, rgba.y as u8, rgba.z as u8, rgba.w as u8];
        pixel.repeat((width * height) as usize)
    }

    fn get_error(&mut self) -> u32 {
        self.errors.pop_front().unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
