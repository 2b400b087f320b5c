/// OpenGlDevice - GraphicsDevice implementation over raw GL 3.3 core entry points
///
/// Entry points are loaded once per process through the context's
/// `get_proc_address`. The device must only be used on the thread where that
/// context is current.

use std::ffi::{c_void, CStr, CString};
use std::marker::PhantomData;
use std::ptr;

use gl::types::{GLchar, GLint, GLsizei, GLsizeiptr, GLuint};
use gl_primer::glam::Vec4;
use gl_primer::primer::render::{
    BufferHandle, BufferTarget, BufferUsage, ClearMask, IndexType, PrimitiveTopology,
    ProgramHandle, ShaderHandle, ShaderStage, UniformLocation, VertexArrayHandle, VertexAttribute,
};
use gl_primer::primer::{Error, GraphicsDevice, Result};
use gl_primer::{engine_err, engine_error, engine_info};

use crate::opengl_format::{
    bool_to_gl, buffer_target_to_gl, buffer_usage_to_gl, index_type_to_gl, shader_stage_to_gl,
    topology_to_gl,
};

const LOG_SOURCE: &str = "primer::opengl";

/// Entry points checked after loading; a missing one means the loader failed
const REQUIRED_ENTRY_POINTS: &[(&str, fn() -> bool)] = &[
    ("glGetString", gl::GetString::is_loaded),
    ("glGetError", gl::GetError::is_loaded),
    ("glCreateShader", gl::CreateShader::is_loaded),
    ("glShaderSource", gl::ShaderSource::is_loaded),
    ("glCompileShader", gl::CompileShader::is_loaded),
    ("glCreateProgram", gl::CreateProgram::is_loaded),
    ("glLinkProgram", gl::LinkProgram::is_loaded),
    ("glValidateProgram", gl::ValidateProgram::is_loaded),
    ("glGetUniformLocation", gl::GetUniformLocation::is_loaded),
    ("glGenVertexArrays", gl::GenVertexArrays::is_loaded),
    ("glGenBuffers", gl::GenBuffers::is_loaded),
    ("glBufferData", gl::BufferData::is_loaded),
    ("glGetBufferSubData", gl::GetBufferSubData::is_loaded),
    ("glVertexAttribPointer", gl::VertexAttribPointer::is_loaded),
    ("glDrawArrays", gl::DrawArrays::is_loaded),
    ("glDrawElements", gl::DrawElements::is_loaded),
    ("glReadPixels", gl::ReadPixels::is_loaded),
];

/// OpenGL graphics device
pub struct OpenGlDevice {
    version: String,
    // GL calls are only valid on the context thread
    _not_send: PhantomData<*const ()>,
}

impl OpenGlDevice {
    /// Load every GL entry point through `loader`
    ///
    /// The context must be current on the calling thread. Fails with
    /// `Error::LoaderInit` when a required entry point did not resolve; no GL
    /// call is made in that case.
    pub fn load<F>(mut loader: F) -> Result<Self>
    where
        F: FnMut(&str) -> *const c_void,
    {
        gl::load_with(|symbol| loader(symbol));

        let missing: Vec<&str> = REQUIRED_ENTRY_POINTS
            .iter()
            .filter(|(_, is_loaded)| !is_loaded())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            let message = format!("unresolved entry points: {}", missing.join(", "));
            engine_error!(LOG_SOURCE, "GL function loader failed: {}", message);
            return Err(Error::LoaderInit(message));
        }

        let version = unsafe { get_string(gl::VERSION) };
        let renderer = unsafe { get_string(gl::RENDERER) };
        engine_info!(LOG_SOURCE, "OpenGL {} ({})", version, renderer);

        Ok(Self {
            version,
            _not_send: PhantomData,
        })
    }
}

/// Read a driver string (empty when the driver returns null)
unsafe fn get_string(name: gl::types::GLenum) -> String {
    let raw = gl::GetString(name);
    if raw.is_null() {
        return String::new();
    }
    CStr::from_ptr(raw as *const std::os::raw::c_char)
        .to_string_lossy()
        .into_owned()
}

/// Read an info log sized by a preceding INFO_LOG_LENGTH query
unsafe fn read_info_log(
    object: GLuint,
    get_iv: unsafe fn(GLuint, gl::types::GLenum, *mut GLint),
    get_log: unsafe fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar),
) -> String {
    let mut length: GLint = 0;
    get_iv(object, gl::INFO_LOG_LENGTH, &mut length);
    if length <= 0 {
        return String::new();
    }

    let mut buffer = vec![0u8; length as usize];
    let mut written: GLsizei = 0;
    get_log(object, length, &mut written, buffer.as_mut_ptr() as *mut GLchar);
    buffer.truncate(written.clamp(0, length) as usize);
    String::from_utf8_lossy(&buffer).into_owned()
}

impl GraphicsDevice for OpenGlDevice {
    fn version(&self) -> String {
        self.version.clone()
    }

    // ===== SHADERS =====

    fn create_shader(&mut self, stage: ShaderStage) -> Result<ShaderHandle> {
        let name = unsafe { gl::CreateShader(shader_stage_to_gl(stage)) };
        if name == 0 {
            return Err(engine_err!(LOG_SOURCE, "glCreateShader({}) returned 0", stage));
        }
        Ok(ShaderHandle(name))
    }

    fn shader_source(&mut self, shader: ShaderHandle, source: &str) {
        // Explicit length: the text does not need a NUL terminator
        let text = source.as_ptr() as *const GLchar;
        let length = source.len() as GLint;
        unsafe { gl::ShaderSource(shader.0, 1, &text, &length) };
    }

    fn compile_shader(&mut self, shader: ShaderHandle) {
        unsafe { gl::CompileShader(shader.0) };
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        let mut status: GLint = 0;
        unsafe { gl::GetShaderiv(shader.0, gl::COMPILE_STATUS, &mut status) };
        status == gl::TRUE as GLint
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        unsafe { read_info_log(shader.0, gl::GetShaderiv, gl::GetShaderInfoLog) }
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        unsafe { gl::DeleteShader(shader.0) };
    }

    // ===== PROGRAMS =====

    fn create_program(&mut self) -> Result<ProgramHandle> {
        let name = unsafe { gl::CreateProgram() };
        if name == 0 {
            return Err(engine_err!(LOG_SOURCE, "glCreateProgram returned 0"));
        }
        Ok(ProgramHandle(name))
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
        unsafe { gl::AttachShader(program.0, shader.0) };
    }

    fn link_program(&mut self, program: ProgramHandle) {
        unsafe { gl::LinkProgram(program.0) };
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        let mut status: GLint = 0;
        unsafe { gl::GetProgramiv(program.0, gl::LINK_STATUS, &mut status) };
        status == gl::TRUE as GLint
    }

    fn validate_program(&mut self, program: ProgramHandle) {
        unsafe { gl::ValidateProgram(program.0) };
    }

    fn program_validate_status(&self, program: ProgramHandle) -> bool {
        let mut status: GLint = 0;
        unsafe { gl::GetProgramiv(program.0, gl::VALIDATE_STATUS, &mut status) };
        status == gl::TRUE as GLint
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        unsafe { read_info_log(program.0, gl::GetProgramiv, gl::GetProgramInfoLog) }
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        unsafe { gl::UseProgram(program.map(|p| p.0).unwrap_or(0)) };
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        unsafe { gl::DeleteProgram(program.0) };
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let name = CString::new(name).ok()?;
        let location = unsafe { gl::GetUniformLocation(program.0, name.as_ptr()) };
        (location >= 0).then_some(UniformLocation(location))
    }

    fn uniform_4f(&mut self, location: UniformLocation, value: Vec4) {
        unsafe { gl::Uniform4f(location.0, value.x, value.y, value.z, value.w) };
    }

    // ===== BUFFERS AND VERTEX ARRAYS =====

    fn create_vertex_array(&mut self) -> Result<VertexArrayHandle> {
        let mut name: GLuint = 0;
        unsafe { gl::GenVertexArrays(1, &mut name) };
        if name == 0 {
            return Err(engine_err!(LOG_SOURCE, "glGenVertexArrays returned no name"));
        }
        Ok(VertexArrayHandle(name))
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayHandle>) {
        unsafe { gl::BindVertexArray(vertex_array.map(|v| v.0).unwrap_or(0)) };
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        unsafe { gl::DeleteVertexArrays(1, &vertex_array.0) };
    }

    fn create_buffer(&mut self) -> Result<BufferHandle> {
        let mut name: GLuint = 0;
        unsafe { gl::GenBuffers(1, &mut name) };
        if name == 0 {
            return Err(engine_err!(LOG_SOURCE, "glGenBuffers returned no name"));
        }
        Ok(BufferHandle(name))
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferHandle>) {
        unsafe { gl::BindBuffer(buffer_target_to_gl(target), buffer.map(|b| b.0).unwrap_or(0)) };
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        unsafe {
            gl::BufferData(
                buffer_target_to_gl(target),
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
                buffer_usage_to_gl(usage),
            )
        };
    }

    fn read_buffer(&mut self, buffer: BufferHandle, len: usize) -> Vec<u8> {
        // COPY_READ_BUFFER leaves the array and element bindings untouched
        unsafe {
            let mut previous: GLint = 0;
            gl::GetIntegerv(gl::COPY_READ_BUFFER_BINDING, &mut previous);
            gl::BindBuffer(gl::COPY_READ_BUFFER, buffer.0);

            let mut size: GLint = 0;
            gl::GetBufferParameteriv(gl::COPY_READ_BUFFER, gl::BUFFER_SIZE, &mut size);
            let len = len.min(size.max(0) as usize);

            let mut bytes = vec![0u8; len];
            if len > 0 {
                gl::GetBufferSubData(
                    gl::COPY_READ_BUFFER,
                    0,
                    len as GLsizeiptr,
                    bytes.as_mut_ptr() as *mut c_void,
                );
            }

            gl::BindBuffer(gl::COPY_READ_BUFFER, previous as GLuint);
            bytes
        }
    }

    fn enable_vertex_attribute(&mut self, location: u32) {
        unsafe { gl::EnableVertexAttribArray(location) };
    }

    fn vertex_attribute_pointer(&mut self, attribute: &VertexAttribute, stride: u32) {
        unsafe {
            gl::VertexAttribPointer(
                attribute.location,
                attribute.components as GLint,
                gl::FLOAT,
                bool_to_gl(attribute.normalized),
                stride as GLsizei,
                attribute.offset as usize as *const c_void,
            )
        };
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        unsafe { gl::DeleteBuffers(1, &buffer.0) };
    }

    // ===== FRAME =====

    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        unsafe { gl::Viewport(x, y, width as GLsizei, height as GLsizei) };
    }

    fn clear_color(&mut self, color: Vec4) {
        unsafe { gl::ClearColor(color.x, color.y, color.z, color.w) };
    }

    fn clear(&mut self, mask: ClearMask) {
        let mut bits = 0;
        if mask.contains(ClearMask::COLOR) {
            bits |= gl::COLOR_BUFFER_BIT;
        }
        if mask.contains(ClearMask::DEPTH) {
            bits |= gl::DEPTH_BUFFER_BIT;
        }
        if mask.contains(ClearMask::STENCIL) {
            bits |= gl::STENCIL_BUFFER_BIT;
        }
        unsafe { gl::Clear(bits) };
    }

    fn draw_arrays(&mut self, topology: PrimitiveTopology, first: u32, count: u32) {
        unsafe { gl::DrawArrays(topology_to_gl(topology), first as GLint, count as GLsizei) };
    }

    fn draw_elements(&mut self, topology: PrimitiveTopology, count: u32, index_type: IndexType) {
        unsafe {
            gl::DrawElements(
                topology_to_gl(topology),
                count as GLsizei,
                index_type_to_gl(index_type),
                ptr::null(),
            )
        };
    }

    fn read_pixels(&mut self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        unsafe {
            gl::PixelStorei(gl::PACK_ALIGNMENT, 1);
            gl::ReadPixels(
                x,
                y,
                width as GLsizei,
                height as GLsizei,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                pixels.as_mut_ptr() as *mut c_void,
            );
        }
        pixels
    }

    fn get_error(&mut self) -> u32 {
        unsafe { gl::GetError() }
    }
}
