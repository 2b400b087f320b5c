/// Shader program - link, validation and the uniform location cache

use glam::Vec4;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, ProgramHandle, ShaderStage, UniformLocation};
use crate::shader::shader_compiler::diagnostic_or_default;
use crate::shader::{compile_stage, CompiledStage, ShaderSource, LOG_SOURCE};
use crate::{engine_debug, engine_error, engine_info, engine_warn};

/// A linked GPU program
///
/// Only link success produces a `ShaderProgram`, so holding one means the link
/// succeeded. Validation is tracked separately: `validate_status` stays `None`
/// until `validate` runs, and the program is usable (safe to bind and draw
/// with) once it reports success.
#[derive(Debug)]
pub struct ShaderProgram {
    handle: ProgramHandle,
    validate_status: Option<bool>,
    diagnostic: String,
    /// name -> resolved location, misses included
    uniforms: FxHashMap<String, Option<UniformLocation>>,
}

impl ShaderProgram {
    /// Link one vertex and one fragment stage into a new program
    ///
    /// Every given stage is released whatever the outcome. A failed link
    /// deletes the program object and returns `Error::ProgramLink` with the
    /// driver log; no validation is attempted on it.
    pub fn link(device: &mut dyn GraphicsDevice, stages: Vec<CompiledStage>) -> Result<Self> {
        let vertex = stages.iter().filter(|s| s.stage() == ShaderStage::Vertex).count();
        let fragment = stages.iter().filter(|s| s.stage() == ShaderStage::Fragment).count();
        if vertex != 1 || fragment != 1 {
            let message = format!(
                "a program needs exactly one vertex and one fragment stage (got {} vertex, {} fragment)",
                vertex, fragment
            );
            release_stages(device, stages);
            engine_error!(LOG_SOURCE, "{}", message);
            return Err(Error::InvalidResource(message));
        }

        let handle = match device.create_program() {
            Ok(handle) => handle,
            Err(e) => {
                release_stages(device, stages);
                return Err(e);
            }
        };

        for stage in &stages {
            device.attach_shader(handle, stage.handle());
        }
        device.link_program(handle);

        // Stages are not needed once the link attempt is over
        release_stages(device, stages);

        if !device.program_link_status(handle) {
            let log = diagnostic_or_default(device.program_info_log(handle));
            device.delete_program(handle);
            engine_error!(LOG_SOURCE, "Program failed to link\n{}", log);
            return Err(Error::ProgramLink(log));
        }

        engine_info!(LOG_SOURCE, "Program successfully linked");
        Ok(Self {
            handle,
            validate_status: None,
            diagnostic: String::new(),
            uniforms: FxHashMap::default(),
        })
    }

    /// Validate against the current context state (bound vertex array included)
    ///
    /// Records the status and diagnostic. A failure is logged at warn level
    /// and returned as `Error::ProgramValidate`; the program is kept.
    pub fn validate(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        device.validate_program(self.handle);
        let valid = device.program_validate_status(self.handle);
        self.validate_status = Some(valid);

        if !valid {
            let log = diagnostic_or_default(device.program_info_log(self.handle));
            engine_warn!(LOG_SOURCE, "Program failed to validate\n{}", log);
            self.diagnostic = log.clone();
            return Err(Error::ProgramValidate(log));
        }

        self.diagnostic.clear();
        engine_info!(LOG_SOURCE, "Program successfully validated");
        Ok(())
    }

    /// Load, compile, link and validate a vertex/fragment pair
    ///
    /// Validation failure is advisory here: the program is returned with
    /// `validate_status() == Some(false)`. Build the geometry first so a
    /// vertex array is bound when validation runs.
    pub fn build(
        device: &mut dyn GraphicsDevice,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
    ) -> Result<Self> {
        let vertex_text = vertex.load()?;
        let fragment_text = fragment.load()?;
        engine_debug!(
            LOG_SOURCE,
            "Building program from {} and {}",
            vertex.describe(),
            fragment.describe()
        );

        let vertex_stage = compile_stage(device, &vertex_text, ShaderStage::Vertex)?;
        let fragment_stage = match compile_stage(device, &fragment_text, ShaderStage::Fragment) {
            Ok(stage) => stage,
            Err(e) => {
                vertex_stage.release(device);
                return Err(e);
            }
        };

        let mut program = Self::link(device, vec![vertex_stage, fragment_stage])?;
        // Status is recorded on the program
        let _ = program.validate(device);
        Ok(program)
    }

    /// Resolve a uniform location, asking the device at most once per name
    ///
    /// Unknown names are cached as `None` and logged once.
    pub fn uniform_location(&mut self, device: &dyn GraphicsDevice, name: &str) -> Option<UniformLocation> {
        if let Some(cached) = self.uniforms.get(name) {
            return *cached;
        }

        let location = device.uniform_location(self.handle, name);
        if location.is_none() {
            engine_warn!(LOG_SOURCE, "Uniform '{}' is not active in program {}", name, self.handle.0);
        }
        self.uniforms.insert(name.to_string(), location);
        location
    }

    /// Set a vec4 uniform on this program, which must be bound
    ///
    /// Returns false when the program has no such uniform.
    pub fn set_uniform_vec4(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: Vec4) -> bool {
        match self.uniform_location(device, name) {
            Some(location) => {
                device.uniform_4f(location, value);
                true
            }
            None => false,
        }
    }

    /// Bind for subsequent draws
    pub fn bind(&self, device: &mut dyn GraphicsDevice) {
        device.use_program(Some(self.handle));
    }

    /// Delete the program object
    pub fn release(self, device: &mut dyn GraphicsDevice) {
        device.delete_program(self.handle);
        engine_debug!(LOG_SOURCE, "Program {} released", self.handle.0);
    }

    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    /// `None` until validated
    pub fn validate_status(&self) -> Option<bool> {
        self.validate_status
    }

    /// Validated successfully (linking is implied by construction)
    pub fn is_usable(&self) -> bool {
        self.validate_status == Some(true)
    }

    /// Last validation diagnostic (empty after a successful validation)
    pub fn diagnostic(&self) -> &str {
        &self.diagnostic
    }
}

fn release_stages(device: &mut dyn GraphicsDevice, stages: Vec<CompiledStage>) {
    for stage in stages {
        stage.release(device);
    }
}

#[cfg(test)]
#[path = "shader_program_tests.rs"]
mod tests;
