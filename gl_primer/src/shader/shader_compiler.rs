/// Shader compiler - one source text to one compiled stage

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, ShaderHandle, ShaderStage};
use crate::shader::LOG_SOURCE;
use crate::{engine_error, engine_info};

/// Substitute for an empty driver log, so a diagnostic is never blank
pub const NO_DIAGNOSTIC: &str = "no diagnostic reported by driver";

/// A successfully compiled shader stage
///
/// Owns the driver shader object until it is released. Linking releases
/// stages; callers that abandon a stage must call `release`.
#[derive(Debug, PartialEq, Eq)]
pub struct CompiledStage {
    stage: ShaderStage,
    handle: ShaderHandle,
}

impl CompiledStage {
    /// Stage kind
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Driver shader object
    pub fn handle(&self) -> ShaderHandle {
        self.handle
    }

    /// Delete the driver shader object
    pub fn release(self, device: &mut dyn GraphicsDevice) {
        device.delete_shader(self.handle);
    }
}

/// Compile `source` as a `stage` shader
///
/// On failure the full driver log is captured before the failed shader object
/// is deleted, and returned in `Error::ShaderCompile`. Empty source fails
/// without touching the device.
pub fn compile_stage(
    device: &mut dyn GraphicsDevice,
    source: &str,
    stage: ShaderStage,
) -> Result<CompiledStage> {
    if source.trim().is_empty() {
        let log = "shader source is empty".to_string();
        engine_error!(LOG_SOURCE, "{} shader failed to compile: {}", stage, log);
        return Err(Error::ShaderCompile { stage, log });
    }

    let handle = device.create_shader(stage)?;
    device.shader_source(handle, source);
    device.compile_shader(handle);

    if !device.shader_compile_status(handle) {
        let log = diagnostic_or_default(device.shader_info_log(handle));
        device.delete_shader(handle);
        engine_error!(LOG_SOURCE, "{} shader failed to compile\n{}", stage, log);
        return Err(Error::ShaderCompile { stage, log });
    }

    engine_info!(LOG_SOURCE, "{} shader successfully compiled", stage);
    Ok(CompiledStage { stage, handle })
}

/// Trim a driver log, replacing an empty one with `NO_DIAGNOSTIC`
pub(crate) fn diagnostic_or_default(log: String) -> String {
    let trimmed = log.trim_end();
    if trimmed.is_empty() {
        NO_DIAGNOSTIC.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[path = "shader_compiler_tests.rs"]
mod tests;
