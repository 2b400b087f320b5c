//! GL error queue helpers
//!
//! The driver keeps a queue of error codes that `get_error` pops one at a time.
//! These helpers drain that queue and turn raw codes into named values. Errors
//! found here are informational: they are logged and never cancel a frame.

use std::fmt;

use crate::graphics_device::GraphicsDevice;

/// Upper bound on pops per drain (a lost context may keep reporting)
pub const MAX_ERRORS_PER_DRAIN: usize = 64;

/// Named GL error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlError {
    NoError,
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    InvalidFramebufferOperation,
    OutOfMemory,
    StackUnderflow,
    StackOverflow,
    /// Any code without a name in this table
    Unknown(u32),
}

impl GlError {
    /// Map a raw code to a named error
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => GlError::NoError,
            0x0500 => GlError::InvalidEnum,
            0x0501 => GlError::InvalidValue,
            0x0502 => GlError::InvalidOperation,
            0x0503 => GlError::StackOverflow,
            0x0504 => GlError::StackUnderflow,
            0x0505 => GlError::OutOfMemory,
            0x0506 => GlError::InvalidFramebufferOperation,
            other => GlError::Unknown(other),
        }
    }

    /// Raw code
    pub fn code(&self) -> u32 {
        match self {
            GlError::NoError => 0,
            GlError::InvalidEnum => 0x0500,
            GlError::InvalidValue => 0x0501,
            GlError::InvalidOperation => 0x0502,
            GlError::StackOverflow => 0x0503,
            GlError::StackUnderflow => 0x0504,
            GlError::OutOfMemory => 0x0505,
            GlError::InvalidFramebufferOperation => 0x0506,
            GlError::Unknown(code) => *code,
        }
    }

    /// Symbolic name of the code
    pub fn name(&self) -> &'static str {
        match self {
            GlError::NoError => "GL_NO_ERROR",
            GlError::InvalidEnum => "GL_INVALID_ENUM",
            GlError::InvalidValue => "GL_INVALID_VALUE",
            GlError::InvalidOperation => "GL_INVALID_OPERATION",
            GlError::InvalidFramebufferOperation => "GL_INVALID_FRAMEBUFFER_OPERATION",
            GlError::OutOfMemory => "GL_OUT_OF_MEMORY",
            GlError::StackUnderflow => "GL_STACK_UNDERFLOW",
            GlError::StackOverflow => "GL_STACK_OVERFLOW",
            GlError::Unknown(_) => "UNKNOWN_GL_ERROR",
        }
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:04X})", self.name(), self.code())
    }
}

/// Pop every pending error code
pub fn drain_errors(device: &mut dyn GraphicsDevice) -> Vec<GlError> {
    let mut errors = Vec::new();
    for _ in 0..MAX_ERRORS_PER_DRAIN {
        match GlError::from_code(device.get_error()) {
            GlError::NoError => break,
            error => errors.push(error),
        }
    }
    errors
}

/// Discard every pending error code
pub fn clear_errors(device: &mut dyn GraphicsDevice) {
    drain_errors(device);
}

/// Drain pending errors and log each distinct code once
///
/// Returns every drained error, duplicates included.
pub fn check_errors(device: &mut dyn GraphicsDevice, source: &str) -> Vec<GlError> {
    let errors = drain_errors(device);

    let mut reported: Vec<GlError> = Vec::new();
    for error in &errors {
        if !reported.contains(error) {
            crate::engine_error!(source, "OpenGL error: {}", error);
            reported.push(*error);
        }
    }

    errors
}

#[cfg(test)]
#[path = "gl_error_tests.rs"]
mod tests;
