//! Error types for GL Primer
//!
//! This module defines the error types used throughout the pipeline,
//! from shader loading and compilation to window and context creation.

use std::fmt;

use crate::graphics_device::ShaderStage;

/// Result type for GL Primer operations
pub type Result<T> = std::result::Result<T, Error>;

/// GL Primer errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL call failed, object could not be created)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (wrong stage set, unusable program, etc.)
    InvalidResource(String),

    /// Initialization failed (subsystem used before it was set up)
    InitializationFailed(String),

    /// Shader source text could not be read
    ShaderSourceLoad {
        /// Location that was read
        path: String,
        /// Underlying I/O message
        message: String,
    },

    /// A single shader stage failed to compile
    ShaderCompile {
        /// Stage that failed
        stage: ShaderStage,
        /// Driver diagnostic log (never empty)
        log: String,
    },

    /// Program failed to link (carries the driver log)
    ProgramLink(String),

    /// Program failed to validate (advisory, carries the driver log)
    ProgramValidate(String),

    /// Window or GL context creation failed
    WindowCreation(String),

    /// The GL function loader could not resolve the entry points
    LoaderInit(String),
}

impl Error {
    /// Whether the error should abort the application
    ///
    /// Validation failures are diagnostics only; every other variant is fatal
    /// for the operation that produced it.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::ProgramValidate(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::ShaderSourceLoad { path, message } => {
                write!(f, "Failed to load shader source '{}': {}", path, message)
            }
            Error::ShaderCompile { stage, log } => {
                write!(f, "{} shader failed to compile: {}", stage.name(), log)
            }
            Error::ProgramLink(log) => write!(f, "Program failed to link: {}", log),
            Error::ProgramValidate(log) => write!(f, "Program failed to validate: {}", log),
            Error::WindowCreation(msg) => write!(f, "Window creation failed: {}", msg),
            Error::LoaderInit(msg) => write!(f, "GL function loader failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
