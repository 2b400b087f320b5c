/// Graphics device module - the device trait and the types flowing through it

// Module declarations
pub mod graphics_device;
pub mod shader;
pub mod buffer;
pub mod config;
pub mod gl_error;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use shader::*;
pub use buffer::*;
pub use config::*;
pub use gl_error::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
