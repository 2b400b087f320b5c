//! Unit tests for error.rs
//!
//! Tests Error variants, Display output and the fatal/advisory split.

use super::{Error, Result};
use crate::graphics_device::ShaderStage;

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("glCreateShader returned 0".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("glCreateShader returned 0"));
}

#[test]
fn test_out_of_memory_display() {
    assert_eq!(format!("{}", Error::OutOfMemory), "Out of GPU memory");
}

#[test]
fn test_shader_compile_display_names_stage() {
    let err = Error::ShaderCompile {
        stage: ShaderStage::Fragment,
        log: "0:4(1): error: syntax error".to_string(),
    };
    let display = format!("{}", err);
    assert!(display.starts_with("Fragment shader failed to compile"));
    assert!(display.contains("syntax error"));
}

#[test]
fn test_shader_source_load_display() {
    let err = Error::ShaderSourceLoad {
        path: "shaders/missing.vert".to_string(),
        message: "No such file or directory".to_string(),
    };
    let display = format!("{}", err);
    assert!(display.contains("shaders/missing.vert"));
    assert!(display.contains("No such file"));
}

#[test]
fn test_program_errors_display() {
    let link = format!("{}", Error::ProgramLink("missing main".to_string()));
    assert!(link.contains("link"));
    assert!(link.contains("missing main"));

    let validate = format!("{}", Error::ProgramValidate("no VAO bound".to_string()));
    assert!(validate.contains("validate"));
    assert!(validate.contains("no VAO bound"));
}

#[test]
fn test_window_and_loader_display() {
    let window = format!("{}", Error::WindowCreation("no display".to_string()));
    assert!(window.contains("Window creation failed"));

    let loader = format!("{}", Error::LoaderInit("glCreateShader".to_string()));
    assert!(loader.contains("loader"));
    assert!(loader.contains("glCreateShader"));
}

// ============================================================================
// FATAL / ADVISORY
// ============================================================================

#[test]
fn test_only_validation_is_advisory() {
    assert!(!Error::ProgramValidate(String::new()).is_fatal());

    assert!(Error::ProgramLink(String::new()).is_fatal());
    assert!(Error::LoaderInit(String::new()).is_fatal());
    assert!(Error::WindowCreation(String::new()).is_fatal());
    assert!(Error::OutOfMemory.is_fatal());
    assert!(Error::ShaderCompile { stage: ShaderStage::Vertex, log: String::new() }.is_fatal());
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::OutOfMemory;
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_clone() {
    let err1 = Error::ShaderCompile { stage: ShaderStage::Vertex, log: "bad".to_string() };
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));
}

#[test]
fn test_result_with_question_mark() {
    fn inner() -> Result<u32> {
        Err(Error::InvalidResource("nope".to_string()))
    }

    fn outer() -> Result<u32> {
        let value = inner()?;
        Ok(value + 1)
    }

    assert!(matches!(outer(), Err(Error::InvalidResource(_))));
}
