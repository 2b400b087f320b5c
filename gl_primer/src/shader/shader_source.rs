/// Shader source text, from a file or inline

use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Where the text of one shader stage comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSource {
    /// UTF-8 text file, read in full
    File(PathBuf),
    /// Text embedded in the program
    Literal(String),
}

impl ShaderSource {
    /// Source read from `path`
    pub fn file(path: impl Into<PathBuf>) -> Self {
        ShaderSource::File(path.into())
    }

    /// Inline source text
    pub fn literal(text: impl Into<String>) -> Self {
        ShaderSource::Literal(text.into())
    }

    /// Short human-readable origin for log lines
    pub fn describe(&self) -> String {
        match self {
            ShaderSource::File(path) => path.display().to_string(),
            ShaderSource::Literal(_) => "<literal>".to_string(),
        }
    }

    /// Load the source text
    ///
    /// Literal text is returned unchanged. File text has every line
    /// terminated by `\n`, CRLF endings included. No preprocessing or include
    /// resolution is performed.
    pub fn load(&self) -> Result<String> {
        match self {
            ShaderSource::Literal(text) => Ok(text.clone()),
            ShaderSource::File(path) => {
                let text = fs::read_to_string(path).map_err(|e| Error::ShaderSourceLoad {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
                Ok(terminate_lines(&text))
            }
        }
    }
}

impl From<&str> for ShaderSource {
    fn from(text: &str) -> Self {
        ShaderSource::Literal(text.to_string())
    }
}

fn terminate_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    for line in text.lines() {
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "shader_source_tests.rs"]
mod tests;
