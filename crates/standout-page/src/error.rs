//! Error types for discovery, building and rendering.
//!
//! Each stage of the pipeline has its own error type so callers can tell a
//! broken template directory apart from a broken template or a bad payload:
//!
//! | Stage | Error | Raised by |
//! |-------|-------|-----------|
//! | Layout/partial discovery | [`DiscoveryError`] | [`find_files`](crate::find_files), [`collect_by_tag`](crate::collect_by_tag) |
//! | Reading and compiling sources | [`BuildError`] | [`TemplateBuilder`](crate::TemplateBuilder) |
//! | Running a compiled template | [`ExecutionError`] | [`CompiledTemplate`](crate::CompiledTemplate) |
//!
//! The render entry points return [`RenderError`], which wraps the last two.

use std::io;
use std::path::PathBuf;

/// Boxed error produced by a template engine backend.
pub type EngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while scanning the template directory for layouts and partials.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The root directory does not exist.
    #[error("Template directory not found: {}", .path.display())]
    RootNotFound { path: PathBuf },

    /// The root exists but is not a directory.
    #[error("Not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },

    /// A directory or entry could not be read.
    #[error("Failed to read \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised while assembling and compiling a template.
///
/// A build error is never cached; the next request for the same name
/// goes back to disk.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A source file (partial or target) is missing or unreadable.
    #[error("Failed to read template \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The engine rejected the sources, usually a syntax error.
    #[error("Failed to compile template \"{name}\": {source}")]
    Compile {
        name: String,
        #[source]
        source: EngineError,
    },
}

impl BuildError {
    /// Create a compile error from any engine error.
    pub fn compile(name: impl Into<String>, source: impl Into<EngineError>) -> Self {
        Self::Compile {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Errors raised while running a compiled template against a payload.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    /// The template failed at runtime (undefined field, failing helper, I/O on the sink).
    #[error("Failed to execute template \"{name}\": {source}")]
    Execute {
        name: String,
        #[source]
        source: EngineError,
    },

    /// The payload could not be turned into template data.
    #[error("Failed to serialize template data: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rendered output was not valid UTF-8.
    #[error("Rendered output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl ExecutionError {
    /// Create an execution error from any engine error.
    pub fn execute(name: impl Into<String>, source: impl Into<EngineError>) -> Self {
        Self::Execute {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Error returned by the render entry points.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl RenderError {
    /// Returns true if the template could not be resolved.
    pub fn is_build(&self) -> bool {
        matches!(self, RenderError::Build(_))
    }

    /// Returns true if the template resolved but failed while running.
    pub fn is_execution(&self) -> bool {
        matches!(self, RenderError::Execution(_))
    }
}

/// Error loading a [`RendererConfig`](crate::RendererConfig) from YAML.
#[derive(Debug, thiserror::Error)]
#[error("Invalid renderer configuration: {0}")]
pub struct ConfigError(#[from] serde_yaml::Error);
