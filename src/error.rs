//! Unified error types for ontodiff.
//!
//! Each stage has its own error type ([`OntologyLoadError`], [`RenderError`],
//! [`SerializeError`], [`ReportError`]). [`OntoDiffError`] wraps them with a
//! chain of context strings for the pipeline and CLI layers.

use crate::compare::OntologyLoadError;
use crate::model::VersionSide;
use crate::render::RenderError;
use crate::reports::ReportError;
use crate::serialize::SerializeError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ontodiff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum OntoDiffError {
    /// One of the two ontology documents could not be loaded
    #[error("Failed to load ontology: {context}")]
    Load {
        context: String,
        #[source]
        source: OntologyLoadError,
    },

    /// The change set violated the render contract
    #[error("Rendering failed: {context}")]
    Render {
        context: String,
        #[source]
        source: RenderError,
    },

    /// Encoding or writing the statement graph failed
    #[error("Serialization failed: {context}")]
    Serialize {
        context: String,
        #[source]
        source: SerializeError,
    },

    /// Text or JSON report generation failed
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportError,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Convenient Result type for ontodiff operations
pub type Result<T> = std::result::Result<T, OntoDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl OntoDiffError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Which side of the version pair failed to load, if this is a load error.
    #[must_use]
    pub const fn failed_side(&self) -> Option<VersionSide> {
        match self {
            Self::Load { source, .. } => Some(source.side),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from stage error types
// ============================================================================

impl From<OntologyLoadError> for OntoDiffError {
    fn from(source: OntologyLoadError) -> Self {
        Self::Load {
            context: String::new(),
            source,
        }
    }
}

impl From<RenderError> for OntoDiffError {
    fn from(source: RenderError) -> Self {
        Self::Render {
            context: String::new(),
            source,
        }
    }
}

impl From<SerializeError> for OntoDiffError {
    fn from(source: SerializeError) -> Self {
        Self::Serialize {
            context: String::new(),
            source,
        }
    }
}

impl From<ReportError> for OntoDiffError {
    fn from(source: ReportError) -> Self {
        Self::Report {
            context: String::new(),
            source,
        }
    }
}

impl From<std::io::Error> for OntoDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context is prepended, so the outermost caller reads first:
///
/// ```ignore
/// use ontodiff::error::ErrorContext;
///
/// let comparison = comparator
///     .compare(&older, &newer, &properties)
///     .with_context(|| format!("comparing {} with {}", older.display(), newer.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<OntoDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: OntoDiffError, new_ctx: &str) -> OntoDiffError {
    match err {
        OntoDiffError::Load { context, source } => OntoDiffError::Load {
            context: chain_context(new_ctx, &context),
            source,
        },
        OntoDiffError::Render { context, source } => OntoDiffError::Render {
            context: chain_context(new_ctx, &context),
            source,
        },
        OntoDiffError::Serialize { context, source } => OntoDiffError::Serialize {
            context: chain_context(new_ctx, &context),
            source,
        },
        OntoDiffError::Report { context, source } => OntoDiffError::Report {
            context: chain_context(new_ctx, &context),
            source,
        },
        OntoDiffError::Io {
            path,
            message,
            source,
        } => OntoDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        OntoDiffError::Config(msg) => OntoDiffError::Config(chain_context(new_ctx, &msg)),
        OntoDiffError::Validation(msg) => OntoDiffError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// Returns "`new`: `existing`", or just `new` when nothing existed yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
