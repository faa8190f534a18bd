//! Error types for UFO conversion.

use std::{io, path::PathBuf, process::ExitStatus, result};

use norad::error::FontLoadError;

use crate::compile::Target;

/// Errors that can occur while converting UFO sources.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load UFO {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: FontLoadError,
    },

    #[error("{}: fontinfo has no {field}", path.display())]
    MissingInfo { path: PathBuf, field: &'static str },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to glob {pattern}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to launch {program}: {source}")]
    ToolLaunch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    ToolFailed { program: String, status: ExitStatus, stderr: String },

    #[error("{program} produced an invalid {target} file: {reason}")]
    InvalidArtifact { program: String, target: Target, reason: String },

    #[error("WOFF2 conversion failed: {0}")]
    Woff2(String),

    #[error("failed to convert {}: {source}", path.display())]
    Convert {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("Conversion failed: {succeeded} succeeded, {failed} failed")]
    BatchFailed { succeeded: usize, failed: usize },
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Attach the UFO path that was being converted.
    pub(crate) fn converting(self, path: impl Into<PathBuf>) -> Self {
        Self::Convert { path: path.into(), source: Box::new(self) }
    }
}

pub type Result<T> = result::Result<T, Error>;
