//! Error types for the out step

use std::path::PathBuf;

use pipeline_resource_client::ClientError;
use pipeline_resource_core::InputError;
use thiserror::Error;

/// Broad classification of an [`OutError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request document is malformed
    InvalidInput,
    /// The CI server rejected a call or could not be reached
    Client,
    /// A config or vars file could not be read
    Io,
    /// A vars file is not a YAML mapping
    VarsFile,
}

/// All errors that abort an out run
#[derive(Debug, Error)]
pub enum OutError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid vars file {}: {source}", path.display())]
    VarsFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl OutError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OutError::InvalidInput(_) => ErrorKind::InvalidInput,
            OutError::Client(_) => ErrorKind::Client,
            OutError::Io { .. } => ErrorKind::Io,
            OutError::VarsFile { .. } => ErrorKind::VarsFile,
        }
    }
}

/// Convenience constructor for [`OutError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> OutError {
    OutError::Io {
        path: path.into(),
        source,
    }
}
