//! Error kinds for a flatten run.
//!
//! Every kind is fatal. There is no retry tier; the run stops at the first
//! error and whatever was already written stays on disk.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlattenError {
    /// Bad root path or an output sink that cannot be created.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Filesystem failure while walking the tree.
    #[error("failed to walk {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A candidate file could not be read, or the sink could not be written.
    #[error("I/O error on {}: {source}", path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FlattenError {
    pub fn configuration(message: impl Into<String>) -> Self {
        FlattenError::Configuration {
            message: message.into(),
        }
    }

    pub fn traversal(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FlattenError::Traversal {
            path: path.into(),
            source,
        }
    }

    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FlattenError::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            FlattenError::Configuration { .. } => 2,
            FlattenError::Traversal { .. } => 3,
            FlattenError::FileIo { .. } => 4,
        }
    }
}

impl From<walkdir::Error> for FlattenError {
    fn from(err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("<walk>"));
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        FlattenError::Traversal { path, source }
    }
}
