use std::path::PathBuf;
use thiserror::Error;

/// Malformed document tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("TABLE_ARITY_MISMATCH: row has {actual} cells but the table has {expected} columns")]
    ArityMismatch { expected: usize, actual: usize },
}

/// Failure while turning a tree into text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    #[error("UNSUPPORTED_NODE: no renderer handles '{0}' nodes")]
    UnsupportedNode(&'static str),

    #[error("FRONT_MATTER_ERROR: {0}")]
    FrontMatter(String),
}

impl From<toml::ser::Error> for EmitError {
    fn from(err: toml::ser::Error) -> Self {
        EmitError::FrontMatter(err.to_string())
    }
}

/// Failure of a generation run
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("{page}: {source}")]
    Emit {
        page: String,
        #[source]
        source: EmitError,
    },

    #[error("OUTPUT_WRITE_ERROR: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;
