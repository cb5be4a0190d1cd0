use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApidocError {
    // Model errors
    #[error("MODEL_PARSE_ERROR: failed to parse API model: {0}")]
    ModelParse(String),

    #[error("MODEL_INVALID_ROOT: expected 'model' at the root of the API model, found '{0}'")]
    ModelInvalidRoot(String),

    #[error("MODEL_UNEXPECTED_MEMBER: '{child}' ({child_kind}) cannot be a member of '{parent}' ({parent_kind})")]
    ModelUnexpectedMember {
        parent: String,
        parent_kind: String,
        child: String,
        child_kind: String,
    },

    #[error("MODEL_INVALID_OVERLOAD: '{0}' has overload index 0 (indices are 1-based)")]
    ModelInvalidOverload(String),

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for ApidocError {
    fn from(err: serde_json::Error) -> Self {
        ApidocError::ModelParse(err.to_string())
    }
}

impl From<toml::de::Error> for ApidocError {
    fn from(err: toml::de::Error) -> Self {
        ApidocError::ConfigParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApidocError>;
