//! Error types for binding generation

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed field '{origin}': {reason}")]
    MalformedField { origin: String, reason: String },

    #[error("field '{origin}': cannot parse element type of '{return_type}'")]
    ListElementType {
        origin: String,
        return_type: String,
    },

    #[error("template parse error at line {line}: {message}")]
    TemplateParse { line: usize, message: String },

    #[error("template render error: {0}")]
    Template(String),

    #[error("descriptor error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
