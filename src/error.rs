use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("duplicate option id: {0}")]
    DuplicateOptionId(String),

    #[error("unknown option id: {0}")]
    UnknownOptionId(String),

    #[error("malformed option id `{id}`: {reason}")]
    MalformedOptionId { id: String, reason: String },

    #[error("value for `{id}` out of range: {reason}")]
    OptionValueOutOfRange { id: String, reason: String },

    #[error("value for `{id}` not allowed: {reason}")]
    OptionValueNotAllowed { id: String, reason: String },

    #[error("failed to parse import payload: {0}")]
    ImportPayloadParse(String),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}
