use thiserror::Error;

/// Errors raised while linearizing a single collection.
///
/// Every variant is fatal for the collection being processed. Callers driving
/// several collections decide whether to continue with the next one.
#[derive(Debug, Error)]
pub enum LinearizeError {
    #[error("invalid collection document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed collection: {0}")]
    Structural(String),

    #[error(
        "unrecognized setNextRequest() argument '{argument}' in test script of '{item}' (line {line}): only null or a plain quoted string is supported"
    )]
    UnrecognizedDirectiveArgument {
        item: String,
        line: usize,
        argument: String,
    },

    #[error("setNextRequest() in '{item}' targets '{target}', but no request has that name")]
    UnresolvedJumpTarget { item: String, target: String },
}

pub type Result<T> = std::result::Result<T, LinearizeError>;

impl LinearizeError {
    pub fn structural<S: Into<String>>(message: S) -> Self {
        Self::Structural(message.into())
    }
}
