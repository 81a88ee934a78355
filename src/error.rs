use thiserror::Error;

use crate::base::TokenId;

/// Errors raised while preparing a corpus.
#[derive(Debug, Error)]
pub enum PrepError {
    /// A token of message `message` has no vocabulary id.
    #[error("token {token:?} in message {message} is not in the vocabulary")]
    UnknownToken { token: String, message: usize },
    #[error("token id {0} is not in the vocabulary")]
    UnknownId(TokenId),
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),
    #[error("malformed pipeline configuration: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PrepError>;
