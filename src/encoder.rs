use crate::base::{Label, TokenId};
use crate::error::{PrepError, Result};
use crate::vocab::Vocabulary;

/// Sentiment tag attached to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Bullish,
    /// Everything that is not exactly `"bullish"`, including `"bearish"`,
    /// empty and unrecognized tags.
    Other,
}

impl Sentiment {
    pub fn from_label(label: &str) -> Self {
        match label {
            "bullish" => Sentiment::Bullish,
            _ => Sentiment::Other,
        }
    }

    pub fn encode(self) -> Label {
        match self {
            Sentiment::Bullish => 1,
            Sentiment::Other => 0,
        }
    }
}

/// Map every token of every normalized message to its vocabulary id.
///
/// There is no unknown-token id: the vocabulary has to be built from a
/// corpus covering `messages`, and the first uncovered token is an error.
pub fn encode_messages<S: AsRef<str>>(messages: &[S], vocab: &Vocabulary) -> Result<Vec<Vec<TokenId>>> {
    messages
        .iter()
        .enumerate()
        .map(|(i, message)| {
            message
                .as_ref()
                .split_whitespace()
                .map(|token| {
                    vocab.id(token).ok_or_else(|| PrepError::UnknownToken {
                        token: token.to_string(),
                        message: i,
                    })
                })
                .collect()
        })
        .collect()
}

/// `"bullish"` becomes 1, any other string silently becomes 0.
pub fn encode_labels<S: AsRef<str>>(labels: &[S]) -> Vec<Label> {
    labels
        .iter()
        .map(|l| Sentiment::from_label(l.as_ref()).encode())
        .collect()
}
