use indexmap::IndexMap;

use crate::base::{PAD_ID, TokenId};
use crate::error::{PrepError, Result};

/// Bidirectional token <-> id mapping ordered by descending frequency.
///
/// Ids start at 1; [`PAD_ID`] is never assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    token_to_id: IndexMap<String, TokenId>,
    id_to_token: IndexMap<TokenId, String>,
}

// distinct tokens with their counts, in order of first occurrence
fn get_stats<'a>(corpus: impl IntoIterator<Item = &'a str>) -> IndexMap<&'a str, usize> {
    let mut counts = IndexMap::new();
    for token in corpus {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

impl Vocabulary {
    /// Build from a flat sequence of tokens.
    ///
    /// Equal counts keep their first-occurrence order (the sort is stable),
    /// so the same input sequence always yields the same ids.
    pub fn build<'a>(corpus: impl IntoIterator<Item = &'a str>) -> Self {
        let mut sorted: Vec<(&str, usize)> = get_stats(corpus).into_iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));

        let mut token_to_id = IndexMap::with_capacity(sorted.len());
        let mut id_to_token = IndexMap::with_capacity(sorted.len());
        for (id, (token, _)) in (PAD_ID + 1..).zip(sorted) {
            token_to_id.insert(token.to_string(), id);
            id_to_token.insert(id, token.to_string());
        }
        tracing::debug!(size = token_to_id.len(), "built vocabulary");

        Vocabulary {
            token_to_id,
            id_to_token,
        }
    }

    /// Build from normalized messages, splitting each on whitespace.
    pub fn from_messages<S: AsRef<str>>(messages: &[S]) -> Self {
        Self::build(messages.iter().flat_map(|m| m.as_ref().split_whitespace()))
    }

    pub fn id(&self, token: &str) -> Option<TokenId> {
        self.token_to_id.get(token).copied()
    }

    pub fn token(&self, id: TokenId) -> Option<&str> {
        self.id_to_token.get(&id).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.token_to_id.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.token_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_to_id.is_empty()
    }

    pub fn token_to_id(&self) -> &IndexMap<String, TokenId> {
        &self.token_to_id
    }

    pub fn id_to_token(&self) -> &IndexMap<TokenId, String> {
        &self.id_to_token
    }

    /// Tokens with their ids, most frequent first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TokenId)> {
        self.token_to_id.iter().map(|(t, &id)| (t.as_str(), id))
    }

    /// Turn ids back into a normalized message. Padding ids are skipped.
    pub fn decode(&self, ids: &[TokenId]) -> Result<String> {
        let mut words = Vec::with_capacity(ids.len());
        for &id in ids.iter().filter(|&&id| id != PAD_ID) {
            let token = self.token(id).ok_or(PrepError::UnknownId(id))?;
            words.push(token);
        }
        Ok(words.join(" "))
    }
}
