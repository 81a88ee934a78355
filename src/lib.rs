//! Preprocessing for StockTwits-style sentiment classification.
//!
//! Raw messages are normalized into reserved-token streams, encoded against a
//! frequency-ordered vocabulary, padded, split and batched for an external
//! training loop.

pub mod base;
pub mod batch;
pub mod config;
pub mod dataset;
pub mod encoder;
pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod vocab;

pub use base::{Label, PAD_ID, Preprocessor, TokenId};
pub use batch::{Batches, batches};
pub use config::PipelineConfig;
pub use dataset::{Partition, Splits, drop_empty, train_val_test_split, zero_pad};
pub use encoder::{Sentiment, encode_labels, encode_messages};
pub use error::{PrepError, Result};
pub use normalizer::{Normalizer, ReservedToken, normalize, normalize_all};
pub use pipeline::{Pipeline, Prepared};
pub use vocab::Vocabulary;
