use crate::base::{Label, Preprocessor, TokenId};
use crate::batch::Batches;
use crate::config::PipelineConfig;
use crate::dataset::{Splits, drop_empty, train_val_test_split, zero_pad};
use crate::encoder::{encode_labels, encode_messages};
use crate::error::Result;
use crate::normalizer::Normalizer;
use crate::vocab::Vocabulary;

/// Output of [`Pipeline::prepare`]: the corpus vocabulary plus padded
/// train/validation/test partitions.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub vocab: Vocabulary,
    pub splits: Splits<Vec<TokenId>>,
    pub batch_size: usize,
}

impl Prepared {
    pub fn train_batches(&self) -> Batches<'_, Vec<TokenId>, Label> {
        self.splits.train.batches(self.batch_size)
    }

    pub fn val_batches(&self) -> Batches<'_, Vec<TokenId>, Label> {
        self.splits.val.batches(self.batch_size)
    }

    pub fn test_batches(&self) -> Batches<'_, Vec<TokenId>, Label> {
        self.splits.test.batches(self.batch_size)
    }
}

/// Runs raw `(message, sentiment)` pairs through normalization, vocabulary
/// construction, encoding, filtering, padding and splitting.
#[derive(Debug, Clone)]
pub struct Pipeline<P = Normalizer> {
    config: PipelineConfig,
    preprocessor: P,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Self::with_preprocessor(config, Normalizer)
    }
}

impl<P: Preprocessor> Pipeline<P> {
    pub fn with_preprocessor(config: PipelineConfig, preprocessor: P) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            preprocessor,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn prepare<M: AsRef<str>, L: AsRef<str>>(&self, corpus: &[(M, L)]) -> Result<Prepared> {
        tracing::info!(messages = corpus.len(), "normalizing corpus");
        let normalized: Vec<String> = corpus
            .iter()
            .map(|(message, _)| self.preprocessor.normalize(message.as_ref()))
            .collect();
        let sentiments: Vec<&str> = corpus.iter().map(|(_, label)| label.as_ref()).collect();

        let vocab = Vocabulary::from_messages(&normalized);
        tracing::info!(vocab_size = vocab.len(), "built vocabulary");

        let encoded = encode_messages(&normalized, &vocab)?;
        let labels = encode_labels(&sentiments);
        let (encoded, labels) = drop_empty(encoded, labels);

        let padded = zero_pad(&encoded, self.config.seq_len);
        let splits = train_val_test_split(padded, labels, self.config.split_frac, self.config.seed);
        tracing::info!(
            train = splits.train.len(),
            val = splits.val.len(),
            test = splits.test.len(),
            "prepared partitions"
        );

        Ok(Prepared {
            vocab,
            splits,
            batch_size: self.config.batch_size,
        })
    }
}
