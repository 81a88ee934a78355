use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};

/// Options supplied by the training harness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Max tokens retained per message; shorter messages are left-padded.
    pub seq_len: usize,
    /// Fraction of examples reserved for training.
    pub split_frac: f64,
    /// Rows per training step.
    pub batch_size: usize,
    /// Shuffle seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seq_len: 244,
            split_frac: 0.8,
            batch_size: 100,
            seed: None,
        }
    }
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.seq_len == 0 {
            return Err(PrepError::InvalidConfig("seq_len must be positive".into()));
        }
        if self.batch_size == 0 {
            return Err(PrepError::InvalidConfig("batch_size must be positive".into()));
        }
        if !(self.split_frac > 0.0 && self.split_frac <= 1.0) {
            return Err(PrepError::InvalidConfig(format!(
                "split_frac must be in (0, 1], got {}",
                self.split_frac
            )));
        }
        Ok(())
    }
}
