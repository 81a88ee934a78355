use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::base::{Label, PAD_ID, TokenId};
use crate::batch::{Batches, batches};

/// Parallel features/labels arrays. `x.len() == y.len()` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<X> {
    pub x: Vec<X>,
    pub y: Vec<Label>,
}

impl<X> Partition<X> {
    pub fn new(x: Vec<X>, y: Vec<Label>) -> Self {
        assert_eq!(x.len(), y.len(), "features and labels must have equal length");
        Self { x, y }
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Fixed-size batches over this partition; call again to restart.
    pub fn batches(&self, batch_size: usize) -> Batches<'_, X, Label> {
        batches(&self.x, &self.y, batch_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splits<X> {
    pub train: Partition<X>,
    pub val: Partition<X>,
    pub test: Partition<X>,
}

impl<X> Splits<X> {
    pub fn total(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }
}

/// Drop every example whose encoded message is empty, keeping order.
pub fn drop_empty<X: AsRef<[TokenId]>>(messages: Vec<X>, labels: Vec<Label>) -> (Vec<X>, Vec<Label>) {
    assert_eq!(messages.len(), labels.len(), "messages and labels must have equal length");
    let before = messages.len();
    let (messages, labels): (Vec<X>, Vec<Label>) = messages
        .into_iter()
        .zip(labels)
        .filter(|(m, _)| !m.as_ref().is_empty())
        .unzip();
    tracing::debug!(dropped = before - messages.len(), kept = messages.len(), "dropped empty messages");
    (messages, labels)
}

/// Left-pad each message with [`PAD_ID`] to `seq_len`, keeping at most its
/// first `seq_len` ids. Real ids end up in the trailing cells.
pub fn zero_pad<X: AsRef<[TokenId]>>(messages: &[X], seq_len: usize) -> Vec<Vec<TokenId>> {
    messages
        .iter()
        .map(|message| {
            let message = message.as_ref();
            let kept = &message[..message.len().min(seq_len)];
            let mut row = vec![PAD_ID; seq_len];
            row[seq_len - kept.len()..].copy_from_slice(kept);
            row
        })
        .collect()
}

/// Shuffle both arrays with one permutation, then cut the first
/// `floor(n * split_frac)` rows off as train and halve the rest into
/// validation and test.
///
/// `seed` of `Some(n)` always seeds the shuffle, `Some(0)` included; only
/// `None` draws from OS entropy.
///
/// # Panics
/// Panics if the arrays differ in length or `split_frac` is outside `[0, 1]`.
pub fn train_val_test_split<X>(
    messages: Vec<X>,
    labels: Vec<Label>,
    split_frac: f64,
    seed: Option<u64>,
) -> Splits<X> {
    assert_eq!(messages.len(), labels.len(), "messages and labels must have equal length");
    assert!(
        (0.0..=1.0).contains(&split_frac),
        "split_frac ({split_frac}) must be within [0, 1]"
    );

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut pairs: Vec<(X, Label)> = messages.into_iter().zip(labels).collect();
    pairs.shuffle(&mut rng);
    let (mut x, mut y): (Vec<X>, Vec<Label>) = pairs.into_iter().unzip();

    let split_idx = (x.len() as f64 * split_frac) as usize;
    let mut rest_x = x.split_off(split_idx);
    let mut rest_y = y.split_off(split_idx);

    let test_idx = (rest_x.len() as f64 * 0.5) as usize;
    let test_x = rest_x.split_off(test_idx);
    let test_y = rest_y.split_off(test_idx);

    let splits = Splits {
        train: Partition::new(x, y),
        val: Partition::new(rest_x, rest_y),
        test: Partition::new(test_x, test_y),
    };
    tracing::debug!(
        train = splits.train.len(),
        val = splits.val.len(),
        test = splits.test.len(),
        "split dataset"
    );
    splits
}
