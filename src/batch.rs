/// Consecutive `batch_size`-row chunks of two parallel slices.
///
/// Rows past the last full batch are never yielded. The iterator borrows its
/// inputs, so cloning it (or calling [`batches`] again) restarts from the top.
#[derive(Debug, Clone)]
pub struct Batches<'a, X, Y> {
    x: &'a [X],
    y: &'a [Y],
    batch_size: usize,
}

/// # Panics
/// Panics if `batch_size` is zero or the slices differ in length.
pub fn batches<'a, X, Y>(x: &'a [X], y: &'a [Y], batch_size: usize) -> Batches<'a, X, Y> {
    assert!(batch_size > 0, "batch_size must be positive");
    assert_eq!(x.len(), y.len(), "features and labels must have equal length");

    let n_batches = x.len() / batch_size;
    let end = n_batches * batch_size;
    if end < x.len() {
        tracing::debug!(dropped = x.len() - end, batch_size, "dropping trailing partial batch");
    }
    Batches {
        x: &x[..end],
        y: &y[..end],
        batch_size,
    }
}

impl<'a, X, Y> Iterator for Batches<'a, X, Y> {
    type Item = (&'a [X], &'a [Y]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.x.is_empty() {
            return None;
        }
        let (x_chunk, x_rest) = self.x.split_at(self.batch_size);
        let (y_chunk, y_rest) = self.y.split_at(self.batch_size);
        self.x = x_rest;
        self.y = y_rest;
        Some((x_chunk, y_chunk))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.x.len() / self.batch_size;
        (n, Some(n))
    }
}

impl<X, Y> ExactSizeIterator for Batches<'_, X, Y> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_trailing_partial_batch() {
        let x: Vec<u32> = (0..7).collect();
        let y: Vec<u8> = vec![1, 0, 1, 0, 1, 0, 1];
        let chunks: Vec<_> = batches(&x, &y, 3).collect();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], (&[0, 1, 2][..], &[1, 0, 1][..]));
        assert_eq!(chunks[1], (&[3, 4, 5][..], &[0, 1, 0][..]));
    }

    #[test]
    fn test_exact_size_and_restart() {
        let x = vec!['a'; 10];
        let y = vec![0u8; 10];
        let it = batches(&x, &y, 5);
        assert_eq!(it.len(), 2);
        let first: Vec<_> = it.clone().collect();
        let second: Vec<_> = it.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fewer_rows_than_batch() {
        let x = [1, 2];
        let y = [0u8, 1];
        assert_eq!(batches(&x, &y, 3).count(), 0);
    }

    #[test]
    #[should_panic]
    fn test_zero_batch_size() {
        let _ = batches(&[1], &[0u8], 0);
    }
}
