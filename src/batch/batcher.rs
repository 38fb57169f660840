use crate::{stackobs, DataError, Stackable};

/// Collates the observations of one chunk into the batch value yielded to
/// the consumer.
pub trait Batcher<I, O>: Send + Sync {
    /// Batches the given observations.
    fn batch(&self, items: Vec<I>) -> Result<O, DataError>;
}

/// The default batcher: collates observations with [`stackobs`].
pub struct StackBatcher;

impl<I> Batcher<I, I::Stacked> for StackBatcher
where
    I: Stackable + Send + Sync,
    I::Stacked: Send,
{
    fn batch(&self, items: Vec<I>) -> Result<I::Stacked, DataError> {
        stackobs(items)
    }
}

/// A batcher that yields the raw chunk of observations, uncollated.
pub struct VecBatcher;

impl<I: Send + Sync> Batcher<I, Vec<I>> for VecBatcher {
    fn batch(&self, items: Vec<I>) -> Result<Vec<I>, DataError> {
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn stack_batcher_collates() {
        let batch = StackBatcher
            .batch(vec![array![1.0, 2.0], array![3.0, 4.0]])
            .unwrap();

        assert_eq!(batch, array![[1.0, 3.0], [2.0, 4.0]]);
    }

    #[test]
    fn vec_batcher_passes_through() {
        let batch = VecBatcher.batch(vec!["a", "b"]).unwrap();
        assert_eq!(batch, vec!["a", "b"]);
    }
}
