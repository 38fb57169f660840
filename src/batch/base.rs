use derive_new::new;

use crate::DataError;

/// The progress of a data loader iteration.
#[derive(new, Clone, Debug, PartialEq, Eq)]
pub struct Progress {
    /// The number of observations fetched so far.
    pub items_processed: usize,
    /// The total number of observations in the underlying container.
    pub items_total: usize,
}

/// An iterator over the batches of one data loader iteration.
///
/// Collation failures are yielded in place of the affected batch and end
/// the iteration; they are user-facing errors, not conditions the loader
/// retries.
pub trait DataLoaderIterator<O>: Iterator<Item = Result<O, DataError>> {
    /// Returns the current progress.
    fn progress(&self) -> Progress;
}

/// An object that iterates over mini-batches of a data container.
///
/// Every call to [`iter`](DataLoader::iter) starts a fresh iteration: a
/// shuffling loader draws a new permutation each time, so restarts are
/// possible but not idempotent unless the rng is reseeded identically.
pub trait DataLoader<O>: Send + Sync {
    /// Returns an iterator over the batches.
    fn iter(&self) -> Box<dyn DataLoaderIterator<O> + '_>;

    /// Returns the number of observations the loader draws from.
    fn num_items(&self) -> usize;
}
