use std::sync::Arc;

use rand::rngs::StdRng;

use crate::{DataView, RngSource, Stackable};

use super::{
    BatchDataLoader, Batcher, DataLoader, FixBatchStrategy, MultiThreadDataLoader, StackBatcher,
};

/// A builder for data loaders.
///
/// Defaults: batch size 1, partial final batches kept, no shuffling, and
/// parallel fetch with a single prefetch worker. Disable the background
/// worker with [`sequential`](DataLoaderBuilder::sequential).
pub struct DataLoaderBuilder<I, O> {
    batcher: Arc<dyn Batcher<I, O>>,
    batch_size: usize,
    partial: bool,
    shuffle: Option<RngSource>,
    num_threads: usize,
}

impl<I, O> DataLoaderBuilder<I, O>
where
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    /// Creates a new data loader builder with the given batcher.
    pub fn new<B>(batcher: B) -> Self
    where
        B: Batcher<I, O> + 'static,
    {
        Self {
            batcher: Arc::new(batcher),
            batch_size: 1,
            partial: true,
            shuffle: None,
            num_threads: 1,
        }
    }

    /// Sets the number of observations per batch.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        assert!(batch_size > 0, "batch size must be positive");
        self.batch_size = batch_size;
        self
    }

    /// Sets whether a final batch smaller than the batch size is yielded.
    pub fn partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    /// Shuffles the observations from the given random source, drawing a
    /// fresh permutation each time an iteration starts.
    pub fn shuffle<R>(mut self, rng: R) -> Self
    where
        R: Into<RngSource>,
    {
        self.shuffle = Some(rng.into());
        self
    }

    /// Sets the number of background workers fetching batches.
    pub fn num_workers(mut self, num_workers: usize) -> Self {
        assert!(num_workers > 0, "worker count must be positive");
        self.num_threads = num_workers;
        self
    }

    /// Fetches batches inline on the consuming thread instead of
    /// prefetching them in the background.
    pub fn sequential(mut self) -> Self {
        self.num_threads = 0;
        self
    }

    /// Builds the data loader.
    pub fn build<D>(self, dataset: D) -> Arc<dyn DataLoader<O>>
    where
        D: DataView<I> + 'static,
    {
        let dataset: Arc<dyn DataView<I>> = Arc::new(dataset);
        let rng = self.shuffle.map(StdRng::from);

        if self.num_threads == 0 {
            return Arc::new(BatchDataLoader::new(
                Box::new(FixBatchStrategy::new(self.batch_size)),
                dataset,
                self.batcher,
                self.partial,
                rng,
            ));
        }

        Arc::new(MultiThreadDataLoader::new(
            dataset,
            self.batcher,
            self.batch_size,
            self.partial,
            self.num_threads,
            rng,
        ))
    }
}

impl<I> DataLoaderBuilder<I, I::Stacked>
where
    I: Stackable + Send + Sync + 'static,
    I::Stacked: Send + 'static,
{
    /// Creates a builder collating batches with
    /// [`stackobs`](crate::stackobs).
    pub fn stacking() -> Self {
        Self::new(StackBatcher)
    }
}
