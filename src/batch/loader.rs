use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;

use crate::{shuffled_indices, DataError, DataView, ObsView};

use super::{BatchStrategy, Batcher, DataLoader, DataLoaderIterator, Progress};

/// A sequential data loader: batches are fetched and collated inline, one
/// chunk at a time, as the consumer asks for them.
pub struct BatchDataLoader<I, O> {
    strategy: Box<dyn BatchStrategy<I>>,
    dataset: Arc<dyn DataView<I>>,
    batcher: Arc<dyn Batcher<I, O>>,
    partial: bool,
    rng: Option<Mutex<StdRng>>,
}

struct BatchDataLoaderIterator<I, O> {
    current_index: usize,
    strategy: Box<dyn BatchStrategy<I>>,
    dataset: Arc<dyn DataView<I>>,
    batcher: Arc<dyn Batcher<I, O>>,
    partial: bool,
    failed: bool,
}

impl<I, O> BatchDataLoader<I, O> {
    /// Creates a new sequential data loader.
    ///
    /// When `rng` is given, each iteration starts from a fresh permutation
    /// drawn from it; the loader is restartable but not idempotent across
    /// restarts. When `partial` is false, a final chunk smaller than the
    /// batch size is dropped.
    pub fn new(
        strategy: Box<dyn BatchStrategy<I>>,
        dataset: Arc<dyn DataView<I>>,
        batcher: Arc<dyn Batcher<I, O>>,
        partial: bool,
        rng: Option<StdRng>,
    ) -> Self {
        Self {
            strategy,
            dataset,
            batcher,
            partial,
            rng: rng.map(Mutex::new),
        }
    }
}

impl<I, O> DataLoader<O> for BatchDataLoader<I, O>
where
    I: Send + Sync + 'static,
    O: Send,
{
    fn iter(&self) -> Box<dyn DataLoaderIterator<O> + '_> {
        // Rather than reordering fetches, a shuffling iteration walks a
        // permutation view of the dataset in storage order.
        let dataset = match &self.rng {
            Some(rng) => {
                let mut rng = rng.lock().unwrap();
                let indices = shuffled_indices(self.dataset.numobs(), &mut *rng);

                Arc::new(ObsView::new_unchecked(self.dataset.clone(), indices))
                    as Arc<dyn DataView<I>>
            }
            None => self.dataset.clone(),
        };

        Box::new(BatchDataLoaderIterator {
            current_index: 0,
            strategy: self.strategy.clone_dyn(),
            dataset,
            batcher: self.batcher.clone(),
            partial: self.partial,
            failed: false,
        })
    }

    fn num_items(&self) -> usize {
        self.dataset.numobs()
    }
}

impl<I, O> Iterator for BatchDataLoaderIterator<I, O> {
    type Item = Result<O, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while self.current_index < self.dataset.numobs() {
            let item = match self.dataset.getobs(self.current_index) {
                Ok(item) => item,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            };
            self.current_index += 1;
            self.strategy.add(item);

            if let Some(items) = self.strategy.batch(false) {
                return Some(self.collate(items));
            }
        }

        if self.partial {
            if let Some(items) = self.strategy.batch(true) {
                return Some(self.collate(items));
            }
        }

        None
    }
}

impl<I, O> BatchDataLoaderIterator<I, O> {
    fn collate(&mut self, items: Vec<I>) -> Result<O, DataError> {
        let batch = self.batcher.batch(items);
        if batch.is_err() {
            self.failed = true;
        }

        batch
    }
}

impl<I, O> DataLoaderIterator<O> for BatchDataLoaderIterator<I, O> {
    fn progress(&self) -> Progress {
        Progress::new(self.current_index, self.dataset.numobs())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{FixBatchStrategy, VecBatcher};
    use super::*;
    use crate::FakeDataset;

    fn loader(
        size: usize,
        batch_size: usize,
        partial: bool,
    ) -> BatchDataLoader<String, Vec<String>> {
        BatchDataLoader::new(
            Box::new(FixBatchStrategy::new(batch_size)),
            Arc::new(FakeDataset::<String>::new(size)),
            Arc::new(VecBatcher),
            partial,
            None,
        )
    }

    #[test]
    fn yields_fixed_batches_with_partial_tail() {
        let loader = loader(10, 4, true);
        let sizes: Vec<usize> = loader.iter().map(|batch| batch.unwrap().len()).collect();

        assert_eq!(sizes, vec![4, 4, 2]);
    }

    #[test]
    fn drops_the_tail_without_partial() {
        let loader = loader(10, 4, false);
        let sizes: Vec<usize> = loader.iter().map(|batch| batch.unwrap().len()).collect();

        assert_eq!(sizes, vec![4, 4]);
    }

    #[test]
    fn iteration_is_restartable() {
        let loader = loader(6, 2, true);

        assert_eq!(loader.iter().count(), 3);
        assert_eq!(loader.iter().count(), 3);
    }

    #[test]
    fn shuffling_draws_a_fresh_permutation_per_iteration() {
        let dataset: Arc<dyn DataView<usize>> = Arc::new(0..100);
        let loader = BatchDataLoader::new(
            Box::new(FixBatchStrategy::new(10)),
            dataset,
            Arc::new(VecBatcher),
            true,
            Some(rand::SeedableRng::seed_from_u64(42)),
        );

        let first: Vec<usize> = loader.iter().flat_map(|batch| batch.unwrap()).collect();
        let second: Vec<usize> = loader.iter().flat_map(|batch| batch.unwrap()).collect();

        assert_ne!(first, second);

        let mut sorted = first.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn progress_tracks_fetched_items() {
        let loader = loader(10, 4, true);
        let mut iter = loader.iter();

        assert_eq!(iter.progress(), Progress::new(0, 10));
        iter.next().unwrap().unwrap();
        assert_eq!(iter.progress(), Progress::new(4, 10));
    }
}
