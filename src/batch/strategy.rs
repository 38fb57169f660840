/// A strategy to group fetched observations into batches.
pub trait BatchStrategy<I>: Send + Sync {
    /// Adds an observation to the strategy.
    fn add(&mut self, item: I);

    /// Batches the accumulated observations, or returns `None` when not
    /// enough have been added yet.
    ///
    /// With `force`, a non-empty remainder is batched regardless of its
    /// size.
    fn batch(&mut self, force: bool) -> Option<Vec<I>>;

    /// Creates a fresh strategy of the same type.
    fn clone_dyn(&self) -> Box<dyn BatchStrategy<I>>;
}

/// A strategy yielding batches of a fixed size.
pub struct FixBatchStrategy<I> {
    items: Vec<I>,
    batch_size: usize,
}

impl<I> FixBatchStrategy<I> {
    /// Creates a new strategy with the given batch size.
    pub fn new(batch_size: usize) -> Self {
        FixBatchStrategy {
            items: Vec::with_capacity(batch_size),
            batch_size,
        }
    }
}

impl<I: Send + Sync + 'static> BatchStrategy<I> for FixBatchStrategy<I> {
    fn add(&mut self, item: I) {
        self.items.push(item);
    }

    fn batch(&mut self, force: bool) -> Option<Vec<I>> {
        if self.items.len() < self.batch_size && !force {
            return None;
        }

        let mut items = Vec::with_capacity(self.batch_size);
        std::mem::swap(&mut items, &mut self.items);

        if items.is_empty() {
            return None;
        }

        Some(items)
    }

    fn clone_dyn(&self) -> Box<dyn BatchStrategy<I>> {
        Box::new(Self::new(self.batch_size))
    }
}
