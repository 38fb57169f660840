use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{DataError, DataView};

/// A view that stores each observation in a lookup table on first
/// retrieval and serves every later retrieval of the same index from the
/// table.
///
/// Useful for reusing the result of expensive per-observation work, e.g.
/// decoding. The table only ever grows and is owned by the view; it is
/// guarded by a mutex because the retrieval contract takes `&self`, but the
/// view is not meant as a concurrency primitive: concurrent first
/// retrievals of the same index may both compute the observation, with one
/// result kept.
pub struct CachedView<I> {
    data: Arc<dyn DataView<I>>,
    cache: Mutex<HashMap<usize, I>>,
}

impl<I> CachedView<I> {
    /// Creates a caching view over `data`.
    pub fn new<D>(data: D) -> Self
    where
        D: DataView<I> + 'static,
    {
        Self {
            data: Arc::new(data),
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl<I> DataView<I> for CachedView<I>
where
    I: Clone + Send,
{
    fn numobs(&self) -> usize {
        self.data.numobs()
    }

    fn getobs(&self, index: usize) -> Result<I, DataError> {
        if let Some(item) = self.cache.lock().unwrap().get(&index) {
            return Ok(item.clone());
        }

        // Fetch without holding the lock; a stalled parent must not block
        // retrievals of already cached indices.
        let item = self.data.getobs(index)?;
        let mut cache = self.cache.lock().unwrap();

        Ok(cache.entry(index).or_insert(item).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        items: Vec<i32>,
        fetches: Arc<AtomicUsize>,
    }

    impl DataView<i32> for Counting {
        fn numobs(&self) -> usize {
            self.items.len()
        }

        fn getobs(&self, index: usize) -> Result<i32, DataError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.items.getobs(index)
        }
    }

    #[test]
    fn second_retrieval_hits_the_cache() {
        let fetches = Arc::new(AtomicUsize::new(0));
        let view = CachedView::new(Counting {
            items: vec![5, 6, 7],
            fetches: fetches.clone(),
        });

        assert_eq!(view.getobs(1).unwrap(), 6);
        assert_eq!(view.getobs(1).unwrap(), 6);
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn vector_retrieval_fills_per_element() {
        let fetches = Arc::new(AtomicUsize::new(0));
        let view = CachedView::new(Counting {
            items: vec![1, 2, 3, 4],
            fetches: fetches.clone(),
        });

        assert_eq!(view.getobs_many(&[0, 1]).unwrap(), vec![1, 2]);
        assert_eq!(view.getobs_many(&[1, 2]).unwrap(), vec![2, 3]);
        assert_eq!(fetches.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn errors_are_not_cached() {
        let fetches = Arc::new(AtomicUsize::new(0));
        let view = CachedView::new(Counting {
            items: vec![1],
            fetches: fetches.clone(),
        });

        assert!(view.getobs(9).is_err());
    }
}
