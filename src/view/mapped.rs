use std::sync::Arc;

use crate::{DataError, DataView, ObsView};

/// A transformation applied to observations as they are retrieved.
pub trait Mapper<I, O>: Send + Sync {
    /// Maps one observation.
    fn map(&self, item: &I) -> O;
}

impl<F, I, O> Mapper<I, O> for F
where
    F: Fn(&I) -> O + Send + Sync,
{
    fn map(&self, item: &I) -> O {
        self(item)
    }
}

/// A view which lazily applies a [`Mapper`] to each observation when it is
/// requested.
///
/// The mapper runs once per retrieval and its results are never stored;
/// wrap the view in a [`CachedView`](crate::CachedView) to amortize an
/// expensive mapper over repeated access.
pub struct MappedView<M, I> {
    data: Arc<dyn DataView<I>>,
    mapper: M,
}

impl<M, I> MappedView<M, I> {
    /// Creates a view applying `mapper` to every observation of `data`.
    pub fn new<D>(mapper: M, data: D) -> Self
    where
        D: DataView<I> + 'static,
    {
        Self {
            data: Arc::new(data),
            mapper,
        }
    }
}

impl<M, I, O> DataView<O> for MappedView<M, I>
where
    M: Mapper<I, O>,
{
    fn numobs(&self) -> usize {
        self.data.numobs()
    }

    fn getobs(&self, index: usize) -> Result<O, DataError> {
        let item = self.data.getobs(index)?;

        Ok(self.mapper.map(&item))
    }
}

/// Lazily applies `mapper` to each observation of `data`.
pub fn mapobs<M, D, I>(mapper: M, data: D) -> MappedView<M, I>
where
    D: DataView<I> + 'static,
{
    MappedView::new(mapper, data)
}

/// Removes the observations of `data` for which `predicate` returns false.
///
/// The predicate is evaluated eagerly, once per observation; the returned
/// view holds the passing indices in their original order.
pub fn filterobs<F, D, I>(predicate: F, data: D) -> Result<ObsView<I>, DataError>
where
    F: Fn(&I) -> bool,
    D: DataView<I> + 'static,
{
    let data: Arc<dyn DataView<I>> = Arc::new(data);
    let mut kept = Vec::new();
    for index in 0..data.numobs() {
        if predicate(&data.getobs(index)?) {
            kept.push(index);
        }
    }

    Ok(ObsView::new_unchecked(data, kept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn maps_each_observation_on_retrieval() {
        let view = mapobs(|item: &i32| item * 10, vec![1, 2, 3]);

        assert_eq!(view.numobs(), 3);
        assert_eq!(view.getobs(1).unwrap(), 20);
        assert_eq!(view.getobs_all().unwrap(), vec![10, 20, 30]);
    }

    #[test]
    fn repeated_retrieval_recomputes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let view = mapobs(
            move |item: &i32| {
                counter.fetch_add(1, Ordering::SeqCst);
                *item
            },
            vec![7],
        );

        assert_eq!(view.getobs(0).unwrap(), 7);
        assert_eq!(view.getobs(0).unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn mapper_structs_work_too() {
        struct FirstChar;

        impl Mapper<String, char> for FirstChar {
            fn map(&self, item: &String) -> char {
                item.chars().next().unwrap_or(' ')
            }
        }

        let words = vec!["alpha".to_string(), "beta".to_string()];
        let view = MappedView::new(FirstChar, words);

        assert_eq!(view.getobs_all().unwrap(), vec!['a', 'b']);
    }

    #[test]
    fn filterobs_keeps_passing_indices_in_order() {
        let view = filterobs(|item: &i32| item % 2 == 0, vec![1, 2, 3, 4, 5, 6]).unwrap();

        assert_eq!(view.indices(), &[1, 3, 5]);
        assert_eq!(view.getobs_all().unwrap(), vec![2, 4, 6]);
    }
}
