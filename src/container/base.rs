use std::sync::Arc;

use crate::DataError;

use super::ObsIterator;

/// The capability contract satisfied by every data container: a constant
/// number of observations and positional retrieval of single observations.
///
/// `I` is the type of one observation. A container may implement the trait
/// for more than one observation type when several representations make
/// sense; the views in this crate propagate whichever one the pipeline was
/// built with.
pub trait DataView<I>: Send + Sync {
    /// Returns the number of observations in the container.
    fn numobs(&self) -> usize;

    /// Returns the observation at the given index.
    ///
    /// Indices at or above [`numobs`](DataView::numobs) produce
    /// [`DataError::IndexOutOfBounds`], never a clamped result.
    fn getobs(&self, index: usize) -> Result<I, DataError>;

    /// Returns the observations at the given indices, in the given order.
    fn getobs_many(&self, indices: &[usize]) -> Result<Vec<I>, DataError> {
        indices.iter().map(|&index| self.getobs(index)).collect()
    }

    /// Materializes every observation, realizing any pending laziness.
    fn getobs_all(&self) -> Result<Vec<I>, DataError> {
        let indices: Vec<usize> = (0..self.numobs()).collect();
        self.getobs_many(&indices)
    }

    /// Checks if the container holds no observations.
    fn is_empty(&self) -> bool {
        self.numobs() == 0
    }

    /// Returns an iterator over the observations.
    fn iter(&self) -> ObsIterator<'_, I>
    where
        Self: Sized,
    {
        ObsIterator::new(self)
    }
}

impl<D, I> DataView<I> for Arc<D>
where
    D: DataView<I>,
{
    fn numobs(&self) -> usize {
        self.as_ref().numobs()
    }

    fn getobs(&self, index: usize) -> Result<I, DataError> {
        self.as_ref().getobs(index)
    }
}

impl<I> DataView<I> for Arc<dyn DataView<I>> {
    fn numobs(&self) -> usize {
        self.as_ref().numobs()
    }

    fn getobs(&self, index: usize) -> Result<I, DataError> {
        self.as_ref().getobs(index)
    }
}

impl<D, I> DataView<I> for Box<D>
where
    D: DataView<I>,
{
    fn numobs(&self) -> usize {
        self.as_ref().numobs()
    }

    fn getobs(&self, index: usize) -> Result<I, DataError> {
        self.as_ref().getobs(index)
    }
}

impl<I> DataView<I> for Box<dyn DataView<I>> {
    fn numobs(&self) -> usize {
        self.as_ref().numobs()
    }

    fn getobs(&self, index: usize) -> Result<I, DataError> {
        self.as_ref().getobs(index)
    }
}

/// Returns the number of observations in `data`.
pub fn numobs<I, D>(data: &D) -> usize
where
    D: DataView<I> + ?Sized,
{
    data.numobs()
}

/// Returns the observation of `data` at `index`.
pub fn getobs<I, D>(data: &D, index: usize) -> Result<I, DataError>
where
    D: DataView<I> + ?Sized,
{
    data.getobs(index)
}

/// Returns the observations of `data` at `indices`, in order.
pub fn getobs_many<I, D>(data: &D, indices: &[usize]) -> Result<Vec<I>, DataError>
where
    D: DataView<I> + ?Sized,
{
    data.getobs_many(indices)
}

/// Materializes every observation of `data`.
pub fn getobs_all<I, D>(data: &D) -> Result<Vec<I>, DataError>
where
    D: DataView<I> + ?Sized,
{
    data.getobs_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn getobs_rejects_out_of_range() {
        let data = vec![1, 2, 3];
        assert_eq!(data.numobs(), 3);
        assert_eq!(
            data.getobs(3),
            Err(DataError::IndexOutOfBounds { index: 3, numobs: 3 })
        );
    }

    #[test]
    fn getobs_many_preserves_order() {
        let data = vec![10, 20, 30, 40];
        assert_eq!(data.getobs_many(&[3, 0, 2]).unwrap(), vec![40, 10, 30]);
    }

    #[test]
    fn getobs_all_materializes_everything() {
        let data = 5..9;
        assert_eq!(data.getobs_all().unwrap(), vec![5, 6, 7, 8]);
    }

    #[test]
    fn trait_objects_delegate() {
        let data: Arc<dyn DataView<i32>> = Arc::new(vec![7, 8]);
        assert_eq!(data.numobs(), 2);
        assert_eq!(data.getobs(1).unwrap(), 8);
    }
}
