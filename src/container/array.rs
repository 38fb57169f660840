use ndarray::{Array, Axis, RemoveAxis};

use crate::DataError;

use super::DataView;

/// Multi-dimensional arrays are indexed along their last axis: one
/// observation is the lower-dimensional slice at that position. Stacking
/// observations back together (see [`stackobs`](crate::stackobs)) re-adds
/// the axis that scalar retrieval removes.
impl<A, D> DataView<Array<A, D::Smaller>> for Array<A, D>
where
    A: Clone + Send + Sync,
    D: RemoveAxis,
{
    fn numobs(&self) -> usize {
        self.len_of(Axis(self.ndim() - 1))
    }

    fn getobs(&self, index: usize) -> Result<Array<A, D::Smaller>, DataError> {
        let numobs = self.numobs();
        if index >= numobs {
            return Err(DataError::IndexOutOfBounds { index, numobs });
        }

        Ok(self.index_axis(Axis(self.ndim() - 1), index).to_owned())
    }
}

impl<T> DataView<T> for Vec<T>
where
    T: Clone + Send + Sync,
{
    fn numobs(&self) -> usize {
        self.len()
    }

    fn getobs(&self, index: usize) -> Result<T, DataError> {
        self.get(index).cloned().ok_or(DataError::IndexOutOfBounds {
            index,
            numobs: self.len(),
        })
    }
}

/// Index ranges act as containers of their own values, which makes them a
/// convenient stand-in for `n` observations when only indices matter.
impl DataView<usize> for std::ops::Range<usize> {
    fn numobs(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    fn getobs(&self, index: usize) -> Result<usize, DataError> {
        let numobs = self.numobs();
        if index >= numobs {
            return Err(DataError::IndexOutOfBounds { index, numobs });
        }

        Ok(self.start + index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array3};

    #[test]
    fn matrix_observations_are_columns() {
        let data = array![[1, 2, 3], [4, 5, 6]];

        assert_eq!(data.numobs(), 3);
        assert_eq!(data.getobs(0).unwrap(), array![1, 4]);
        assert_eq!(data.getobs(2).unwrap(), array![3, 6]);
    }

    #[test]
    fn higher_rank_arrays_index_the_last_axis() {
        let data = Array3::<f64>::zeros((4, 5, 7));

        assert_eq!(data.numobs(), 7);
        assert_eq!(data.getobs(6).unwrap().shape(), &[4, 5]);
    }

    #[test]
    fn array_getobs_rejects_out_of_range() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        let result: Result<Array1<f64>, _> = data.getobs(2);

        assert_eq!(
            result,
            Err(DataError::IndexOutOfBounds { index: 2, numobs: 2 })
        );
    }

    #[test]
    fn ranges_yield_their_own_values() {
        let data = 10..14;
        assert_eq!(data.numobs(), 4);
        assert_eq!(data.getobs(3).unwrap(), 13);
        assert!(data.getobs(4).is_err());
    }
}
