use std::sync::Arc;

use crate::{DataError, DataView};

/// A view presenting several containers as if they were concatenated into
/// a single list, in argument order.
///
/// Global indices are resolved to the owning container through a
/// cumulative-offset table. The joined containers must yield the same
/// observation type; whether their observations can actually be collated
/// together only surfaces when a batch is stacked.
pub struct JoinedView<I> {
    datasets: Vec<Arc<dyn DataView<I>>>,
    // offsets[k] is the global index of datasets[k]'s first observation;
    // the final entry is the total count.
    offsets: Vec<usize>,
}

impl<I> JoinedView<I> {
    /// Creates a view concatenating the given containers.
    ///
    /// Joining zero containers yields a valid empty view.
    pub fn new(datasets: Vec<Arc<dyn DataView<I>>>) -> Self {
        let mut offsets = Vec::with_capacity(datasets.len() + 1);
        let mut total = 0;
        offsets.push(0);
        for dataset in &datasets {
            total += dataset.numobs();
            offsets.push(total);
        }

        Self { datasets, offsets }
    }
}

impl<I> DataView<I> for JoinedView<I> {
    fn numobs(&self) -> usize {
        self.offsets.last().copied().unwrap_or(0)
    }

    fn getobs(&self, index: usize) -> Result<I, DataError> {
        let numobs = self.numobs();
        if index >= numobs {
            return Err(DataError::IndexOutOfBounds { index, numobs });
        }

        let segment = self.offsets.partition_point(|&offset| offset <= index) - 1;
        self.datasets[segment].getobs(index - self.offsets[segment])
    }
}

/// Concatenates the given containers into one view.
pub fn joinobs<I>(datasets: Vec<Arc<dyn DataView<I>>>) -> JoinedView<I> {
    JoinedView::new(datasets)
}
