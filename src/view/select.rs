use std::collections::HashSet;
use std::sync::Arc;

use crate::{DataError, DataView};

/// A lazy selection of parent observations through an explicit index
/// mapping, fixed at construction.
///
/// The view stores only the mapping; no parent data is copied. The mapping
/// is an ordered multiset: order is significant and duplicates are legal
/// (see [`repeatobs`]), while out-of-range entries are rejected when the
/// view is built.
pub struct ObsView<I> {
    data: Arc<dyn DataView<I>>,
    indices: Vec<usize>,
}

impl<I> ObsView<I> {
    /// Creates a view of `data` at the given indices.
    ///
    /// Fails with [`DataError::IndexOutOfBounds`] if any index is not a
    /// valid observation index of `data`.
    pub fn new<D>(data: D, indices: Vec<usize>) -> Result<Self, DataError>
    where
        D: DataView<I> + 'static,
    {
        Self::shared(Arc::new(data), indices)
    }

    /// Creates a view over an already shared parent.
    pub fn shared(data: Arc<dyn DataView<I>>, indices: Vec<usize>) -> Result<Self, DataError> {
        let numobs = data.numobs();
        if let Some(&index) = indices.as_slice().iter().find(|&&index| index >= numobs) {
            return Err(DataError::IndexOutOfBounds { index, numobs });
        }

        Ok(Self { data, indices })
    }

    /// Builds a view from indices already known to be in range.
    pub(crate) fn new_unchecked(data: Arc<dyn DataView<I>>, indices: Vec<usize>) -> Self {
        Self { data, indices }
    }

    /// Selects observations of this view, composing the two index mappings
    /// into one.
    ///
    /// The result is a view over the *original* parent, not over `self`, so
    /// repeated selection never grows a chain of views.
    pub fn select(&self, indices: &[usize]) -> Result<Self, DataError> {
        let composed = indices
            .iter()
            .map(|&index| {
                self.indices
                    .get(index)
                    .copied()
                    .ok_or(DataError::IndexOutOfBounds {
                        index,
                        numobs: self.indices.len(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            data: self.data.clone(),
            indices: composed,
        })
    }

    /// The index mapping into the parent container.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl<I> DataView<I> for ObsView<I> {
    fn numobs(&self) -> usize {
        self.indices.len()
    }

    fn getobs(&self, index: usize) -> Result<I, DataError> {
        let parent = self
            .indices
            .get(index)
            .copied()
            .ok_or(DataError::IndexOutOfBounds {
                index,
                numobs: self.indices.len(),
            })?;

        self.data.getobs(parent)
    }
}

/// Constructs a lazy view of `data` at the specified indices.
pub fn obsview<D, I>(data: D, indices: Vec<usize>) -> Result<ObsView<I>, DataError>
where
    D: DataView<I> + 'static,
{
    ObsView::new(data, indices)
}

/// Takes the observations of `data` at `indices`, dropping everything else.
pub fn takeobs<D, I>(data: D, indices: Vec<usize>) -> Result<ObsView<I>, DataError>
where
    D: DataView<I> + 'static,
{
    ObsView::new(data, indices)
}

/// Removes the observations of `data` at `dropped`, keeping everything else
/// in its original order.
pub fn dropobs<D, I>(data: D, dropped: &[usize]) -> Result<ObsView<I>, DataError>
where
    D: DataView<I> + 'static,
{
    let numobs = data.numobs();
    if let Some(&index) = dropped.iter().find(|&&index| index >= numobs) {
        return Err(DataError::IndexOutOfBounds { index, numobs });
    }

    let dropped: HashSet<usize> = dropped.iter().copied().collect();
    let kept = (0..numobs).filter(|index| !dropped.contains(index)).collect();

    Ok(ObsView::new_unchecked(Arc::new(data), kept))
}

/// Creates a view which repeats every observation of `data` `n` times, in
/// `n` full passes over the parent.
pub fn repeatobs<D, I>(data: D, n: usize) -> ObsView<I>
where
    D: DataView<I> + 'static,
{
    let numobs = data.numobs();
    let mut indices = Vec::with_capacity(numobs * n);
    for _ in 0..n {
        indices.extend(0..numobs);
    }

    ObsView::new_unchecked(Arc::new(data), indices)
}
