use std::marker::PhantomData;

use crate::{DataError, DataView};

/// A tuple of containers that can be zipped observation-wise.
///
/// Implemented for container tuples of arity two to four; higher arities
/// can be expressed by nesting.
pub trait Zippable<I>: Send + Sync {
    /// The observation count of each zipped container, in order.
    fn numobs_each(&self) -> Vec<usize>;

    /// The tuple of observations at `index`, in container order.
    fn getobs_zip(&self, index: usize) -> Result<I, DataError>;
}

/// A view yielding the observations of several equal-length containers as
/// tuples, in container order.
///
/// Construction fails unless all containers report the same observation
/// count.
pub struct ZippedView<D, I> {
    datasets: D,
    numobs: usize,
    marker: PhantomData<I>,
}

impl<D, I> ZippedView<D, I>
where
    D: Zippable<I>,
{
    /// Creates a view zipping the given containers.
    pub fn new(datasets: D) -> Result<Self, DataError> {
        let lengths = datasets.numobs_each();
        let numobs = lengths.first().copied().unwrap_or(0);
        if lengths.as_slice().iter().any(|&length| length != numobs) {
            return Err(DataError::LengthMismatch(lengths));
        }

        Ok(Self {
            datasets,
            numobs,
            marker: PhantomData,
        })
    }
}

impl<D, I> DataView<I> for ZippedView<D, I>
where
    D: Zippable<I>,
    I: Send + Sync,
{
    fn numobs(&self) -> usize {
        self.numobs
    }

    fn getobs(&self, index: usize) -> Result<I, DataError> {
        if index >= self.numobs {
            return Err(DataError::IndexOutOfBounds {
                index,
                numobs: self.numobs,
            });
        }

        self.datasets.getobs_zip(index)
    }
}

/// Zips the observations of the given containers into tuples.
pub fn zipobs<D, I>(datasets: D) -> Result<ZippedView<D, I>, DataError>
where
    D: Zippable<I>,
{
    ZippedView::new(datasets)
}

macro_rules! impl_zippable {
    ($(($D:ident, $I:ident, $idx:tt)),+) => {
        impl<$($D, $I),+> Zippable<($($I,)+)> for ($($D,)+)
        where
            $($D: DataView<$I>,)+
        {
            fn numobs_each(&self) -> Vec<usize> {
                vec![$(self.$idx.numobs()),+]
            }

            fn getobs_zip(&self, index: usize) -> Result<($($I,)+), DataError> {
                Ok(($(self.$idx.getobs(index)?,)+))
            }
        }

        impl<$($D, $I),+> ZippedView<($($D,)+), ($($I,)+)>
        where
            $($D: DataView<$I>,)+
            $($I: Send + Sync,)+
        {
            /// Vector retrieval in unzipped form: one ordered sequence per
            /// zipped container instead of a sequence of tuples.
            pub fn getobs_unzipped(
                &self,
                indices: &[usize],
            ) -> Result<($(Vec<$I>,)+), DataError> {
                let mut out = ($(Vec::<$I>::with_capacity(indices.len()),)+);
                for &index in indices {
                    let item = self.getobs(index)?;
                    $(out.$idx.push(item.$idx);)+
                }

                Ok(out)
            }
        }
    };
}

impl_zippable!((D0, I0, 0), (D1, I1, 1));
impl_zippable!((D0, I0, 0), (D1, I1, 1), (D2, I2, 2));
impl_zippable!((D0, I0, 0), (D1, I1, 1), (D2, I2, 2), (D3, I3, 3));
