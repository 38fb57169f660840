use ndarray::{Array, Axis, Dimension, RemoveAxis};

use crate::DataError;

/// Observation types that can be merged into one batch-shaped value.
///
/// Arrays gain a trailing batch axis; tuples are unzipped positionally and
/// each position stacked on its own; plain values are collected into a
/// `Vec` in order.
pub trait Stackable: Sized {
    /// The batch-shaped result of stacking.
    type Stacked;

    /// Stacks the given observations, preserving their order.
    fn stack(items: Vec<Self>) -> Result<Self::Stacked, DataError>;
}

/// Stacks the elements of `items` as if they were observations in a batch.
pub fn stackobs<T: Stackable>(items: Vec<T>) -> Result<T::Stacked, DataError> {
    T::stack(items)
}

/// Arrays stack along a new trailing batch axis, so each input keeps its
/// own shape and the result has one more dimension. This is the inverse of
/// scalar retrieval on the stacked array, which removes that same axis.
impl<A, D> Stackable for Array<A, D>
where
    A: Clone,
    D: Dimension,
    D::Larger: RemoveAxis,
{
    type Stacked = Array<A, D::Larger>;

    fn stack(items: Vec<Self>) -> Result<Self::Stacked, DataError> {
        let first = items.first().ok_or(DataError::EmptyBatch)?;
        let axis = Axis(first.ndim());
        let views: Vec<_> = items.iter().map(Array::view).collect();

        ndarray::stack(axis, &views).map_err(|err| DataError::ShapeMismatch(err.to_string()))
    }
}

macro_rules! impl_stackable_plain {
    ($($ty:ty),* $(,)?) => {
        $(impl Stackable for $ty {
            type Stacked = Vec<$ty>;

            fn stack(items: Vec<Self>) -> Result<Self::Stacked, DataError> {
                if items.is_empty() {
                    return Err(DataError::EmptyBatch);
                }

                Ok(items)
            }
        })*
    };
}

impl_stackable_plain!(
    u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64, bool, char, String
);

impl<A, B> Stackable for (A, B)
where
    A: Stackable,
    B: Stackable,
{
    type Stacked = (A::Stacked, B::Stacked);

    fn stack(items: Vec<Self>) -> Result<Self::Stacked, DataError> {
        if items.is_empty() {
            return Err(DataError::EmptyBatch);
        }

        let (xs, ys) = unzip(items);

        Ok((A::stack(xs)?, B::stack(ys)?))
    }
}

impl<A, B, C> Stackable for (A, B, C)
where
    A: Stackable,
    B: Stackable,
    C: Stackable,
{
    type Stacked = (A::Stacked, B::Stacked, C::Stacked);

    fn stack(items: Vec<Self>) -> Result<Self::Stacked, DataError> {
        if items.is_empty() {
            return Err(DataError::EmptyBatch);
        }

        let (xs, ys, zs) = unzip3(items);

        Ok((A::stack(xs)?, B::stack(ys)?, C::stack(zs)?))
    }
}

impl<A, B, C, E> Stackable for (A, B, C, E)
where
    A: Stackable,
    B: Stackable,
    C: Stackable,
    E: Stackable,
{
    type Stacked = (A::Stacked, B::Stacked, C::Stacked, E::Stacked);

    fn stack(items: Vec<Self>) -> Result<Self::Stacked, DataError> {
        if items.is_empty() {
            return Err(DataError::EmptyBatch);
        }

        let (ws, xs, ys, zs) = unzip4(items);

        Ok((A::stack(ws)?, B::stack(xs)?, C::stack(ys)?, E::stack(zs)?))
    }
}

/// The inverse of element-wise zipping: one ordered sequence per tuple
/// position.
pub fn unzip<A, B>(items: Vec<(A, B)>) -> (Vec<A>, Vec<B>) {
    let mut xs = Vec::with_capacity(items.len());
    let mut ys = Vec::with_capacity(items.len());
    for (x, y) in items {
        xs.push(x);
        ys.push(y);
    }

    (xs, ys)
}

/// [`unzip`] for three-element tuples.
pub fn unzip3<A, B, C>(items: Vec<(A, B, C)>) -> (Vec<A>, Vec<B>, Vec<C>) {
    let mut xs = Vec::with_capacity(items.len());
    let mut ys = Vec::with_capacity(items.len());
    let mut zs = Vec::with_capacity(items.len());
    for (x, y, z) in items {
        xs.push(x);
        ys.push(y);
        zs.push(z);
    }

    (xs, ys, zs)
}

/// [`unzip`] for four-element tuples.
pub fn unzip4<A, B, C, D>(items: Vec<(A, B, C, D)>) -> (Vec<A>, Vec<B>, Vec<C>, Vec<D>) {
    let mut ws = Vec::with_capacity(items.len());
    let mut xs = Vec::with_capacity(items.len());
    let mut ys = Vec::with_capacity(items.len());
    let mut zs = Vec::with_capacity(items.len());
    for (w, x, y, z) in items {
        ws.push(w);
        xs.push(x);
        ys.push(y);
        zs.push(z);
    }

    (ws, xs, ys, zs)
}
