//! Stateless per-array helpers shared by pipelines built from the views:
//! feature scaling, one-hot encoding and observation-axis reshaping. They
//! all follow the crate's convention that the last axis of an array is the
//! observation axis.

use ndarray::{Array, Array1, Array2, Axis, Dimension, RemoveAxis};
use num_traits::{Float, One, Zero};

use crate::DataError;

fn check_axis_stats<A, D>(
    x: &Array<A, D>,
    mean: &Array1<A>,
    std: &Array1<A>,
    dim: usize,
) -> Result<(), DataError>
where
    D: Dimension,
{
    if dim >= x.ndim() {
        return Err(DataError::ShapeMismatch(format!(
            "axis {dim} out of bounds for a {}-dimensional array",
            x.ndim()
        )));
    }

    let lanes = x.len_of(Axis(dim));
    if mean.len() != lanes || std.len() != lanes {
        return Err(DataError::ShapeMismatch(format!(
            "axis {dim} has {lanes} entries but got {} means and {} standard deviations",
            mean.len(),
            std.len()
        )));
    }

    Ok(())
}

/// Normalizes `x` along axis `dim` so that entry `i` of that axis has mean
/// `0` and standard deviation `1` with respect to `mean[i]` and `std[i]`.
pub fn normalize<A, D>(
    x: &Array<A, D>,
    mean: &Array1<A>,
    std: &Array1<A>,
    dim: usize,
) -> Result<Array<A, D>, DataError>
where
    A: Float,
    D: Dimension + RemoveAxis,
{
    check_axis_stats(x, mean, std, dim)?;

    let mut out = x.clone();
    for (i, mut lane) in out.axis_iter_mut(Axis(dim)).enumerate() {
        let (m, s) = (mean[i], std[i]);
        lane.mapv_inplace(|value| (value - m) / s);
    }

    Ok(out)
}

/// Reverses the effect of [`normalize`] with the same `mean`/`std`.
pub fn denormalize<A, D>(
    x: &Array<A, D>,
    mean: &Array1<A>,
    std: &Array1<A>,
    dim: usize,
) -> Result<Array<A, D>, DataError>
where
    A: Float,
    D: Dimension + RemoveAxis,
{
    check_axis_stats(x, mean, std, dim)?;

    let mut out = x.clone();
    for (i, mut lane) in out.axis_iter_mut(Axis(dim)).enumerate() {
        let (m, s) = (mean[i], std[i]);
        lane.mapv_inplace(|value| value * s + m);
    }

    Ok(out)
}

/// One-hot encodes `x` against the given label set.
///
/// The result has one row per label and one column per observation, with a
/// single `1.0` per column. A value missing from `labels` fails with
/// [`DataError::UnknownLabel`].
pub fn onehot<L>(x: &[L], labels: &[L]) -> Result<Array2<f32>, DataError>
where
    L: PartialEq,
{
    let mut out = Array2::zeros((labels.len(), x.len()));
    for (position, value) in x.iter().enumerate() {
        let row = labels
            .iter()
            .position(|label| label == value)
            .ok_or(DataError::UnknownLabel { position })?;
        out[(row, position)] = 1.0;
    }

    Ok(out)
}

/// Constructs an array of ones with the same shape and element type as `x`.
pub fn ones_like<A, D>(x: &Array<A, D>) -> Array<A, D>
where
    A: Clone + One,
    D: Dimension,
{
    Array::ones(x.raw_dim())
}

/// Constructs an array of zeros with the same shape and element type as
/// `x`.
pub fn zeros_like<A, D>(x: &Array<A, D>) -> Array<A, D>
where
    A: Clone + Zero,
    D: Dimension,
{
    Array::zeros(x.raw_dim())
}

/// Adds a trailing observation axis of size 1 to `x`.
pub fn putobs<A, D>(x: Array<A, D>) -> Array<A, D::Larger>
where
    D: Dimension,
{
    let axis = Axis(x.ndim());

    x.insert_axis(axis)
}

/// Removes the trailing observation axis of `x`, which must have size 1.
pub fn rmobs<A, D>(x: Array<A, D>) -> Result<Array<A, D::Smaller>, DataError>
where
    D: RemoveAxis,
{
    let axis = Axis(x.ndim() - 1);
    let len = x.len_of(axis);
    if len != 1 {
        return Err(DataError::ShapeMismatch(format!(
            "expected a trailing observation axis of size 1, found {len}"
        )));
    }

    Ok(x.index_axis_move(axis, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn normalize_then_denormalize_round_trips() {
        let x = array![[1.0, 2.0, 3.0], [10.0, 20.0, 30.0]];
        let mean = array![2.0, 20.0];
        let std = array![1.0, 10.0];

        let normalized = normalize(&x, &mean, &std, 0).unwrap();
        assert_eq!(normalized, array![[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]]);

        let restored = denormalize(&normalized, &mean, &std, 0).unwrap();
        assert_eq!(restored, x);
    }

    #[test]
    fn normalize_rejects_mismatched_stats() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let result = normalize(&x, &array![0.0], &array![1.0], 0);

        assert!(matches!(result, Err(DataError::ShapeMismatch(_))));
    }

    #[test]
    fn onehot_encodes_labels_as_rows() {
        let encoded = onehot(&[1, 2, 3, 3, 1], &[1, 2, 3]).unwrap();

        assert_eq!(encoded.shape(), &[3, 5]);
        assert_eq!(
            encoded,
            array![
                [1.0, 0.0, 0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 1.0, 0.0]
            ]
        );
    }

    #[test]
    fn onehot_rejects_unknown_values() {
        let result = onehot(&[1, 9], &[1, 2]);
        assert_eq!(result.err(), Some(DataError::UnknownLabel { position: 1 }));
    }

    #[test]
    fn like_constructors_copy_the_shape() {
        let x = array![[1.5f32, 2.5], [3.5, 4.5]];

        assert_eq!(ones_like(&x), array![[1.0, 1.0], [1.0, 1.0]]);
        assert_eq!(zeros_like(&x), array![[0.0, 0.0], [0.0, 0.0]]);
    }

    #[test]
    fn putobs_and_rmobs_invert_each_other() {
        let x = array![[1, 2], [3, 4]];

        let expanded = putobs(x.clone());
        assert_eq!(expanded.shape(), &[2, 2, 1]);
        assert_eq!(rmobs(expanded).unwrap(), x);
    }

    #[test]
    fn rmobs_requires_a_singleton_axis() {
        let x = array![[1, 2], [3, 4]];
        assert!(rmobs(x).is_err());
    }
}
