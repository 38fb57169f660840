use std::sync::Arc;

use rand::rngs::StdRng;

use crate::{DataError, DataView, ObsView, RngSource};

use super::shuffled_indices;

// Forgives the representation error of fractions like 0.7 + 0.2 + 0.1.
const FRACTION_TOLERANCE: f64 = 1e-8;

fn validate_fractions(at: &[f64]) -> Result<(), DataError> {
    let invalid = at.is_empty()
        || at.iter().any(|&fraction| fraction <= 0.0 || fraction > 1.0)
        || at.iter().sum::<f64>() > 1.0 + FRACTION_TOLERANCE;

    if invalid {
        return Err(DataError::InvalidSplit { at: at.to_vec() });
    }

    Ok(())
}

/// Partitions the indices `0..n` into one block per fraction in `at`, plus
/// an implicit final block for the remainder if the fractions sum to less
/// than one.
///
/// Block `i` holds `round(at[i] × n)` indices. With `shuffle=false` the
/// blocks are contiguous runs in index order; with `shuffle=true` the
/// indices are permuted before being cut, using `rng`.
///
/// Fractions outside `(0, 1]` or summing to more than one fail with
/// [`DataError::InvalidSplit`] before any work is done.
pub fn split_indices<R>(
    n: usize,
    at: &[f64],
    shuffle: bool,
    rng: R,
) -> Result<Vec<Vec<usize>>, DataError>
where
    R: Into<RngSource>,
{
    validate_fractions(at)?;

    let order: Vec<usize> = if shuffle {
        let mut rng: StdRng = rng.into().into();
        shuffled_indices(n, &mut rng)
    } else {
        (0..n).collect()
    };

    let mut splits = Vec::with_capacity(at.len() + 1);
    let mut start = 0;
    for &fraction in at {
        let size = ((n as f64) * fraction).round() as usize;
        let end = usize::min(start + size, n);
        splits.push(order[start..end].to_vec());
        start = end;
    }
    if start < n {
        splits.push(order[start..].to_vec());
    }

    Ok(splits)
}

/// Splits `data` into one lazy view per fraction in `at`, plus an implicit
/// final view for the remainder.
///
/// See [`split_indices`] for the partitioning rules; pass an explicit
/// index vector as `data` to split precomputed indices.
pub fn splitobs<D, I, R>(
    data: D,
    at: &[f64],
    shuffle: bool,
    rng: R,
) -> Result<Vec<ObsView<I>>, DataError>
where
    D: DataView<I> + 'static,
    R: Into<RngSource>,
{
    let data: Arc<dyn DataView<I>> = Arc::new(data);
    let splits = split_indices(data.numobs(), at, shuffle, rng)?;

    Ok(splits
        .into_iter()
        .map(|indices| ObsView::new_unchecked(data.clone(), indices))
        .collect())
}

/// Computes the train/validation index pairs for `k` repartitions of `n`
/// observations.
///
/// The indices are cut into `k` contiguous folds (the last fold absorbs
/// the remainder of a non-divisible count); rotation `i` uses fold `i` as
/// validation and the remaining folds, in fold order, as training.
pub fn kfold_indices(n: usize, k: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>, DataError> {
    if k == 0 || k > n {
        return Err(DataError::InvalidFolds { k, numobs: n });
    }

    let fold_size = n / k;
    let bounds: Vec<(usize, usize)> = (0..k)
        .map(|fold| {
            let start = fold * fold_size;
            let end = if fold == k - 1 { n } else { start + fold_size };
            (start, end)
        })
        .collect();

    Ok((0..k)
        .map(|fold| {
            let validation: Vec<usize> = (bounds[fold].0..bounds[fold].1).collect();
            let train: Vec<usize> = (0..k)
                .filter(|&other| other != fold)
                .flat_map(|other| bounds[other].0..bounds[other].1)
                .collect();

            (train, validation)
        })
        .collect())
}

/// Computes `k` lazy (train, validation) view pairs over `data`.
///
/// See [`kfold_indices`] for the fold layout.
pub fn kfolds<D, I>(data: D, k: usize) -> Result<Vec<(ObsView<I>, ObsView<I>)>, DataError>
where
    D: DataView<I> + 'static,
{
    let data: Arc<dyn DataView<I>> = Arc::new(data);
    let folds = kfold_indices(data.numobs(), k)?;

    Ok(folds
        .into_iter()
        .map(|(train, validation)| {
            (
                ObsView::new_unchecked(data.clone(), train),
                ObsView::new_unchecked(data.clone(), validation),
            )
        })
        .collect())
}
