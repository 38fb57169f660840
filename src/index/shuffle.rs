use std::sync::Arc;

use rand::prelude::SliceRandom;
use rand::rngs::StdRng;
use rand::Rng;

use crate::{DataError, DataView, ObsView, RngSource};

/// Returns a uniformly random permutation of `0..n`.
pub fn shuffled_indices<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);

    indices
}

/// Returns a view of `data` under a uniformly random permutation of its
/// observations.
///
/// Pass a seeded [`RngSource`] for reproducible results.
pub fn shuffleobs<D, I, R>(data: D, rng: R) -> ObsView<I>
where
    D: DataView<I> + 'static,
    R: Into<RngSource>,
{
    let mut rng: StdRng = rng.into().into();
    let indices = shuffled_indices(data.numobs(), &mut rng);

    ObsView::new_unchecked(Arc::new(data), indices)
}

/// Returns a view of `n` observations of `data`, sampled without
/// replacement.
///
/// Fails with [`DataError::Oversample`] when more observations are
/// requested than the container holds.
pub fn sampleobs<D, I, R>(data: D, n: usize, rng: R) -> Result<ObsView<I>, DataError>
where
    D: DataView<I> + 'static,
    R: Into<RngSource>,
{
    let available = data.numobs();
    if n > available {
        return Err(DataError::Oversample {
            requested: n,
            available,
        });
    }

    let mut rng: StdRng = rng.into().into();
    let indices = rand::seq::index::sample(&mut rng, available, n).into_vec();

    Ok(ObsView::new_unchecked(Arc::new(data), indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn shuffleobs_is_a_permutation() {
        let view = shuffleobs(0..50, 42);
        let mut items = view.getobs_all().unwrap();
        items.sort_unstable();

        assert_eq!(items, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn shuffleobs_matches_the_underlying_permutation() {
        let seed = 42;
        let view = shuffleobs(0..27, seed);

        let mut rng = StdRng::seed_from_u64(seed);
        let expected = shuffled_indices(27, &mut rng);

        assert_eq!(view.getobs_all().unwrap(), expected);
    }

    #[test]
    fn sampleobs_draws_without_replacement() {
        let view = sampleobs(0..100, 10, 7).unwrap();
        let mut items = view.getobs_all().unwrap();
        items.sort_unstable();
        items.dedup();

        assert_eq!(items.len(), 10);
    }

    #[test]
    fn sampleobs_rejects_oversampling() {
        let result = sampleobs(0..5, 6, RngSource::Default);

        assert_eq!(
            result.err(),
            Some(DataError::Oversample {
                requested: 6,
                available: 5
            })
        );
    }
}
