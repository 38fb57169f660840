/// Error type for all fallible observation-access operations.
///
/// Errors are raised synchronously at the offending call site and carry the
/// values needed to diagnose it. The crate never retries or logs; recovery
/// policy belongs to the caller.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// An observation index outside `0..numobs`.
    #[error("observation index {index} out of range for a container with {numobs} observations")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The observation count of the container it was applied to.
        numobs: usize,
    },

    /// Observations that cannot be collated into a single batch.
    #[error("cannot collate observations: {0}")]
    ShapeMismatch(String),

    /// Containers with diverging observation counts passed to a zip.
    #[error("cannot zip containers with observation counts {0:?}")]
    LengthMismatch(Vec<usize>),

    /// More observations requested than available without replacement.
    #[error("cannot sample {requested} of {available} observations without replacement")]
    Oversample {
        /// Number of observations requested.
        requested: usize,
        /// Number of observations available.
        available: usize,
    },

    /// Split fractions outside `(0, 1]` or summing to more than one.
    #[error("invalid split fractions {at:?}: each must be in (0, 1] and sum to at most 1")]
    InvalidSplit {
        /// The offending fractions.
        at: Vec<f64>,
    },

    /// A fold count that does not partition the observations.
    #[error("cannot partition {numobs} observations into {k} folds")]
    InvalidFolds {
        /// Requested number of folds.
        k: usize,
        /// The observation count.
        numobs: usize,
    },

    /// An empty sequence passed to a collation.
    #[error("cannot collate an empty batch")]
    EmptyBatch,

    /// A value with no corresponding entry in the one-hot label set.
    #[error("value at position {position} not found in the label set")]
    UnknownLabel {
        /// Position of the offending value in the input.
        position: usize,
    },
}
