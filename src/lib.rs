#![warn(missing_docs)]

//! Lazy, composable views over collections of observations, and a
//! mini-batch loader built on top of them.
//!
//! Everything revolves around one capability contract, [`DataView`]: a
//! container reports how many observations it holds ([`numobs`]) and
//! retrieves them by position ([`getobs`]). Multi-dimensional arrays index
//! their last axis; sequences index their elements; custom containers
//! implement the trait themselves.
//!
//! On top of the contract, five view combinators compose pipelines without
//! copying data: [`ObsView`] (subset selection), [`MappedView`] (lazy
//! transformation), [`JoinedView`] (concatenation), [`ZippedView`]
//! (tupling) and [`CachedView`] (retrieval memoization). Index utilities
//! ([`shuffleobs`], [`sampleobs`], [`splitobs`], [`kfolds`]) partition
//! observations reproducibly from explicit random sources, [`stackobs`]
//! collates observations into batches, and the loaders in [`batch`] drive
//! the whole stack to feed a training loop, optionally prefetching batches
//! on background threads without ever reordering them.
//!
//! ```
//! use dataviews::batch::{DataLoader, DataLoaderBuilder};
//! use dataviews::shuffleobs;
//! use ndarray::{Array1, Array2};
//!
//! let features = Array2::<f32>::zeros((16, 100));
//!
//! let loader = DataLoaderBuilder::<Array1<f32>, Array2<f32>>::stacking()
//!     .batch_size(32)
//!     .build(shuffleobs(features, 42));
//!
//! for batch in loader.iter() {
//!     assert_eq!(batch.unwrap().nrows(), 16);
//! }
//! ```

pub mod batch;
pub mod ops;

mod collate;
mod container;
mod error;
mod index;
mod view;

pub use collate::*;
pub use container::*;
pub use error::*;
pub use index::*;
pub use view::*;
