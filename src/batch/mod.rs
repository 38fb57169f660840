//! Mini-batch loading: strategies for grouping observations into chunks,
//! batchers that collate each chunk, and loaders that drive a container
//! sequentially or with order-preserving background prefetch.

mod base;
mod batcher;
mod builder;
mod loader;
mod multithread;
mod strategy;

pub use base::*;
pub use batcher::*;
pub use builder::*;
pub use loader::*;
pub use multithread::*;
pub use strategy::*;
