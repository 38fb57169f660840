mod rng;
mod shuffle;
mod split;

pub use rng::*;
pub use shuffle::*;
pub use split::*;
