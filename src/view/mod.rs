mod cached;
mod joined;
mod mapped;
mod select;
mod zipped;

pub use cached::*;
pub use joined::*;
pub use mapped::*;
pub use select::*;
pub use zipped::*;
