mod interface;
mod unix_clock;

pub use interface::*;
pub use unix_clock::*;
