mod fixed;
mod hardware;
mod identity;
mod interface;

pub use fixed::*;
pub use hardware::*;
pub use identity::*;
pub use interface::*;
