mod crockford;
mod error;
mod interface;

use crockford::*;
pub use error::*;
pub use interface::*;
