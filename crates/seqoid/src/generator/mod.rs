mod counter;
mod mutex;
mod object_id;

pub use counter::*;
pub use mutex::*;
pub use object_id::*;
