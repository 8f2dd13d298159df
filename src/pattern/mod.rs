mod error;
mod arg;
mod entry;
mod generator;
mod verify;

pub use error::*;
pub use arg::*;
pub use entry::*;
pub use generator::*;
pub use verify::*;
