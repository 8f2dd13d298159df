mod error;
mod mif;

pub use error::*;
pub use mif::*;
