mod mif;

pub use mif::*;
