pub mod pattern;
pub mod export;
pub mod import;
pub mod error;
pub use error::*;
