pub mod casing;
pub mod error;
pub mod geometry;
pub mod math;
pub mod paint;
pub mod subdivision;

pub use error::{InterlaceError, Result};
