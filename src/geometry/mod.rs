pub mod boundary;
pub mod pline;

pub use boundary::Boundary;
pub use pline::{Pline, PlineVertex};
