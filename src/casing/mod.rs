//! Ribbon construction around the edges of a subdivision.
//!
//! Every edge gets a [`Casing`]: a band of constant half-width whose two
//! ends ([`CasingSide`]) are mitred against the neighbouring casings at each
//! vertex. [`Outline`] stops there; [`Interlace`] additionally decides which
//! strand passes over at every four-way crossing, cuts a gap into the one
//! passing under and marks it for a shadow. [`threads::trace`] then groups the
//! casings into continuous strands for colouring.

pub mod edge_casing;
pub mod interlace;
pub mod neighbours;
pub mod outline;
pub mod set;
pub mod side;
pub mod style;
pub mod threads;
pub mod warning;

pub use edge_casing::{Casing, CasingCircle};
pub use interlace::Interlace;
pub use neighbours::{CasingNeighbours, NeighbourEntry};
pub use outline::Outline;
pub use set::CasingSet;
pub use side::{get_join_point, CasingSide, SideIndex, SidePoint, WeaveState};
pub use style::CasingStyle;
pub use threads::{Thread, ThreadMap};
pub use warning::CasingWarning;
