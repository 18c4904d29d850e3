use thiserror::Error;

use crate::casing::SideIndex;
use crate::subdivision::{EdgeId, VertexId};

/// Top-level error type for the interlace engine.
#[derive(Debug, Error)]
pub enum InterlaceError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Subdivision(#[from] SubdivisionError),

    #[error(transparent)]
    Weave(#[from] WeaveError),
}

/// Errors related to geometric computations and parameters.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is invalid: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to the input planar subdivision.
#[derive(Debug, Error)]
pub enum SubdivisionError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Broken invariants of weave resolution and strand tracing.
///
/// Unlike [`crate::casing::CasingWarning`], these indicate a malformed
/// casing set rather than a recoverable geometric approximation.
#[derive(Debug, Error)]
pub enum WeaveError {
    #[error("side {side:?} of casing {casing:?} at vertex {vertex:?} is still unresolved")]
    UnresolvedSide {
        casing: EdgeId,
        side: SideIndex,
        vertex: VertexId,
    },

    #[error("no continuation from edge {edge:?} at vertex {vertex:?} ({candidates} unassigned neighbours)")]
    UnreachableContinuation {
        edge: EdgeId,
        vertex: VertexId,
        candidates: usize,
    },

    #[error("weave seeds at vertex {vertex:?} contradict each other")]
    ConflictingSeeds { vertex: VertexId },

    #[error("edge {0:?} has no casing in this set")]
    MissingCasing(EdgeId),
}

/// Convenience type alias for results using [`InterlaceError`].
pub type Result<T> = std::result::Result<T, InterlaceError>;
