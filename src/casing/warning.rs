use thiserror::Error;

use crate::math::Point2;
use crate::subdivision::{EdgeId, VertexId};

/// A recoverable geometric approximation made while building casings.
///
/// Warnings never abort a build. The affected corner keeps a fallback
/// position and renders slightly off.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CasingWarning {
    /// Two edges fold back onto each other and no mitre corner exists.
    #[error("degenerate join on edge {edge:?} at vertex {vertex:?}")]
    DegenerateJoin { edge: EdgeId, vertex: VertexId },

    /// Two boundary curves that should meet do not intersect.
    #[error("no boundary intersection for edge {edge:?} at vertex {vertex:?} near ({}, {})", .near.x, .near.y)]
    MissingIntersection {
        edge: EdgeId,
        vertex: VertexId,
        near: Point2,
    },

    /// Post-hoc validation found a broken invariant.
    #[error("invalid casing for edge {edge:?}: {reason}")]
    InvalidCasing { edge: EdgeId, reason: String },
}

impl CasingWarning {
    /// The edge whose casing the warning concerns.
    #[must_use]
    pub fn edge(&self) -> EdgeId {
        match self {
            Self::DegenerateJoin { edge, .. }
            | Self::MissingIntersection { edge, .. }
            | Self::InvalidCasing { edge, .. } => *edge,
        }
    }
}

/// Logs a warning and appends it to the build's warning list.
pub(crate) fn record(warnings: &mut Vec<CasingWarning>, warning: CasingWarning) {
    tracing::warn!(%warning, "casing approximation");
    warnings.push(warning);
}
