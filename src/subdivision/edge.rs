use crate::math::arc_2d::{angle_of, sweep_between};
use crate::math::polygon_2d::segment_direction;
use crate::math::{Point2, Vector2};
use crate::Result;

use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge of the subdivision.
    pub struct EdgeId;
}

/// Which side of the travel direction the arc center lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convexity {
    /// Center to the right of start→end; the arc turns clockwise.
    Convex,
    /// Center to the left of start→end; the arc turns counter-clockwise.
    Concave,
}

/// The shape of an edge between its two vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeCurve {
    /// A straight segment.
    Line,
    /// A circular arc around `center`.
    Arc { center: Point2, convexity: Convexity },
}

/// Data associated with a subdivision edge.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// Start vertex of the edge.
    pub start: VertexId,
    /// End vertex of the edge.
    pub end: VertexId,
    /// The curve joining the two vertices.
    pub curve: EdgeCurve,
}

impl EdgeData {
    /// Creates a straight edge.
    #[must_use]
    pub fn line(start: VertexId, end: VertexId) -> Self {
        Self {
            start,
            end,
            curve: EdgeCurve::Line,
        }
    }

    /// Creates a circular-arc edge.
    #[must_use]
    pub fn arc(start: VertexId, end: VertexId, center: Point2, convexity: Convexity) -> Self {
        Self {
            start,
            end,
            curve: EdgeCurve::Arc { center, convexity },
        }
    }

    /// Returns the opposite endpoint, or `None` if `vertex` is not on this edge.
    #[must_use]
    pub fn other(&self, vertex: VertexId) -> Option<VertexId> {
        if vertex == self.start {
            Some(self.end)
        } else if vertex == self.end {
            Some(self.start)
        } else {
            None
        }
    }
}

/// Resolved positions of an edge, detached from the subdivision arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeGeometry {
    pub start: Point2,
    pub end: Point2,
    pub curve: EdgeCurve,
}

impl EdgeGeometry {
    /// Returns `true` for arc edges.
    #[must_use]
    pub fn is_curved(&self) -> bool {
        matches!(self.curve, EdgeCurve::Arc { .. })
    }

    /// Arc radius measured at the start vertex; `None` for lines.
    #[must_use]
    pub fn radius(&self) -> Option<f64> {
        match self.curve {
            EdgeCurve::Line => None,
            EdgeCurve::Arc { center, .. } => Some((self.start - center).norm()),
        }
    }

    /// Signed sweep of the arc from start to end (negative = clockwise).
    #[must_use]
    pub fn sweep(&self) -> Option<f64> {
        match self.curve {
            EdgeCurve::Line => None,
            EdgeCurve::Arc { center, convexity } => Some(sweep_between(
                angle_of(&center, &self.start),
                angle_of(&center, &self.end),
                convexity == Convexity::Concave,
            )),
        }
    }

    /// Length along the edge (chord for lines, arc length for arcs).
    #[must_use]
    pub fn length(&self) -> f64 {
        match (self.radius(), self.sweep()) {
            (Some(r), Some(sweep)) => r * sweep.abs(),
            _ => (self.end - self.start).norm(),
        }
    }

    /// Unit direction of travel (start→end) at `p`, which must lie on the edge.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for zero-length lines or for a
    /// point coinciding with the arc center.
    pub fn travel_direction_at(&self, p: &Point2) -> Result<Vector2> {
        match self.curve {
            EdgeCurve::Line => segment_direction(&self.start, &self.end),
            EdgeCurve::Arc { center, convexity } => {
                let u = segment_direction(&center, p)?;
                Ok(match convexity {
                    Convexity::Convex => Vector2::new(u.y, -u.x),
                    Convexity::Concave => Vector2::new(-u.y, u.x),
                })
            }
        }
    }

    /// Unit direction leaving the given end of the edge, pointing into the edge.
    ///
    /// # Errors
    ///
    /// Propagates degenerate-geometry errors from [`Self::travel_direction_at`].
    pub fn outgoing_direction(&self, at_start: bool) -> Result<Vector2> {
        if at_start {
            self.travel_direction_at(&self.start)
        } else {
            Ok(-self.travel_direction_at(&self.end)?)
        }
    }
}
