use crate::math::polygon_2d::{cross_2d, left_normal, right_normal};
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::subdivision::VertexId;

/// Sine below which two edges meeting at a joint count as parallel.
pub(crate) const JOIN_TOLERANCE: f64 = TOLERANCE * 1e4;

/// Which end of a casing a side sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideIndex {
    /// At the edge's start vertex.
    First,
    /// At the edge's end vertex.
    Second,
}

impl SideIndex {
    /// The other end of the same casing.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// One of the two boundary points of a side.
///
/// Orientation is per side: looking from the vertex into the casing,
/// `Outer` is on the left and `Inner` on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SidePoint {
    Outer,
    Inner,
}

impl SidePoint {
    /// The boundary a neighbouring casing presents to this one.
    ///
    /// A casing's outer boundary always meets its neighbour's inner one.
    #[must_use]
    pub fn facing(self) -> Self {
        match self {
            Self::Outer => Self::Inner,
            Self::Inner => Self::Outer,
        }
    }
}

/// Over/under resolution of a side at a crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaveState {
    Over,
    Under,
    Unknown,
}

impl WeaveState {
    /// Over ↔ Under; Unknown stays Unknown.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Over => Self::Under,
            Self::Under => Self::Over,
            Self::Unknown => Self::Unknown,
        }
    }
}

/// Geometry of one end of a casing: the outer/mid/inner point triple.
#[derive(Debug, Clone, PartialEq)]
pub struct CasingSide {
    /// The subdivision vertex this side belongs to.
    pub vertex: VertexId,
    pub outer: Point2,
    pub mid: Point2,
    pub inner: Point2,
    /// Set once `outer` and `inner` have been computed.
    pub created: bool,
    /// `None` for non-weaving casings.
    pub weave: Option<WeaveState>,
    /// Under side at a crossing that needs a gap and a projected shadow.
    pub shadow: bool,
}

impl CasingSide {
    /// Creates an uncomputed side sitting on `point`.
    #[must_use]
    pub fn new(vertex: VertexId, point: Point2, weaving: bool) -> Self {
        Self {
            vertex,
            outer: point,
            mid: point,
            inner: point,
            created: false,
            weave: weaving.then_some(WeaveState::Unknown),
            shadow: false,
        }
    }

    /// Returns the requested boundary point.
    #[must_use]
    pub fn point(&self, which: SidePoint) -> Point2 {
        match which {
            SidePoint::Outer => self.outer,
            SidePoint::Inner => self.inner,
        }
    }

    /// Overwrites the requested boundary point.
    pub fn set_point(&mut self, which: SidePoint, p: Point2) {
        match which {
            SidePoint::Outer => self.outer = p,
            SidePoint::Inner => self.inner = p,
        }
    }

    /// Offsets straight out from `mid` along the normal of `dir`.
    ///
    /// `dir` is the unit direction leaving the vertex into the casing.
    pub fn set_normal_offset(&mut self, dir: &Vector2, width: f64) {
        self.outer = self.mid - right_normal(dir) * width;
        self.inner = self.mid + right_normal(dir) * width;
        self.created = true;
    }

    /// Returns `true` if this side is resolved as passing under a crossing.
    #[must_use]
    pub fn is_under(&self) -> bool {
        self.weave == Some(WeaveState::Under)
    }
}

/// Computes the mitred corner where two offset boundaries meet at `joint`.
///
/// `from` is the far end of this casing, `to` the far end of the
/// neighbouring one. The result lies on this casing's `side` boundary and on
/// the neighbour's facing boundary. Returns `None` when the two edges are
/// (anti)parallel and no finite corner exists.
#[must_use]
pub fn get_join_point(
    from: &Point2,
    joint: &Point2,
    to: &Point2,
    width: f64,
    side: SidePoint,
) -> Option<Point2> {
    let a = joint - from;
    let b = joint - to;
    let (la, lb) = (a.norm(), b.norm());
    if la < TOLERANCE || lb < TOLERANCE {
        return None;
    }
    let d1 = a / la;
    let d2 = b / lb;

    let s = cross_2d(&d1, &d2);
    if s.abs() < JOIN_TOLERANCE {
        return None;
    }

    let l = width / s;
    let d = (d1 + d2) * l;
    Some(match side {
        SidePoint::Inner => joint + d,
        SidePoint::Outer => joint - d,
    })
}

/// Returns `true` if two unit directions leaving one vertex continue each
/// other in a straight line (as opposed to folding back).
#[must_use]
pub fn is_straight_continuation(a: &Vector2, b: &Vector2) -> bool {
    a.dot(b) < 0.0 && cross_2d(a, b).abs() < JOIN_TOLERANCE
}

/// Left normal offset of a point, for callers that only have a direction.
#[must_use]
pub fn offset_left(p: &Point2, dir: &Vector2, width: f64) -> Point2 {
    p + left_normal(dir) * width
}
