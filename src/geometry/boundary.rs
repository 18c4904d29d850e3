use crate::math::distance_2d::point_to_circle_dist;
use crate::math::intersect_2d::{
    circle_circle_intersect_2d, line_circle_intersect_2d, line_line_intersect_2d, nearest_to,
};
use crate::math::{Point2, Vector2, TOLERANCE};

/// One long edge of a ribbon, extended to its full supporting curve.
///
/// Straight casings are bounded by two parallel lines; curved casings by two
/// concentric circles. Joins are computed on the unbounded curves so that a
/// corner may lie past the end of either edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    /// Infinite line `origin + t * dir`, `dir` normalized.
    Line { origin: Point2, dir: Vector2 },
    /// Full circle.
    Circle { center: Point2, radius: f64 },
}

impl Boundary {
    /// Intersects two boundaries, returning the branch nearest `hint`.
    ///
    /// Returns `None` for parallel lines, concentric circles, or curves that
    /// do not meet.
    #[must_use]
    pub fn intersect(&self, other: &Self, hint: &Point2) -> Option<Point2> {
        match (self, other) {
            (
                Self::Line {
                    origin: p1,
                    dir: d1,
                },
                Self::Line {
                    origin: p2,
                    dir: d2,
                },
            ) => line_line_intersect_2d(p1, d1, p2, d2).map(|(t, _)| p1 + d1 * t),
            (Self::Line { origin, dir }, Self::Circle { center, radius })
            | (Self::Circle { center, radius }, Self::Line { origin, dir }) => {
                nearest_to(&line_circle_intersect_2d(origin, dir, center, *radius), hint)
            }
            (
                Self::Circle {
                    center: c1,
                    radius: r1,
                },
                Self::Circle {
                    center: c2,
                    radius: r2,
                },
            ) => nearest_to(&circle_circle_intersect_2d(c1, *r1, c2, *r2), hint),
        }
    }

    /// Distance from `p` to the boundary curve.
    #[must_use]
    pub fn distance_to(&self, p: &Point2) -> f64 {
        match self {
            Self::Line { origin, dir } => {
                let v = p - origin;
                (dir.x * v.y - dir.y * v.x).abs()
            }
            Self::Circle { center, radius } => point_to_circle_dist(p, center, *radius),
        }
    }

    /// Returns `true` if `p` lies on the boundary within `tol`.
    #[must_use]
    pub fn contains(&self, p: &Point2, tol: f64) -> bool {
        self.distance_to(p) < tol.max(TOLERANCE)
    }
}
