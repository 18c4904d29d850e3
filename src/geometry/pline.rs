use crate::math::arc_2d::{arc_from_bulge, arc_point_at};
use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point2;

/// A path vertex; `bulge` describes the segment leaving it.
///
/// `bulge = tan(sweep / 4)`, so zero is a straight segment, positive turns
/// counter-clockwise and `±1` is a half circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlineVertex {
    pub x: f64,
    pub y: f64,
    pub bulge: f64,
}

impl PlineVertex {
    #[must_use]
    pub fn at(p: &Point2, bulge: f64) -> Self {
        Self {
            x: p.x,
            y: p.y,
            bulge,
        }
    }

    #[must_use]
    pub fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    fn is_straight(&self) -> bool {
        self.bulge.abs() < 1e-12
    }
}

/// Path handed to a painter: straight and circular segments, open or closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Pline {
    pub vertices: Vec<PlineVertex>,
    pub closed: bool,
}

impl Pline {
    #[must_use]
    pub fn with_capacity(capacity: usize, closed: bool) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            closed,
        }
    }

    /// Straight-segment path through `points`.
    #[must_use]
    pub fn from_points(points: &[Point2], closed: bool) -> Self {
        Self {
            vertices: points.iter().map(|p| PlineVertex::at(p, 0.0)).collect(),
            closed,
        }
    }

    /// Appends a vertex whose outgoing segment has the given bulge.
    pub fn push(&mut self, p: &Point2, bulge: f64) {
        self.vertices.push(PlineVertex::at(p, bulge));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Consecutive vertex pairs, including the closing pair of a closed path.
    pub fn segments(&self) -> impl Iterator<Item = (&PlineVertex, &PlineVertex)> {
        let n = self.vertices.len();
        let count = match n {
            0 | 1 => 0,
            _ if self.closed => n,
            _ => n - 1,
        };
        (0..count).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }

    /// Replaces arcs by chords no further than `tolerance` from the arc.
    ///
    /// A closed path does not repeat its first point.
    #[must_use]
    pub fn flatten(&self, tolerance: f64) -> Vec<Point2> {
        let Some(first) = self.vertices.first() else {
            return Vec::new();
        };
        let mut points = vec![first.point()];
        for (a, b) in self.segments() {
            if !a.is_straight() {
                let (center, radius, start, sweep) = arc_from_bulge(&a.point(), &b.point(), a.bulge);
                let chords = chords_for_arc(radius, sweep.abs(), tolerance);
                points.extend(
                    (1..chords).map(|j| {
                        arc_point_at(&center, radius, start, sweep, f64::from(j) / f64::from(chords))
                    }),
                );
            }
            points.push(b.point());
        }
        if self.closed && points.len() > 1 {
            points.pop();
        }
        points
    }

    /// Signed area of the flattened path; positive when counter-clockwise.
    #[must_use]
    pub fn signed_area(&self, tolerance: f64) -> f64 {
        signed_area_2d(&self.flatten(tolerance))
    }
}

/// Chord count keeping the sagitta `r (1 - cos(θ/2))` within `tolerance`.
fn chords_for_arc(radius: f64, sweep: f64, tolerance: f64) -> u32 {
    if radius < 1e-12 || sweep < 1e-12 || tolerance <= 0.0 {
        return 1;
    }
    let step = if tolerance >= radius {
        std::f64::consts::PI
    } else {
        2.0 * (1.0 - tolerance / radius).acos()
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = (sweep / step).ceil() as u32;
    n.max(1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn unit_square(closed: bool) -> Pline {
        Pline::from_points(
            &[
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ],
            closed,
        )
    }

    #[test]
    fn closing_segment_counts_only_when_closed() {
        assert_eq!(unit_square(false).segments().count(), 3);
        assert_eq!(unit_square(true).segments().count(), 4);
        assert_eq!(unit_square(true).flatten(0.01).len(), 4);
        assert_eq!(unit_square(false).flatten(0.01).len(), 4);
        assert_eq!(Pline::with_capacity(0, true).segments().count(), 0);
    }

    #[test]
    fn half_disc_area() {
        // Counter-clockwise half circle through (0,-1), closed by the diameter.
        let mut pline = Pline::with_capacity(2, true);
        pline.push(&Point2::new(-1.0, 0.0), 1.0);
        pline.push(&Point2::new(1.0, 0.0), 0.0);
        let pts = pline.flatten(1e-4);
        assert!(pts.len() > 10);
        assert!(pts.iter().all(|p| p.y <= 1e-10));
        assert_abs_diff_eq!(pline.signed_area(1e-6), PI / 2.0, epsilon = 1e-3);
    }

    #[test]
    fn chord_count_tracks_tolerance() {
        assert_eq!(chords_for_arc(1.0, PI, 10.0), 1);
        assert!(chords_for_arc(1.0, PI, 0.001) > 10);
        assert_eq!(chords_for_arc(0.0, PI, 0.001), 1);
    }
}
