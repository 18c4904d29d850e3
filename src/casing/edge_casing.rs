use std::f64::consts::TAU;

use crate::error::Result;
use crate::geometry::{Boundary, Pline};
use crate::math::arc_2d::{angle_of, bulge_from_arc, project_to_radius, rotate_about, sweep_between};
use crate::math::distance_2d::point_to_line_dist;
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::polygon_2d::{right_normal, signed_area_2d};
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::subdivision::{Convexity, EdgeCurve, EdgeGeometry, EdgeId, VertexId};

use super::side::{offset_left, CasingSide, SideIndex, SidePoint};
use super::warning::CasingWarning;

/// Relative tolerance for the post-hoc width and radius checks.
const VALIDATE_TOLERANCE: f64 = 1e-7;

/// One of the two concentric circles bounding a curved casing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CasingCircle {
    pub center: Point2,
    pub radius: f64,
}

impl CasingCircle {
    fn boundary(&self) -> Boundary {
        Boundary::Circle {
            center: self.center,
            radius: self.radius,
        }
    }
}

/// The ribbon standing in for one subdivision edge.
///
/// `side1` sits on the edge's start vertex, `side2` on its end vertex.
/// Curved casings additionally carry their two bounding circles:
/// `outer_circle` passes through `side1.outer` and `side2.inner` (left of
/// travel), `inner_circle` through `side1.inner` and `side2.outer`.
#[derive(Debug, Clone)]
pub struct Casing {
    edge: EdgeId,
    geometry: EdgeGeometry,
    width: f64,
    side1: CasingSide,
    side2: CasingSide,
    dir1: Vector2,
    dir2: Vector2,
    outer_circle: Option<CasingCircle>,
    inner_circle: Option<CasingCircle>,
}

impl Casing {
    /// Creates a casing with uncomputed sides.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the edge direction cannot be
    /// evaluated at either end.
    pub fn new(
        edge: EdgeId,
        start: VertexId,
        end: VertexId,
        geometry: EdgeGeometry,
        width: f64,
        weaving: bool,
    ) -> Result<Self> {
        let dir1 = geometry.outgoing_direction(true)?;
        let dir2 = geometry.outgoing_direction(false)?;

        let (outer_circle, inner_circle) = match geometry.curve {
            EdgeCurve::Line => (None, None),
            EdgeCurve::Arc { center, convexity } => {
                let r = (geometry.start - center).norm();
                let (outer, inner) = match convexity {
                    Convexity::Convex => (r + width, r - width),
                    Convexity::Concave => (r - width, r + width),
                };
                (
                    Some(CasingCircle {
                        center,
                        radius: outer,
                    }),
                    Some(CasingCircle {
                        center,
                        radius: inner,
                    }),
                )
            }
        };

        Ok(Self {
            edge,
            geometry,
            width,
            side1: CasingSide::new(start, geometry.start, weaving),
            side2: CasingSide::new(end, geometry.end, weaving),
            dir1,
            dir2,
            outer_circle,
            inner_circle,
        })
    }

    /// The subdivision edge this casing stands in for.
    #[must_use]
    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    /// Half-width of the ribbon (distance from centreline to each boundary).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn geometry(&self) -> &EdgeGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn is_curved(&self) -> bool {
        self.geometry.is_curved()
    }

    #[must_use]
    pub fn outer_circle(&self) -> Option<&CasingCircle> {
        self.outer_circle.as_ref()
    }

    #[must_use]
    pub fn inner_circle(&self) -> Option<&CasingCircle> {
        self.inner_circle.as_ref()
    }

    #[must_use]
    pub fn side(&self, idx: SideIndex) -> &CasingSide {
        match idx {
            SideIndex::First => &self.side1,
            SideIndex::Second => &self.side2,
        }
    }

    pub fn side_mut(&mut self, idx: SideIndex) -> &mut CasingSide {
        match idx {
            SideIndex::First => &mut self.side1,
            SideIndex::Second => &mut self.side2,
        }
    }

    /// Both sides, first then second.
    pub fn sides(&self) -> [(SideIndex, &CasingSide); 2] {
        [(SideIndex::First, &self.side1), (SideIndex::Second, &self.side2)]
    }

    /// Which side sits on `vertex`, if any.
    #[must_use]
    pub fn side_at(&self, vertex: VertexId) -> Option<SideIndex> {
        if self.side1.vertex == vertex {
            Some(SideIndex::First)
        } else if self.side2.vertex == vertex {
            Some(SideIndex::Second)
        } else {
            None
        }
    }

    /// Unit direction leaving the given end into the casing.
    #[must_use]
    pub fn outgoing(&self, idx: SideIndex) -> Vector2 {
        match idx {
            SideIndex::First => self.dir1,
            SideIndex::Second => self.dir2,
        }
    }

    /// Position of the subdivision vertex at the given end.
    #[must_use]
    pub fn vertex_point(&self, idx: SideIndex) -> Point2 {
        match idx {
            SideIndex::First => self.geometry.start,
            SideIndex::Second => self.geometry.end,
        }
    }

    /// Position of the vertex at the opposite end.
    #[must_use]
    pub fn far_point(&self, idx: SideIndex) -> Point2 {
        self.vertex_point(idx.other())
    }

    fn circle_for(&self, idx: SideIndex, which: SidePoint) -> Option<&CasingCircle> {
        match (idx, which) {
            (SideIndex::First, SidePoint::Outer) | (SideIndex::Second, SidePoint::Inner) => {
                self.outer_circle.as_ref()
            }
            _ => self.inner_circle.as_ref(),
        }
    }

    /// The full supporting curve of one boundary point of a side.
    #[must_use]
    pub fn boundary_of(&self, idx: SideIndex, which: SidePoint) -> Boundary {
        if let Some(circle) = self.circle_for(idx, which) {
            return circle.boundary();
        }
        let dir = self.outgoing(idx);
        let vertex = self.vertex_point(idx);
        let origin = match which {
            SidePoint::Outer => offset_left(&vertex, &dir, self.width),
            SidePoint::Inner => vertex + right_normal(&dir) * self.width,
        };
        Boundary::Line { origin, dir }
    }

    /// Simple cap geometry: normal offset for lines, radial projection for arcs.
    pub fn create_default(&mut self, idx: SideIndex) {
        if self.is_curved() {
            self.create_curved(idx);
        } else {
            let dir = self.outgoing(idx);
            let vertex = self.vertex_point(idx);
            let width = self.width;
            let side = self.side_mut(idx);
            side.mid = vertex;
            side.set_normal_offset(&dir, width);
        }
    }

    /// Projects the vertex radially onto the outer and inner circles.
    pub fn create_curved(&mut self, idx: SideIndex) {
        let Some(center) = self.arc_center() else {
            return;
        };
        let vertex = self.vertex_point(idx);
        let outer_r = self.circle_for(idx, SidePoint::Outer).map_or(0.0, |c| c.radius);
        let inner_r = self.circle_for(idx, SidePoint::Inner).map_or(0.0, |c| c.radius);
        let side = self.side_mut(idx);
        side.mid = vertex;
        side.outer = project_to_radius(&center, &vertex, outer_r);
        side.inner = project_to_radius(&center, &vertex, inner_r);
        side.created = true;
    }

    fn arc_center(&self) -> Option<Point2> {
        match self.geometry.curve {
            EdgeCurve::Line => None,
            EdgeCurve::Arc { center, .. } => Some(center),
        }
    }

    fn centre_radius(&self) -> Option<f64> {
        self.geometry.radius()
    }

    /// Rotation sense (+1 CCW, -1 CW) of travel leaving the given end.
    fn rotation_sign(&self, idx: SideIndex) -> f64 {
        let travel = match self.geometry.curve {
            EdgeCurve::Arc {
                convexity: Convexity::Concave,
                ..
            } => 1.0,
            _ => -1.0,
        };
        match idx {
            SideIndex::First => travel,
            SideIndex::Second => -travel,
        }
    }

    /// Distance from `p` to the centreline (line through the endpoints, or the arc circle).
    #[must_use]
    pub fn centreline_distance(&self, p: &Point2) -> f64 {
        match (self.arc_center(), self.centre_radius()) {
            (Some(c), Some(r)) => ((p - c).norm() - r).abs(),
            _ => point_to_line_dist(p, &self.geometry.start, &self.geometry.end),
        }
    }

    /// Foot of `p` on the centreline.
    #[must_use]
    pub fn project_to_centreline(&self, p: &Point2) -> Point2 {
        match (self.arc_center(), self.centre_radius()) {
            (Some(c), Some(r)) => project_to_radius(&c, p, r),
            _ => {
                let a = self.geometry.start;
                let d = self.dir1;
                a + d * (p - a).dot(&d)
            }
        }
    }

    /// Moves `p` along the casing, away from the given end, by `amount`.
    ///
    /// For arcs the move is a rotation about the center by `amount / r`,
    /// where `r` is the centreline radius.
    #[must_use]
    pub fn advance(&self, idx: SideIndex, p: &Point2, amount: f64) -> Point2 {
        match (self.arc_center(), self.centre_radius()) {
            (Some(c), Some(r)) if r > TOLERANCE => {
                rotate_about(p, &c, self.rotation_sign(idx) * amount / r)
            }
            _ => p + self.outgoing(idx) * amount,
        }
    }

    /// Centreline distance from the side's vertex to its `mid`.
    ///
    /// Negative when `mid` sits behind the vertex.
    fn travelled(&self, idx: SideIndex) -> f64 {
        let mid = self.side(idx).mid;
        let near = self.vertex_point(idx);
        match (self.arc_center(), self.centre_radius()) {
            (Some(c), Some(r)) => {
                let total = self.geometry.length();
                let full = TAU * r;
                let ccw = self.rotation_sign(idx) > 0.0;
                let travelled =
                    r * sweep_between(angle_of(&c, &near), angle_of(&c, &mid), ccw).abs();
                // A mid slightly behind the vertex wraps to almost a full turn.
                if travelled > total + 0.5 * (full - total) {
                    travelled - full
                } else {
                    travelled
                }
            }
            _ => (mid - near).dot(&self.outgoing(idx)),
        }
    }

    /// Length of centreline left between the side's `mid` and the far end.
    #[must_use]
    pub fn remaining_length(&self, idx: SideIndex) -> f64 {
        (self.geometry.length() - self.travelled(idx)).max(0.0)
    }

    /// Signed centreline length between the two sides' `mid` points.
    ///
    /// Negative once the ends have passed each other.
    fn span(&self) -> f64 {
        self.geometry.length() - self.travelled(SideIndex::First) - self.travelled(SideIndex::Second)
    }

    /// Length of centreline left between the two sides' `mid` points.
    #[must_use]
    pub fn free_length(&self) -> f64 {
        self.span().max(0.0)
    }

    /// Shrinks an Under side away from its crossing to open a visible gap.
    ///
    /// Moves `outer`, `mid` and `inner` toward the other end by
    /// `min(gap, free length)`. Returns the distance actually applied.
    pub fn set_gap(&mut self, idx: SideIndex, gap: f64) -> f64 {
        let amount = gap.min(self.free_length());
        self.shift_side(idx, amount)
    }

    /// Gaps every shadowed side by `gap`.
    ///
    /// When both ends are shadowed each may take at most half of the span
    /// between them, so the two ends meet rather than pass.
    pub fn set_gaps(&mut self, gap: f64) {
        let shadowed = [SideIndex::First, SideIndex::Second].map(|idx| self.side(idx).shadow);
        let limit = match shadowed {
            [true, true] => 0.5 * self.span().max(0.0),
            _ => f64::INFINITY,
        };
        for (idx, shadow) in [SideIndex::First, SideIndex::Second].into_iter().zip(shadowed) {
            if shadow {
                let amount = gap.min(limit).min(self.free_length());
                self.shift_side(idx, amount);
            }
        }
    }

    fn shift_side(&mut self, idx: SideIndex, amount: f64) -> f64 {
        if amount < TOLERANCE {
            return 0.0;
        }
        let side = self.side(idx);
        let outer = self.advance(idx, &side.outer, amount);
        let mid = self.advance(idx, &side.mid, amount);
        let inner = self.advance(idx, &side.inner, amount);
        let side = self.side_mut(idx);
        side.outer = outer;
        side.mid = mid;
        side.inner = inner;
        amount
    }

    /// Bulge of the boundary segment running from side `from` to the other side.
    fn boundary_bulge(&self, from: SideIndex, p0: &Point2, p1: &Point2) -> f64 {
        match self.arc_center() {
            Some(c) => bulge_from_arc(p0, p1, &c, self.rotation_sign(from) > 0.0),
            None => 0.0,
        }
    }

    /// Closed fill outline of the ribbon.
    ///
    /// Runs `side1.outer` → `side2.inner` along the outer boundary, across
    /// the second end through its `mid`, back along the inner boundary and
    /// across the first end.
    #[must_use]
    pub fn fill_boundary(&self) -> Pline {
        let (s1, s2) = (&self.side1, &self.side2);
        let mut pline = Pline::with_capacity(6, true);
        pline.push(&s1.outer, self.boundary_bulge(SideIndex::First, &s1.outer, &s2.inner));
        pline.push(&s2.inner, 0.0);
        pline.push(&s2.mid, 0.0);
        pline.push(&s2.outer, self.boundary_bulge(SideIndex::Second, &s2.outer, &s1.inner));
        pline.push(&s1.inner, 0.0);
        pline.push(&s1.mid, 0.0);
        pline
    }

    /// Open outlines for stroking: both long boundaries, plus the end
    /// segment of every side where the ribbon visibly stops (caps and
    /// gapped Under sides).
    #[must_use]
    pub fn outline_boundary(&self, capped: [bool; 2]) -> Vec<Pline> {
        let (s1, s2) = (&self.side1, &self.side2);
        let mut outer = Pline::with_capacity(2, false);
        outer.push(&s1.outer, self.boundary_bulge(SideIndex::First, &s1.outer, &s2.inner));
        outer.push(&s2.inner, 0.0);

        let mut inner = Pline::with_capacity(2, false);
        inner.push(&s2.outer, self.boundary_bulge(SideIndex::Second, &s2.outer, &s1.inner));
        inner.push(&s1.inner, 0.0);

        let mut result = vec![outer, inner];
        for ((_, side), cap) in self.sides().into_iter().zip(capped) {
            if cap || side.shadow {
                result.push(Pline::from_points(&[side.outer, side.mid, side.inner], false));
            }
        }
        result
    }

    /// Projected shadow of the crossing Over strand onto an Under side.
    ///
    /// A copy of the side's end segment (which lies along the Over strand's
    /// boundary) is advanced `min(shadow, remaining length)` into the
    /// casing; the region between the two is the shadow. Returns `None`
    /// for sides without a shadow flag or without room for one.
    #[must_use]
    pub fn shadow_boundary(&self, idx: SideIndex, shadow: f64) -> Option<Pline> {
        let side = self.side(idx);
        if !side.shadow {
            return None;
        }
        let len = shadow.min(self.free_length());
        if len < TOLERANCE {
            return None;
        }

        let mut outer_far = self.advance(idx, &side.outer, len);
        let mut inner_far = self.advance(idx, &side.inner, len);
        if let Some(c) = self.arc_center() {
            // Keep the projected corners on the Under side's own circles.
            let r_outer = (side.outer - c).norm();
            let r_inner = (side.inner - c).norm();
            outer_far = project_to_radius(&c, &outer_far, r_outer);
            inner_far = project_to_radius(&c, &inner_far, r_inner);
        }

        let forward = self.arc_center().map_or(0.0, |c| {
            bulge_from_arc(&side.inner, &inner_far, &c, self.rotation_sign(idx) > 0.0)
        });
        let back = self.arc_center().map_or(0.0, |c| {
            bulge_from_arc(&outer_far, &side.outer, &c, self.rotation_sign(idx) < 0.0)
        });

        let mut pline = Pline::with_capacity(4, true);
        pline.push(&side.outer, 0.0);
        pline.push(&side.inner, forward);
        pline.push(&inner_far, 0.0);
        pline.push(&outer_far, back);
        Some(pline)
    }

    /// Checks the casing's geometric invariants.
    ///
    /// With `full_check` off only curve-radius invariants are examined.
    /// Failures are returned as warnings; the geometry stays usable.
    #[must_use]
    pub fn validate(&self, full_check: bool) -> Vec<CasingWarning> {
        let mut warnings = Vec::new();
        let tol = VALIDATE_TOLERANCE * self.width.max(1.0);
        let mut invalid = |reason: String| {
            warnings.push(CasingWarning::InvalidCasing {
                edge: self.edge,
                reason,
            });
        };

        if let (Some(outer), Some(inner), Some(r)) =
            (self.outer_circle, self.inner_circle, self.centre_radius())
        {
            if ((outer.radius - r).abs() - self.width).abs() > tol
                || ((inner.radius - r).abs() - self.width).abs() > tol
            {
                invalid(format!(
                    "circle radii {} / {} do not straddle arc radius {r} by {}",
                    outer.radius, inner.radius, self.width
                ));
            }
            if inner.radius <= TOLERANCE || outer.radius <= TOLERANCE {
                invalid("ribbon is wider than the arc radius".to_owned());
            }
            for (idx, side) in self.sides() {
                for which in [SidePoint::Outer, SidePoint::Inner] {
                    let circle = self.boundary_of(idx, which);
                    if side.created && !circle.contains(&side.point(which), tol) {
                        invalid(format!("{which:?} point of {idx:?} side is off its circle"));
                    }
                }
            }
        }

        if !full_check {
            return warnings;
        }

        for (idx, side) in self.sides() {
            if !side.created {
                invalid(format!("{idx:?} side was never created"));
                continue;
            }
            for which in [SidePoint::Outer, SidePoint::Inner] {
                let d = self.centreline_distance(&side.point(which));
                if (d - self.width).abs() > tol {
                    invalid(format!(
                        "{which:?} point of {idx:?} side is {d} from the centreline, expected {}",
                        self.width
                    ));
                }
            }
        }

        if self.side1.created && self.side2.created && self.span() < -tol {
            invalid(format!("ends have passed each other by {}", -self.span()));
        }

        if !self.is_curved() {
            let (s1, s2) = (&self.side1, &self.side2);
            if segment_segment_intersect_2d(&s1.outer, &s2.inner, &s2.outer, &s1.inner).is_some()
            {
                invalid("outer and inner boundaries cross".to_owned());
            }
            let ring = [s1.outer, s2.inner, s2.mid, s2.outer, s1.inner, s1.mid];
            if signed_area_2d(&ring).abs() < TOLERANCE {
                invalid("ribbon has collapsed to zero area".to_owned());
            }
        }

        warnings
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use slotmap::SlotMap;

    fn ids() -> (EdgeId, VertexId, VertexId) {
        let mut edges = SlotMap::<EdgeId, ()>::with_key();
        let mut verts = SlotMap::<VertexId, ()>::with_key();
        (edges.insert(()), verts.insert(()), verts.insert(()))
    }

    fn straight(width: f64) -> Casing {
        let (e, a, b) = ids();
        let g = EdgeGeometry {
            start: Point2::new(0.0, 0.0),
            end: Point2::new(10.0, 0.0),
            curve: EdgeCurve::Line,
        };
        Casing::new(e, a, b, g, width, false).unwrap()
    }

    fn arc(convexity: Convexity) -> Casing {
        // Upper half of the radius-5 circle, walked from (5,0) to (-5,0).
        let (e, a, b) = ids();
        let (start, end) = match convexity {
            Convexity::Concave => (Point2::new(5.0, 0.0), Point2::new(-5.0, 0.0)),
            Convexity::Convex => (Point2::new(-5.0, 0.0), Point2::new(5.0, 0.0)),
        };
        let g = EdgeGeometry {
            start,
            end,
            curve: EdgeCurve::Arc {
                center: Point2::origin(),
                convexity,
            },
        };
        Casing::new(e, a, b, g, 1.0, true).unwrap()
    }

    #[test]
    fn open_end_caps_are_symmetric() {
        let mut c = straight(1.0);
        c.create_default(SideIndex::First);
        c.create_default(SideIndex::Second);
        for (_, side) in c.sides() {
            assert_abs_diff_eq!((side.outer - side.inner).norm(), 2.0, epsilon = 1e-12);
            assert_abs_diff_eq!((side.outer - side.mid).norm(), 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(side.outer.x, side.mid.x, epsilon = 1e-12);
        }
        // side1.outer and side2.inner run along the same (left) boundary.
        assert_abs_diff_eq!(c.side(SideIndex::First).outer.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.side(SideIndex::Second).inner.y, 1.0, epsilon = 1e-12);
        assert!(c.validate(true).is_empty());
    }

    #[test]
    fn circle_radii_follow_convexity() {
        let convex = arc(Convexity::Convex);
        assert_abs_diff_eq!(convex.outer_circle().unwrap().radius, 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(convex.inner_circle().unwrap().radius, 4.0, epsilon = 1e-12);

        let concave = arc(Convexity::Concave);
        assert_abs_diff_eq!(concave.outer_circle().unwrap().radius, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(concave.inner_circle().unwrap().radius, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn curved_sides_sit_on_their_circles() {
        let mut c = arc(Convexity::Convex);
        c.create_default(SideIndex::First);
        c.create_default(SideIndex::Second);
        // Convex from (-5,0) to (5,0) runs clockwise over the top; left of
        // travel is away from the center.
        assert_abs_diff_eq!(c.side(SideIndex::First).outer.x, -6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.side(SideIndex::Second).inner.x, 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.side(SideIndex::Second).outer.x, 4.0, epsilon = 1e-12);
        assert!(c.validate(true).is_empty(), "{:?}", c.validate(true));
    }

    #[test]
    fn gap_on_straight_casing() {
        let mut c = straight(1.0);
        c.create_default(SideIndex::First);
        let applied = c.set_gap(SideIndex::First, 2.5);
        assert_abs_diff_eq!(applied, 2.5, epsilon = 1e-12);
        let s = c.side(SideIndex::First);
        assert_abs_diff_eq!(s.mid.x, 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(s.outer.x, 2.5, epsilon = 1e-12);

        // Never pushed past the far end.
        let applied = c.set_gap(SideIndex::First, 100.0);
        assert_abs_diff_eq!(applied, 7.5, epsilon = 1e-12);
        assert_abs_diff_eq!(c.side(SideIndex::First).mid.x, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn gap_on_arc_keeps_radius() {
        let mut c = arc(Convexity::Concave);
        c.create_default(SideIndex::First);
        let applied = c.set_gap(SideIndex::First, 1.0);
        assert_abs_diff_eq!(applied, 1.0, epsilon = 1e-12);
        let s = c.side(SideIndex::First);
        assert_abs_diff_eq!(s.mid.coords.norm(), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.outer.coords.norm(), 4.0, epsilon = 1e-12);
        // Concave from (5,0) runs counter-clockwise: the gap moves up.
        assert!(s.mid.y > 0.0);
        assert_abs_diff_eq!(angle_of(&Point2::origin(), &s.mid), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn gaps_at_both_ends_meet_in_the_middle() {
        let mut c = straight(1.0);
        c.create_default(SideIndex::First);
        c.create_default(SideIndex::Second);
        c.side_mut(SideIndex::First).shadow = true;
        c.side_mut(SideIndex::Second).shadow = true;
        c.set_gaps(6.0);
        assert_abs_diff_eq!(c.side(SideIndex::First).mid.x, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.side(SideIndex::Second).mid.x, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.free_length(), 0.0, epsilon = 1e-12);

        // A single gapped end stops at the other end's mid.
        let mut c = straight(1.0);
        c.create_default(SideIndex::First);
        c.create_default(SideIndex::Second);
        c.set_gap(SideIndex::Second, 3.0);
        assert_abs_diff_eq!(c.set_gap(SideIndex::First, 10.0), 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.side(SideIndex::First).mid.x, 7.0, epsilon = 1e-12);
    }

    #[test]
    fn passed_ends_are_reported() {
        let mut c = straight(1.0);
        c.create_default(SideIndex::First);
        c.create_default(SideIndex::Second);
        let s1 = c.side(SideIndex::First).clone();
        let s2 = c.side(SideIndex::Second).clone();
        // First end at x = 7, second at x = 3: parallel boundaries, non-zero area.
        let shift = |s: &CasingSide, dx: f64| CasingSide {
            outer: s.outer + Vector2::new(dx, 0.0),
            mid: s.mid + Vector2::new(dx, 0.0),
            inner: s.inner + Vector2::new(dx, 0.0),
            ..s.clone()
        };
        *c.side_mut(SideIndex::First) = shift(&s1, 7.0);
        *c.side_mut(SideIndex::Second) = shift(&s2, -7.0);
        let warnings = c.validate(true);
        assert!(warnings.iter().any(|w| matches!(
            w,
            CasingWarning::InvalidCasing { reason, .. } if reason.contains("passed each other")
        )));
        assert!(c.validate(false).is_empty());
    }

    #[test]
    fn remaining_length_of_half_circle() {
        let mut c = arc(Convexity::Concave);
        c.create_default(SideIndex::Second);
        assert_abs_diff_eq!(
            c.remaining_length(SideIndex::Second),
            5.0 * std::f64::consts::PI,
            epsilon = 1e-9
        );
    }

    #[test]
    fn fill_boundary_order() {
        let mut c = straight(1.0);
        c.create_default(SideIndex::First);
        c.create_default(SideIndex::Second);
        let fill = c.fill_boundary();
        assert!(fill.closed);
        assert_eq!(fill.vertices.len(), 6);
        let pts: Vec<Point2> = fill.vertices.iter().map(|v| v.point()).collect();
        assert_eq!(pts[0], Point2::new(0.0, 1.0));
        assert_eq!(pts[1], Point2::new(10.0, 1.0));
        // Clockwise rectangle of area 20.
        assert_abs_diff_eq!(signed_area_2d(&pts), -20.0, epsilon = 1e-9);
    }

    #[test]
    fn shadow_requires_flag() {
        let mut c = straight(1.0);
        c.create_default(SideIndex::First);
        assert!(c.shadow_boundary(SideIndex::First, 2.0).is_none());
        c.side_mut(SideIndex::First).shadow = true;
        let shadow = c.shadow_boundary(SideIndex::First, 2.0).unwrap();
        let pts: Vec<Point2> = shadow.vertices.iter().map(|v| v.point()).collect();
        assert_eq!(pts.len(), 4);
        assert_abs_diff_eq!(pts[2].x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pts[3].x, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn crossed_boundaries_are_reported() {
        let mut c = straight(1.0);
        c.create_default(SideIndex::First);
        c.create_default(SideIndex::Second);
        // Swap the second side's points so the long boundaries cross.
        let s2 = c.side_mut(SideIndex::Second);
        std::mem::swap(&mut s2.outer, &mut s2.inner);
        let warnings = c.validate(true);
        assert!(!warnings.is_empty());
        // Outline casings only look at curves.
        assert!(c.validate(false).is_empty());
    }
}
