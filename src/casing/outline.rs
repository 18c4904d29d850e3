use crate::error::Result;
use crate::subdivision::Subdivision;

use super::set::CasingSet;
use super::style::CasingStyle;

/// Builds a plain mitred ribbon for every edge, with no over/under.
///
/// Crossings keep the through-joined geometry of the first pass; only the
/// curve radii are checked by [`CasingSet::validate`].
#[derive(Debug)]
pub struct Outline {
    style: CasingStyle,
}

impl Outline {
    /// Creates a new outline operation.
    #[must_use]
    pub fn new(style: CasingStyle) -> Self {
        Self { style }
    }

    /// Executes the outline build.
    ///
    /// # Errors
    ///
    /// Returns subdivision or geometry errors for malformed input.
    pub fn execute(&self, sub: &Subdivision) -> Result<CasingSet> {
        let set = CasingSet::build(sub, self.style, false)?;
        tracing::debug!(casings = set.len(), "outline built");
        Ok(set)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::casing::SideIndex;
    use crate::math::Point2;
    use crate::subdivision::Convexity;
    use approx::assert_abs_diff_eq;

    #[test]
    fn outline_sides_carry_no_weave() {
        let mut sub = Subdivision::new();
        let c = sub.add_vertex(Point2::origin());
        for (x, y) in [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)] {
            let v = sub.add_vertex(Point2::new(x, y));
            sub.add_line(c, v).unwrap();
        }
        let set = Outline::new(CasingStyle::default()).execute(&sub).unwrap();
        assert!(!set.is_weaving());
        for (_, casing) in set.casings() {
            for (_, side) in casing.sides() {
                assert_eq!(side.weave, None);
                assert!(!side.shadow);
                assert!(side.created);
            }
        }
        assert!(set.warnings().is_empty());
    }

    #[test]
    fn curved_outline_validates() {
        // Closed ring: two half circles of radius 5 around the origin.
        let mut sub = Subdivision::new();
        let a = sub.add_vertex(Point2::new(5.0, 0.0));
        let b = sub.add_vertex(Point2::new(-5.0, 0.0));
        let top = sub.add_arc(a, b, Point2::origin(), Convexity::Concave).unwrap();
        sub.add_arc(b, a, Point2::origin(), Convexity::Concave).unwrap();

        let set = Outline::new(CasingStyle::new(0.5, 0.0, 0.0).unwrap())
            .execute(&sub)
            .unwrap();
        assert!(set.validate().is_empty(), "{:?}", set.validate());

        let casing = set.casing(top).unwrap();
        assert_abs_diff_eq!(casing.outer_circle().unwrap().radius, 4.5, epsilon = 1e-12);
        assert_abs_diff_eq!(casing.inner_circle().unwrap().radius, 5.5, epsilon = 1e-12);
        let s1 = casing.side(SideIndex::First);
        assert_abs_diff_eq!(s1.outer.coords.norm(), 4.5, epsilon = 1e-9);
        assert_abs_diff_eq!(s1.inner.coords.norm(), 5.5, epsilon = 1e-9);
    }
}
