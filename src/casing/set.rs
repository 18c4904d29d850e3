use slotmap::SecondaryMap;

use crate::error::{Result, WeaveError};
use crate::geometry::Pline;
use crate::subdivision::{EdgeId, Subdivision, VertexId};

use super::edge_casing::Casing;
use super::neighbours::{CasingMap, CasingNeighbours};
use super::side::SideIndex;
use super::style::CasingStyle;
use super::warning::CasingWarning;

/// Every casing of a subdivision, keyed by edge, plus the per-vertex
/// neighbour lists used to join them.
///
/// A set is built in one pass and never patched; edits to the subdivision
/// require building a new set.
#[derive(Debug, Clone)]
pub struct CasingSet {
    pub(crate) casings: CasingMap,
    pub(crate) neighbours: SecondaryMap<VertexId, CasingNeighbours>,
    pub(crate) warnings: Vec<CasingWarning>,
    style: CasingStyle,
    weaving: bool,
}

impl CasingSet {
    /// Creates one casing per edge and builds the provisional side geometry.
    pub(crate) fn build(sub: &Subdivision, style: CasingStyle, weaving: bool) -> Result<Self> {
        let mut casings = CasingMap::with_capacity(sub.edge_count());
        for (id, data) in sub.edges() {
            let geometry = sub.edge_geometry(id)?;
            let casing = Casing::new(id, data.start, data.end, geometry, style.width(), weaving)?;
            casings.insert(id, casing);
        }

        let mut neighbours = SecondaryMap::new();
        let mut warnings = Vec::new();
        for (vertex, _) in sub.vertices() {
            let nb = CasingNeighbours::new(sub, vertex)?;
            if nb.is_empty() {
                continue;
            }
            nb.create_sides(&mut casings, weaving, &mut warnings)?;
            neighbours.insert(vertex, nb);
        }

        tracing::debug!(
            casings = casings.len(),
            vertices = neighbours.len(),
            warnings = warnings.len(),
            "casing geometry built"
        );

        Ok(Self {
            casings,
            neighbours,
            warnings,
            style,
            weaving,
        })
    }

    /// Returns the casing of `edge`.
    ///
    /// # Errors
    ///
    /// Returns `WeaveError::MissingCasing` if the edge has no casing.
    pub fn casing(&self, edge: EdgeId) -> Result<&Casing> {
        self.casings
            .get(edge)
            .ok_or_else(|| WeaveError::MissingCasing(edge).into())
    }

    /// Iterates over all casings in edge-slot order.
    pub fn casings(&self) -> impl Iterator<Item = (EdgeId, &Casing)> {
        self.casings.iter()
    }

    /// Neighbour list of `vertex`, or `None` for isolated vertices.
    #[must_use]
    pub fn neighbours(&self, vertex: VertexId) -> Option<&CasingNeighbours> {
        self.neighbours.get(vertex)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.casings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.casings.is_empty()
    }

    #[must_use]
    pub fn style(&self) -> &CasingStyle {
        &self.style
    }

    /// Returns `true` if this set carries over/under state.
    #[must_use]
    pub fn is_weaving(&self) -> bool {
        self.weaving
    }

    /// Approximations recorded while building.
    #[must_use]
    pub fn warnings(&self) -> &[CasingWarning] {
        &self.warnings
    }

    /// Re-checks every casing's invariants.
    ///
    /// Outline sets only check curve radii; interlace sets also check
    /// widths and crossing boundaries.
    #[must_use]
    pub fn validate(&self) -> Vec<CasingWarning> {
        let warnings: Vec<CasingWarning> = self
            .casings
            .values()
            .flat_map(|c| c.validate(self.weaving))
            .collect();
        for warning in &warnings {
            tracing::warn!(%warning, "validation failed");
        }
        warnings
    }

    /// Closed fill outline of every casing, in edge-slot order.
    #[must_use]
    pub fn combined_boundary(&self) -> Vec<Pline> {
        self.casings.values().map(Casing::fill_boundary).collect()
    }

    /// Stroke outlines of one casing, with end segments at caps and gaps.
    ///
    /// # Errors
    ///
    /// Returns `WeaveError::MissingCasing` if the edge has no casing.
    pub fn outline(&self, edge: EdgeId) -> Result<Vec<Pline>> {
        let casing = self.casing(edge)?;
        let capped = [SideIndex::First, SideIndex::Second].map(|idx| {
            self.neighbours(casing.side(idx).vertex)
                .map_or(true, |nb| nb.len() == 1)
        });
        Ok(casing.outline_boundary(capped))
    }

    /// Stroke outlines of every casing, in edge-slot order.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::outline`] errors.
    pub fn outlines(&self) -> Result<Vec<Pline>> {
        let mut result = Vec::new();
        for (edge, _) in self.casings() {
            result.extend(self.outline(edge)?);
        }
        Ok(result)
    }

    /// The edge passing over the given Under side, whose colour its shadow takes.
    ///
    /// Returns `None` unless the side is Under at a crossing.
    #[must_use]
    pub fn crossing_over(&self, edge: EdgeId, idx: SideIndex) -> Option<EdgeId> {
        let side = self.casings.get(edge)?.side(idx);
        if !side.is_under() {
            return None;
        }
        let nb = self.neighbours(side.vertex)?;
        let pos = nb.position(edge)?;
        Some(nb.before(pos).edge)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn triangle() -> (Subdivision, [EdgeId; 3]) {
        let mut sub = Subdivision::new();
        let a = sub.add_vertex(Point2::new(0.0, 0.0));
        let b = sub.add_vertex(Point2::new(10.0, 0.0));
        let c = sub.add_vertex(Point2::new(5.0, 8.0));
        let ab = sub.add_line(a, b).unwrap();
        let bc = sub.add_line(b, c).unwrap();
        let ca = sub.add_line(c, a).unwrap();
        (sub, [ab, bc, ca])
    }

    #[test]
    fn one_casing_per_edge() {
        let (sub, edges) = triangle();
        let set = CasingSet::build(&sub, CasingStyle::default(), false).unwrap();
        assert_eq!(set.len(), 3);
        for e in edges {
            assert_eq!(set.casing(e).unwrap().edge(), e);
        }
        assert!(set.warnings().is_empty());
        assert!(set.validate().is_empty());
        assert_eq!(set.combined_boundary().len(), 3);
    }

    #[test]
    fn closed_ring_has_no_caps() {
        let (sub, [ab, ..]) = triangle();
        let set = CasingSet::build(&sub, CasingStyle::default(), false).unwrap();
        // Only the two long boundaries.
        assert_eq!(set.outline(ab).unwrap().len(), 2);
        assert_eq!(set.outlines().unwrap().len(), 6);
    }

    #[test]
    fn isolated_edge_is_capped() {
        let mut sub = Subdivision::new();
        let a = sub.add_vertex(Point2::new(0.0, 0.0));
        let b = sub.add_vertex(Point2::new(10.0, 0.0));
        sub.add_vertex(Point2::new(3.0, 3.0));
        let e = sub.add_line(a, b).unwrap();
        let set = CasingSet::build(&sub, CasingStyle::default(), false).unwrap();
        assert_eq!(set.outline(e).unwrap().len(), 4);
        assert!(set.crossing_over(e, SideIndex::First).is_none());
    }

    #[test]
    fn unknown_edge_is_missing() {
        let (sub, _) = triangle();
        let set = CasingSet::build(&sub, CasingStyle::default(), false).unwrap();

        let (mut other, _) = triangle();
        let v = other.add_vertex(Point2::new(50.0, 50.0));
        let w = other.add_vertex(Point2::new(60.0, 50.0));
        let foreign = other.add_line(v, w).unwrap();
        assert!(set.casing(foreign).is_err());
        assert!(set.outline(foreign).is_err());
    }
}
