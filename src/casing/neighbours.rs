use slotmap::SecondaryMap;

use crate::error::{Result, WeaveError};
use crate::math::Point2;
use crate::subdivision::{EdgeId, Subdivision, VertexId};

use super::edge_casing::Casing;
use super::side::{get_join_point, is_straight_continuation, SideIndex, SidePoint, WeaveState};
use super::warning::{record, CasingWarning};

pub(crate) type CasingMap = SecondaryMap<EdgeId, Casing>;

/// One casing end incident on a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighbourEntry {
    pub edge: EdgeId,
    /// Which side of the edge's casing sits on the vertex.
    pub side: SideIndex,
}

/// Outcome of meeting two boundaries at a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Join {
    Corner(Point2),
    /// Edges fold back onto each other.
    Degenerate,
    /// Curved boundaries that do not meet, with the point they were expected near.
    Missing(Point2),
}

/// The casings incident on one vertex, in clockwise order.
///
/// Entries store edge ids only and are resolved against the casing map at
/// use time. "after" is the next entry clockwise, "before" the previous one.
#[derive(Debug, Clone)]
pub struct CasingNeighbours {
    vertex: VertexId,
    entries: Vec<NeighbourEntry>,
}

impl CasingNeighbours {
    /// Collects the incident casing ends of `vertex`.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex or one of its edges is unknown.
    pub fn new(sub: &Subdivision, vertex: VertexId) -> Result<Self> {
        let entries = sub
            .neighbours_at(vertex)?
            .into_iter()
            .map(|edge| {
                let side = if sub.edge(edge)?.start == vertex {
                    SideIndex::First
                } else {
                    SideIndex::Second
                };
                Ok(NeighbourEntry { edge, side })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { vertex, entries })
    }

    #[must_use]
    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[NeighbourEntry] {
        &self.entries
    }

    /// Entry at cyclic position `i`.
    #[must_use]
    pub fn entry(&self, i: usize) -> NeighbourEntry {
        self.entries[i % self.entries.len()]
    }

    /// Counter-clockwise neighbour of the entry at `i`.
    #[must_use]
    pub fn before(&self, i: usize) -> NeighbourEntry {
        let n = self.entries.len();
        self.entry(i + n - 1)
    }

    /// Clockwise neighbour of the entry at `i`.
    #[must_use]
    pub fn after(&self, i: usize) -> NeighbourEntry {
        self.entry(i + 1)
    }

    /// The entry two positions away, the through-continuation at a crossing.
    #[must_use]
    pub fn opposite(&self, i: usize) -> NeighbourEntry {
        self.entry(i + 2)
    }

    /// Cyclic position of `edge`.
    #[must_use]
    pub fn position(&self, edge: EdgeId) -> Option<usize> {
        self.entries.iter().position(|e| e.edge == edge)
    }

    /// Builds the provisional geometry of every side on this vertex.
    ///
    /// Caps get a normal offset. At two and three casings every pair of
    /// cyclically adjacent casings shares one mitred corner, assigned to both.
    /// At crossings each side is joined through to its opposite entry; with
    /// `weaving` on this is refined later by [`Self::do_unders`] and
    /// [`Self::do_overs`] and failures are not reported here.
    pub(crate) fn create_sides(
        &self,
        casings: &mut CasingMap,
        weaving: bool,
        warnings: &mut Vec<CasingWarning>,
    ) -> Result<()> {
        for entry in &self.entries {
            casing_mut(casings, entry.edge)?.create_default(entry.side);
        }

        match self.entries.len() {
            0 | 1 => {}
            n @ (2 | 3) => {
                for i in 0..n {
                    let (a, b) = (self.entry(i), self.after(i));
                    let join = join(casings, a, SidePoint::Inner, b)?;
                    if let Some(p) = self.settle(join, a, warnings) {
                        set_point(casings, a, SidePoint::Inner, p)?;
                        set_point(casings, b, SidePoint::Outer, p)?;
                    }
                }
            }
            n => {
                let mut through = Vec::with_capacity(n * 2);
                for i in 0..n {
                    let (a, c) = (self.entry(i), self.opposite(i));
                    for which in [SidePoint::Outer, SidePoint::Inner] {
                        match join(casings, a, which, c)? {
                            Join::Corner(p) => through.push((a, which, p)),
                            other if !weaving => {
                                self.settle(other, a, warnings);
                            }
                            _ => {}
                        }
                    }
                }
                for (entry, which, p) in through {
                    set_point(casings, entry, which, p)?;
                }
            }
        }

        tracing::debug!(vertex = ?self.vertex, degree = self.entries.len(), "sides created");
        Ok(())
    }

    /// Squeezes every Under side between its two neighbours.
    ///
    /// The outer point is joined against "before", the inner against
    /// "after", `mid` moves to the centreline between them and the side is
    /// flagged for a gap and shadow. Corners that cannot be found keep their
    /// provisional position.
    pub(crate) fn do_unders(
        &self,
        casings: &mut CasingMap,
        warnings: &mut Vec<CasingWarning>,
    ) -> Result<()> {
        if self.entries.len() < 4 {
            return Ok(());
        }
        for i in 0..self.entries.len() {
            let entry = self.entry(i);
            if !casing(casings, entry.edge)?.side(entry.side).is_under() {
                continue;
            }

            let outer = join(casings, entry, SidePoint::Outer, self.before(i))?;
            let inner = join(casings, entry, SidePoint::Inner, self.after(i))?;
            let outer = self.settle(outer, entry, warnings);
            let inner = self.settle(inner, entry, warnings);

            let casing = casing_mut(casings, entry.edge)?;
            let side = casing.side_mut(entry.side);
            if let Some(p) = outer {
                side.outer = p;
            }
            if let Some(p) = inner {
                side.inner = p;
            }
            side.shadow = true;
            let centre = nalgebra::center(&side.outer, &side.inner);
            let mid = casing.project_to_centreline(&centre);
            casing.side_mut(entry.side).mid = mid;
        }
        Ok(())
    }

    /// Joins the two Over sides of a four-way crossing into one strand.
    ///
    /// Each Over side's outer boundary is met with its continuation's inner
    /// boundary and vice versa; the corner is computed once and stored on
    /// both sides.
    pub(crate) fn do_overs(
        &self,
        casings: &mut CasingMap,
        warnings: &mut Vec<CasingWarning>,
    ) -> Result<()> {
        if self.entries.len() != 4 {
            return Ok(());
        }
        for i in 0..2 {
            let (a, c) = (self.entry(i), self.opposite(i));
            if !is_over(casings, a)? || !is_over(casings, c)? {
                continue;
            }

            for which in [SidePoint::Outer, SidePoint::Inner] {
                let join = join(casings, a, which, c)?;
                if let Some(p) = self.settle(join, a, warnings) {
                    set_point(casings, a, which, p)?;
                    set_point(casings, c, which.facing(), p)?;
                }
            }
        }
        Ok(())
    }

    /// Turns a join outcome into a point to store, recording a warning for failures.
    fn settle(
        &self,
        join: Join,
        entry: NeighbourEntry,
        warnings: &mut Vec<CasingWarning>,
    ) -> Option<Point2> {
        match join {
            Join::Corner(p) => Some(p),
            Join::Degenerate => {
                record(
                    warnings,
                    CasingWarning::DegenerateJoin {
                        edge: entry.edge,
                        vertex: self.vertex,
                    },
                );
                None
            }
            Join::Missing(near) => {
                record(
                    warnings,
                    CasingWarning::MissingIntersection {
                        edge: entry.edge,
                        vertex: self.vertex,
                        near,
                    },
                );
                None
            }
        }
    }
}

fn casing(casings: &CasingMap, edge: EdgeId) -> Result<&Casing> {
    casings
        .get(edge)
        .ok_or_else(|| WeaveError::MissingCasing(edge).into())
}

fn casing_mut(casings: &mut CasingMap, edge: EdgeId) -> Result<&mut Casing> {
    casings
        .get_mut(edge)
        .ok_or_else(|| WeaveError::MissingCasing(edge).into())
}

fn is_over(casings: &CasingMap, entry: NeighbourEntry) -> Result<bool> {
    Ok(casing(casings, entry.edge)?.side(entry.side).weave == Some(WeaveState::Over))
}

fn set_point(casings: &mut CasingMap, entry: NeighbourEntry, which: SidePoint, p: Point2) -> Result<()> {
    casing_mut(casings, entry.edge)?
        .side_mut(entry.side)
        .set_point(which, p);
    Ok(())
}

/// Meets `a`'s `which` boundary with the facing boundary of `b`.
///
/// A straight continuation has no corner; the two normal offsets already
/// coincide and their midpoint is used so both sides store the same value.
/// Straight pairs otherwise use the mitre construction. Any curved casing
/// switches to intersecting the full boundary curves, picking the branch
/// nearest the two provisional points.
fn join(casings: &CasingMap, a: NeighbourEntry, which: SidePoint, b: NeighbourEntry) -> Result<Join> {
    let ca = casing(casings, a.edge)?;
    let cb = casing(casings, b.edge)?;
    let joint = ca.vertex_point(a.side);
    let da = ca.outgoing(a.side);
    let db = cb.outgoing(b.side);
    let provisional = nalgebra::center(
        &ca.side(a.side).point(which),
        &cb.side(b.side).point(which.facing()),
    );

    if is_straight_continuation(&da, &db) {
        return Ok(Join::Corner(provisional));
    }

    if !ca.is_curved() && !cb.is_curved() {
        let from = joint + da;
        let to = joint + db;
        return Ok(get_join_point(&from, &joint, &to, ca.width(), which)
            .map_or(Join::Degenerate, Join::Corner));
    }

    Ok(ca
        .boundary_of(a.side, which)
        .intersect(&cb.boundary_of(b.side, which.facing()), &provisional)
        .map_or(Join::Missing(provisional), Join::Corner))
}
