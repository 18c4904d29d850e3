use crate::error::{Result, WeaveError};
use crate::subdivision::{EdgeId, Subdivision, WeaveSeeds, WeaveTag};

use super::neighbours::{CasingMap, CasingNeighbours};
use super::set::CasingSet;
use super::side::{SideIndex, WeaveState};
use super::style::CasingStyle;

/// Builds a woven casing set: ribbons that alternate over and under at
/// every four-way crossing.
///
/// Sides at crossings take their state from the seeds, propagated around
/// each crossing (the opposite end shares the state, the adjacent ends get
/// the other one) and along edges to unseeded crossings (a strand leaving
/// one crossing Over arrives at the next one Under).
#[derive(Debug)]
pub struct Interlace {
    style: CasingStyle,
    seeds: WeaveSeeds,
}

impl Interlace {
    /// Creates a new interlace operation.
    #[must_use]
    pub fn new(style: CasingStyle, seeds: WeaveSeeds) -> Self {
        Self { style, seeds }
    }

    /// Executes the weave.
    ///
    /// # Errors
    ///
    /// Returns `WeaveError::ConflictingSeeds` if the seeds at a crossing
    /// contradict each other, `WeaveError::UnresolvedSide` if a crossing can
    /// be reached neither by a seed nor by alternation, and subdivision or
    /// geometry errors for malformed input.
    pub fn execute(&self, sub: &Subdivision) -> Result<CasingSet> {
        let mut set = CasingSet::build(sub, self.style, true)?;
        resolve_states(&mut set, &self.seeds)?;

        {
            let CasingSet {
                casings,
                neighbours,
                warnings,
                ..
            } = &mut set;
            for nb in neighbours.values() {
                nb.do_unders(casings, warnings)?;
            }
            for nb in neighbours.values() {
                nb.do_overs(casings, warnings)?;
            }
        }

        check_resolved(&set)?;
        apply_gaps(&mut set);

        tracing::debug!(
            casings = set.len(),
            warnings = set.warnings().len(),
            "interlace built"
        );
        Ok(set)
    }
}

/// Assigns a weave state to every side.
///
/// Sides at vertices with fewer than four casings are Over. At vertices
/// with more than four a seed is honoured, otherwise Over.
fn resolve_states(set: &mut CasingSet, seeds: &WeaveSeeds) -> Result<()> {
    let CasingSet {
        casings,
        neighbours,
        ..
    } = set;

    for nb in neighbours.values() {
        if nb.len() == 4 {
            let mut local = [WeaveState::Unknown; 4];
            for (k, entry) in nb.entries().iter().enumerate() {
                let state = match seeds.get(entry.edge, nb.vertex()) {
                    WeaveTag::Under => WeaveState::Under,
                    WeaveTag::Over => WeaveState::Over,
                    WeaveTag::Unassigned => continue,
                };
                if !propagate(&mut local, k, state) {
                    return Err(WeaveError::ConflictingSeeds {
                        vertex: nb.vertex(),
                    }
                    .into());
                }
            }
            write_states(casings, nb, &local)?;
        } else {
            for entry in nb.entries() {
                let state = match seeds.get(entry.edge, nb.vertex()) {
                    WeaveTag::Under if nb.len() > 4 => WeaveState::Under,
                    _ => WeaveState::Over,
                };
                set_state(casings, entry.edge, entry.side, state)?;
            }
        }
    }

    // Carry states along edges into crossings no seed reached.
    loop {
        let mut changed = false;
        for nb in neighbours.values() {
            if nb.len() != 4 || !is_unresolved(casings, nb)? {
                continue;
            }
            for (k, entry) in nb.entries().iter().enumerate() {
                let casing = casings
                    .get(entry.edge)
                    .ok_or(WeaveError::MissingCasing(entry.edge))?;
                let far = casing.side(entry.side.other());
                let far_is_crossing = neighbours.get(far.vertex).is_some_and(|f| f.len() == 4);
                let Some(state) = far.weave.filter(|s| *s != WeaveState::Unknown) else {
                    continue;
                };
                if !far_is_crossing {
                    continue;
                }

                let mut local = [WeaveState::Unknown; 4];
                propagate(&mut local, k, state.flipped());
                write_states(casings, nb, &local)?;
                tracing::debug!(vertex = ?nb.vertex(), "crossing resolved by alternation");
                changed = true;
                break;
            }
        }
        if !changed {
            break;
        }
    }
    Ok(())
}

/// Sets `state` at position `k` of a crossing and derives the other three.
///
/// Returns `false` if this contradicts a state already present.
fn propagate(local: &mut [WeaveState; 4], k: usize, state: WeaveState) -> bool {
    for (offset, s) in [
        (0, state),
        (1, state.flipped()),
        (2, state),
        (3, state.flipped()),
    ] {
        let slot = &mut local[(k + offset) % 4];
        if *slot == WeaveState::Unknown {
            *slot = s;
        } else if *slot != s {
            return false;
        }
    }
    true
}

fn is_unresolved(casings: &CasingMap, nb: &CasingNeighbours) -> Result<bool> {
    for entry in nb.entries() {
        let casing = casings
            .get(entry.edge)
            .ok_or(WeaveError::MissingCasing(entry.edge))?;
        if casing.side(entry.side).weave != Some(WeaveState::Unknown) {
            return Ok(false);
        }
    }
    Ok(true)
}

fn write_states(casings: &mut CasingMap, nb: &CasingNeighbours, local: &[WeaveState; 4]) -> Result<()> {
    for (entry, state) in nb.entries().iter().zip(local) {
        set_state(casings, entry.edge, entry.side, *state)?;
    }
    Ok(())
}

fn set_state(casings: &mut CasingMap, edge: EdgeId, side: SideIndex, state: WeaveState) -> Result<()> {
    casings
        .get_mut(edge)
        .ok_or(WeaveError::MissingCasing(edge))?
        .side_mut(side)
        .weave = Some(state);
    Ok(())
}

/// Fails on any side still `Unknown`.
fn check_resolved(set: &CasingSet) -> Result<()> {
    for (edge, casing) in set.casings() {
        for (idx, side) in casing.sides() {
            if side.weave == Some(WeaveState::Unknown) {
                return Err(WeaveError::UnresolvedSide {
                    casing: edge,
                    side: idx,
                    vertex: side.vertex,
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Pulls every shadowed Under side back from its crossing by the style's gap.
fn apply_gaps(set: &mut CasingSet) {
    let gap = set.style().gap();
    if gap <= 0.0 {
        return;
    }
    for casing in set.casings.values_mut() {
        casing.set_gaps(gap);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::InterlaceError;
    use crate::math::Point2;
    use crate::subdivision::VertexId;
    use approx::assert_abs_diff_eq;

    /// Two straight strands crossing at the origin.
    fn cross() -> (Subdivision, VertexId, [EdgeId; 4]) {
        let mut sub = Subdivision::new();
        let c = sub.add_vertex(Point2::origin());
        let mut edges = [EdgeId::default(); 4];
        for (slot, (x, y)) in edges
            .iter_mut()
            .zip([(10.0, 0.0), (0.0, 10.0), (-10.0, 0.0), (0.0, -10.0)])
        {
            let v = sub.add_vertex(Point2::new(x, y));
            *slot = sub.add_line(c, v).unwrap();
        }
        (sub, c, edges)
    }

    #[test]
    fn crossing_alternates() {
        let (sub, c, [e, n, w, s]) = cross();
        let mut seeds = WeaveSeeds::new();
        seeds.set(n, c, WeaveTag::Under);
        let set = Interlace::new(CasingStyle::default(), seeds)
            .execute(&sub)
            .unwrap();

        let state = |edge| set.casing(edge).unwrap().side(SideIndex::First).weave;
        assert_eq!(state(n), Some(WeaveState::Under));
        assert_eq!(state(s), Some(WeaveState::Under));
        assert_eq!(state(e), Some(WeaveState::Over));
        assert_eq!(state(w), Some(WeaveState::Over));

        // The Over strand shares its boundary points across the crossing.
        let se = set.casing(e).unwrap().side(SideIndex::First);
        let sw = set.casing(w).unwrap().side(SideIndex::First);
        assert_abs_diff_eq!((se.outer - sw.inner).norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!((se.inner - sw.outer).norm(), 0.0, epsilon = 1e-12);

        // Under sides are squeezed against the Over strand and flagged.
        let sn = set.casing(n).unwrap().side(SideIndex::First);
        assert!(sn.shadow);
        assert_abs_diff_eq!(sn.mid.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sn.outer.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sn.inner.y, 1.0, epsilon = 1e-12);
        assert_eq!(set.crossing_over(n, SideIndex::First), Some(w));
        assert!(set.validate().is_empty());
    }

    #[test]
    fn gap_pulls_under_sides_back() {
        let (sub, c, [_, n, ..]) = cross();
        let mut seeds = WeaveSeeds::new();
        seeds.set(n, c, WeaveTag::Under);
        let style = CasingStyle::new(1.0, 0.5, 2.0).unwrap();
        let set = Interlace::new(style, seeds).execute(&sub).unwrap();
        let sn = set.casing(n).unwrap().side(SideIndex::First);
        assert_abs_diff_eq!(sn.mid.y, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(sn.mid.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn conflicting_seeds_fail() {
        let (sub, c, [e, n, ..]) = cross();
        let mut seeds = WeaveSeeds::new();
        seeds.set(e, c, WeaveTag::Under);
        seeds.set(n, c, WeaveTag::Under);
        let err = Interlace::new(CasingStyle::default(), seeds)
            .execute(&sub)
            .unwrap_err();
        assert!(matches!(
            err,
            InterlaceError::Weave(WeaveError::ConflictingSeeds { .. })
        ));
    }

    #[test]
    fn unseeded_crossing_is_an_error() {
        let (sub, ..) = cross();
        let err = Interlace::new(CasingStyle::default(), WeaveSeeds::new())
            .execute(&sub)
            .unwrap_err();
        assert!(matches!(
            err,
            InterlaceError::Weave(WeaveError::UnresolvedSide { .. })
        ));
    }

    #[test]
    fn alternation_reaches_neighbouring_crossing() {
        let (sub, a, _, link) = linked_crossings(5.0);
        let mut seeds = WeaveSeeds::new();
        seeds.set(link, a, WeaveTag::Over);
        let set = Interlace::new(CasingStyle::default(), seeds)
            .execute(&sub)
            .unwrap();
        let casing = set.casing(link).unwrap();
        assert_eq!(casing.side(SideIndex::First).weave, Some(WeaveState::Over));
        assert_eq!(casing.side(SideIndex::Second).weave, Some(WeaveState::Under));
    }

    /// Two crossings at (0,0) and (10,0) joined by `link`, arms of length `arm`.
    fn linked_crossings(arm: f64) -> (Subdivision, VertexId, VertexId, EdgeId) {
        let mut sub = Subdivision::new();
        let a = sub.add_vertex(Point2::new(0.0, 0.0));
        let b = sub.add_vertex(Point2::new(10.0, 0.0));
        let link = sub.add_line(a, b).unwrap();
        for (centre, dx) in [(a, -1.0), (b, 1.0)] {
            let p = sub.vertex(centre).unwrap().point;
            for (x, y) in [(dx * arm, 0.0), (0.0, arm), (0.0, -arm)] {
                let v = sub.add_vertex(Point2::new(p.x + x, p.y + y));
                sub.add_line(centre, v).unwrap();
            }
        }
        (sub, a, b, link)
    }

    #[test]
    fn gaps_from_both_ends_never_cross() {
        let (sub, a, b, link) = linked_crossings(10.0);
        let mut seeds = WeaveSeeds::new();
        seeds.set(link, a, WeaveTag::Under);
        seeds.set(link, b, WeaveTag::Under);
        let style = CasingStyle::new(1.0, 6.0, 0.0).unwrap();
        let set = Interlace::new(style, seeds).execute(&sub).unwrap();

        // Squeezed to x = 1 and x = 9, then each end takes half of the 8 left.
        let casing = set.casing(link).unwrap();
        let (s1, s2) = (casing.side(SideIndex::First), casing.side(SideIndex::Second));
        assert!(s1.shadow && s2.shadow);
        assert_abs_diff_eq!(s1.mid.x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s2.mid.x, 5.0, epsilon = 1e-9);
        assert!(s1.mid.x <= s2.mid.x + 1e-9);
        assert_abs_diff_eq!(casing.free_length(), 0.0, epsilon = 1e-9);

        // The link is used up, which validation reports, but never as inverted.
        let warnings = set.validate();
        assert!(warnings.iter().all(|w| w.edge() == link));
        assert!(!warnings.iter().any(|w| w.to_string().contains("passed each other")));
    }

    #[test]
    fn low_degree_sides_are_over() {
        let mut sub = Subdivision::new();
        let a = sub.add_vertex(Point2::new(0.0, 0.0));
        let b = sub.add_vertex(Point2::new(10.0, 0.0));
        let e = sub.add_line(a, b).unwrap();
        let set = Interlace::new(CasingStyle::default(), WeaveSeeds::new())
            .execute(&sub)
            .unwrap();
        for (_, side) in set.casing(e).unwrap().sides() {
            assert_eq!(side.weave, Some(WeaveState::Over));
            assert!(!side.shadow);
        }
    }
}
