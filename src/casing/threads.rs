//! Strand extraction: groups casings into maximal continuous runs.
//!
//! Each run is walked from a seed casing in both directions. At every
//! vertex the walk continues into the straightest unassigned neighbour, so
//! a strand passes through crossings and smooth joins alike. Every casing
//! ends up in exactly one thread.

use std::collections::VecDeque;
use std::f64::consts::PI;

use slotmap::SecondaryMap;

use crate::error::{Result, WeaveError};
use crate::math::arc_2d::angle_between;
use crate::math::ANGLE_TOLERANCE;
use crate::subdivision::EdgeId;

use super::neighbours::NeighbourEntry;
use super::set::CasingSet;
use super::side::SideIndex;

/// An ordered run of weave-continuous casings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    casings: Vec<EdgeId>,
}

impl Thread {
    /// Casings of the run, in walking order.
    #[must_use]
    pub fn casings(&self) -> &[EdgeId] {
        &self.casings
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
    pub fn contains(&self, edge: EdgeId) -> bool {
        self.casings.contains(&edge)
    }
}

/// Lookup from a casing's edge to the index of its thread.
#[derive(Debug, Clone, Default)]
pub struct ThreadMap {
    index: SecondaryMap<EdgeId, usize>,
}

impl ThreadMap {
    #[must_use]
    pub fn new(threads: &[Thread]) -> Self {
        let mut index = SecondaryMap::new();
        for (i, thread) in threads.iter().enumerate() {
            for &edge in thread.casings() {
                index.insert(edge, i);
            }
        }
        Self { index }
    }

    /// Index of the thread containing `edge`.
    #[must_use]
    pub fn thread_of(&self, edge: EdgeId) -> Option<usize> {
        self.index.get(edge).copied()
    }
}

/// Partitions every casing of `set` into threads.
///
/// Casings are seeded in edge-slot order, so the result is deterministic.
///
/// # Errors
///
/// Returns `WeaveError::UnreachableContinuation` if a vertex has unassigned
/// neighbours but none can be chosen, and `WeaveError::MissingCasing` if a
/// neighbour list names an edge without a casing.
pub fn trace(set: &CasingSet) -> Result<Vec<Thread>> {
    let mut assigned: SecondaryMap<EdgeId, usize> = SecondaryMap::new();
    let mut threads = Vec::new();

    for (seed, _) in set.casings() {
        if assigned.contains_key(seed) {
            continue;
        }
        let index = threads.len();
        assigned.insert(seed, index);
        let mut run = VecDeque::from([seed]);

        for (end, forward) in [(SideIndex::Second, true), (SideIndex::First, false)] {
            let (mut edge, mut end) = (seed, end);
            while let Some(next) = continuation(set, edge, end, &assigned)? {
                assigned.insert(next.edge, index);
                if forward {
                    run.push_back(next.edge);
                } else {
                    run.push_front(next.edge);
                }
                edge = next.edge;
                end = next.side.other();
            }
        }

        tracing::debug!(thread = index, casings = run.len(), "thread traced");
        threads.push(Thread {
            casings: run.into(),
        });
    }

    Ok(threads)
}

/// Picks the casing that continues `edge` through the vertex at its `end`.
fn continuation(
    set: &CasingSet,
    edge: EdgeId,
    end: SideIndex,
    assigned: &SecondaryMap<EdgeId, usize>,
) -> Result<Option<NeighbourEntry>> {
    let casing = set.casing(edge)?;
    let vertex = casing.side(end).vertex;
    let Some(nb) = set.neighbours(vertex) else {
        return Ok(None);
    };

    let candidates: Vec<NeighbourEntry> = nb
        .entries()
        .iter()
        .filter(|e| e.edge != edge && !assigned.contains_key(e.edge))
        .copied()
        .collect();
    match candidates.as_slice() {
        [] => return Ok(None),
        [only] => {
            set.casing(only.edge)?;
            return Ok(Some(*only));
        }
        _ => {}
    }

    let arriving = casing.outgoing(end);
    let mut best: Option<NeighbourEntry> = None;
    let mut best_angle = f64::NEG_INFINITY;
    for entry in &candidates {
        let leaving = set.casing(entry.edge)?.outgoing(entry.side);
        // Straight on is π between the two outgoing directions.
        let angle = angle_between(&arriving, &leaving);
        if PI - angle <= ANGLE_TOLERANCE {
            return Ok(Some(*entry));
        }
        if angle > best_angle {
            best_angle = angle;
            best = Some(*entry);
        }
    }

    match best {
        Some(entry) => Ok(Some(entry)),
        None => Err(WeaveError::UnreachableContinuation {
            edge,
            vertex,
            candidates: candidates.len(),
        }
        .into()),
    }
}
