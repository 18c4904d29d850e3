use std::collections::HashMap;

use crate::Result;

use super::{EdgeId, Subdivision, VertexId};

/// Externally supplied over/under seed for one edge end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeaveTag {
    #[default]
    Unassigned,
    Under,
    Over,
}

/// Seed tags keyed by `(edge, vertex)` edge ends.
///
/// Only ends at vertices of degree four or more are consulted. The rule that
/// picks which ends start Under belongs to the pattern generator; this type
/// merely carries its decision.
#[derive(Debug, Clone, Default)]
pub struct WeaveSeeds {
    tags: HashMap<(EdgeId, VertexId), WeaveTag>,
}

impl WeaveSeeds {
    /// Creates an empty seed table (every end `Unassigned`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags one edge end.
    pub fn set(&mut self, edge: EdgeId, vertex: VertexId, tag: WeaveTag) {
        self.tags.insert((edge, vertex), tag);
    }

    /// Returns the tag of an edge end.
    #[must_use]
    pub fn get(&self, edge: EdgeId, vertex: VertexId) -> WeaveTag {
        self.tags.get(&(edge, vertex)).copied().unwrap_or_default()
    }

    /// Tags the ends around `vertex` alternately Under/Over in cyclic order.
    ///
    /// `first_under` selects the phase: whether the first edge returned by
    /// [`Subdivision::neighbours_at`] starts Under.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is unknown.
    pub fn alternate_at(
        &mut self,
        sub: &Subdivision,
        vertex: VertexId,
        first_under: bool,
    ) -> Result<()> {
        for (i, edge) in sub.neighbours_at(vertex)?.into_iter().enumerate() {
            let under = (i % 2 == 0) == first_under;
            let tag = if under { WeaveTag::Under } else { WeaveTag::Over };
            self.set(edge, vertex, tag);
        }
        Ok(())
    }

    /// Number of explicitly tagged ends.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` if nothing has been tagged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
