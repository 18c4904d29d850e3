//! The planar subdivision consumed by the casing engine.
//!
//! Vertices and edges live in a central arena and reference each other via
//! typed generational ids. The casing engine never holds references into the
//! subdivision; it resolves ids at use time.

pub mod edge;
pub mod seed;
pub mod vertex;

pub use edge::{Convexity, EdgeCurve, EdgeData, EdgeGeometry, EdgeId};
pub use seed::{WeaveSeeds, WeaveTag};
pub use vertex::{VertexData, VertexId};

use slotmap::SlotMap;

use crate::error::{Result, SubdivisionError};
use crate::math::{Point2, Vector2, TOLERANCE};

/// Central arena that owns all vertices and edges of a subdivision.
#[derive(Debug, Default)]
pub struct Subdivision {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
}

impl Subdivision {
    /// Creates a new, empty subdivision.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, point: Point2) -> VertexId {
        self.vertices.insert(VertexData::new(point))
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData> {
        self.vertices
            .get(id)
            .ok_or_else(|| SubdivisionError::EntityNotFound("vertex".into()).into())
    }

    /// Iterates over all vertices in insertion-slot order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData)> {
        self.vertices.iter()
    }

    // --- Edge operations ---

    /// Inserts an edge and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if either endpoint is missing, and
    /// `InvalidTopology` for loops, zero-length edges, or arcs whose
    /// endpoints are not equidistant from the center.
    pub fn add_edge(&mut self, data: EdgeData) -> Result<EdgeId> {
        let start = self.vertex(data.start)?.point;
        let end = self.vertex(data.end)?.point;

        if data.start == data.end || (end - start).norm() < TOLERANCE {
            return Err(SubdivisionError::InvalidTopology(
                "edge endpoints must be distinct".to_owned(),
            )
            .into());
        }

        if let EdgeCurve::Arc { center, .. } = data.curve {
            let r0 = (start - center).norm();
            let r1 = (end - center).norm();
            if r0 < TOLERANCE || (r0 - r1).abs() > 1e-6 * r0.max(1.0) {
                return Err(SubdivisionError::InvalidTopology(format!(
                    "arc endpoints are not on one circle (r0 = {r0}, r1 = {r1})"
                ))
                .into());
            }
        }

        Ok(self.edges.insert(data))
    }

    /// Inserts a straight edge between two vertices.
    ///
    /// # Errors
    ///
    /// See [`Self::add_edge`].
    pub fn add_line(&mut self, start: VertexId, end: VertexId) -> Result<EdgeId> {
        self.add_edge(EdgeData::line(start, end))
    }

    /// Inserts a circular-arc edge between two vertices.
    ///
    /// # Errors
    ///
    /// See [`Self::add_edge`].
    pub fn add_arc(
        &mut self,
        start: VertexId,
        end: VertexId,
        center: Point2,
        convexity: Convexity,
    ) -> Result<EdgeId> {
        self.add_edge(EdgeData::arc(start, end, center, convexity))
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData> {
        self.edges
            .get(id)
            .ok_or_else(|| SubdivisionError::EntityNotFound("edge".into()).into())
    }

    /// Iterates over all edges in insertion-slot order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Resolves an edge's endpoint positions.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or one of its vertices is missing.
    pub fn edge_geometry(&self, id: EdgeId) -> Result<EdgeGeometry> {
        let data = self.edge(id)?;
        Ok(EdgeGeometry {
            start: self.vertex(data.start)?.point,
            end: self.vertex(data.end)?.point,
            curve: data.curve,
        })
    }

    /// Returns the endpoint of `edge` opposite to `vertex`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTopology` if `vertex` is not an endpoint of `edge`.
    pub fn far_end(&self, edge: EdgeId, vertex: VertexId) -> Result<VertexId> {
        self.edge(edge)?.other(vertex).ok_or_else(|| {
            SubdivisionError::InvalidTopology("vertex is not an endpoint of edge".to_owned())
                .into()
        })
    }

    /// Unit direction leaving `vertex` along `edge`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ids are unknown, `vertex` is not on `edge`,
    /// or the edge geometry is degenerate.
    pub fn outgoing_direction(&self, edge: EdgeId, vertex: VertexId) -> Result<Vector2> {
        let data = self.edge(edge)?;
        if data.other(vertex).is_none() {
            return Err(SubdivisionError::InvalidTopology(
                "vertex is not an endpoint of edge".to_owned(),
            )
            .into());
        }
        self.edge_geometry(edge)?
            .outgoing_direction(vertex == data.start)
    }

    /// Number of edge ends incident on `vertex`.
    #[must_use]
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.edges
            .values()
            .filter(|e| e.start == vertex || e.end == vertex)
            .count()
    }

    /// Incident edges of `vertex` in clockwise order of their outgoing direction.
    ///
    /// The order is cyclic; it starts from the edge with the largest polar
    /// angle. Edges leaving in the same direction keep insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is unknown or an incident edge is degenerate.
    pub fn neighbours_at(&self, vertex: VertexId) -> Result<Vec<EdgeId>> {
        self.vertex(vertex)?;

        let mut arms: Vec<(f64, EdgeId)> = Vec::new();
        for (id, data) in &self.edges {
            if data.start == vertex || data.end == vertex {
                let dir = self.edge_geometry(id)?.outgoing_direction(data.start == vertex)?;
                arms.push((dir.y.atan2(dir.x), id));
            }
        }
        arms.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(arms.into_iter().map(|(_, id)| id).collect())
    }
}
