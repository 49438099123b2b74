//! Arena-based storage for a swept body.
//!
//! All topology entities live in the `BRepBody`. Entities reference each other
//! via typed indices (e.g., `VertexId`, `EdgeId`). This avoids Rc/Arc reference
//! cycles in the inherently cyclic topology graph.

use std::collections::HashMap;

use super::types::*;
use crate::curve::EdgeCurve;
use crate::error::{TopologyError, TopologyResult};
use crate::math::{
    normalize_or, BoundingBox, Point3, PointGrid, Vector3, DEGENERATE_LENGTH, POINT_TOLERANCE,
};
use crate::surface::FaceSurface;

/// Owner of all vertices, edges and faces of one solid.
#[derive(Clone, Debug)]
pub struct BRepBody {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    vertex_grid: PointGrid,
    edge_index: HashMap<(VertexId, VertexId), EdgeId>,
}

impl Default for BRepBody {
    fn default() -> Self {
        Self::with_tolerance(POINT_TOLERANCE)
    }
}

impl BRepBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty body merging vertices closer than `tolerance`.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            vertex_grid: PointGrid::new(tolerance),
            edge_index: HashMap::new(),
        }
    }

    // --- Add entities ---

    /// Add a vertex, or return the existing one within tolerance of `point`.
    pub fn add_vertex(&mut self, point: Point3) -> VertexId {
        let (idx, inserted) = self.vertex_grid.insert(point);
        if inserted {
            self.vertices.push(Vertex::new(point));
        }
        VertexId(idx)
    }

    /// Add an edge from `start` to `end`, or return the existing one with the
    /// same endpoints in the same order.
    pub fn add_edge(
        &mut self,
        curve: impl Into<EdgeCurve>,
        start: VertexId,
        end: VertexId,
    ) -> TopologyResult<EdgeId> {
        self.check_vertex(start)?;
        self.check_vertex(end)?;
        if start == end {
            return Err(TopologyError::violation(format!(
                "edge would start and end at {start:?}"
            )));
        }
        if let Some(&id) = self.edge_index.get(&(start, end)) {
            return Ok(id);
        }
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(curve.into(), start, end));
        self.edge_index.insert((start, end), id);
        self.vertices[start.0].add_incident_edge(id);
        self.vertices[end.0].add_incident_edge(id);
        Ok(id)
    }

    /// Add a face bounded by `outer`, or return the face that already has the
    /// same outer loop. Every loop edge records the face as adjacent.
    pub fn add_face(
        &mut self,
        surface: impl Into<FaceSurface>,
        outer: EdgeLoop,
    ) -> TopologyResult<FaceId> {
        for &e in outer.uses() {
            self.check_edge(e.edge)?;
        }
        if let Some(pos) = self.faces.iter().position(|f| f.outer == outer) {
            return Ok(FaceId(pos));
        }
        let surface = surface.into();
        let id = FaceId(self.faces.len());
        let normal = self.loop_normal(&outer, &surface);
        for e in outer.edges() {
            self.edges[e.0].add_adjacent_face(id);
        }
        self.faces.push(Face {
            surface,
            outer,
            inner: Vec::new(),
            normal,
        });
        Ok(id)
    }

    /// Add a hole to an existing face.
    pub fn add_inner_loop(&mut self, face: FaceId, hole: EdgeLoop) -> TopologyResult<()> {
        self.check_face(face)?;
        for &e in hole.uses() {
            self.check_edge(e.edge)?;
        }
        for e in hole.edges() {
            self.edges[e.0].add_adjacent_face(face);
        }
        self.faces[face.0].inner.push(hole);
        let normal = {
            let f = &self.faces[face.0];
            self.loop_normal(&f.outer, &f.surface)
        };
        self.faces[face.0].normal = normal;
        Ok(())
    }

    /// Swap an edge's endpoints and flip every loop use of it, keeping all
    /// loops connected.
    pub fn reverse_edge(&mut self, id: EdgeId) -> TopologyResult<()> {
        self.check_edge(id)?;
        let edge = &mut self.edges[id.0];
        self.edge_index.remove(&(edge.start, edge.end));
        edge.reverse();
        self.edge_index.insert((edge.start, edge.end), id);
        for face in &mut self.faces {
            let loops = std::iter::once(&mut face.outer).chain(face.inner.iter_mut());
            for l in loops {
                for u in l.uses_mut().iter_mut().filter(|u| u.edge == id) {
                    u.forward = !u.forward;
                }
            }
        }
        Ok(())
    }

    // --- Get entities ---

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.0]
    }

    pub fn find_vertex(&self, point: &Point3) -> Option<VertexId> {
        self.vertex_grid.find(point).map(VertexId)
    }

    pub fn find_edge(&self, start: VertexId, end: VertexId) -> Option<EdgeId> {
        self.edge_index.get(&(start, end)).copied()
    }

    // --- Traversal helpers ---

    /// Outer-loop vertices of a face, in loop order.
    pub fn face_vertices(&self, id: FaceId) -> Vec<VertexId> {
        self.face(id).outer.vertices(self)
    }

    /// Box around all vertices; `None` for an empty body.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices.iter().map(|v| v.point))
    }

    /// Normal from the loop's signed fan area, or from the surface when the
    /// loop encloses no area. Reflex corners at the loop start are fine.
    fn loop_normal(&self, outer: &EdgeLoop, surface: &FaceSurface) -> Vector3 {
        let points = outer.points(self);
        if let Some((p0, rest)) = points.split_first() {
            let n: Vector3 = rest
                .windows(2)
                .map(|w| (w[0] - p0).cross(&(w[1] - p0)))
                .sum();
            if let Some(n) = n.try_normalize(DEGENERATE_LENGTH) {
                return n;
            }
        }
        normalize_or(surface.mid_normal(), Vector3::z())
    }

    fn check_vertex(&self, id: VertexId) -> TopologyResult<()> {
        if id.0 < self.vertices.len() {
            Ok(())
        } else {
            Err(TopologyError::violation(format!("unknown vertex {id:?}")))
        }
    }

    fn check_edge(&self, id: EdgeId) -> TopologyResult<()> {
        if id.0 < self.edges.len() {
            Ok(())
        } else {
            Err(TopologyError::violation(format!("unknown edge {id:?}")))
        }
    }

    fn check_face(&self, id: FaceId) -> TopologyResult<()> {
        if id.0 < self.faces.len() {
            Ok(())
        } else {
            Err(TopologyError::violation(format!("unknown face {id:?}")))
        }
    }
}
