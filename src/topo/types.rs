//! Topology entity types and typed index handles.

use crate::curve::{Curve, EdgeCurve};
use crate::math::{Point3, Vector3};
use crate::surface::FaceSurface;

use super::store::BRepBody;

// --- Typed index handles ---
// These are cheap to copy, store, and compare.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub usize);

// --- Topology entities ---

/// A topological vertex at a specific 3D point.
#[derive(Clone, Debug)]
pub struct Vertex {
    pub point: Point3,
    pub(crate) incident_edges: Vec<EdgeId>,
}

impl Vertex {
    pub(crate) fn new(point: Point3) -> Self {
        Self {
            point,
            incident_edges: Vec::new(),
        }
    }

    /// Edges starting or ending here, without duplicates.
    pub fn incident_edges(&self) -> &[EdgeId] {
        &self.incident_edges
    }

    pub(crate) fn add_incident_edge(&mut self, edge: EdgeId) {
        if !self.incident_edges.contains(&edge) {
            self.incident_edges.push(edge);
        }
    }
}

/// A topological edge: a curve bounded by two distinct vertices.
///
/// `reversed` records that the endpoints were swapped after construction,
/// so the topological start sits at the curve's end parameter.
#[derive(Clone, Debug)]
pub struct Edge {
    pub curve: EdgeCurve,
    pub start: VertexId,
    pub end: VertexId,
    pub(crate) adjacent_faces: Vec<FaceId>,
    pub(crate) reversed: bool,
}

impl Edge {
    pub(crate) fn new(curve: EdgeCurve, start: VertexId, end: VertexId) -> Self {
        Self {
            curve,
            start,
            end,
            adjacent_faces: Vec::new(),
            reversed: false,
        }
    }

    /// Faces bounded by this edge, without duplicates.
    pub fn adjacent_faces(&self) -> &[FaceId] {
        &self.adjacent_faces
    }

    pub(crate) fn add_adjacent_face(&mut self, face: FaceId) {
        if !self.adjacent_faces.contains(&face) {
            self.adjacent_faces.push(face);
        }
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Swap endpoints and flip the orientation flag. Loop uses are fixed up
    /// by [`BRepBody::reverse_edge`].
    pub(crate) fn reverse(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
        self.reversed = !self.reversed;
    }

    pub fn start_point(&self) -> Point3 {
        if self.reversed {
            self.curve.value(self.curve.end_param())
        } else {
            self.curve.value(self.curve.start_param())
        }
    }

    pub fn end_point(&self) -> Point3 {
        if self.reversed {
            self.curve.value(self.curve.start_param())
        } else {
            self.curve.value(self.curve.end_param())
        }
    }

    /// Chord length between the end points.
    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.start_point(), &self.end_point())
    }

    pub fn midpoint(&self) -> Point3 {
        self.curve.midpoint()
    }

    pub fn tangent_at_start(&self) -> Vector3 {
        if self.reversed {
            -self.curve.tangent(self.curve.end_param())
        } else {
            self.curve.tangent(self.curve.start_param())
        }
    }

    pub fn tangent_at_end(&self) -> Vector3 {
        if self.reversed {
            -self.curve.tangent(self.curve.start_param())
        } else {
            self.curve.tangent(self.curve.end_param())
        }
    }

    pub fn is_linear(&self) -> bool {
        self.curve.as_line().is_some()
    }

    /// Bounds exactly one face.
    pub fn is_border(&self) -> bool {
        self.adjacent_faces.len() == 1
    }

    /// Bounds exactly two faces.
    pub fn is_manifold(&self) -> bool {
        self.adjacent_faces.len() == 2
    }

    pub fn is_valid(&self) -> bool {
        self.start != self.end && (self.is_border() || self.is_manifold())
    }
}

/// One use of a shared edge inside a loop.
///
/// `forward` traverses the edge from `start` to `end`; the two faces of a
/// manifold edge use it in opposite senses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoopEdge {
    pub edge: EdgeId,
    pub forward: bool,
}

impl LoopEdge {
    pub fn forward(edge: EdgeId) -> Self {
        Self {
            edge,
            forward: true,
        }
    }

    pub fn reversed(edge: EdgeId) -> Self {
        Self {
            edge,
            forward: false,
        }
    }

    /// `(start, end)` vertices in traversal order.
    pub fn endpoints(&self, body: &BRepBody) -> (VertexId, VertexId) {
        let e = body.edge(self.edge);
        if self.forward {
            (e.start, e.end)
        } else {
            (e.end, e.start)
        }
    }
}

/// An ordered cycle of edge uses bounding a face.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeLoop {
    uses: Vec<LoopEdge>,
}

impl EdgeLoop {
    pub fn new(uses: Vec<LoopEdge>) -> Self {
        Self { uses }
    }

    pub fn uses(&self) -> &[LoopEdge] {
        &self.uses
    }

    pub(crate) fn uses_mut(&mut self) -> &mut [LoopEdge] {
        &mut self.uses
    }

    pub fn len(&self) -> usize {
        self.uses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uses.is_empty()
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.uses.iter().map(|u| u.edge)
    }

    /// At least three uses and every use ends where the next one starts.
    pub fn is_valid(&self, body: &BRepBody) -> bool {
        self.uses.len() >= 3 && self.is_connected(body)
    }

    /// The last use ends at the first use's start vertex.
    pub fn is_closed(&self, body: &BRepBody) -> bool {
        match (self.uses.first(), self.uses.last()) {
            (Some(first), Some(last)) => last.endpoints(body).1 == first.endpoints(body).0,
            _ => false,
        }
    }

    fn is_connected(&self, body: &BRepBody) -> bool {
        let n = self.uses.len();
        (0..n).all(|i| {
            let (_, end) = self.uses[i].endpoints(body);
            let (next_start, _) = self.uses[(i + 1) % n].endpoints(body);
            end == next_start
        })
    }

    /// Sum of edge chord lengths.
    pub fn length(&self, body: &BRepBody) -> f64 {
        self.edges().map(|e| body.edge(e).length()).sum()
    }

    /// Start vertex of each use, in order.
    pub fn vertices(&self, body: &BRepBody) -> Vec<VertexId> {
        self.uses.iter().map(|u| u.endpoints(body).0).collect()
    }

    pub fn points(&self, body: &BRepBody) -> Vec<Point3> {
        self.vertices(body)
            .into_iter()
            .map(|v| body.vertex(v).point)
            .collect()
    }
}

/// A bounded region on a surface: one outer loop and zero or more holes.
#[derive(Clone, Debug)]
pub struct Face {
    pub surface: FaceSurface,
    pub outer: EdgeLoop,
    pub inner: Vec<EdgeLoop>,
    pub(crate) normal: Vector3,
}

impl Face {
    /// Normal cached when the face was added to its body.
    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    pub fn loops(&self) -> impl Iterator<Item = &EdgeLoop> {
        std::iter::once(&self.outer).chain(self.inner.iter())
    }

    /// Planar fan area of the outer loop minus that of the holes.
    pub fn area(&self, body: &BRepBody) -> f64 {
        let outer = super::mass::fan_area(&self.outer.points(body));
        let holes: f64 = self
            .inner
            .iter()
            .map(|l| super::mass::fan_area(&l.points(body)))
            .sum();
        outer - holes
    }

    /// Average of the outer-loop vertices.
    pub fn center(&self, body: &BRepBody) -> Point3 {
        let points = self.outer.points(body);
        if points.is_empty() {
            return Point3::origin();
        }
        let sum = points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / points.len() as f64)
    }

    pub fn is_valid(&self, body: &BRepBody) -> bool {
        self.loops().all(|l| l.is_valid(body) && l.is_closed(body))
    }
}
