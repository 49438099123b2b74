//! Structural validation of a body.
//!
//! Checks the invariants a closed genus-0 solid must satisfy:
//! - Euler formula: V - E + F = 2
//! - Every edge bounds one or two faces, and two faces use it in opposite senses
//! - Every vertex has at least one incident edge
//! - Every face loop has three or more uses and is closed

use std::collections::HashMap;

use tracing::warn;

use super::store::BRepBody;
use super::types::*;
use crate::error::{TopologyError, TopologyResult};

/// Result of topology validation.
#[derive(Debug)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Collect every broken invariant of `body`.
pub fn validate_body(body: &BRepBody) -> ValidationResult {
    let mut errors = Vec::new();

    // 1. Euler characteristic
    let chi = body.euler_characteristic();
    if chi != 2 {
        errors.push(format!(
            "Euler characteristic V - E + F = {} - {} + {} = {chi} (expected 2)",
            body.vertices().len(),
            body.edges().len(),
            body.faces().len(),
        ));
    }

    // 2. Edge adjacency
    for (i, edge) in body.edges().iter().enumerate() {
        let n = edge.adjacent_faces().len();
        if !(1..=2).contains(&n) {
            errors.push(format!(
                "Edge {:?} has {n} adjacent faces (expected 1 or 2)",
                EdgeId(i)
            ));
        }
        if edge.start == edge.end {
            errors.push(format!("Edge {:?} starts and ends at the same vertex", EdgeId(i)));
        }
    }

    // 3. Opposite orientation of the two uses of a manifold edge
    let mut senses: HashMap<EdgeId, Vec<bool>> = HashMap::new();
    for face in body.faces() {
        for lp in face.loops() {
            for u in lp.uses() {
                senses.entry(u.edge).or_default().push(u.forward);
            }
        }
    }
    let mut same_sense: Vec<_> = senses
        .iter()
        .filter(|(_, s)| s.len() == 2 && s[0] == s[1])
        .map(|(&e, _)| e)
        .collect();
    same_sense.sort();
    for e in same_sense {
        errors.push(format!(
            "Edge {e:?}: both faces traverse it in the same direction"
        ));
    }

    // 4. Orphan vertices
    for (i, v) in body.vertices().iter().enumerate() {
        if v.incident_edges().is_empty() {
            errors.push(format!("Vertex {:?} has no incident edges", VertexId(i)));
        }
    }

    // 5. Loops
    for (i, face) in body.faces().iter().enumerate() {
        for lp in face.loops() {
            if !lp.is_valid(body) {
                errors.push(format!(
                    "Face {:?} has a loop of {} uses that is not connected",
                    FaceId(i),
                    lp.len()
                ));
            } else if !lp.is_closed(body) {
                errors.push(format!("Face {:?} has an open loop", FaceId(i)));
            }
        }
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}

impl BRepBody {
    /// V - E + F.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices().len() as i64 - self.edges().len() as i64 + self.faces().len() as i64
    }

    pub fn validate_euler_characteristic(&self) -> bool {
        self.euler_characteristic() == 2
    }

    /// Run every structural check, failing with all diagnostics at once.
    pub fn validate_topology(&self) -> TopologyResult<()> {
        let result = validate_body(self);
        if result.valid {
            return Ok(());
        }
        let message = result.errors.join("; ");
        warn!(errors = result.errors.len(), "{message}");
        Err(TopologyError::violation(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::LineCurve;
    use crate::math::{Point3, Vector3};
    use crate::surface::PlaneSurface;

    /// Tetrahedron with outward loops.
    fn tetrahedron() -> BRepBody {
        let mut body = BRepBody::new();
        let p = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let v: Vec<_> = p.iter().map(|&q| body.add_vertex(q)).collect();
        let mut edge = |a: usize, b: usize| {
            body.add_edge(LineCurve::new(p[a], p[b]), v[a], v[b]).unwrap()
        };
        let e01 = edge(0, 1);
        let e12 = edge(1, 2);
        let e20 = edge(2, 0);
        let e03 = edge(0, 3);
        let e13 = edge(1, 3);
        let e23 = edge(2, 3);
        let f = LoopEdge::forward;
        let r = LoopEdge::reversed;
        let loops = [
            vec![r(e20), r(e12), r(e01)],
            vec![f(e01), f(e13), r(e03)],
            vec![f(e12), f(e23), r(e13)],
            vec![f(e20), f(e03), r(e23)],
        ];
        for uses in loops {
            let lp = EdgeLoop::new(uses);
            let pts = lp.points(&body);
            let plane = PlaneSurface::from_points(pts[0], pts[1], pts[2]).unwrap();
            body.add_face(plane, lp).unwrap();
        }
        body
    }

    #[test]
    fn tetrahedron_is_valid() {
        let body = tetrahedron();
        assert_eq!(body.euler_characteristic(), 2);
        assert!(body.validate_euler_characteristic());
        assert!(body.validate_topology().is_ok());
        assert!(body.edges().iter().all(|e| e.is_manifold()));
    }

    #[test]
    fn open_shell_fails_euler() {
        let mut body = BRepBody::new();
        let a = body.add_vertex(Point3::origin());
        let b = body.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = body.add_vertex(Point3::new(0.0, 1.0, 0.0));
        let ab = body.add_edge(LineCurve::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)), a, b).unwrap();
        let bc = body.add_edge(LineCurve::new(Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)), b, c).unwrap();
        let ca = body.add_edge(LineCurve::new(Point3::new(0.0, 1.0, 0.0), Point3::origin()), c, a).unwrap();
        let lp = EdgeLoop::new(vec![
            LoopEdge::forward(ab),
            LoopEdge::forward(bc),
            LoopEdge::forward(ca),
        ]);
        body.add_face(PlaneSurface::new(Point3::origin(), Vector3::z()), lp).unwrap();
        // V - E + F = 3 - 3 + 1
        assert_eq!(body.euler_characteristic(), 1);
        let err = body.validate_topology().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::TopologyViolation);
        assert!(err.to_string().contains("Euler"));
    }

    #[test]
    fn orphan_vertex_and_unused_edge_are_reported() {
        let mut body = tetrahedron();
        body.add_vertex(Point3::new(5.0, 5.0, 5.0));
        let result = validate_body(&body);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("no incident edges")));

        let mut body = tetrahedron();
        let a = body.add_vertex(Point3::new(5.0, 5.0, 5.0));
        let b = body.add_vertex(Point3::new(6.0, 5.0, 5.0));
        body.add_edge(LineCurve::new(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 5.0, 5.0)), a, b)
            .unwrap();
        let result = validate_body(&body);
        assert!(result.errors.iter().any(|e| e.contains("0 adjacent faces")));
    }

    #[test]
    fn reversing_an_edge_keeps_body_valid() {
        let mut body = tetrahedron();
        body.reverse_edge(EdgeId(3)).unwrap();
        assert!(body.validate_topology().is_ok());
    }
}
