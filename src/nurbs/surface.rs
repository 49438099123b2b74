use super::{basis, knot, rescale};
use crate::error::{TopologyError, TopologyResult};
use crate::math::{BoundingBox, Point3, Vector3};
use crate::surface::Surface;

/// A tensor-product rational B-spline surface.
#[derive(Clone, Debug)]
pub struct NurbsSurface {
    degree_u: usize,
    degree_v: usize,
    /// Control point grid, indexed `[u_index][v_index]`.
    control_points: Vec<Vec<Point3>>,
    /// Weight grid, same layout as control points.
    weights: Vec<Vec<f64>>,
    knots_u: Vec<f64>,
    knots_v: Vec<f64>,
}

/// Weighted sums of one surface evaluation: value, d/du, d/dv of the
/// numerator and the denominator.
struct Sums {
    a: Vector3,
    w: f64,
    a_u: Vector3,
    w_u: f64,
    a_v: Vector3,
    w_v: f64,
}

impl NurbsSurface {
    pub fn new(
        degree_u: usize,
        degree_v: usize,
        control_points: Vec<Vec<Point3>>,
        weights: Vec<Vec<f64>>,
        knots_u: Vec<f64>,
        knots_v: Vec<f64>,
    ) -> TopologyResult<Self> {
        let nu = control_points.len();
        let nv = control_points.first().map_or(0, Vec::len);
        if nu <= degree_u || nv <= degree_v {
            return Err(TopologyError::invalid(format!(
                "{nu}x{nv} control grid too small for degrees ({degree_u}, {degree_v})"
            )));
        }
        if control_points.iter().any(|row| row.len() != nv) {
            return Err(TopologyError::invalid("control grid rows differ in length"));
        }
        if weights.len() != nu || weights.iter().any(|row| row.len() != nv) {
            return Err(TopologyError::invalid(
                "weight grid does not match the control grid",
            ));
        }
        if weights.iter().flatten().any(|&w| !(w > 0.0)) {
            return Err(TopologyError::invalid("NURBS weights must be positive"));
        }
        if !knot::validate_knot_vector(&knots_u, degree_u, nu) {
            return Err(TopologyError::invalid("invalid U knot vector"));
        }
        if !knot::validate_knot_vector(&knots_v, degree_v, nv) {
            return Err(TopologyError::invalid("invalid V knot vector"));
        }
        Ok(Self {
            degree_u,
            degree_v,
            control_points,
            weights,
            knots_u,
            knots_v,
        })
    }

    /// Degree (1, 1) patch through four corners; `p10` is at `(u=1, v=0)`.
    pub fn bilinear(p00: Point3, p10: Point3, p01: Point3, p11: Point3) -> Self {
        Self {
            degree_u: 1,
            degree_v: 1,
            control_points: vec![vec![p00, p01], vec![p10, p11]],
            weights: vec![vec![1.0, 1.0], vec![1.0, 1.0]],
            knots_u: vec![0.0, 0.0, 1.0, 1.0],
            knots_v: vec![0.0, 0.0, 1.0, 1.0],
        }
    }

    pub fn degrees(&self) -> (usize, usize) {
        (self.degree_u, self.degree_v)
    }

    pub fn control_points(&self) -> &[Vec<Point3>] {
        &self.control_points
    }

    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    pub fn domain_u(&self) -> (f64, f64) {
        knot::domain(&self.knots_u, self.degree_u)
    }

    pub fn domain_v(&self) -> (f64, f64) {
        knot::domain(&self.knots_v, self.degree_v)
    }

    fn sums(&self, u: f64, v: f64) -> Sums {
        let nu = self.control_points.len() - 1;
        let nv = self.control_points[0].len() - 1;
        let span_u = basis::find_span(nu, self.degree_u, u, &self.knots_u);
        let span_v = basis::find_span(nv, self.degree_v, v, &self.knots_v);
        let (bu, dbu) = basis::nonzero_basis(span_u, self.degree_u, u, &self.knots_u);
        let (bv, dbv) = basis::nonzero_basis(span_v, self.degree_v, v, &self.knots_v);

        let mut s = Sums {
            a: Vector3::zeros(),
            w: 0.0,
            a_u: Vector3::zeros(),
            w_u: 0.0,
            a_v: Vector3::zeros(),
            w_v: 0.0,
        };
        for (i, ui) in (span_u - self.degree_u..=span_u).enumerate() {
            for (j, vj) in (span_v - self.degree_v..=span_v).enumerate() {
                let wij = self.weights[ui][vj];
                let pij = self.control_points[ui][vj].coords;
                let b00 = bu[i] * bv[j] * wij;
                let b10 = dbu[i] * bv[j] * wij;
                let b01 = bu[i] * dbv[j] * wij;
                s.a += b00 * pij;
                s.w += b00;
                s.a_u += b10 * pij;
                s.w_u += b10;
                s.a_v += b01 * pij;
                s.w_v += b01;
            }
        }
        s
    }
}

impl Surface for NurbsSurface {
    fn value(&self, u: f64, v: f64) -> Point3 {
        let s = self.sums(rescale(u, self.domain_u()), rescale(v, self.domain_v()));
        if s.w == 0.0 {
            return Point3::origin();
        }
        Point3::from(s.a / s.w)
    }

    fn derivative_u(&self, u: f64, v: f64) -> Vector3 {
        let (lo, hi) = self.domain_u();
        let s = self.sums(rescale(u, (lo, hi)), rescale(v, self.domain_v()));
        if s.w == 0.0 {
            return Vector3::zeros();
        }
        let c = s.a / s.w;
        (s.a_u - c * s.w_u) / s.w * (hi - lo)
    }

    fn derivative_v(&self, u: f64, v: f64) -> Vector3 {
        let (lo, hi) = self.domain_v();
        let s = self.sums(rescale(u, self.domain_u()), rescale(v, (lo, hi)));
        if s.w == 0.0 {
            return Vector3::zeros();
        }
        let c = s.a / s.w;
        (s.a_v - c * s.w_v) / s.w * (hi - lo)
    }

    /// Hull of the control grid; contains the surface by the convex-hull property.
    fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(self.control_points.iter().flatten().copied())
            .unwrap_or_else(BoundingBox::infinite)
    }
}
