use std::f64::consts::PI;

use super::{basis, knot, rescale};
use crate::curve::Curve;
use crate::error::{TopologyError, TopologyResult};
use crate::math::{perpendicular_frame, Point3, Vector3};

/// A rational B-spline curve in 3D.
#[derive(Clone, Debug)]
pub struct NurbsCurve {
    degree: usize,
    control_points: Vec<Point3>,
    weights: Vec<f64>,
    knots: Vec<f64>,
}

impl NurbsCurve {
    pub fn new(
        degree: usize,
        control_points: Vec<Point3>,
        weights: Vec<f64>,
        knots: Vec<f64>,
    ) -> TopologyResult<Self> {
        if control_points.len() <= degree {
            return Err(TopologyError::invalid(format!(
                "degree {degree} NURBS curve needs at least {} control points, got {}",
                degree + 1,
                control_points.len()
            )));
        }
        if weights.len() != control_points.len() {
            return Err(TopologyError::invalid(format!(
                "{} weights for {} control points",
                weights.len(),
                control_points.len()
            )));
        }
        if weights.iter().any(|&w| !(w > 0.0)) {
            return Err(TopologyError::invalid("NURBS weights must be positive"));
        }
        if !knot::validate_knot_vector(&knots, degree, control_points.len()) {
            return Err(TopologyError::invalid(format!(
                "invalid knot vector: {} knots for degree {degree} with {} control points",
                knots.len(),
                control_points.len()
            )));
        }
        Ok(Self {
            degree,
            control_points,
            weights,
            knots,
        })
    }

    /// Exact full circle: degree 2, seven control points, three 120° arcs.
    ///
    /// Corner control points sit at `radius / cos(60°)` with weight `cos(60°)`.
    pub fn circle(center: Point3, radius: f64, normal: Vector3) -> TopologyResult<Self> {
        if !(radius > 0.0) {
            return Err(TopologyError::invalid("circle radius must be positive"));
        }
        let (ex, ey) = perpendicular_frame(&normal);
        let half = PI / 3.0;
        let mut control_points = Vec::with_capacity(7);
        let mut weights = Vec::with_capacity(7);
        for i in 0..7 {
            let angle = 2.0 * PI * i as f64 / 6.0;
            let (r, w) = if i % 2 == 0 {
                (radius, 1.0)
            } else {
                (radius / half.cos(), half.cos())
            };
            control_points.push(center + (ex * angle.cos() + ey * angle.sin()) * r);
            weights.push(w);
        }
        let third = 1.0 / 3.0;
        let knots = vec![0.0, 0.0, 0.0, third, third, 2.0 * third, 2.0 * third, 1.0, 1.0, 1.0];
        Self::new(2, control_points, weights, knots)
    }

    /// Degree-1 segment from `start` to `end`.
    pub fn line(start: Point3, end: Point3) -> Self {
        Self {
            degree: 1,
            control_points: vec![start, end],
            weights: vec![1.0, 1.0],
            knots: vec![0.0, 0.0, 1.0, 1.0],
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Knot domain `[u_min, u_max]` that `[0, 1]` is mapped onto.
    pub fn domain(&self) -> (f64, f64) {
        knot::domain(&self.knots, self.degree)
    }

    /// Weighted sums `(Σ N·w·P, Σ N·w, Σ N'·w·P, Σ N'·w)` at knot parameter `u`.
    fn sums(&self, u: f64) -> (Vector3, f64, Vector3, f64) {
        let n = self.control_points.len() - 1;
        let span = basis::find_span(n, self.degree, u, &self.knots);
        let (values, ders) = basis::nonzero_basis(span, self.degree, u, &self.knots);

        let mut a = Vector3::zeros();
        let mut w = 0.0;
        let mut da = Vector3::zeros();
        let mut dw = 0.0;
        for (k, idx) in (span - self.degree..=span).enumerate() {
            let wi = self.weights[idx];
            let pi = self.control_points[idx].coords;
            a += values[k] * wi * pi;
            w += values[k] * wi;
            da += ders[k] * wi * pi;
            dw += ders[k] * wi;
        }
        (a, w, da, dw)
    }
}

impl Curve for NurbsCurve {
    fn value(&self, t: f64) -> Point3 {
        let (a, w, _, _) = self.sums(rescale(t, self.domain()));
        if w == 0.0 {
            return Point3::origin();
        }
        Point3::from(a / w)
    }

    /// Quotient rule on `C = A / w`: `C' = (A' - w'·C) / w`, scaled by the
    /// length of the knot domain.
    fn derivative(&self, t: f64) -> Vector3 {
        let (lo, hi) = self.domain();
        let (a, w, da, dw) = self.sums(rescale(t, (lo, hi)));
        if w == 0.0 {
            return Vector3::zeros();
        }
        let c = a / w;
        (da - c * dw) / w * (hi - lo)
    }
}
