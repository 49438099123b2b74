use std::f64::consts::{PI, TAU};

use super::Surface;
use crate::math::{normalize_or, BoundingBox, Point3, Vector3};

/// Sphere with `u` = azimuth / 2π and `v` = polar angle / π (from +Z).
#[derive(Clone, Debug)]
pub struct SphericalSurface {
    center: Point3,
    radius: f64,
}

impl SphericalSurface {
    pub fn new(center: Point3, radius: f64) -> Self {
        Self {
            center,
            radius: radius.abs(),
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Point at azimuth `theta` and polar angle `phi` (radians).
    pub fn point_at_angles(&self, theta: f64, phi: f64) -> Point3 {
        self.center
            + Vector3::new(
                phi.sin() * theta.cos(),
                phi.sin() * theta.sin(),
                phi.cos(),
            ) * self.radius
    }

    /// `(theta, phi)` of the direction from the center to `p`,
    /// with `theta ∈ [0, 2π)` and `phi ∈ [0, π]`.
    pub fn angles_for_point(&self, p: &Point3) -> (f64, f64) {
        let d = p - self.center;
        let r = d.norm();
        if r == 0.0 {
            return (0.0, 0.0);
        }
        let mut theta = d.y.atan2(d.x);
        if theta < 0.0 {
            theta += TAU;
        }
        let phi = (d.z / r).clamp(-1.0, 1.0).acos();
        (theta, phi)
    }

    pub fn distance_to_point(&self, p: &Point3) -> f64 {
        (nalgebra::distance(p, &self.center) - self.radius).abs()
    }

    pub fn closest_point(&self, p: &Point3) -> Point3 {
        self.center + normalize_or(p - self.center, Vector3::z()) * self.radius
    }

    pub fn contains_point(&self, p: &Point3, tolerance: f64) -> bool {
        self.distance_to_point(p) <= tolerance
    }

    pub fn is_point_inside(&self, p: &Point3) -> bool {
        nalgebra::distance(p, &self.center) < self.radius
    }
}

impl Surface for SphericalSurface {
    fn value(&self, u: f64, v: f64) -> Point3 {
        self.point_at_angles(u * TAU, v * PI)
    }

    fn derivative_u(&self, u: f64, v: f64) -> Vector3 {
        let (theta, phi) = (u * TAU, v * PI);
        Vector3::new(-phi.sin() * theta.sin(), phi.sin() * theta.cos(), 0.0) * (self.radius * TAU)
    }

    fn derivative_v(&self, u: f64, v: f64) -> Vector3 {
        let (theta, phi) = (u * TAU, v * PI);
        Vector3::new(
            phi.cos() * theta.cos(),
            phi.cos() * theta.sin(),
            -phi.sin(),
        ) * (self.radius * PI)
    }

    /// Outward radial direction; well defined at the poles too.
    fn normal(&self, u: f64, v: f64) -> Vector3 {
        normalize_or(self.value(u, v) - self.center, Vector3::z())
    }

    fn is_closed_in_u(&self) -> bool {
        true
    }

    fn bounds(&self) -> BoundingBox {
        let r = Vector3::repeat(self.radius);
        BoundingBox::new(self.center - r, self.center + r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_and_normals_are_radial() {
        let s = SphericalSurface::new(Point3::new(1.0, 1.0, 1.0), 3.0);
        for i in 0..=10 {
            for j in 0..=10 {
                let (u, v) = (i as f64 / 10.0, j as f64 / 10.0);
                let p = s.value(u, v);
                assert!((nalgebra::distance(&p, &s.center()) - 3.0).abs() < 1e-12);
                let n = s.normal(u, v);
                assert!(((p - s.center()) / 3.0 - n).norm() < 1e-12);
            }
        }
        assert!((s.value(0.3, 0.0) - Point3::new(1.0, 1.0, 4.0)).norm() < 1e-12);
    }

    #[test]
    fn angles_roundtrip() {
        let s = SphericalSurface::new(Point3::origin(), 2.0);
        let (theta, phi) = (4.0, 1.1);
        let p = s.point_at_angles(theta, phi);
        let (t2, p2) = s.angles_for_point(&p);
        assert!((theta - t2).abs() < 1e-12);
        assert!((phi - p2).abs() < 1e-12);
    }

    #[test]
    fn partials_match_finite_difference() {
        let s = SphericalSurface::new(Point3::origin(), 2.0);
        let h = 1e-7;
        let (u, v) = (0.2, 0.4);
        let fd_u = (s.value(u + h, v) - s.value(u - h, v)) / (2.0 * h);
        let fd_v = (s.value(u, v + h) - s.value(u, v - h)) / (2.0 * h);
        assert!((s.derivative_u(u, v) - fd_u).norm() < 1e-5);
        assert!((s.derivative_v(u, v) - fd_v).norm() < 1e-5);
    }

    #[test]
    fn distance_queries() {
        let s = SphericalSurface::new(Point3::origin(), 2.0);
        let p = Point3::new(0.0, 5.0, 0.0);
        assert!((s.distance_to_point(&p) - 3.0).abs() < 1e-12);
        assert!((s.closest_point(&p) - Point3::new(0.0, 2.0, 0.0)).norm() < 1e-12);
        assert!(s.is_point_inside(&Point3::new(1.0, 0.0, 0.0)));
        assert!(!s.is_point_inside(&p));
        let bb = s.bounds();
        assert!((bb.volume() - 64.0).abs() < 1e-12);
    }
}
