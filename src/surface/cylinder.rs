use std::f64::consts::TAU;

use super::Surface;
use crate::math::{perpendicular_frame, BoundingBox, Point3, Vector3};

/// Circular cylinder around an axis through `axis_origin`.
///
/// `u ∈ [0, 1)` maps to the angle `2πu`. For a finite cylinder `v ∈ [0, 1]`
/// maps to the axial offset `v·height - height/2`, centering the cylinder on
/// `axis_origin`; for an infinite one `v` is the axial offset itself.
#[derive(Clone, Debug)]
pub struct CylindricalSurface {
    axis_origin: Point3,
    axis: Vector3,
    radius: f64,
    height: Option<f64>,
    x_axis: Vector3,
    y_axis: Vector3,
}

impl CylindricalSurface {
    pub fn finite(axis_origin: Point3, axis: Vector3, radius: f64, height: f64) -> Self {
        Self {
            height: Some(height.abs()),
            ..Self::infinite(axis_origin, axis, radius)
        }
    }

    pub fn infinite(axis_origin: Point3, axis: Vector3, radius: f64) -> Self {
        let axis = axis.normalize();
        let (x_axis, y_axis) = perpendicular_frame(&axis);
        Self {
            axis_origin,
            axis,
            radius: radius.abs(),
            height: None,
            x_axis,
            y_axis,
        }
    }

    pub fn axis_origin(&self) -> Point3 {
        self.axis_origin
    }

    pub fn axis(&self) -> Vector3 {
        self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn height(&self) -> Option<f64> {
        self.height
    }

    pub fn is_infinite(&self) -> bool {
        self.height.is_none()
    }

    fn radial(&self, u: f64) -> Vector3 {
        let angle = u * TAU;
        self.x_axis * angle.cos() + self.y_axis * angle.sin()
    }

    fn axial_offset(&self, v: f64) -> f64 {
        match self.height {
            Some(h) => v * h - h / 2.0,
            None => v,
        }
    }

    /// Split `p - axis_origin` into its axial coordinate and radial vector.
    fn decompose(&self, p: &Point3) -> (f64, Vector3) {
        let d = p - self.axis_origin;
        let axial = self.axis.dot(&d);
        (axial, d - self.axis * axial)
    }

    pub fn distance_to_point(&self, p: &Point3) -> f64 {
        let (_, radial) = self.decompose(p);
        (radial.norm() - self.radius).abs()
    }

    /// Nearest surface point, clamped to the height of a finite cylinder.
    pub fn closest_point(&self, p: &Point3) -> Point3 {
        let (mut axial, radial) = self.decompose(p);
        if let Some(h) = self.height {
            axial = axial.clamp(-h / 2.0, h / 2.0);
        }
        let dir = radial.try_normalize(1e-15).unwrap_or(self.x_axis);
        self.axis_origin + self.axis * axial + dir * self.radius
    }

    pub fn contains_point(&self, p: &Point3, tolerance: f64) -> bool {
        self.distance_to_point(p) <= tolerance
    }
}

impl Surface for CylindricalSurface {
    fn value(&self, u: f64, v: f64) -> Point3 {
        self.axis_origin + self.radial(u) * self.radius + self.axis * self.axial_offset(v)
    }

    fn derivative_u(&self, u: f64, _v: f64) -> Vector3 {
        let angle = u * TAU;
        (-self.x_axis * angle.sin() + self.y_axis * angle.cos()) * (TAU * self.radius)
    }

    fn derivative_v(&self, _u: f64, _v: f64) -> Vector3 {
        self.axis * self.height.unwrap_or(1.0)
    }

    /// Outward radial direction.
    fn normal(&self, u: f64, _v: f64) -> Vector3 {
        self.radial(u)
    }

    fn v_range(&self) -> (f64, f64) {
        match self.height {
            Some(_) => (0.0, 1.0),
            None => (f64::NEG_INFINITY, f64::INFINITY),
        }
    }

    fn is_closed_in_u(&self) -> bool {
        true
    }

    fn bounds(&self) -> BoundingBox {
        let Some(h) = self.height else {
            return BoundingBox::infinite();
        };
        let bottom = self.axis_origin - self.axis * (h / 2.0);
        let top = self.axis_origin + self.axis * (h / 2.0);
        // A circle of radius r around unit axis a extends r·√(1 - a_k²) along axis k.
        let reach = self.axis.map(|a| self.radius * (1.0 - a * a).max(0.0).sqrt());
        BoundingBox::new(bottom.inf(&top) - reach, bottom.sup(&top) + reach)
    }
}
