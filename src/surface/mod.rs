//! Parametric surfaces carried by topology faces.
//!
//! Each `Face` owns one [`FaceSurface`]. The concrete types implement
//! [`Surface`]: evaluation, partial derivatives, normals and bounds over a
//! parameter rectangle (`[0, 1]²` unless stated otherwise).

mod cylinder;
mod plane;
mod sphere;

pub use cylinder::CylindricalSurface;
pub use plane::PlaneSurface;
pub use sphere::SphericalSurface;

use crate::math::{normalize_or, BoundingBox, Point3, Vector3, FD_STEP};
use crate::nurbs::NurbsSurface;

/// A parametric surface in 3D.
pub trait Surface {
    fn value(&self, u: f64, v: f64) -> Point3;

    /// Partial derivative in `u`; central finite difference unless overridden.
    fn derivative_u(&self, u: f64, v: f64) -> Vector3 {
        (self.value(u + FD_STEP, v) - self.value(u - FD_STEP, v)) / (2.0 * FD_STEP)
    }

    /// Partial derivative in `v`; central finite difference unless overridden.
    fn derivative_v(&self, u: f64, v: f64) -> Vector3 {
        (self.value(u, v + FD_STEP) - self.value(u, v - FD_STEP)) / (2.0 * FD_STEP)
    }

    /// Unit normal, `∂S/∂u × ∂S/∂v` unless overridden.
    fn normal(&self, u: f64, v: f64) -> Vector3 {
        let n = self.derivative_u(u, v).cross(&self.derivative_v(u, v));
        normalize_or(n, Vector3::z())
    }

    fn u_range(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn v_range(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    /// Whether `u_range` wraps around (e.g. the angle of a cylinder).
    fn is_closed_in_u(&self) -> bool {
        false
    }

    fn is_closed_in_v(&self) -> bool {
        false
    }

    fn bounds(&self) -> BoundingBox;
}

/// The surface geometry carried by a `Face`.
#[derive(Clone, Debug)]
pub enum FaceSurface {
    Plane(PlaneSurface),
    Cylinder(CylindricalSurface),
    Sphere(SphericalSurface),
    Nurbs(NurbsSurface),
}

impl FaceSurface {
    fn inner(&self) -> &dyn Surface {
        match self {
            FaceSurface::Plane(s) => s,
            FaceSurface::Cylinder(s) => s,
            FaceSurface::Sphere(s) => s,
            FaceSurface::Nurbs(s) => s,
        }
    }

    pub fn as_plane(&self) -> Option<&PlaneSurface> {
        match self {
            FaceSurface::Plane(p) => Some(p),
            _ => None,
        }
    }

    /// Normal at the middle of the parameter rectangle, or at the origin of
    /// unbounded ranges.
    pub fn mid_normal(&self) -> Vector3 {
        let mid = |(lo, hi): (f64, f64)| {
            if lo.is_finite() && hi.is_finite() {
                (lo + hi) / 2.0
            } else {
                0.0
            }
        };
        self.normal(mid(self.u_range()), mid(self.v_range()))
    }
}

impl Surface for FaceSurface {
    fn value(&self, u: f64, v: f64) -> Point3 {
        self.inner().value(u, v)
    }

    fn derivative_u(&self, u: f64, v: f64) -> Vector3 {
        self.inner().derivative_u(u, v)
    }

    fn derivative_v(&self, u: f64, v: f64) -> Vector3 {
        self.inner().derivative_v(u, v)
    }

    fn normal(&self, u: f64, v: f64) -> Vector3 {
        self.inner().normal(u, v)
    }

    fn u_range(&self) -> (f64, f64) {
        self.inner().u_range()
    }

    fn v_range(&self) -> (f64, f64) {
        self.inner().v_range()
    }

    fn is_closed_in_u(&self) -> bool {
        self.inner().is_closed_in_u()
    }

    fn is_closed_in_v(&self) -> bool {
        self.inner().is_closed_in_v()
    }

    fn bounds(&self) -> BoundingBox {
        self.inner().bounds()
    }
}

impl From<PlaneSurface> for FaceSurface {
    fn from(s: PlaneSurface) -> Self {
        FaceSurface::Plane(s)
    }
}

impl From<CylindricalSurface> for FaceSurface {
    fn from(s: CylindricalSurface) -> Self {
        FaceSurface::Cylinder(s)
    }
}

impl From<SphericalSurface> for FaceSurface {
    fn from(s: SphericalSurface) -> Self {
        FaceSurface::Sphere(s)
    }
}

impl From<NurbsSurface> for FaceSurface {
    fn from(s: NurbsSurface) -> Self {
        FaceSurface::Nurbs(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Paraboloid with only `value` and `bounds`, to exercise the defaults.
    struct Paraboloid;

    impl Surface for Paraboloid {
        fn value(&self, u: f64, v: f64) -> Point3 {
            Point3::new(u, v, u * u + v * v)
        }

        fn bounds(&self) -> BoundingBox {
            BoundingBox::new(Point3::origin(), Point3::new(1.0, 1.0, 2.0))
        }
    }

    #[test]
    fn default_partials_and_normal() {
        let du = Paraboloid.derivative_u(0.5, 0.25);
        let dv = Paraboloid.derivative_v(0.5, 0.25);
        assert!((du - Vector3::new(1.0, 0.0, 1.0)).norm() < 1e-8);
        assert!((dv - Vector3::new(0.0, 1.0, 0.5)).norm() < 1e-8);
        let n = Paraboloid.normal(0.0, 0.0);
        assert!((n - Vector3::z()).norm() < 1e-8);
        assert!(!Paraboloid.is_closed_in_u());
    }

    #[test]
    fn face_surface_dispatches() {
        let s: FaceSurface = SphericalSurface::new(Point3::origin(), 2.0).into();
        assert!(s.is_closed_in_u());
        assert!((s.value(0.0, 0.5).coords.norm() - 2.0).abs() < 1e-12);
        assert!(s.as_plane().is_none());

        let p: FaceSurface = PlaneSurface::new(Point3::origin(), -Vector3::z()).into();
        assert!((p.mid_normal() + Vector3::z()).norm() < 1e-12);
    }
}
