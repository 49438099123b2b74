use super::Surface;
use crate::error::{TopologyError, TopologyResult};
use crate::math::{perpendicular_frame, BoundingBox, Point3, Vector3, DEGENERATE_LENGTH};

/// A plane through `origin` with unit `normal`.
///
/// The `(u, v)` directions come from [`perpendicular_frame`], so
/// `u_dir × v_dir = normal`. An unbounded plane takes `u`, `v` as distances
/// along those directions; a bounded one maps `[0, 1]²` onto its extents.
#[derive(Clone, Debug)]
pub struct PlaneSurface {
    origin: Point3,
    normal: Vector3,
    u_dir: Vector3,
    v_dir: Vector3,
    extent: Option<(f64, f64)>,
}

impl PlaneSurface {
    pub fn new(origin: Point3, normal: Vector3) -> Self {
        let normal = normal.normalize();
        let (u_dir, v_dir) = perpendicular_frame(&normal);
        Self {
            origin,
            normal,
            u_dir,
            v_dir,
            extent: None,
        }
    }

    /// Rectangle of `u_size × v_size` with a corner at `origin`.
    pub fn bounded(origin: Point3, normal: Vector3, u_size: f64, v_size: f64) -> Self {
        Self {
            extent: Some((u_size.abs(), v_size.abs())),
            ..Self::new(origin, normal)
        }
    }

    /// Plane through three points, normal `(p2 - p1) × (p3 - p1)`.
    pub fn from_points(p1: Point3, p2: Point3, p3: Point3) -> TopologyResult<Self> {
        let n = (p2 - p1).cross(&(p3 - p1));
        if n.norm() < DEGENERATE_LENGTH {
            return Err(TopologyError::invalid(
                "cannot fit a plane through collinear points",
            ));
        }
        Ok(Self::new(p1, n))
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn plane_normal(&self) -> Vector3 {
        self.normal
    }

    pub fn u_direction(&self) -> Vector3 {
        self.u_dir
    }

    pub fn v_direction(&self) -> Vector3 {
        self.v_dir
    }

    pub fn extent(&self) -> Option<(f64, f64)> {
        self.extent
    }

    fn scale(&self) -> (f64, f64) {
        self.extent.unwrap_or((1.0, 1.0))
    }

    pub fn signed_distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&(p - self.origin))
    }

    pub fn distance_to_point(&self, p: &Point3) -> f64 {
        self.signed_distance(p).abs()
    }

    /// Orthogonal projection of `p` onto the plane.
    pub fn closest_point(&self, p: &Point3) -> Point3 {
        p - self.normal * self.signed_distance(p)
    }

    pub fn contains_point(&self, p: &Point3, tolerance: f64) -> bool {
        self.distance_to_point(p) <= tolerance
    }

    /// Parameters of the projection of `p`.
    pub fn parameters_of(&self, p: &Point3) -> (f64, f64) {
        let d = p - self.origin;
        let (su, sv) = self.scale();
        (d.dot(&self.u_dir) / su, d.dot(&self.v_dir) / sv)
    }
}

impl Surface for PlaneSurface {
    fn value(&self, u: f64, v: f64) -> Point3 {
        let (su, sv) = self.scale();
        self.origin + self.u_dir * (u * su) + self.v_dir * (v * sv)
    }

    fn derivative_u(&self, _u: f64, _v: f64) -> Vector3 {
        self.u_dir * self.scale().0
    }

    fn derivative_v(&self, _u: f64, _v: f64) -> Vector3 {
        self.v_dir * self.scale().1
    }

    fn normal(&self, _u: f64, _v: f64) -> Vector3 {
        self.normal
    }

    fn u_range(&self) -> (f64, f64) {
        match self.extent {
            Some(_) => (0.0, 1.0),
            None => (f64::NEG_INFINITY, f64::INFINITY),
        }
    }

    fn v_range(&self) -> (f64, f64) {
        self.u_range()
    }

    fn bounds(&self) -> BoundingBox {
        if self.extent.is_none() {
            return BoundingBox::infinite();
        }
        BoundingBox::from_points([
            self.value(0.0, 0.0),
            self.value(1.0, 0.0),
            self.value(0.0, 1.0),
            self.value(1.0, 1.0),
        ])
        .unwrap_or_else(BoundingBox::infinite)
    }
}
