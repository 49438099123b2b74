use std::f64::consts::TAU;

use super::Curve;
use crate::error::{TopologyError, TopologyResult};
use crate::math::{
    perpendicular_frame, Point3, Vector3, ANGLE_TOLERANCE, DEGENERATE_LENGTH, POINT_TOLERANCE,
};

/// Circular arc parameterized linearly in angle over `[0, 1]`.
///
/// Angles are measured in the radial basis `(x_axis, y_axis)` with
/// `x_axis × y_axis = normal`; the arc sweeps from `start_angle` to `end_angle`.
#[derive(Clone, Debug)]
pub struct ArcCurve {
    center: Point3,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    normal: Vector3,
    x_axis: Vector3,
    y_axis: Vector3,
}

impl ArcCurve {
    /// Arc from `start` counter-clockwise about `normal` to `end`.
    ///
    /// The radial basis is anchored at `start`, so `start_angle` is zero. When
    /// `end` coincides with `start` the arc is a full circle.
    pub fn from_points(
        center: Point3,
        start: Point3,
        end: Point3,
        normal: Vector3,
    ) -> TopologyResult<Self> {
        let n = normal
            .try_normalize(DEGENERATE_LENGTH)
            .ok_or_else(|| TopologyError::invalid("arc normal has zero length"))?;
        let to_start = start - center;
        let to_end = end - center;
        let radius = to_start.norm();
        if radius < DEGENERATE_LENGTH {
            return Err(TopologyError::invalid("arc start coincides with its center"));
        }
        if (to_end.norm() - radius).abs() > POINT_TOLERANCE {
            return Err(TopologyError::invalid(format!(
                "arc end is at distance {} from the center, expected radius {radius}",
                to_end.norm()
            )));
        }

        let x_axis = (to_start - n * to_start.dot(&n))
            .try_normalize(DEGENERATE_LENGTH)
            .ok_or_else(|| TopologyError::invalid("arc start lies on the normal axis"))?;
        let y_axis = n.cross(&x_axis);
        let mut end_angle = to_end.dot(&y_axis).atan2(to_end.dot(&x_axis));
        if end_angle <= ANGLE_TOLERANCE {
            end_angle += TAU;
        }

        Ok(Self {
            center,
            radius,
            start_angle: 0.0,
            end_angle,
            normal: n,
            x_axis,
            y_axis,
        })
    }

    /// Arc from explicit angles (radians) in the default basis around `normal`.
    pub fn new(
        center: Point3,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        normal: Vector3,
    ) -> Self {
        let n = normal.normalize();
        let (x_axis, y_axis) = perpendicular_frame(&n);
        Self {
            center,
            radius: radius.abs(),
            start_angle,
            end_angle,
            normal: n,
            x_axis,
            y_axis,
        }
    }

    fn angle_at(&self, t: f64) -> f64 {
        self.start_angle + t * (self.end_angle - self.start_angle)
    }

    fn point_at_angle(&self, angle: f64) -> Point3 {
        self.center + (self.x_axis * angle.cos() + self.y_axis * angle.sin()) * self.radius
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    pub fn start(&self) -> Point3 {
        self.point_at_angle(self.start_angle)
    }

    pub fn end(&self) -> Point3 {
        self.point_at_angle(self.end_angle)
    }

    pub fn is_full_circle(&self) -> bool {
        ((self.end_angle - self.start_angle).abs() - TAU).abs() < ANGLE_TOLERANCE
    }
}

impl Curve for ArcCurve {
    fn value(&self, t: f64) -> Point3 {
        self.point_at_angle(self.angle_at(t))
    }

    fn derivative(&self, t: f64) -> Vector3 {
        let a = self.angle_at(t);
        let span = self.end_angle - self.start_angle;
        (-self.x_axis * a.sin() + self.y_axis * a.cos()) * (self.radius * span)
    }

    fn tangent(&self, t: f64) -> Vector3 {
        let a = self.angle_at(t);
        let dir = -self.x_axis * a.sin() + self.y_axis * a.cos();
        if self.end_angle < self.start_angle {
            -dir
        } else {
            dir
        }
    }

    fn length(&self) -> f64 {
        self.radius * (self.end_angle - self.start_angle).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn from_points_hits_endpoints() {
        let center = Point3::new(1.0, 1.0, 0.0);
        let start = Point3::new(3.0, 1.0, 0.0);
        let end = Point3::new(1.0, 3.0, 0.0);
        let arc = ArcCurve::from_points(center, start, end, Vector3::z()).unwrap();
        assert!((arc.value(0.0) - start).norm() < 1e-12);
        assert!((arc.value(1.0) - end).norm() < 1e-12);
        assert!((arc.length() - PI).abs() < 1e-12); // quarter of radius 2
        assert!(((arc.value(0.5) - center).norm() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn clockwise_normal_takes_long_way() {
        let arc = ArcCurve::from_points(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            -Vector3::z(),
        )
        .unwrap();
        assert!((arc.length() - 1.5 * PI).abs() < 1e-12);
        assert!((arc.value(1.0) - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn coincident_ends_make_full_circle() {
        let p = Point3::new(2.0, 0.0, 0.0);
        let arc = ArcCurve::from_points(Point3::origin(), p, p, Vector3::z()).unwrap();
        assert!(arc.is_full_circle());
    }

    #[test]
    fn tangent_is_unit_and_perpendicular_to_radius() {
        let arc = ArcCurve::new(Point3::origin(), 3.0, 0.0, FRAC_PI_2, Vector3::new(1.0, 1.0, 1.0));
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let p = arc.value(t);
            let tan = arc.tangent(t);
            assert!((tan.norm() - 1.0).abs() < 1e-12);
            assert!(p.coords.dot(&tan).abs() < 1e-12);
            assert!((p.coords.norm() - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let arc = ArcCurve::new(Point3::new(0.0, 0.0, 1.0), 2.0, PI, 0.25 * PI, Vector3::z());
        let h = 1e-6;
        let t = 0.4;
        let fd = (arc.value(t + h) - arc.value(t - h)) / (2.0 * h);
        assert!((arc.derivative(t) - fd).norm() < 1e-6);
        // Reversed sweep: tangent follows the direction of travel.
        assert!(arc.tangent(t).dot(&fd) > 0.0);
    }

    #[test]
    fn rejects_degenerate_definitions() {
        let c = Point3::origin();
        assert!(ArcCurve::from_points(c, c, Point3::new(1.0, 0.0, 0.0), Vector3::z()).is_err());
        assert!(ArcCurve::from_points(
            c,
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Vector3::z()
        )
        .is_err());
        assert!(ArcCurve::from_points(
            c,
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Vector3::zeros()
        )
        .is_err());
    }
}
