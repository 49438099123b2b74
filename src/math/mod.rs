//! Linear algebra type aliases, geometric tolerances, and small helpers.

mod bbox;
mod grid;

pub use bbox::BoundingBox;
pub use grid::PointGrid;

pub type Point3 = nalgebra::Point3<f64>;
pub type Vector3 = nalgebra::Vector3<f64>;

/// Distance below which two points are the same sketch/ring point.
pub const POINT_TOLERANCE: f64 = 1e-6;

/// A line segment shorter than this is a point.
pub const DEGENERATE_LENGTH: f64 = 1e-10;

/// Allowed deviation of a direction vector's magnitude from 1.
pub const DIRECTION_TOLERANCE: f64 = 1e-6;

/// Angular tolerance (radians) for full-circle and draft checks.
pub const ANGLE_TOLERANCE: f64 = 1e-6;

/// Step used by central finite differences.
pub const FD_STEP: f64 = 1e-6;

/// Epsilon equality for points.
pub fn points_coincide(a: &Point3, b: &Point3, tol: f64) -> bool {
    nalgebra::distance(a, b) < tol
}

/// Normalize `v`, or return `fallback` when `v` has no usable direction.
pub fn normalize_or(v: Vector3, fallback: Vector3) -> Vector3 {
    let len = v.norm();
    if len > 1e-15 {
        v / len
    } else {
        fallback
    }
}

/// Orthonormal pair `(e1, e2)` perpendicular to `n`, with `e1 × e2 = n̂`.
///
/// `e1` is `n × Z` unless `n` is nearly parallel to Z, in which case `n × X`.
pub fn perpendicular_frame(n: &Vector3) -> (Vector3, Vector3) {
    let a = normalize_or(*n, Vector3::z());
    let seed = if a.dot(&Vector3::z()).abs() < 0.9 {
        Vector3::z()
    } else {
        Vector3::x()
    };
    let e1 = a.cross(&seed).normalize();
    let e2 = a.cross(&e1);
    (e1, e2)
}
