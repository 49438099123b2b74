//! NURBS (Non-Uniform Rational B-Spline) curves and surfaces.
//!
//! Both types are evaluated on a normalized `[0, 1]` parameter range which is
//! rescaled onto the knot domain, so they plug into the same `Curve` and
//! `Surface` contracts as the analytic types.

pub mod basis;
pub mod knot;

mod curve;
mod surface;

pub use curve::NurbsCurve;
pub use surface::NurbsSurface;

/// Map a normalized parameter onto the knot domain `(lo, hi)`.
fn rescale(t: f64, (lo, hi): (f64, f64)) -> f64 {
    lo + t * (hi - lo)
}
