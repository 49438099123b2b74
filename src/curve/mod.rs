//! Parametric curves carried by topology edges.
//!
//! Every curve implements [`Curve`] on its own parameter range (`[0, 1]` for
//! the built-in types). Edges own an [`EdgeCurve`], which dispatches to the
//! concrete variants.

mod arc;
mod line;

pub use arc::ArcCurve;
pub use line::LineCurve;

use crate::math::{normalize_or, Point3, Vector3, FD_STEP};
use crate::nurbs::NurbsCurve;

/// Segments used by the default polyline length.
pub const LENGTH_SEGMENTS: usize = 100;

/// A parametric curve in 3D.
pub trait Curve {
    /// Point at parameter `t`.
    fn value(&self, t: f64) -> Point3;

    /// First derivative; central finite difference unless overridden.
    fn derivative(&self, t: f64) -> Vector3 {
        (self.value(t + FD_STEP) - self.value(t - FD_STEP)) / (2.0 * FD_STEP)
    }

    /// Unit tangent at `t`.
    fn tangent(&self, t: f64) -> Vector3 {
        normalize_or(self.derivative(t), Vector3::x())
    }

    fn start_param(&self) -> f64 {
        0.0
    }

    fn end_param(&self) -> f64 {
        1.0
    }

    /// Arc length; polyline integration unless a closed form is available.
    fn length(&self) -> f64 {
        self.length_between(self.start_param(), self.end_param(), LENGTH_SEGMENTS)
    }

    /// Polyline length between `t1` and `t2` using `segments` chords.
    fn length_between(&self, t1: f64, t2: f64, segments: usize) -> f64 {
        if segments == 0 {
            return 0.0;
        }
        let dt = (t2 - t1) / segments as f64;
        let mut prev = self.value(t1);
        let mut total = 0.0;
        for i in 1..=segments {
            let p = self.value(t1 + i as f64 * dt);
            total += nalgebra::distance(&prev, &p);
            prev = p;
        }
        total
    }

    fn midpoint(&self) -> Point3 {
        self.value((self.start_param() + self.end_param()) / 2.0)
    }
}

/// The curve geometry carried by an `Edge`.
#[derive(Clone, Debug)]
pub enum EdgeCurve {
    Line(LineCurve),
    Arc(ArcCurve),
    Nurbs(NurbsCurve),
}

impl EdgeCurve {
    fn inner(&self) -> &dyn Curve {
        match self {
            EdgeCurve::Line(c) => c,
            EdgeCurve::Arc(c) => c,
            EdgeCurve::Nurbs(c) => c,
        }
    }

    pub fn as_line(&self) -> Option<&LineCurve> {
        match self {
            EdgeCurve::Line(c) => Some(c),
            _ => None,
        }
    }
}

impl Curve for EdgeCurve {
    fn value(&self, t: f64) -> Point3 {
        self.inner().value(t)
    }

    fn derivative(&self, t: f64) -> Vector3 {
        self.inner().derivative(t)
    }

    fn tangent(&self, t: f64) -> Vector3 {
        self.inner().tangent(t)
    }

    fn start_param(&self) -> f64 {
        self.inner().start_param()
    }

    fn end_param(&self) -> f64 {
        self.inner().end_param()
    }

    fn length(&self) -> f64 {
        self.inner().length()
    }
}

impl From<LineCurve> for EdgeCurve {
    fn from(c: LineCurve) -> Self {
        EdgeCurve::Line(c)
    }
}

impl From<ArcCurve> for EdgeCurve {
    fn from(c: ArcCurve) -> Self {
        EdgeCurve::Arc(c)
    }
}

impl From<NurbsCurve> for EdgeCurve {
    fn from(c: NurbsCurve) -> Self {
        EdgeCurve::Nurbs(c)
    }
}
