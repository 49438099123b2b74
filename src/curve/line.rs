use super::Curve;
use crate::math::{normalize_or, Point3, Vector3, DEGENERATE_LENGTH};

/// Straight segment, `value(t) = start + t·(end - start)`.
#[derive(Clone, Debug)]
pub struct LineCurve {
    start: Point3,
    end: Point3,
}

impl LineCurve {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> Point3 {
        self.start
    }

    pub fn end(&self) -> Point3 {
        self.end
    }

    /// True when the segment has collapsed to a point.
    pub fn is_point(&self) -> bool {
        nalgebra::distance(&self.start, &self.end) < DEGENERATE_LENGTH
    }
}

impl Curve for LineCurve {
    fn value(&self, t: f64) -> Point3 {
        self.start + (self.end - self.start) * t
    }

    fn derivative(&self, _t: f64) -> Vector3 {
        self.end - self.start
    }

    fn tangent(&self, _t: f64) -> Vector3 {
        normalize_or(self.end - self.start, Vector3::x())
    }

    fn length(&self) -> f64 {
        nalgebra::distance(&self.start, &self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_endpoints() {
        let l = LineCurve::new(Point3::new(1.0, 0.0, 0.0), Point3::new(3.0, 0.0, 0.0));
        assert_eq!(l.value(0.0), l.start());
        assert_eq!(l.value(1.0), l.end());
        assert!((l.value(0.25) - Point3::new(1.5, 0.0, 0.0)).norm() < 1e-14);
        assert_eq!(l.tangent(0.3), Vector3::x());
        assert!((l.length() - 2.0).abs() < 1e-14);
    }

    #[test]
    fn flags_degenerate_segment() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(LineCurve::new(p, p + Vector3::new(1e-12, 0.0, 0.0)).is_point());
        assert!(!LineCurve::new(p, p + Vector3::new(1e-6, 0.0, 0.0)).is_point());
    }
}
