//! Mass properties from per-face fan triangulation.
//!
//! Each loop is fanned from its own first vertex and the fan triangles keep
//! their orientation, so the results are exact for closed, outward oriented
//! bodies with planar simple faces, convex or not.

use super::store::BRepBody;
use super::types::EdgeLoop;
use crate::math::{Point3, Vector3};

/// Area of a planar loop from the signed fan `(p0, p_i, p_i+1)`.
///
/// Triangles folding back over a reflex corner cancel against the rest.
pub(crate) fn fan_area(points: &[Point3]) -> f64 {
    let Some((p0, rest)) = points.split_first() else {
        return 0.0;
    };
    rest.windows(2)
        .map(|w| (w[0] - p0).cross(&(w[1] - p0)))
        .sum::<Vector3>()
        .norm()
        / 2.0
}

/// Signed volume of the cone from `apex` over the fan.
fn fan_signed_volume(points: &[Point3], apex: &Point3) -> f64 {
    let Some((p0, rest)) = points.split_first() else {
        return 0.0;
    };
    let a = p0 - apex;
    rest.windows(2)
        .map(|w| a.dot(&(w[0] - apex).cross(&(w[1] - apex))) / 6.0)
        .sum()
}

fn loop_signed_volume(body: &BRepBody, lp: &EdgeLoop, apex: &Point3) -> f64 {
    fan_signed_volume(&lp.points(body), apex)
}

impl BRepBody {
    /// Enclosed volume; the absolute value of the signed sum over all loops.
    ///
    /// Cones are taken from the body's first vertex rather than the origin so
    /// bodies far from the origin keep their precision.
    pub fn volume(&self) -> f64 {
        let Some(apex) = self.vertices().first().map(|v| v.point) else {
            return 0.0;
        };
        self.faces()
            .iter()
            .flat_map(|f| f.loops())
            .map(|lp| loop_signed_volume(self, lp, &apex))
            .sum::<f64>()
            .abs()
    }

    /// Sum of face areas.
    pub fn surface_area(&self) -> f64 {
        self.faces().iter().map(|f| f.area(self)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_area_of_square() {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        assert!((fan_area(&pts) - 4.0).abs() < 1e-12);
        assert_eq!(fan_area(&pts[..2]), 0.0);
        assert_eq!(fan_area(&[]), 0.0);
    }

    #[test]
    fn fan_area_of_concave_loop_is_start_independent() {
        let l = [
            [1.0, 1.0],
            [1.0, 2.0],
            [0.0, 2.0],
            [0.0, 0.0],
            [2.0, 0.0],
            [2.0, 1.0],
        ];
        for rot in 0..l.len() {
            let pts: Vec<_> = (0..l.len())
                .map(|i| {
                    let [x, y] = l[(i + rot) % l.len()];
                    Point3::new(x, y, 3.0)
                })
                .collect();
            assert!((fan_area(&pts) - 3.0).abs() < 1e-12, "rotation {rot}");
        }
    }

    #[test]
    fn signed_volume_flips_with_orientation() {
        let mut pts = vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let apex = Point3::origin();
        let up = fan_signed_volume(&pts, &apex);
        assert!((up - 1.0 / 3.0).abs() < 1e-12);
        pts.reverse();
        assert!((fan_signed_volume(&pts, &apex) + up).abs() < 1e-12);
        // Apex in the loop's plane: flat cone.
        assert!(fan_signed_volume(&pts, &Point3::new(5.0, 5.0, 1.0)).abs() < 1e-12);
    }
}
