//! Turning a sketch into the closed ring that gets swept.
//!
//! The sketch is checked for closedness, every entity is discretized into
//! straight segments, the segment end points are merged on a tolerance grid,
//! and the segments are chained into a single ordered loop.

use std::f64::consts::TAU;

use tracing::debug;

use crate::error::{TopologyError, TopologyResult};
use crate::math::{Point3, PointGrid, Vector3};
use crate::settings::SweepSettings;
use crate::sketch::{Sketch, SketchEntity};

/// A closed planar polyline at z = 0, without a repeated closing point.
#[derive(Clone, Debug)]
pub struct Profile {
    points: Vec<Point3>,
}

impl Profile {
    /// Check, discretize and chain `sketch` into one closed ring.
    pub fn from_sketch(sketch: &Sketch, settings: &SweepSettings) -> TopologyResult<Self> {
        if let Some(i) = sketch.entities.iter().position(|e| !e.is_finite()) {
            return Err(TopologyError::invalid(format!(
                "sketch entity {i} has a non-finite coordinate"
            )));
        }
        check_closed(sketch, settings.point_tolerance)?;

        let mut segments = Vec::new();
        for entity in &sketch.entities {
            discretize(entity, settings, &mut segments)?;
        }
        let points = chain(&segments, settings.point_tolerance)?;
        debug!(
            entities = sketch.entities.len(),
            segments = segments.len(),
            points = points.len(),
            "profile chained"
        );
        Ok(Self { points })
    }

    /// Ring through `points`, in the given order.
    pub fn from_points(points: Vec<Point3>) -> TopologyResult<Self> {
        if points.len() < 3 {
            return Err(TopologyError::invalid(format!(
                "a profile needs at least 3 points, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Newell area vector. Its length is the enclosed area of a planar ring and
    /// it points along the side from which the ring turns counter-clockwise.
    pub fn area_vector(&self) -> Vector3 {
        let n = self.points.len();
        (0..n)
            .map(|i| {
                let a = self.points[i].coords;
                let b = self.points[(i + 1) % n].coords;
                a.cross(&b)
            })
            .sum::<Vector3>()
            / 2.0
    }

    pub fn area(&self) -> f64 {
        self.area_vector().norm()
    }

    /// Reverse the ring unless it already turns counter-clockwise about `axis`.
    pub fn orient_along(&mut self, axis: &Vector3) {
        if self.area_vector().dot(axis) < 0.0 {
            self.points.reverse();
        }
    }
}

/// Fail with `OpenProfile` unless every line/arc end point is shared by
/// exactly two line/arc entities. Circles and polygons are closed on their own.
pub fn check_closed(sketch: &Sketch, tolerance: f64) -> TopologyResult<()> {
    if sketch.is_empty() {
        return Err(TopologyError::invalid("sketch has no entities"));
    }
    let mut grid = PointGrid::new(tolerance);
    let mut counts: Vec<usize> = Vec::new();
    for (a, b) in sketch.entities.iter().filter_map(SketchEntity::endpoints) {
        for p in [a, b] {
            let (idx, inserted) = grid.insert(p);
            if inserted {
                counts.push(0);
            }
            counts[idx] += 1;
        }
    }
    if let Some(idx) = counts.iter().position(|&c| c != 2) {
        let (p, count) = (grid.points()[idx], counts[idx]);
        return Err(TopologyError::OpenProfile(format!(
            "end point ({}, {}) is shared by {count} segments (expected 2)",
            p.x, p.y
        )));
    }
    Ok(())
}

/// Append the straight segments approximating `entity`.
fn discretize(
    entity: &SketchEntity,
    settings: &SweepSettings,
    out: &mut Vec<(Point3, Point3)>,
) -> TopologyResult<()> {
    match entity {
        SketchEntity::Line { .. } => {
            if let Some(segment) = entity.endpoints() {
                out.push(segment);
            }
        }
        &SketchEntity::Arc {
            cx,
            cy,
            r,
            start_angle,
            end_angle,
        } => {
            check_radius(r)?;
            let start = start_angle.to_radians();
            let mut sweep = (end_angle - start_angle).to_radians();
            if sweep <= 0.0 {
                sweep += TAU;
            }
            let n = settings.arc_segments;
            let at = |i: usize| {
                let a = start + sweep * i as f64 / n as f64;
                Point3::new(cx + r * a.cos(), cy + r * a.sin(), 0.0)
            };
            out.extend((0..n).map(|i| (at(i), at(i + 1))));
        }
        &SketchEntity::Circle { cx, cy, r } => {
            check_radius(r)?;
            let n = settings.circle_segments;
            let at = |i: usize| {
                let a = TAU * (i % n) as f64 / n as f64;
                Point3::new(cx + r * a.cos(), cy + r * a.sin(), 0.0)
            };
            out.extend((0..n).map(|i| (at(i), at(i + 1))));
        }
        SketchEntity::Polygon { points } => {
            if points.len() < 3 {
                return Err(TopologyError::invalid(format!(
                    "polygon needs at least 3 points, got {}",
                    points.len()
                )));
            }
            let n = points.len();
            let at = |i: usize| Point3::new(points[i % n][0], points[i % n][1], 0.0);
            out.extend((0..n).map(|i| (at(i), at(i + 1))));
        }
    }
    Ok(())
}

fn check_radius(r: f64) -> TopologyResult<()> {
    if r > 0.0 && r.is_finite() {
        Ok(())
    } else {
        Err(TopologyError::invalid(format!("radius must be positive, got {r}")))
    }
}

/// Merge segment end points and walk the segments as one closed loop.
fn chain(segments: &[(Point3, Point3)], tolerance: f64) -> TopologyResult<Vec<Point3>> {
    let mut grid = PointGrid::new(tolerance);
    let mut neighbours: Vec<Vec<usize>> = Vec::new();
    for (a, b) in segments {
        let (ia, new_a) = grid.insert(*a);
        if new_a {
            neighbours.push(Vec::new());
        }
        let (ib, new_b) = grid.insert(*b);
        if new_b {
            neighbours.push(Vec::new());
        }
        if ia == ib {
            return Err(TopologyError::invalid(format!(
                "zero-length segment at ({}, {})",
                a.x, a.y
            )));
        }
        neighbours[ia].push(ib);
        neighbours[ib].push(ia);
    }

    if let Some((idx, n)) = neighbours
        .iter()
        .enumerate()
        .find(|(_, n)| n.len() != 2)
    {
        let p = grid.points()[idx];
        return Err(TopologyError::OpenProfile(format!(
            "point ({}, {}) joins {} segments (expected 2)",
            p.x,
            p.y,
            n.len()
        )));
    }
    if grid.len() < 3 {
        return Err(TopologyError::invalid(format!(
            "profile collapses to {} distinct points",
            grid.len()
        )));
    }

    // Every point has degree 2, so walking from point 0 returns to it.
    let mut ring = vec![0];
    let mut prev = 0;
    let mut current = neighbours[0][0];
    while current != 0 {
        ring.push(current);
        let next = if neighbours[current][0] == prev {
            neighbours[current][1]
        } else {
            neighbours[current][0]
        };
        prev = current;
        current = next;
    }
    if ring.len() != grid.len() {
        return Err(TopologyError::invalid(format!(
            "profile splits into several loops ({} of {} points reachable)",
            ring.len(),
            grid.len()
        )));
    }
    Ok(ring.into_iter().map(|i| grid.points()[i]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn settings() -> SweepSettings {
        SweepSettings::default()
    }

    #[test]
    fn rectangle_chains_to_four_points() {
        let p = Profile::from_sketch(&Sketch::rectangle(0.0, 0.0, 2.0, 1.0), &settings()).unwrap();
        assert_eq!(p.len(), 4);
        assert!((p.area() - 2.0).abs() < 1e-12);
        assert!(p.area_vector().z > 0.0);
    }

    #[test]
    fn entity_order_does_not_matter() {
        let mut sketch = Sketch::rectangle(0.0, 0.0, 1.0, 1.0);
        sketch.entities.swap(0, 2);
        // Reverse one line's direction as well.
        if let SketchEntity::Line { x1, y1, x2, y2 } = sketch.entities[1] {
            sketch.entities[1] = SketchEntity::line(x2, y2, x1, y1);
        }
        let p = Profile::from_sketch(&sketch, &settings()).unwrap();
        assert_eq!(p.len(), 4);
        assert!((p.area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn circle_uses_configured_segments() {
        let p = Profile::from_sketch(&Sketch::circle(1.0, 1.0, 3.0), &settings()).unwrap();
        assert_eq!(p.len(), 24);
        let s = SweepSettings {
            circle_segments: 8,
            ..settings()
        };
        assert_eq!(Profile::from_sketch(&Sketch::circle(0.0, 0.0, 3.0), &s).unwrap().len(), 8);
    }

    #[test]
    fn half_disc_from_arc_and_line() {
        let sketch = Sketch::new()
            .with_entity(SketchEntity::arc(0.0, 0.0, 1.0, 0.0, 180.0))
            .with_entity(SketchEntity::line(-1.0, 0.0, 1.0, 0.0));
        let p = Profile::from_sketch(&sketch, &settings()).unwrap();
        // 12 arc segments + 1 line share 13 points.
        assert_eq!(p.len(), 13);
        let expected = 12.0 * 0.5 * (std::f64::consts::PI / 12.0).sin();
        assert!((p.area() - expected).abs() < 1e-12);
    }

    #[test]
    fn open_polyline_is_rejected() {
        let sketch = Sketch::new()
            .with_entity(SketchEntity::line(0.0, 0.0, 1.0, 0.0))
            .with_entity(SketchEntity::line(1.0, 0.0, 1.0, 1.0));
        let err = Profile::from_sketch(&sketch, &settings()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OpenProfile);
    }

    #[test]
    fn branching_profile_is_rejected() {
        let mut sketch = Sketch::rectangle(0.0, 0.0, 1.0, 1.0);
        sketch.push(SketchEntity::line(0.0, 0.0, 1.0, 1.0));
        sketch.push(SketchEntity::line(1.0, 1.0, 0.0, 0.0));
        let err = check_closed(&sketch, 1e-6).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OpenProfile);
    }

    #[test]
    fn disjoint_loops_are_rejected() {
        let mut sketch = Sketch::circle(10.0, 0.0, 1.0);
        sketch.entities.extend(Sketch::rectangle(0.0, 0.0, 1.0, 1.0).entities);
        let err = Profile::from_sketch(&sketch, &settings()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputValidation);
    }

    #[test]
    fn degenerate_input_is_rejected() {
        let err = Profile::from_sketch(&Sketch::new(), &settings()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputValidation);
        let err = Profile::from_sketch(&Sketch::circle(0.0, 0.0, 0.0), &settings()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputValidation);
        let err = Profile::from_sketch(&Sketch::polygon(&[[0.0, 0.0], [1.0, 0.0]]), &settings())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputValidation);
        let zero = Sketch::polygon(&[[0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        let err = Profile::from_sketch(&zero, &settings()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputValidation);
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let sketch = Sketch::rectangle(0.0, 0.0, f64::INFINITY, 1.0);
        let err = Profile::from_sketch(&sketch, &settings()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputValidation);
        let sketch = Sketch::circle(f64::NAN, 0.0, 1.0);
        let err = Profile::from_sketch(&sketch, &settings()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputValidation);
    }

    #[test]
    fn orientation_follows_axis() {
        let mut p = Profile::from_sketch(&Sketch::rectangle(0.0, 0.0, 1.0, 1.0), &settings()).unwrap();
        p.orient_along(&-Vector3::z());
        assert!(p.area_vector().z < 0.0);
        p.orient_along(&Vector3::z());
        assert!(p.area_vector().z > 0.0);
    }
}
