//! Sketch input: an ordered list of planar entities on the z = 0 plane.
//!
//! The sketcher and its constraint solver live outside the kernel; the kernel
//! only sees the resulting entity list, which round-trips through JSON as
//! `{"entities": [{"type": "Line", "x1": .., ...}, ...]}`.

use serde::{Deserialize, Serialize};

use crate::error::TopologyResult;
use crate::math::Point3;

/// One sketch entity. Arc angles are in degrees, counter-clockwise from +X.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SketchEntity {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Arc {
        cx: f64,
        cy: f64,
        r: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Polygon {
        points: Vec<[f64; 2]>,
    },
}

impl SketchEntity {
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        SketchEntity::Line { x1, y1, x2, y2 }
    }

    pub fn arc(cx: f64, cy: f64, r: f64, start_angle: f64, end_angle: f64) -> Self {
        SketchEntity::Arc {
            cx,
            cy,
            r,
            start_angle,
            end_angle,
        }
    }

    /// End points of an open entity (line or arc), lifted to z = 0.
    ///
    /// Circles and polygons close on themselves and have none.
    pub fn endpoints(&self) -> Option<(Point3, Point3)> {
        match *self {
            SketchEntity::Line { x1, y1, x2, y2 } => {
                Some((Point3::new(x1, y1, 0.0), Point3::new(x2, y2, 0.0)))
            }
            SketchEntity::Arc {
                cx,
                cy,
                r,
                start_angle,
                end_angle,
            } => {
                let at = |deg: f64| {
                    let a = deg.to_radians();
                    Point3::new(cx + r * a.cos(), cy + r * a.sin(), 0.0)
                };
                Some((at(start_angle), at(end_angle)))
            }
            SketchEntity::Circle { .. } | SketchEntity::Polygon { .. } => None,
        }
    }

    /// Every coordinate, radius and angle is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            SketchEntity::Line { x1, y1, x2, y2 } => [x1, y1, x2, y2].iter().all(|v| v.is_finite()),
            SketchEntity::Arc {
                cx,
                cy,
                r,
                start_angle,
                end_angle,
            } => [cx, cy, r, start_angle, end_angle]
                .iter()
                .all(|v| v.is_finite()),
            SketchEntity::Circle { cx, cy, r } => [cx, cy, r].iter().all(|v| v.is_finite()),
            SketchEntity::Polygon { points } => points.iter().flatten().all(|v| v.is_finite()),
        }
    }

    /// Whether the entity is closed on its own.
    pub fn is_self_closed(&self) -> bool {
        self.endpoints().is_none()
    }
}

/// Ordered entity list consumed by the sweep.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sketch {
    pub entities: Vec<SketchEntity>,
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, entity: SketchEntity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn push(&mut self, entity: SketchEntity) {
        self.entities.push(entity);
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Axis-aligned rectangle between two corners, as four lines.
    pub fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            entities: vec![
                SketchEntity::line(x0, y0, x1, y0),
                SketchEntity::line(x1, y0, x1, y1),
                SketchEntity::line(x1, y1, x0, y1),
                SketchEntity::line(x0, y1, x0, y0),
            ],
        }
    }

    /// Closed polyline through `points` (the last point connects to the first).
    pub fn polyline(points: &[[f64; 2]]) -> Self {
        let n = points.len();
        let entities = (0..n)
            .map(|i| {
                let [x1, y1] = points[i];
                let [x2, y2] = points[(i + 1) % n];
                SketchEntity::line(x1, y1, x2, y2)
            })
            .collect();
        Self { entities }
    }

    pub fn polygon(points: &[[f64; 2]]) -> Self {
        Self {
            entities: vec![SketchEntity::Polygon {
                points: points.to_vec(),
            }],
        }
    }

    /// Regular `n`-gon inscribed in a circle of radius `r`, first vertex on +X.
    pub fn regular_polygon(cx: f64, cy: f64, r: f64, n: usize) -> Self {
        let points: Vec<_> = (0..n)
            .map(|i| {
                let a = std::f64::consts::TAU * i as f64 / n as f64;
                [cx + r * a.cos(), cy + r * a.sin()]
            })
            .collect();
        Self::polygon(&points)
    }

    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Self {
            entities: vec![SketchEntity::Circle { cx, cy, r }],
        }
    }

    pub fn from_json(json: &str) -> TopologyResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> TopologyResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_is_four_connected_lines() {
        let s = Sketch::rectangle(0.0, 0.0, 2.0, 1.0);
        assert_eq!(s.entities.len(), 4);
        for i in 0..4 {
            let (_, end) = s.entities[i].endpoints().unwrap();
            let (start, _) = s.entities[(i + 1) % 4].endpoints().unwrap();
            assert_eq!(end, start);
        }
    }

    #[test]
    fn arc_endpoints_use_degrees() {
        let arc = SketchEntity::arc(1.0, 0.0, 2.0, 0.0, 90.0);
        let (a, b) = arc.endpoints().unwrap();
        assert!((a - Point3::new(3.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((b - Point3::new(1.0, 2.0, 0.0)).norm() < 1e-12);
        assert!(!arc.is_self_closed());
        assert!(Sketch::circle(0.0, 0.0, 1.0).entities[0].is_self_closed());
    }

    #[test]
    fn finiteness_covers_every_field() {
        assert!(SketchEntity::arc(0.0, 0.0, 1.0, 0.0, 90.0).is_finite());
        assert!(!SketchEntity::arc(0.0, 0.0, 1.0, f64::NAN, 90.0).is_finite());
        assert!(!SketchEntity::line(0.0, f64::INFINITY, 1.0, 1.0).is_finite());
        assert!(!Sketch::polygon(&[[0.0, 0.0], [1.0, f64::NAN], [0.0, 1.0]]).entities[0].is_finite());
    }

    #[test]
    fn json_uses_tagged_entities() {
        let json = r#"{"entities":[
            {"type":"Circle","cx":1.0,"cy":2.0,"r":3.0},
            {"type":"Arc","cx":0.0,"cy":0.0,"r":1.0,"start_angle":0.0,"end_angle":180.0},
            {"type":"Polygon","points":[[0,0],[1,0],[0,1]]}
        ]}"#;
        let s = Sketch::from_json(json).unwrap();
        assert_eq!(s.entities[0], SketchEntity::Circle { cx: 1.0, cy: 2.0, r: 3.0 });
        assert_eq!(s.entities[1], SketchEntity::arc(0.0, 0.0, 1.0, 0.0, 180.0));
        let back = Sketch::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = Sketch::from_json(r#"{"entities":[{"type":"Spline"}]}"#).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Settings);
    }
}
