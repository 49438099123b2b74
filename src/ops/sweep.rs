//! Linear sweep (extrusion) of a closed sketch profile.
//!
//! The profile ring is copied to a lower ring in the sketch plane and an upper
//! ring offset by `direction · distance`. Ring edges, side edges, two planar
//! caps and one planar quad per profile segment are assembled into a body,
//! which is validated before it is returned. Any failure leaves nothing behind.
//!
//! With a draft angle the upper ring is inset in the sketch plane by
//! `distance · tan(draft)`, so the side walls taper; a negative draft flares.

use std::f64::consts::FRAC_PI_2;

use tracing::{debug, info};

use crate::curve::LineCurve;
use crate::error::{TopologyError, TopologyResult};
use crate::math::{perpendicular_frame, Point3, Vector3, ANGLE_TOLERANCE};
use crate::profile::Profile;
use crate::settings::SweepSettings;
use crate::sketch::Sketch;
use crate::surface::PlaneSurface;
use crate::topo::{BRepBody, EdgeId, EdgeLoop, LoopEdge, VertexId};

/// Extrusion of a sketch along a unit direction.
#[derive(Clone, Debug)]
pub struct LinearSweepFeature {
    sketch: Option<Sketch>,
    distance: f64,
    direction: Vector3,
    draft: f64,
    settings: SweepSettings,
}

impl LinearSweepFeature {
    /// `direction` must already be a unit vector.
    pub fn new(sketch: Sketch, distance: f64, direction: Vector3) -> Self {
        Self {
            sketch: Some(sketch),
            distance,
            direction,
            draft: 0.0,
            settings: SweepSettings::default(),
        }
    }

    pub fn builder() -> LinearSweepBuilder {
        LinearSweepBuilder::default()
    }

    pub fn sketch(&self) -> Option<&Sketch> {
        self.sketch.as_ref()
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Draft angle in radians.
    pub fn draft(&self) -> f64 {
        self.draft
    }

    pub fn settings(&self) -> &SweepSettings {
        &self.settings
    }

    fn has_draft(&self) -> bool {
        self.draft.abs() >= ANGLE_TOLERANCE
    }

    /// Build and validate the swept body.
    pub fn generate(&self) -> TopologyResult<BRepBody> {
        let sketch = self.validate()?;

        let mut profile = Profile::from_sketch(sketch, &self.settings)?;
        profile.orient_along(&self.direction);

        // Sketch-plane normal on the side the sweep moves towards.
        let up = Vector3::z() * self.direction.z.signum();
        let lower: Vec<Point3> = profile.points().to_vec();
        let upper = self.upper_ring(&lower, &up)?;
        debug!(ring = lower.len(), draft = self.draft, "rings built");

        let body = assemble(&lower, &upper, &up, self.settings.point_tolerance)?;
        body.validate_topology()?;
        info!(
            vertices = body.vertices().len(),
            edges = body.edges().len(),
            faces = body.faces().len(),
            volume = body.volume(),
            "linear sweep generated"
        );
        Ok(body)
    }

    /// Reject bad input before any geometry is built.
    fn validate(&self) -> TopologyResult<&Sketch> {
        self.settings.validate()?;
        let sketch = self
            .sketch
            .as_ref()
            .ok_or_else(|| TopologyError::invalid("no sketch to sweep"))?;
        if !(self.distance > 0.0 && self.distance.is_finite()) {
            return Err(TopologyError::invalid(format!(
                "sweep distance must be positive, got {}",
                self.distance
            )));
        }
        let len = self.direction.norm();
        if !len.is_finite() || (len - 1.0).abs() > self.settings.direction_tolerance {
            return Err(TopologyError::invalid(format!(
                "sweep direction must be a unit vector, got length {len}"
            )));
        }
        if self.direction.z.abs() <= self.settings.direction_tolerance {
            return Err(TopologyError::invalid(
                "sweep direction lies in the sketch plane",
            ));
        }
        if !self.draft.is_finite() || self.draft.abs() >= FRAC_PI_2 {
            return Err(TopologyError::invalid(format!(
                "draft angle must be within (-90°, 90°), got {}°",
                self.draft.to_degrees()
            )));
        }
        Ok(sketch)
    }

    /// Lower ring moved by the sweep offset, inset by the draft.
    fn upper_ring(&self, lower: &[Point3], up: &Vector3) -> TopologyResult<Vec<Point3>> {
        let offset = self.direction * self.distance;
        if !self.has_draft() {
            return Ok(lower.iter().map(|p| p + offset).collect());
        }

        let inset = self.distance * self.draft.tan();
        let n = lower.len();
        // Inward in-plane normal of the edge i -> i+1 (interior is on the left).
        let inward = |i: usize| {
            let t = lower[(i + 1) % n] - lower[i];
            up.cross(&t).normalize()
        };
        let mut upper = Vec::with_capacity(n);
        for i in 0..n {
            let n1 = inward((i + n - 1) % n);
            let n2 = inward(i);
            let denom = 1.0 + n1.dot(&n2);
            if denom < ANGLE_TOLERANCE {
                return Err(TopologyError::invalid(format!(
                    "profile folds back on itself at ({}, {})",
                    lower[i].x, lower[i].y
                )));
            }
            // Mitre vector: moves both adjacent edges by exactly one unit.
            let mitre = (n1 + n2) / denom;
            upper.push(lower[i] + offset + mitre * inset);
        }

        for i in 0..n {
            let j = (i + 1) % n;
            let before = lower[j] - lower[i];
            let after = upper[j] - upper[i];
            if after.norm() <= self.settings.point_tolerance || after.dot(&before) <= 0.0 {
                return Err(TopologyError::invalid(format!(
                    "draft of {}° collapses the profile edge starting at ({}, {})",
                    self.draft.to_degrees(),
                    lower[i].x,
                    lower[i].y
                )));
            }
        }

        if let Some((i, j)) = ring_crossing(&upper, up, self.settings.point_tolerance) {
            return Err(TopologyError::invalid(format!(
                "draft of {}° makes top profile edges {i} and {j} intersect",
                self.draft.to_degrees()
            )));
        }
        Ok(upper)
    }
}

/// First pair of non-adjacent ring edges that touch, seen along `up`.
fn ring_crossing(ring: &[Point3], up: &Vector3, tolerance: f64) -> Option<(usize, usize)> {
    let (e1, e2) = perpendicular_frame(up);
    let flat: Vec<[f64; 2]> = ring
        .iter()
        .map(|p| [p.coords.dot(&e1), p.coords.dot(&e2)])
        .collect();
    let n = flat.len();
    let seg = |i: usize| (flat[i], flat[(i + 1) % n]);
    for i in 0..n {
        for j in i + 2..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (a, b) = seg(i);
            let (c, d) = seg(j);
            if segments_touch(a, b, c, d, tolerance) {
                return Some((i, j));
            }
        }
    }
    None
}

fn orient(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// `p` lies within the bounding box of `a`–`b` (used once collinear).
fn within(a: [f64; 2], b: [f64; 2], p: [f64; 2], tolerance: f64) -> bool {
    p[0] >= a[0].min(b[0]) - tolerance
        && p[0] <= a[0].max(b[0]) + tolerance
        && p[1] >= a[1].min(b[1]) - tolerance
        && p[1] <= a[1].max(b[1]) + tolerance
}

fn segments_touch(a: [f64; 2], b: [f64; 2], c: [f64; 2], d: [f64; 2], tolerance: f64) -> bool {
    let side = |x: f64, len: f64| {
        if x.abs() <= tolerance * len {
            0
        } else {
            x.signum() as i8
        }
    };
    let ab = ((b[0] - a[0]).powi(2) + (b[1] - a[1]).powi(2)).sqrt();
    let cd = ((d[0] - c[0]).powi(2) + (d[1] - c[1]).powi(2)).sqrt();
    let o1 = side(orient(a, b, c), ab);
    let o2 = side(orient(a, b, d), ab);
    let o3 = side(orient(c, d, a), cd);
    let o4 = side(orient(c, d, b), cd);

    if o1 * o2 < 0 && o3 * o4 < 0 {
        return true;
    }
    (o1 == 0 && within(a, b, c, tolerance))
        || (o2 == 0 && within(a, b, d, tolerance))
        || (o3 == 0 && within(c, d, a, tolerance))
        || (o4 == 0 && within(c, d, b, tolerance))
}

/// Assemble vertices, edges and faces of a sweep between two rings.
///
/// Both rings turn counter-clockwise about `up`. Side face `i` uses
/// lower edge `i` forward, side edge `i + 1` forward, upper edge `i` reversed
/// and side edge `i` reversed, so every edge is used once in each direction.
fn assemble(
    lower: &[Point3],
    upper: &[Point3],
    up: &Vector3,
    tolerance: f64,
) -> TopologyResult<BRepBody> {
    let n = lower.len();
    let mut body = BRepBody::with_tolerance(tolerance);

    let lower_v: Vec<VertexId> = lower.iter().map(|&p| body.add_vertex(p)).collect();
    let upper_v: Vec<VertexId> = upper.iter().map(|&p| body.add_vertex(p)).collect();

    let ring_edges = |body: &mut BRepBody, points: &[Point3], ids: &[VertexId]| {
        (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                body.add_edge(LineCurve::new(points[i], points[j]), ids[i], ids[j])
            })
            .collect::<TopologyResult<Vec<EdgeId>>>()
    };
    let lower_e = ring_edges(&mut body, lower, &lower_v)?;
    let upper_e = ring_edges(&mut body, upper, &upper_v)?;
    let side_e = (0..n)
        .map(|i| body.add_edge(LineCurve::new(lower[i], upper[i]), lower_v[i], upper_v[i]))
        .collect::<TopologyResult<Vec<EdgeId>>>()?;
    debug!(
        vertices = body.vertices().len(),
        edges = body.edges().len(),
        "ring and side edges built"
    );

    // Caps: the lower loop runs the ring backwards so it faces away from `up`.
    let bottom = EdgeLoop::new(lower_e.iter().rev().map(|&e| LoopEdge::reversed(e)).collect());
    body.add_face(PlaneSurface::new(lower[0], -up), bottom)?;
    let top = EdgeLoop::new(upper_e.iter().map(|&e| LoopEdge::forward(e)).collect());
    body.add_face(PlaneSurface::new(upper[0], *up), top)?;

    for i in 0..n {
        let j = (i + 1) % n;
        let surface = PlaneSurface::from_points(lower[i], lower[j], upper[i])?;
        let side = EdgeLoop::new(vec![
            LoopEdge::forward(lower_e[i]),
            LoopEdge::forward(side_e[j]),
            LoopEdge::reversed(upper_e[i]),
            LoopEdge::reversed(side_e[i]),
        ]);
        body.add_face(surface, side)?;
    }
    debug!(faces = body.faces().len(), "faces built");
    Ok(body)
}

/// Fluent construction of a [`LinearSweepFeature`].
#[derive(Clone, Debug)]
pub struct LinearSweepBuilder {
    sketch: Option<Sketch>,
    distance: f64,
    direction: Vector3,
    draft: f64,
    settings: SweepSettings,
}

impl Default for LinearSweepBuilder {
    fn default() -> Self {
        Self {
            sketch: None,
            distance: 0.0,
            direction: Vector3::z(),
            draft: 0.0,
            settings: SweepSettings::default(),
        }
    }
}

impl LinearSweepBuilder {
    pub fn sketch(mut self, sketch: Sketch) -> Self {
        self.sketch = Some(sketch);
        self
    }

    pub fn distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Sweep direction; normalized here. A zero vector is kept and rejected
    /// by `generate`.
    pub fn direction(mut self, direction: Vector3) -> Self {
        self.direction = direction.try_normalize(0.0).unwrap_or(direction);
        self
    }

    /// Draft angle in radians.
    pub fn draft(mut self, draft: f64) -> Self {
        self.draft = draft;
        self
    }

    pub fn settings(mut self, settings: SweepSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> LinearSweepFeature {
        LinearSweepFeature {
            sketch: self.sketch,
            distance: self.distance,
            direction: self.direction,
            draft: self.draft,
            settings: self.settings,
        }
    }
}
