//! Spatial hash for tolerance-based point deduplication.
//!
//! Points are bucketed by their coordinates quantized to the tolerance. Two
//! points within tolerance of each other always land in the same or adjacent
//! cells, so a lookup only needs to inspect the 27 cells around the query.

use std::collections::HashMap;

use super::Point3;

type Cell = (i64, i64, i64);

/// Deduplicating store of points; indices are stable insertion order.
#[derive(Clone, Debug)]
pub struct PointGrid {
    tolerance: f64,
    points: Vec<Point3>,
    cells: HashMap<Cell, Vec<usize>>,
}

impl PointGrid {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            points: Vec::new(),
            cells: HashMap::new(),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Quantized cell of `p`. Coordinates beyond the `i64` range saturate, so
    /// far-away points share edge cells; lookups still compare exact distances.
    fn cell_of(&self, p: &Point3) -> Cell {
        (
            (p.x / self.tolerance).floor() as i64,
            (p.y / self.tolerance).floor() as i64,
            (p.z / self.tolerance).floor() as i64,
        )
    }

    /// Index of a stored point within tolerance of `p`.
    pub fn find(&self, p: &Point3) -> Option<usize> {
        let (cx, cy, cz) = self.cell_of(p);
        let mut best: Option<(usize, f64)> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let cell = (
                        cx.saturating_add(dx),
                        cy.saturating_add(dy),
                        cz.saturating_add(dz),
                    );
                    let Some(bucket) = self.cells.get(&cell) else {
                        continue;
                    };
                    for &idx in bucket {
                        let d = nalgebra::distance(&self.points[idx], p);
                        if d < self.tolerance && best.map_or(true, |(_, bd)| d < bd) {
                            best = Some((idx, d));
                        }
                    }
                }
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Insert `p` unless an equivalent point exists.
    ///
    /// Returns the point's index and whether it was newly inserted.
    pub fn insert(&mut self, p: Point3) -> (usize, bool) {
        if let Some(idx) = self.find(&p) {
            return (idx, false);
        }
        let idx = self.points.len();
        let cell = self.cell_of(&p);
        self.points.push(p);
        self.cells.entry(cell).or_default().push(idx);
        (idx, true)
    }
}
