//! Uniform spatial hash over a square centered on the origin.
//!
//! Poisson-disc sampling needs "is anything within d of here?" thousands of
//! times. Bucketing point indices by cell turns that into a scan of a few
//! neighbouring cells.
//!
//! The grid never grows past [`MAX_GRID_CELLS`] per side. When the requested
//! cell size would need more, cells are widened instead. Each cell keeps every
//! index that lands in it, so a widened cell can hold several points and a
//! lookup never misses one.

use crate::geometry::Point;

/// Upper bound on cells per side.
pub const MAX_GRID_CELLS: usize = 100;

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    half_extent: f64,
    cell_size: f64,
    size: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    /// Grid covering `[-half_extent, half_extent]²` with cells of at most
    /// `cell_size` (wider if the cap kicks in).
    pub fn new(half_extent: f64, cell_size: f64) -> Self {
        let half_extent = half_extent.max(f64::MIN_POSITIVE);
        let wanted = if cell_size > 0.0 {
            ((half_extent * 2.0) / cell_size).ceil()
        } else {
            f64::INFINITY
        };
        let size = if wanted.is_finite() {
            (wanted as usize).clamp(1, MAX_GRID_CELLS)
        } else {
            MAX_GRID_CELLS
        };
        let cell_size = (half_extent * 2.0) / size as f64;

        Self {
            half_extent,
            cell_size,
            size,
            cells: vec![Vec::new(); size * size],
        }
    }

    /// Cells per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Effective cell edge length.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cell coordinates of `p`, clamped onto the grid.
    pub fn cell_of(&self, p: Point) -> (usize, usize) {
        let to_cell = |v: f64| {
            let c = ((v + self.half_extent) / self.cell_size).floor();
            if c.is_nan() || c < 0.0 {
                0
            } else {
                (c as usize).min(self.size - 1)
            }
        };
        (to_cell(p.x), to_cell(p.y))
    }

    pub fn insert(&mut self, index: usize, p: Point) {
        let (cx, cy) = self.cell_of(p);
        self.cells[cy * self.size + cx].push(index);
    }

    /// Indices stored within `reach` cells of the cell containing `p`.
    pub fn nearby(&self, p: Point, reach: usize) -> impl Iterator<Item = usize> + '_ {
        let (cx, cy) = self.cell_of(p);
        let x0 = cx.saturating_sub(reach);
        let y0 = cy.saturating_sub(reach);
        let x1 = (cx + reach).min(self.size - 1);
        let y1 = (cy + reach).min(self.size - 1);

        (y0..=y1).flat_map(move |y| {
            (x0..=x1).flat_map(move |x| self.cells[y * self.size + x].iter().copied())
        })
    }

    /// Number of cells to scan so every point within `distance` is visited.
    pub fn reach_for(&self, distance: f64) -> usize {
        ((distance / self.cell_size).ceil() as usize).max(1)
    }

    /// True if a point in `points` indexed by this grid is closer than `min_dist` to `p`.
    pub fn has_conflict(&self, p: Point, points: &[Point], min_dist: f64) -> bool {
        let min_sq = min_dist * min_dist;
        self.nearby(p, self.reach_for(min_dist))
            .any(|i| points[i].distance_sq(p) < min_sq)
    }
}
