//! Layout measurement.
//!
//! Placement is best-effort, so callers (and tests) check the result instead
//! of trusting it. All of these are brute-force O(n²), which is fine for the
//! few thousand holes a grille has.

use crate::geometry::Point;

/// Smallest distance between any two points, or `None` with fewer than two.
pub fn min_pair_distance(points: &[Point]) -> Option<f64> {
    let mut min_sq: Option<f64> = None;
    for (i, p) in points.iter().enumerate() {
        for q in &points[i + 1..] {
            let d = p.distance_sq(*q);
            min_sq = Some(min_sq.map_or(d, |m| m.min(d)));
        }
    }
    min_sq.map(f64::sqrt)
}

/// Number of pairs closer than `min_dist`.
pub fn count_overlaps(points: &[Point], min_dist: f64) -> usize {
    let min_sq = min_dist * min_dist;
    points
        .iter()
        .enumerate()
        .map(|(i, p)| points[i + 1..].iter().filter(|q| p.distance_sq(**q) < min_sq).count())
        .sum()
}

/// Number of `points` closer than `min_dist` to at least one obstacle.
pub fn count_conflicts(points: &[Point], obstacles: &[Point], min_dist: f64) -> usize {
    points
        .iter()
        .filter(|p| p.conflicts_with(obstacles, min_dist))
        .count()
}

/// Largest distance from the origin (0 for no points).
pub fn max_radius(points: &[Point]) -> f64 {
    points.iter().map(Point::norm).fold(0.0, f64::max)
}

/// Summary of a generated layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutStats {
    pub outer_count: usize,
    pub center_count: usize,
    /// Closest pair over the combined layout
    pub min_distance: Option<f64>,
    /// Pairs within the outer points closer than the required spacing
    pub outer_overlaps: usize,
    /// Pairs within the center points closer than the required spacing
    pub center_overlaps: usize,
    /// Center points too close to an outer point
    pub seam_conflicts: usize,
    pub max_radius: f64,
}

impl LayoutStats {
    /// Measure a layout against the required center-to-center `min_spacing`.
    ///
    /// A tiny tolerance keeps exact-spacing neighbours (rings, lattices) from
    /// counting as overlaps because of rounding.
    pub fn measure(outer: &[Point], center: &[Point], min_spacing: f64) -> Self {
        let limit = min_spacing - 1e-9;
        let combined: Vec<Point> = outer.iter().chain(center).copied().collect();

        Self {
            outer_count: outer.len(),
            center_count: center.len(),
            min_distance: min_pair_distance(&combined),
            outer_overlaps: count_overlaps(outer, limit),
            center_overlaps: count_overlaps(center, limit),
            seam_conflicts: count_conflicts(center, outer, limit),
            max_radius: max_radius(&combined),
        }
    }

    pub fn total(&self) -> usize {
        self.outer_count + self.center_count
    }

    /// Pairs closer than the required spacing, over all three kinds.
    pub fn violations(&self) -> usize {
        self.outer_overlaps + self.center_overlaps + self.seam_conflicts
    }

    /// True when nothing is closer than the required spacing.
    pub fn is_clean(&self) -> bool {
        self.outer_overlaps == 0 && self.center_overlaps == 0 && self.seam_conflicts == 0
    }
}
