//! Poisson-disc (blue-noise) fill.
//!
//! Classic dart throwing around an active list, with a [`SpatialGrid`] so the
//! "too close to anything?" test only scans a 5×5 block of cells.

use std::f64::consts::SQRT_2;

use crate::geometry::Point;
use crate::grid::SpatialGrid;
use crate::rng::Rng;

use super::CenterFillConfig;

pub(crate) const COLLAPSE: f64 = -0.95;

/// Candidates landing at most this far outside the disk (relative) are
/// pulled onto the boundary instead of being thrown away.
const BOUNDARY_TOLERANCE: f64 = 0.02;

/// Candidate distance jitter above the target spacing.
const DISTANCE_JITTER: f64 = 0.05;

/// Active points that may fail in a row before the fill gives up.
const FAILURE_BUDGET: usize = 1000;

/// Random tries for a starting point.
const SEED_TRIES: usize = 30;

/// Target spacing: `base` at the default density, stretched by `1 - d` when sparser.
pub(crate) fn target_spacing(base: f64, density: f64) -> f64 {
    if density < 0.0 { base * (1.0 - density) } else { base }
}

/// Candidates per active point: more tries (tighter packing) for positive density.
pub(crate) fn attempts_for(attempts: usize, density: f64) -> usize {
    if density > 0.0 {
        (attempts as f64 * (1.0 + density)).round() as usize
    } else {
        attempts
    }
}

/// Generate a Poisson-disc fill.
///
/// With obstacles the first point is picked near the rim (between half and
/// 90% of the radius) so sampling starts where it meets the outer pattern.
/// A center hole is dropped when an obstacle crowds the origin.
pub fn generate_poisson(config: &CenterFillConfig) -> Vec<Point> {
    if let Some(points) = config.short_circuit(COLLAPSE) {
        return points;
    }

    let r = config.center_radius;
    let target = target_spacing(config.base_spacing(), config.density_factor);
    let attempts = attempts_for(config.poisson_attempts, config.density_factor);
    let mut rng = Rng::new(config.seed);

    let mut grid = SpatialGrid::new(r * (1.0 + BOUNDARY_TOLERANCE), target / SQRT_2);
    let mut points: Vec<Point> = Vec::new();
    let mut active: Vec<usize> = Vec::new();

    let fits = |p: Point, points: &[Point], grid: &SpatialGrid| {
        !grid.has_conflict(p, points, target) && !p.conflicts_with(config.obstacles, target)
    };

    let first = if config.center_hole && !Point::ORIGIN.conflicts_with(config.obstacles, target) {
        Some(Point::ORIGIN)
    } else {
        let (lo, hi) = if config.obstacles.is_empty() { (0.0, 0.5) } else { (0.5, 0.9) };
        (0..SEED_TRIES)
            .map(|_| rng.point_in_annulus(r * lo, r * hi))
            .find(|p| !p.conflicts_with(config.obstacles, target))
    };
    let Some(first) = first else {
        log::debug!("poisson: no room for a first point");
        return points;
    };
    grid.insert(0, first);
    points.push(first);
    active.push(0);

    let mut streak = 0;
    while !active.is_empty() && streak < FAILURE_BUDGET {
        let slot = rng.next_index(active.len());
        let origin = points[active[slot]];

        let mut placed = false;
        for _ in 0..attempts {
            let distance = target * (1.0 + DISTANCE_JITTER * rng.next_f64());
            let offset = Point::polar(distance, rng.next_angle());
            let mut candidate = Point::new(origin.x + offset.x, origin.y + offset.y);

            if !candidate.is_within(r) {
                if !candidate.is_within(r * (1.0 + BOUNDARY_TOLERANCE)) {
                    continue;
                }
                candidate = candidate.with_norm(r);
            }

            if fits(candidate, &points, &grid) {
                grid.insert(points.len(), candidate);
                active.push(points.len());
                points.push(candidate);
                placed = true;
                break;
            }
        }

        if placed {
            streak = 0;
        } else {
            active.swap_remove(slot);
            streak += 1;
        }
    }

    log::debug!("poisson: {} points, spacing {:.3}, {} still active", points.len(), target, active.len());
    points
}
