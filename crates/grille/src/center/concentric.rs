//! Concentric ring fill.
//!
//! Pure generate-and-filter: rings are laid out from the inside, and any
//! ring point too close to an obstacle or an already accepted point is
//! dropped. Nothing is moved.

use crate::geometry::Point;
use crate::patterns::{points_on_ring, ring};
use crate::spacing::concentric_ring_spacing;

use super::CenterFillConfig;

pub(crate) const COLLAPSE: f64 = -0.95;

/// Radius of the first ring.
///
/// With a center hole the first ring sits one base spacing out so the origin
/// keeps its clearance; otherwise it starts at `hole_radius + 2 * min_distance`.
fn first_ring(config: &CenterFillConfig) -> f64 {
    if config.center_hole {
        config.base_spacing()
    } else {
        config.hole_radius + 2.0 * config.min_distance
    }
}

/// Generate a concentric ring fill.
///
/// Ring-to-ring gap comes from the power-law density warp. Points along a
/// ring are never closer than the base spacing.
pub fn generate_concentric_fill(config: &CenterFillConfig) -> Vec<Point> {
    if let Some(points) = config.short_circuit(COLLAPSE) {
        return points;
    }

    let base = config.base_spacing();
    let gap = concentric_ring_spacing(base, config.density_factor);
    if gap <= 0.0 {
        return config.minimal();
    }
    let along = gap.max(base);

    let mut points: Vec<Point> = Vec::new();
    if config.center_hole && !Point::ORIGIN.conflicts_with(config.obstacles, base) {
        points.push(Point::ORIGIN);
    }

    let mut r = first_ring(config);
    let mut rings = 0;
    while r <= config.center_radius {
        for p in ring(r, points_on_ring(r, along)) {
            if !p.conflicts_with(config.obstacles, base) && !p.conflicts_with(&points, base) {
                points.push(p);
            }
        }
        r += gap;
        rings += 1;
    }

    log::debug!("concentric fill: {} rings, gap {:.3}, {} points", rings, gap, points.len());
    points
}
