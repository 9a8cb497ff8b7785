//! Hex packing fill.

use crate::geometry::Point;
use crate::spacing::hex_spacing_multiple;

use super::relax::hex_lattice;
use super::CenterFillConfig;

pub(crate) const COLLAPSE: f64 = -0.95;

/// Lattice is clipped slightly inside the disk.
const SAFE_RADIUS: f64 = 0.98;

/// Generate a hex packing fill.
///
/// Lattice spacing is `base * hex_spacing_multiple(density)`, so the lattice
/// never packs tighter than the base spacing. Lattice points too close to an
/// accepted point or an obstacle are dropped. The center hole, if any, is
/// only added when no obstacle crowds the origin.
pub fn generate_hex_fill(config: &CenterFillConfig) -> Vec<Point> {
    if let Some(points) = config.short_circuit(COLLAPSE) {
        return points;
    }

    let base = config.base_spacing();
    let spacing = base * hex_spacing_multiple(config.density_factor);

    let mut points: Vec<Point> = Vec::new();
    if config.center_hole && !Point::ORIGIN.conflicts_with(config.obstacles, base) {
        points.push(Point::ORIGIN);
    }

    for p in hex_lattice(config.center_radius * SAFE_RADIUS, spacing) {
        if p == Point::ORIGIN {
            continue;
        }
        if config.center_hole && p.norm() < base {
            continue;
        }
        if p.conflicts_with(&points, base) || p.conflicts_with(config.obstacles, base) {
            continue;
        }
        points.push(p);
    }

    points
}
