//! Hexagonal lattice clipped to the grille.

use crate::geometry::Point;
use super::PatternConfig;

/// Lattice extent relative to the radius; a margin so the clipped disk is fully covered.
const COVERAGE: f64 = 1.5;

/// Lattice points this close to the origin (as a fraction of a cell) count as the origin.
const ORIGIN_TOLERANCE: f64 = 0.1;

/// Hex cell `(width, height)` for a point spacing.
#[inline]
fn cell(spacing: f64) -> (f64, f64) {
    let width = 2.0 * spacing;
    (width, width * 3f64.sqrt() / 2.0)
}

/// Generate a hex lattice.
///
/// Cell width is twice the effective spacing, re-evaluated near every
/// candidate when a spacing override is set. Odd rows shift by half a cell.
/// Points must fit fully inside the radius (`|p| <= radius - hole_radius`).
///
/// The lattice point at the origin is never emitted as a lattice point; a
/// center hole prepends the literal origin instead.
pub fn generate_hex(config: &PatternConfig) -> Vec<Point> {
    if config.radius <= 0.0 || config.spacing <= 0.0 {
        return Vec::new();
    }

    let (w0, h0) = cell(config.spacing_at(0.0, 0.0, config.spacing));
    if w0 <= 0.0 || !w0.is_finite() {
        return Vec::new();
    }

    let extent = config.radius * COVERAGE;
    let half_rows = ((extent * 2.0 / h0).ceil() as i64) / 2;
    let half_cols = ((extent * 2.0 / w0).ceil() as i64) / 2;

    let exclusion = config.exclusion_radius();
    let outer = config.radius - config.hole_radius;

    let mut points = Vec::new();
    if config.center_hole {
        points.push(Point::ORIGIN);
    }
    if outer < 0.0 {
        return points;
    }

    for row in -half_rows..=half_rows {
        for col in -half_cols..=half_cols {
            let approx = Point::new(col as f64 * w0, row as f64 * h0);
            let (w, h) = cell(config.spacing_at(approx.x, approx.y, config.spacing));

            let offset = if row.rem_euclid(2) == 1 { w / 2.0 } else { 0.0 };
            let p = Point::new(col as f64 * w + offset, row as f64 * h);

            if p.x.abs() < w * ORIGIN_TOLERANCE && p.y.abs() < h * ORIGIN_TOLERANCE {
                continue;
            }
            if !p.is_within_annulus(exclusion, outer) {
                continue;
            }

            points.push(p);
        }
    }

    points
}
