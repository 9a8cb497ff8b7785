//! Phyllotaxis (sunflower) spiral.
//!
//! Point `i` sits at angle `i * divergence` and radius `spacing * sqrt(i)`,
//! which keeps the area per point constant across the disk.

use crate::geometry::Point;
use super::PatternConfig;

/// Divergence angles (degrees) that produce good-looking spirals.
///
/// The golden angle first, then two slight variations and two alternative
/// families.
pub const SUGGESTED_ANGLES: [f64; 5] = [137.5, 137.3, 137.6, 99.5, 77.96];

/// Loosening from a spacing override is damped to this fraction so the
/// spiral doesn't visibly uncurl toward the rim. Tightening is applied in full.
const LOOSEN_DAMPING: f64 = 0.2;

/// Generate a phyllotaxis spiral.
///
/// Stops at the first point whose radius passes `config.radius`. Points
/// inside the exclusion radius are skipped. With a center hole the origin is
/// emitted first and the spiral starts at `i = 1`.
pub fn generate_phyllotaxis(config: &PatternConfig) -> Vec<Point> {
    if config.radius <= 0.0 || config.spacing <= 0.0 {
        return Vec::new();
    }

    let spacing = config.spacing;
    let step = config.divergence_angle.to_radians();
    let exclusion = config.exclusion_radius();

    let mut points = Vec::new();
    if config.center_hole {
        points.push(Point::ORIGIN);
    }

    let first = usize::from(config.center_hole);
    for i in first..config.num_points {
        let angle = i as f64 * step;
        let mut r = spacing * (i as f64).sqrt();

        if config.spacing_fn.is_some() {
            let nominal = Point::polar(r, angle);
            let adjusted = config.spacing_at(nominal.x, nominal.y, spacing);
            let ratio = adjusted / spacing - 1.0;
            let factor = if ratio < 0.0 { 1.0 } else { LOOSEN_DAMPING };
            r *= 1.0 + factor * ratio;
        }

        if r > config.radius {
            break;
        }
        if r < exclusion {
            continue;
        }

        points.push(Point::polar(r, angle));
    }

    points
}
