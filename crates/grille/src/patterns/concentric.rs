//! Concentric rings of evenly spaced holes.

use std::f64::consts::PI;

use crate::geometry::{min_spacing, Point};
use crate::spacing::spacing_multiplier;
use super::PatternConfig;

/// Ring-to-ring spacing that comfortably clears neighbouring rings:
/// ten percent over one hole diameter plus clearance.
pub fn optimal_ring_spacing(hole_radius: f64, min_clearance: f64) -> f64 {
    min_spacing(hole_radius, min_clearance) * 1.1
}

/// How many points fit on a ring of radius `r` at `spacing`.
///
/// Limited both by arc length and by chord length, so neighbours on small
/// rings don't end up closer than `spacing` in a straight line. Never less
/// than one.
pub(crate) fn points_on_ring(r: f64, spacing: f64) -> usize {
    if r <= 0.0 || spacing <= 0.0 {
        return 1;
    }
    let half_chord = spacing / (2.0 * r);
    if half_chord >= 1.0 {
        return 1;
    }
    // Slack so an exact fit isn't lost to rounding
    let by_arc = (2.0 * PI * r / spacing + 1e-9).floor();
    let by_chord = (PI / half_chord.asin() + 1e-9).floor();
    (by_arc.min(by_chord) as usize).max(1)
}

/// Points evenly spaced by angle around a ring.
pub(crate) fn ring(r: f64, count: usize) -> impl Iterator<Item = Point> {
    let step = 2.0 * PI / count.max(1) as f64;
    (0..count).map(move |i| Point::polar(r, i as f64 * step))
}

/// Generate concentric rings.
///
/// Base spacing is `hole_radius * (3 + spacing_factor)`, stretched by the
/// ring and point multiplier curves. An explicit `concentric_spacing` replaces
/// the ring curve. Neither spacing is allowed below one hole diameter plus
/// clearance.
pub fn generate_concentric(config: &PatternConfig) -> Vec<Point> {
    if config.radius <= 0.0 {
        return Vec::new();
    }

    let floor = config.min_spacing();
    let base = config.hole_radius * (3.0 + config.spacing_factor);
    let ring_nominal = config
        .concentric_spacing
        .unwrap_or(base * spacing_multiplier(config.ring_spacing_factor));
    let point_nominal = base * spacing_multiplier(config.point_spacing_factor);

    let ring_spacing_at = |r: f64| config.spacing_at(r, 0.0, ring_nominal).max(floor);
    let point_spacing_at = |r: f64| config.spacing_at(r, 0.0, point_nominal).max(floor);

    let mut r = config
        .inner_radius
        .max(if config.center_hole { config.hole_radius } else { 0.0 });

    let mut points = Vec::new();
    if config.center_hole {
        points.push(Point::ORIGIN);
        r += ring_spacing_at(r);
    }

    while r <= config.radius {
        let ring_spacing = ring_spacing_at(r);
        let point_spacing = point_spacing_at(r);
        if ring_spacing <= 0.0 || point_spacing <= 0.0 {
            log::debug!("concentric: non-positive spacing at r = {r}, stopping");
            break;
        }

        points.extend(ring(r, points_on_ring(r, point_spacing)));
        r += ring_spacing;
    }

    points
}
