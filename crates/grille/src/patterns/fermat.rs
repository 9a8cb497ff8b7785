//! Dense multi-arm Fermat-style spiral.
//!
//! The radius grows linearly with the winding angle, so successive arms sit
//! only a fraction of a spacing apart and the divergence angle braids them
//! into several visible arms. Near the origin a decaying boost spreads the
//! first turns out.
//!
//! Overlaps are only checked against the most recent [`LOOKBACK`] points.
//! Where the spiral loops back near an older arm a close pair can slip
//! through; callers who need a hard guarantee should measure the output.

use std::f64::consts::PI;

use crate::geometry::Point;
use super::PatternConfig;

/// Spiral constant relative to the base spacing.
const ARM_FACTOR: f64 = 0.8;

/// Angle-to-radius divisor (`8π`).
const GROWTH: f64 = 8.0 * PI;

/// Points closer than this fraction of the base spacing to a recent point are dropped.
const MIN_DIST_FACTOR: f64 = 0.8;

/// How many recent points the overlap check looks at.
pub const LOOKBACK: usize = 8;

/// Lower clamp of the spacing-override ratio; also bounds the radius for early exit.
const MIN_RATIO: f64 = 0.6;
const MAX_RATIO: f64 = 3.0;

/// Center boost: `1 + 8·exp(-θ/4π)`, decaying to 1 as the spiral winds out.
#[inline]
fn center_boost(theta: f64) -> f64 {
    1.0 + 8.0 * (-theta / (4.0 * PI)).exp()
}

/// Generate a Fermat spiral.
///
/// Points outside the radius or inside the exclusion are skipped, not used
/// as a stop condition, because the boosted radius isn't monotone in the
/// step index. At most `config.num_points` points are emitted.
pub fn generate_fermat(config: &PatternConfig) -> Vec<Point> {
    let spacing = config.spacing;
    let step = config.divergence_angle.to_radians();
    if config.radius <= 0.0 || spacing <= 0.0 || step <= 0.0 {
        return Vec::new();
    }

    let c = spacing * ARM_FACTOR;
    let exclusion = config.exclusion_radius();
    let reject_sq = (spacing * MIN_DIST_FACTOR).powi(2);
    let steps = (config.radius * GROWTH / (c * 0.2)).ceil() as usize;

    let mut points = Vec::new();
    if config.center_hole {
        points.push(Point::ORIGIN);
    }

    let first = usize::from(config.center_hole);
    for i in first..steps {
        if points.len() >= config.num_points {
            break;
        }

        let theta = i as f64 * step;
        let base_r = c * theta / GROWTH;
        if base_r * MIN_RATIO > config.radius {
            break;
        }

        let mut r = base_r * center_boost(theta);
        if config.spacing_fn.is_some() {
            let nominal = Point::polar(r, theta);
            let adjusted = config.spacing_at(nominal.x, nominal.y, spacing);
            r *= (adjusted / spacing).clamp(MIN_RATIO, MAX_RATIO);
        }

        if r > config.radius || r < exclusion {
            continue;
        }

        let candidate = Point::polar(r, theta);
        let recent = &points[points.len().saturating_sub(LOOKBACK)..];
        if recent.iter().any(|p| p.distance_sq(candidate) < reject_sq) {
            continue;
        }

        points.push(candidate);
    }

    log::trace!("fermat: {} points from {} steps", points.len(), steps);
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PatternConfig<'static> {
        PatternConfig::new(100.0, 2.0, 1.0).with_spacing(6.0)
    }

    #[test]
    fn stays_inside_radius() {
        let points = generate_fermat(&config());
        assert!(!points.is_empty());
        assert!(points.iter().all(|p| p.is_within(100.0 + 1e-9)));
    }

    #[test]
    fn respects_point_cap() {
        let points = generate_fermat(&config().with_num_points(25));
        assert_eq!(points.len(), 25);
    }

    #[test]
    fn recent_window_has_no_close_pairs() {
        let points = generate_fermat(&config());
        let min = 6.0 * MIN_DIST_FACTOR;
        for (i, p) in points.iter().enumerate() {
            for q in &points[i.saturating_sub(LOOKBACK)..i] {
                assert!(p.distance(*q) >= min - 1e-9);
            }
        }
    }

    #[test]
    fn exclusion_and_center_hole() {
        let points = generate_fermat(&config().with_inner_radius(20.0).with_center_hole(true));
        assert_eq!(points[0], Point::ORIGIN);
        assert!(points[1..].iter().all(|p| p.norm() >= 20.0));
    }

    /// Every step's unadjusted position for `config`.
    fn nominal_positions(config: &PatternConfig) -> Vec<Point> {
        let c = config.spacing * ARM_FACTOR;
        let step = config.divergence_angle.to_radians();
        let steps = (config.radius * GROWTH / (c * 0.2)).ceil() as usize;
        (0..steps)
            .map(|i| {
                let theta = i as f64 * step;
                Point::polar(c * theta / GROWTH * center_boost(theta), theta)
            })
            .collect()
    }

    #[test]
    fn spacing_override_ratio_is_clamped() {
        let nominal = nominal_positions(&config());
        for (factor, ratio) in [(10.0, MAX_RATIO), (0.1, MIN_RATIO)] {
            let scale = move |_x: f64, _y: f64, base: f64| base * factor;
            let config = PatternConfig::new(100.0, 2.0, 1.0)
                .with_spacing(6.0)
                .with_num_points(40)
                .with_spacing_fn(&scale);
            let points = generate_fermat(&config);
            assert!(points.len() > 1);
            for p in &points {
                let unscaled = Point::new(p.x / ratio, p.y / ratio);
                assert!(
                    nominal.iter().any(|q| q.distance(unscaled) < 1e-9),
                    "{:?} is not a nominal point scaled by {}",
                    p,
                    ratio
                );
            }
        }
    }

    #[test]
    fn center_boost_decays_to_one() {
        assert_eq!(center_boost(0.0), 9.0);
        assert!((center_boost(400.0 * PI) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn deterministic() {
        assert_eq!(generate_fermat(&config()), generate_fermat(&config()));
    }
}
