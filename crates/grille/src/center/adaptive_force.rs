//! Adaptive force fill.
//!
//! Starts from an existing layout (`seed_points`, typically the outer pattern
//! continued into the disk) rather than from scratch, so the center keeps the
//! look of the surrounding pattern. The density factor scales the count
//! linearly; relaxation then nudges points apart, strongest at the center and
//! fading to nothing at the rim so the seam with the outer pattern is left alone.

use crate::geometry::Point;
use crate::rng::Rng;
use crate::spacing::linear_target;

use super::relax::{decluster, grow_to, hex_lattice, Boundary, Relaxation, LATTICE_SLACK};
use super::CenterFillConfig;

pub(crate) const COLLAPSE: f64 = -0.9;

/// Generate an adaptive force fill.
///
/// Seeds outside the disk are ignored. With no usable seeds a hex lattice is
/// used instead. A `force_strength` of zero (or less) skips relaxation and
/// returns the count-corrected seeds as they are.
pub fn generate_adaptive_force(config: &CenterFillConfig) -> Vec<Point> {
    if let Some(points) = config.short_circuit(COLLAPSE) {
        return points;
    }

    let r = config.center_radius;
    let base = config.base_spacing();
    let mut rng = Rng::new(config.seed);

    let mut points: Vec<Point> = config
        .seed_points
        .iter()
        .copied()
        .filter(|p| p.is_within(r))
        .collect();
    if points.is_empty() {
        points = hex_lattice(r, base * LATTICE_SLACK);
    }

    if config.center_hole {
        points.retain(|p| p.norm() >= base);
        points.insert(0, Point::ORIGIN);
    }
    let pinned = usize::from(config.center_hole);

    let seeded = points.len();
    let target = linear_target(seeded, config.density_factor);
    if target < seeded {
        decluster(&mut points, target, 2.0 * base, pinned);
    } else if target > seeded {
        let min_r = if config.center_hole { base } else { 0.0 };
        grow_to(&mut points, target, config.obstacles, &mut rng, min_r, r, base, 1);
    }
    log::debug!("adaptiveForce: {} seeds, target {}, now {}", seeded, target, points.len());

    if config.force_strength <= 0.0 {
        return points;
    }

    let relaxation = Relaxation {
        base,
        radius: r,
        exponent: 2,
        damping: 0.1,
        decay: 0.95,
        tolerance: 0.001,
        max_iterations: config.max_iterations,
        pinned,
        strict: false,
        boundary: Boundary::Reject,
        falloff: Some(config.force_strength),
        clear_origin: config.center_hole,
    };
    let outcome = relaxation.run(&mut points, config.obstacles);
    log::debug!(
        "adaptiveForce: {} iterations, converged: {}",
        outcome.iterations,
        outcome.converged
    );

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::min_pair_distance;

    fn seeds() -> Vec<Point> {
        // Sunflower continued into the disk
        (0..200)
            .map(|i| Point::polar(5.0 * (i as f64).sqrt(), i as f64 * 137.5f64.to_radians()))
            .collect()
    }

    #[test]
    fn seeds_outside_disk_are_dropped() {
        let seeds = seeds();
        let config = CenterFillConfig::new(30.0, 2.0, 1.0)
            .with_seed_points(&seeds)
            .with_force_strength(0.0);
        let points = generate_adaptive_force(&config);
        let inside = seeds.iter().filter(|p| p.is_within(30.0)).count();
        assert_eq!(points.len(), inside);
    }

    #[test]
    fn density_scales_count_linearly() {
        let seeds = seeds();
        let config = CenterFillConfig::new(30.0, 2.0, 1.0)
            .with_seed_points(&seeds)
            .with_force_strength(0.0);
        let full = generate_adaptive_force(&config).len();
        let half = generate_adaptive_force(&config.with_density_factor(-0.5)).len();
        assert_eq!(half, linear_target(full, -0.5));
    }

    #[test]
    fn relaxation_moves_points_but_keeps_them_inside() {
        let seeds = seeds();
        let config = CenterFillConfig::new(30.0, 2.0, 1.0).with_seed_points(&seeds);
        let relaxed = generate_adaptive_force(&config);
        let raw = generate_adaptive_force(&config.with_force_strength(0.0));
        assert_eq!(relaxed.len(), raw.len());
        assert_ne!(relaxed, raw);
        assert!(relaxed.iter().all(|p| p.is_within(30.0)));
        assert!(min_pair_distance(&relaxed).unwrap() > 0.0);
    }

    #[test]
    fn center_hole_replaces_nearby_seeds() {
        let seeds = seeds();
        let config = CenterFillConfig::new(30.0, 2.0, 1.0)
            .with_seed_points(&seeds)
            .with_center_hole(true);
        let points = generate_adaptive_force(&config);
        assert_eq!(points[0], Point::ORIGIN);
        assert!(points[1..].iter().all(|p| p.norm() >= 5.0 - 1e-9));
    }

    #[test]
    fn empty_seeds_fall_back_to_lattice() {
        let config = CenterFillConfig::new(20.0, 2.0, 1.0);
        assert!(!generate_adaptive_force(&config).is_empty());
    }
}
