//! Force relaxation fill.
//!
//! Sizes the fill from the density of outer points just outside the disk,
//! seeds a close-packed hex lattice, trims it to size by removing the most
//! crowded points, then relaxes with strict moves: a step that would create a
//! new overlap is refused, so the result never has more overlaps than the
//! seed (which has none).

use crate::geometry::{annulus_area, disk_area, Point};
use crate::rng::Rng;
use crate::spacing::exponential_target;

use super::relax::{decluster, grow_to, hex_lattice, Boundary, Relaxation, LATTICE_SLACK};
use super::CenterFillConfig;

pub(crate) const COLLAPSE: f64 = -0.9;

/// Headroom over the outer density so the seam doesn't look starved.
const TARGET_HEADROOM: f64 = 1.1;

/// Area per point of ideal hex packing, in units of spacing².
const HEX_CELL: f64 = 0.866;

/// Max-min sampling rounds allowed to fail in a row before giving up.
const GROW_PATIENCE: usize = 20;

/// How many points the fill aims for, center hole included.
///
/// Outer density is measured over the ring between the disk and the buffer
/// radius. Without any outer points there, one point per `π·base²` is used.
/// The density factor scales the count exponentially (`×2^d`), capped at what
/// hex packing could hold.
pub(crate) fn target_count(config: &CenterFillConfig) -> usize {
    let r = config.center_radius;
    let base = config.base_spacing();
    let buffer = config.buffer_radius();

    let nearby = config.obstacles.iter().filter(|p| p.is_within(buffer)).count();
    let ring_area = annulus_area(r, buffer);
    let area_per_point = if nearby > 0 && ring_area > 0.0 {
        ring_area / nearby as f64
    } else {
        disk_area(base)
    };

    let reserved = if config.center_hole { disk_area(base) } else { 0.0 };
    let available = (disk_area(r) - reserved).max(0.0);

    let raw = available / area_per_point * TARGET_HEADROOM;
    let capacity = disk_area(r) / (HEX_CELL * base * base);
    let fill = exponential_target(raw, config.density_factor).min(capacity);

    (fill.floor() as usize).max(1) + usize::from(config.center_hole)
}

/// Generate a force relaxation fill.
pub fn generate_force(config: &CenterFillConfig) -> Vec<Point> {
    if let Some(points) = config.short_circuit(COLLAPSE) {
        return points;
    }

    let r = config.center_radius;
    let base = config.base_spacing();
    let target = target_count(config);
    let mut rng = Rng::new(config.seed);

    let mut points: Vec<Point> = hex_lattice(r, base * LATTICE_SLACK)
        .into_iter()
        .filter(|p| !p.conflicts_with(config.obstacles, base))
        .filter(|p| !config.center_hole || p.norm() >= base)
        .collect();
    if config.center_hole {
        points.insert(0, Point::ORIGIN);
    }
    let pinned = usize::from(config.center_hole);

    if points.len() > target {
        decluster(&mut points, target, 2.0 * base, pinned);
    } else if points.len() < target {
        let min_r = if config.center_hole { base } else { 0.0 };
        grow_to(&mut points, target, config.obstacles, &mut rng, min_r, r, base, GROW_PATIENCE);
    }
    log::debug!("force: target {}, seeded {}", target, points.len());

    let relaxation = Relaxation {
        base,
        radius: r,
        exponent: 3,
        damping: 0.05,
        decay: 0.95,
        tolerance: 0.01,
        max_iterations: config.max_iterations,
        pinned,
        strict: true,
        boundary: Boundary::Clamp,
        falloff: None,
        clear_origin: config.center_hole,
    };
    let outcome = relaxation.run(&mut points, config.obstacles);
    log::debug!(
        "force: {} points, {} iterations, converged: {}",
        points.len(),
        outcome.iterations,
        outcome.converged
    );

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{count_conflicts, count_overlaps};

    fn ring(radius: f64, count: usize) -> Vec<Point> {
        (0..count)
            .map(|i| Point::polar(radius, i as f64 * std::f64::consts::TAU / count as f64))
            .collect()
    }

    #[test]
    fn target_follows_outer_density() {
        let sparse = ring(52.0, 20);
        let dense = ring(52.0, 60);
        let a = target_count(&CenterFillConfig::new(50.0, 2.0, 1.0).with_obstacles(&sparse));
        let b = target_count(&CenterFillConfig::new(50.0, 2.0, 1.0).with_obstacles(&dense));
        assert!(b > a);
    }

    #[test]
    fn target_is_capped_and_at_least_one() {
        let config = CenterFillConfig::new(50.0, 2.0, 1.0).with_density_factor(1.0);
        let capacity = (disk_area(50.0) / (HEX_CELL * 25.0)).floor() as usize;
        assert!(target_count(&config) <= capacity);

        let tiny = CenterFillConfig::new(0.5, 2.0, 1.0);
        assert_eq!(target_count(&tiny), 1);
    }

    #[test]
    fn output_is_clean_and_contained() {
        let obstacles = ring(33.0, 24);
        let config = CenterFillConfig::new(30.0, 2.0, 1.0)
            .with_obstacles(&obstacles)
            .with_seed(11);
        let points = generate_force(&config);
        assert!(!points.is_empty());
        assert!(points.iter().all(|p| p.is_within(30.0 + 1e-9)));
        assert_eq!(count_overlaps(&points, 5.0 - 1e-9), 0);
        assert_eq!(count_conflicts(&points, &obstacles, 5.0 - 1e-9), 0);
    }

    #[test]
    fn center_hole_is_pinned_and_clear() {
        let config = CenterFillConfig::new(30.0, 2.0, 1.0).with_center_hole(true);
        let points = generate_force(&config);
        assert_eq!(points[0], Point::ORIGIN);
        assert!(points[1..].iter().all(|p| p.norm() >= 5.0 - 1e-9));
    }

    #[test]
    fn same_seed_same_layout() {
        let config = CenterFillConfig::new(25.0, 2.0, 1.0).with_seed(5);
        assert_eq!(generate_force(&config), generate_force(&config));
    }
}
