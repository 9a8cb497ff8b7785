//! Building blocks shared by the force-based fills: lattice seeding,
//! max-min sampling, greedy declustering and the relaxation loop.

use crate::geometry::Point;
use crate::rng::Rng;

/// Lattice spacing slack so exact neighbours don't read as overlapping after rounding.
pub(crate) const LATTICE_SLACK: f64 = 1.001;

/// Random candidates scored per max-min sampling round.
pub(crate) const SAMPLE_CANDIDATES: usize = 50;

/// Longest move a point may make in one iteration, as a fraction of the base spacing.
const MAX_STEP: f64 = 0.5;

/// Hex lattice of `spacing` centered on the origin, clipped to the disk of
/// `radius`. Includes the origin.
pub(crate) fn hex_lattice(radius: f64, spacing: f64) -> Vec<Point> {
    if radius < 0.0 || spacing <= 0.0 {
        return Vec::new();
    }

    let row_height = spacing * 3f64.sqrt() / 2.0;
    let rows = (radius / row_height).floor() as i64;
    let cols = (radius / spacing).ceil() as i64 + 1;

    let mut points = Vec::new();
    for row in -rows..=rows {
        let offset = if row.rem_euclid(2) == 1 { spacing / 2.0 } else { 0.0 };
        for col in -cols..=cols {
            let p = Point::new(col as f64 * spacing + offset, row as f64 * row_height);
            if p.is_within(radius) {
                points.push(p);
            }
        }
    }
    points
}

/// Distance from `p` to the nearest of `points` and `obstacles` (infinity if both are empty).
pub(crate) fn clearance(p: Point, points: &[Point], obstacles: &[Point]) -> f64 {
    points
        .iter()
        .chain(obstacles)
        .map(|q| q.distance_sq(p))
        .fold(f64::INFINITY, f64::min)
        .sqrt()
}

/// Grow `points` toward `target` by max-min sampling.
///
/// Each round scores [`SAMPLE_CANDIDATES`] uniform samples from the annulus
/// `min_r..max_r` by their clearance and keeps the best. The best is added
/// when its clearance is at least `min_dist`. After `patience` consecutive
/// rounds without an acceptable candidate the disk is treated as full.
///
/// Returns how many points were added.
#[allow(clippy::too_many_arguments)]
pub(crate) fn grow_to(
    points: &mut Vec<Point>,
    target: usize,
    obstacles: &[Point],
    rng: &mut Rng,
    min_r: f64,
    max_r: f64,
    min_dist: f64,
    patience: usize,
) -> usize {
    let start = points.len();
    let mut misses = 0;

    while points.len() < target && misses < patience {
        let best = (0..SAMPLE_CANDIDATES)
            .map(|_| {
                let c = rng.point_in_annulus(min_r, max_r);
                (c, clearance(c, points, obstacles))
            })
            .max_by(|a, b| a.1.total_cmp(&b.1));

        match best {
            Some((p, d)) if d >= min_dist => {
                points.push(p);
                misses = 0;
            }
            _ => misses += 1,
        }
    }

    points.len() - start
}

/// Shrink `points` to `target` by repeatedly removing the most crowded one:
/// the point with the most neighbours closer than `neighbourhood`.
///
/// The first `pinned` points are never removed. Ties go to the lowest index.
pub(crate) fn decluster(points: &mut Vec<Point>, target: usize, neighbourhood: f64, pinned: usize) {
    let reach_sq = neighbourhood * neighbourhood;
    let mut counts: Vec<usize> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            points
                .iter()
                .enumerate()
                .filter(|(j, q)| *j != i && p.distance_sq(**q) < reach_sq)
                .count()
        })
        .collect();

    while points.len() > target.max(pinned) {
        let mut worst = pinned;
        for i in pinned..points.len() {
            if counts[i] > counts[worst] {
                worst = i;
            }
        }

        let removed = points.remove(worst);
        counts.remove(worst);
        for (p, count) in points.iter().zip(counts.iter_mut()) {
            if p.distance_sq(removed) < reach_sq {
                *count = count.saturating_sub(1);
            }
        }
    }
}

/// What happens to a move that leaves the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Boundary {
    /// Pull the point back onto the boundary
    Clamp,
    /// Keep the point where it was
    Reject,
}

/// Parameters of one relaxation run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Relaxation {
    /// Minimum center-to-center distance
    pub base: f64,
    /// Disk the points must stay in
    pub radius: f64,
    /// Force falls off as `(base / d)^exponent`
    pub exponent: i32,
    /// Damping at iteration 0
    pub damping: f64,
    /// Per-iteration damping decay
    pub decay: f64,
    /// Converged once the largest move is below `tolerance * base`
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Leading points that never move
    pub pinned: usize,
    /// Reject moves that create a new overlap
    pub strict: bool,
    pub boundary: Boundary,
    /// Scale forces by `strength * (1 - (|p| / radius)²)`
    pub falloff: Option<f64>,
    /// Keep non-pinned points at least `base` from the origin
    pub clear_origin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub iterations: usize,
    pub converged: bool,
}

/// Repulsion on `p` from `q`, or nothing when out of reach or coincident.
#[inline]
fn repulsion(p: Point, q: Point, base: f64, exponent: i32) -> Option<(f64, f64)> {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    let d2 = dx * dx + dy * dy;
    if d2 == 0.0 || d2 >= 4.0 * base * base {
        return None;
    }
    let d = d2.sqrt();
    let magnitude = (base / d).powi(exponent) * base;
    Some((dx / d * magnitude, dy / d * magnitude))
}

impl Relaxation {
    /// Relax `points` in place against each other and `obstacles`.
    pub fn run(&self, points: &mut [Point], obstacles: &[Point]) -> Outcome {
        let max_step = self.base * MAX_STEP;
        let mut damping = self.damping;

        for iter in 0..self.max_iterations {
            let mut max_move: f64 = 0.0;

            for i in self.pinned..points.len() {
                let p = points[i];
                let (fx, fy) = self.force_on(i, points, obstacles);

                let (mut mx, mut my) = (fx * damping, fy * damping);
                let len = (mx * mx + my * my).sqrt();
                if len == 0.0 || !len.is_finite() {
                    continue;
                }
                if len > max_step {
                    mx *= max_step / len;
                    my *= max_step / len;
                }

                let Some(next) = self.constrain(Point::new(p.x + mx, p.y + my)) else {
                    continue;
                };
                if self.strict && self.creates_overlap(i, p, next, points, obstacles) {
                    continue;
                }

                max_move = max_move.max(next.distance(p));
                points[i] = next;
            }

            log::trace!("relax iteration {iter}: max move {max_move:.5}");
            if max_move < self.tolerance * self.base {
                return Outcome { iterations: iter + 1, converged: true };
            }
            damping *= self.decay;
        }

        Outcome { iterations: self.max_iterations, converged: false }
    }

    fn force_on(&self, i: usize, points: &[Point], obstacles: &[Point]) -> (f64, f64) {
        let p = points[i];
        let others = points
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, q)| q)
            .chain(obstacles);

        let (fx, fy) = others
            .filter_map(|q| repulsion(p, *q, self.base, self.exponent))
            .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));

        match self.falloff {
            Some(strength) => {
                let ratio = (p.norm() / self.radius).min(1.0);
                let scale = strength * (1.0 - ratio * ratio);
                (fx * scale, fy * scale)
            }
            None => (fx, fy),
        }
    }

    /// Apply the boundary and origin rules to a proposed position.
    fn constrain(&self, next: Point) -> Option<Point> {
        let mut next = next;
        if !next.is_within(self.radius) {
            match self.boundary {
                Boundary::Clamp => next = next.with_norm(self.radius),
                Boundary::Reject => return None,
            }
        }

        if self.clear_origin && next.norm() < self.base {
            match self.boundary {
                Boundary::Clamp if next != Point::ORIGIN => next = next.with_norm(self.base),
                _ => return None,
            }
            if !next.is_within(self.radius) {
                return None;
            }
        }

        Some(next)
    }

    fn creates_overlap(&self, i: usize, from: Point, to: Point, points: &[Point], obstacles: &[Point]) -> bool {
        let min_sq = self.base * self.base;
        points
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, q)| q)
            .chain(obstacles)
            .any(|q| q.distance_sq(to) < min_sq && q.distance_sq(from) >= min_sq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::min_pair_distance;

    fn relaxation(radius: f64) -> Relaxation {
        Relaxation {
            base: 5.0,
            radius,
            exponent: 3,
            damping: 0.05,
            decay: 0.95,
            tolerance: 0.01,
            max_iterations: 150,
            pinned: 0,
            strict: false,
            boundary: Boundary::Clamp,
            falloff: None,
            clear_origin: false,
        }
    }

    #[test]
    fn lattice_neighbours_are_one_spacing_apart() {
        let lattice = hex_lattice(20.0, 5.0);
        assert!(lattice.contains(&Point::ORIGIN));
        assert!(lattice.iter().all(|p| p.is_within(20.0)));
        let min = min_pair_distance(&lattice).unwrap();
        assert!((min - 5.0).abs() < 1e-9);
    }

    #[test]
    fn lattice_degenerate_inputs() {
        assert!(hex_lattice(-1.0, 5.0).is_empty());
        assert!(hex_lattice(10.0, 0.0).is_empty());
        assert_eq!(hex_lattice(0.0, 5.0), vec![Point::ORIGIN]);
    }

    #[test]
    fn clearance_uses_both_sets() {
        let p = Point::ORIGIN;
        assert_eq!(clearance(p, &[], &[]), f64::INFINITY);
        assert_eq!(clearance(p, &[Point::new(3.0, 4.0)], &[Point::new(0.0, 2.0)]), 2.0);
    }

    #[test]
    fn decluster_removes_crowded_points_first() {
        // A tight cluster plus one loner; the loner must survive.
        let mut points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(50.0, 50.0),
        ];
        decluster(&mut points, 2, 5.0, 0);
        assert_eq!(points.len(), 2);
        assert!(points.contains(&Point::new(50.0, 50.0)));
    }

    #[test]
    fn decluster_keeps_pinned() {
        let mut points = vec![Point::ORIGIN, Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        decluster(&mut points, 1, 5.0, 1);
        assert_eq!(points, vec![Point::ORIGIN]);
    }

    #[test]
    fn grow_respects_min_dist_and_stops_when_full() {
        let mut rng = Rng::new(3);
        let mut points = Vec::new();
        let added = grow_to(&mut points, 10_000, &[], &mut rng, 0.0, 20.0, 5.0, 20);
        assert_eq!(added, points.len());
        assert!(points.len() > 5 && points.len() < 10_000);
        assert!(min_pair_distance(&points).unwrap() >= 5.0);
    }

    #[test]
    fn relaxation_spreads_a_clump() {
        let mut points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ];
        let before = min_pair_distance(&points).unwrap();
        relaxation(30.0).run(&mut points, &[]);
        let after = min_pair_distance(&points).unwrap();
        assert!(after > before);
        assert!(points.iter().all(|p| p.is_within(30.0 + 1e-9)));
    }

    #[test]
    fn coincident_points_do_not_blow_up() {
        let mut points = vec![Point::new(1.0, 1.0), Point::new(1.0, 1.0)];
        relaxation(10.0).run(&mut points, &[]);
        assert!(points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn pinned_points_stay_put() {
        let mut points = vec![Point::ORIGIN, Point::new(2.0, 0.0)];
        let relax = Relaxation { pinned: 1, clear_origin: true, ..relaxation(20.0) };
        relax.run(&mut points, &[]);
        assert_eq!(points[0], Point::ORIGIN);
        assert!(points[1].norm() >= 5.0 - 1e-9);
    }

    #[test]
    fn reject_boundary_keeps_points_inside() {
        let mut points = vec![Point::new(9.0, 0.0), Point::new(9.5, 0.5)];
        let relax = Relaxation { boundary: Boundary::Reject, ..relaxation(10.0) };
        relax.run(&mut points, &[]);
        assert!(points.iter().all(|p| p.is_within(10.0)));
    }

    #[test]
    fn strict_moves_never_add_overlaps() {
        let obstacles: Vec<Point> = (0..12)
            .map(|i| Point::polar(12.0, i as f64 * std::f64::consts::PI / 6.0))
            .collect();
        let mut points = vec![Point::new(3.0, 0.0), Point::new(-3.0, 0.0), Point::new(0.0, 3.5)];
        let relax = Relaxation { strict: true, ..relaxation(10.0) };
        relax.run(&mut points, &obstacles);
        for p in &points {
            assert!(clearance(*p, &[], &obstacles) >= 5.0);
        }
    }
}
