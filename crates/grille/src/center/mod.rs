//! Center fill generators.
//!
//! An outer pattern with a center exclusion leaves a disk of `center_radius`
//! empty. These algorithms fill it, treating nearby outer points as
//! obstacles they must not overlap.
//!
//! Every fill is best-effort: if the requested count can't be reached, or an
//! overlap can't be relaxed away within the iteration budget, the result is
//! simply smaller or imperfect. Use [`crate::analysis`] to measure it.

mod adaptive_force;
mod concentric;
mod force;
mod hex;
mod poisson;
pub(crate) mod relax;

pub use adaptive_force::generate_adaptive_force;
pub use concentric::generate_concentric_fill;
pub use force::generate_force;
pub use hex::generate_hex_fill;
pub use poisson::generate_poisson;

use crate::error::{GrilleError, Result};
use crate::geometry::{min_spacing, Point};

/// Configuration shared by all center fills.
///
/// `obstacles` are outer-pattern points the fill must keep clear of, usually
/// already filtered to a ring just outside `center_radius`. `seed_points` is
/// only read by the adaptive force fill, which perturbs an existing layout
/// instead of starting from scratch.
#[derive(Debug, Clone, Copy)]
pub struct CenterFillConfig<'a> {
    /// Radius of the disk to fill
    pub center_radius: f64,
    /// Clearance between neighbouring holes
    pub min_distance: f64,
    pub hole_radius: f64,
    pub obstacles: &'a [Point],
    pub seed_points: &'a [Point],
    /// Pin one hole at the exact origin
    pub center_hole: bool,
    /// Roughly [-1, 1]: negative is sparser, positive denser, 0 the algorithm default
    pub density_factor: f64,
    /// Relaxation intensity (adaptive force only; 0 disables relaxation)
    pub force_strength: f64,
    pub max_iterations: usize,
    /// Candidates tried around each active Poisson point
    pub poisson_attempts: usize,
    /// Outer edge of the density-sampling ring; `center_radius + base` when unset
    pub buffer_radius: Option<f64>,
    /// Seed for the randomized fills
    pub seed: u64,
}

impl<'a> CenterFillConfig<'a> {
    pub fn new(center_radius: f64, hole_radius: f64, min_distance: f64) -> Self {
        Self {
            center_radius,
            min_distance,
            hole_radius,
            obstacles: &[],
            seed_points: &[],
            center_hole: false,
            density_factor: 0.0,
            force_strength: 1.0,
            max_iterations: 150,
            poisson_attempts: 30,
            buffer_radius: None,
            seed: 0,
        }
    }

    pub fn with_obstacles(mut self, obstacles: &'a [Point]) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn with_seed_points(mut self, seed_points: &'a [Point]) -> Self {
        self.seed_points = seed_points;
        self
    }

    pub fn with_center_hole(mut self, center_hole: bool) -> Self {
        self.center_hole = center_hole;
        self
    }

    pub fn with_density_factor(mut self, density: f64) -> Self {
        self.density_factor = density;
        self
    }

    pub fn with_force_strength(mut self, strength: f64) -> Self {
        self.force_strength = strength;
        self
    }

    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    pub fn with_poisson_attempts(mut self, attempts: usize) -> Self {
        self.poisson_attempts = attempts;
        self
    }

    pub fn with_buffer_radius(mut self, buffer: f64) -> Self {
        self.buffer_radius = Some(buffer);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Center-to-center distance two holes need.
    #[inline]
    pub fn base_spacing(&self) -> f64 {
        min_spacing(self.hole_radius, self.min_distance)
    }

    /// Outer edge of the ring used to sample outer-pattern density.
    pub fn buffer_radius(&self) -> f64 {
        self.buffer_radius
            .unwrap_or(self.center_radius + self.base_spacing())
    }

    /// Output for a fill that has nothing to do: the origin if a center
    /// hole was asked for, otherwise nothing.
    pub(crate) fn minimal(&self) -> Vec<Point> {
        if self.center_hole {
            vec![Point::ORIGIN]
        } else {
            Vec::new()
        }
    }

    /// `Some(minimal output)` when the fill should short-circuit: no disk,
    /// no spacing, or density at or below `collapse`.
    pub(crate) fn short_circuit(&self, collapse: f64) -> Option<Vec<Point>> {
        if self.center_radius <= 0.0 || self.base_spacing() <= 0.0 || self.density_factor <= collapse {
            log::debug!(
                "center fill short-circuit: radius {}, base {}, density {}",
                self.center_radius,
                self.base_spacing(),
                self.density_factor
            );
            return Some(self.minimal());
        }
        None
    }
}

impl Default for CenterFillConfig<'_> {
    fn default() -> Self {
        Self::new(50.0, 2.0, 1.0)
    }
}

/// Available center fill algorithms.
///
/// ## Rust Lesson #5: Enums as strategy tags
///
/// Each variant names one algorithm; `generate` matches on `self` and calls
/// the right function. Adding an algorithm means adding a variant, and the
/// compiler points at every `match` that needs a new arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenterFillAlgorithm {
    Force,
    AdaptiveForce,
    Poisson,
    Hex,
    Concentric,
}

impl CenterFillAlgorithm {
    /// Get all available algorithms.
    pub fn all() -> &'static [CenterFillAlgorithm] {
        &[
            CenterFillAlgorithm::Force,
            CenterFillAlgorithm::AdaptiveForce,
            CenterFillAlgorithm::Poisson,
            CenterFillAlgorithm::Hex,
            CenterFillAlgorithm::Concentric,
        ]
    }

    /// Get algorithm name as string.
    pub fn name(&self) -> &'static str {
        match self {
            CenterFillAlgorithm::Force => "force",
            CenterFillAlgorithm::AdaptiveForce => "adaptiveForce",
            CenterFillAlgorithm::Poisson => "poisson",
            CenterFillAlgorithm::Hex => "hex",
            CenterFillAlgorithm::Concentric => "concentric",
        }
    }

    /// Brief description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            CenterFillAlgorithm::Force => "Hex seed trimmed to the outer density, then strict force relaxation",
            CenterFillAlgorithm::AdaptiveForce => "Perturbs an existing layout with center-weighted repulsion",
            CenterFillAlgorithm::Poisson => "Blue-noise dart throwing with a spatial grid",
            CenterFillAlgorithm::Hex => "Hex packing with a density-driven spacing",
            CenterFillAlgorithm::Concentric => "Rings filtered against the outer pattern",
        }
    }

    /// Density at or below which the algorithm returns only the minimal output.
    pub fn collapse_threshold(&self) -> f64 {
        match self {
            CenterFillAlgorithm::Force => force::COLLAPSE,
            CenterFillAlgorithm::AdaptiveForce => adaptive_force::COLLAPSE,
            CenterFillAlgorithm::Poisson => poisson::COLLAPSE,
            CenterFillAlgorithm::Hex => hex::COLLAPSE,
            CenterFillAlgorithm::Concentric => concentric::COLLAPSE,
        }
    }

    /// Parse algorithm from string.
    pub fn from_name(name: &str) -> Result<CenterFillAlgorithm> {
        match name {
            "force" => Ok(CenterFillAlgorithm::Force),
            "adaptiveForce" | "adaptive-force" | "adaptive_force" => Ok(CenterFillAlgorithm::AdaptiveForce),
            "poisson" => Ok(CenterFillAlgorithm::Poisson),
            "hex" => Ok(CenterFillAlgorithm::Hex),
            "concentric" => Ok(CenterFillAlgorithm::Concentric),
            _ => Err(GrilleError::UnknownAlgorithm(name.to_string())),
        }
    }

    /// Run the algorithm.
    pub fn generate(&self, config: &CenterFillConfig) -> Vec<Point> {
        let points = match self {
            CenterFillAlgorithm::Force => generate_force(config),
            CenterFillAlgorithm::AdaptiveForce => generate_adaptive_force(config),
            CenterFillAlgorithm::Poisson => generate_poisson(config),
            CenterFillAlgorithm::Hex => generate_hex_fill(config),
            CenterFillAlgorithm::Concentric => generate_concentric_fill(config),
        };
        log::debug!("{} center fill produced {} points", self.name(), points.len());
        points
    }
}

/// Generate a center fill by algorithm name.
///
/// Unknown names come back as [`GrilleError::UnknownAlgorithm`].
pub fn generate_center_fill(name: &str, config: &CenterFillConfig) -> Result<Vec<Point>> {
    Ok(CenterFillAlgorithm::from_name(name)?.generate(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for a in CenterFillAlgorithm::all() {
            assert_eq!(CenterFillAlgorithm::from_name(a.name()), Ok(*a));
        }
        assert_eq!(
            CenterFillAlgorithm::from_name("adaptive-force"),
            Ok(CenterFillAlgorithm::AdaptiveForce)
        );
    }

    #[test]
    fn unknown_algorithm_is_an_error() {
        let config = CenterFillConfig::default();
        assert_eq!(
            generate_center_fill("voronoi", &config),
            Err(GrilleError::UnknownAlgorithm("voronoi".to_string()))
        );
    }

    #[test]
    fn negative_radius_is_empty() {
        for a in CenterFillAlgorithm::all() {
            let config = CenterFillConfig::new(-1.0, 2.0, 1.0);
            assert!(a.generate(&config).is_empty(), "{} should be empty", a.name());
        }
    }

    #[test]
    fn degenerate_with_center_hole_is_origin() {
        for a in CenterFillAlgorithm::all() {
            let config = CenterFillConfig::new(0.0, 2.0, 1.0).with_center_hole(true);
            assert_eq!(a.generate(&config), vec![Point::ORIGIN], "{}", a.name());
        }
    }

    #[test]
    fn collapsed_density_short_circuits() {
        for a in CenterFillAlgorithm::all() {
            let config = CenterFillConfig::new(50.0, 2.0, 1.0)
                .with_density_factor(a.collapse_threshold())
                .with_center_hole(true);
            assert_eq!(a.generate(&config), vec![Point::ORIGIN], "{}", a.name());
        }
    }

    #[test]
    fn buffer_defaults_to_one_spacing() {
        let config = CenterFillConfig::new(50.0, 2.0, 1.0);
        assert_eq!(config.base_spacing(), 5.0);
        assert_eq!(config.buffer_radius(), 55.0);
        assert_eq!(config.with_buffer_radius(70.0).buffer_radius(), 70.0);
    }
}
