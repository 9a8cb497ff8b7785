//! Outer pattern generators.
//!
//! Each pattern maps a grille radius plus spacing/angle settings to an ordered
//! list of hole centers covering the disk, outside an optional inner
//! exclusion radius. The excluded middle is left for a center fill.

mod concentric;
mod fermat;
mod hex;
pub mod phyllotaxis;

pub use concentric::{generate_concentric, optimal_ring_spacing};
pub(crate) use concentric::{points_on_ring, ring};
pub use fermat::generate_fermat;
pub use hex::generate_hex;
pub use phyllotaxis::generate_phyllotaxis;

use std::fmt;

use crate::error::{GrilleError, Result};
use crate::geometry::{min_spacing, Point};
use crate::spacing::SpacingFn;

/// Point cap used when the caller doesn't give one.
pub const DEFAULT_NUM_POINTS: usize = 2000;

/// Default divergence angle, in degrees (the golden angle).
pub const DEFAULT_DIVERGENCE_ANGLE: f64 = 137.5;

/// Configuration shared by all outer patterns.
///
/// Not every field matters to every pattern: spirals read `spacing`,
/// `divergence_angle` and `num_points`; concentric rings read the three
/// spacing factors and `concentric_spacing`; hex reads `spacing`.
///
/// ## Rust Lesson #8: Lifetimes on structs
///
/// `PatternConfig<'a>` borrows the optional spacing callback instead of owning
/// it. The config is built, used for one call, and dropped, so borrowing is
/// enough and the struct stays `Copy`.
#[derive(Clone, Copy)]
pub struct PatternConfig<'a> {
    /// Overall grille radius
    pub radius: f64,
    /// Radius of each hole
    pub hole_radius: f64,
    /// Minimum gap between neighbouring holes
    pub min_clearance: f64,
    /// Nothing is placed closer to the origin than this (center exclusion)
    pub inner_radius: f64,
    /// Force a hole at the exact origin
    pub center_hole: bool,
    /// Base spacing between points (spirals, hex)
    pub spacing: f64,
    /// Angle between successive spiral points, in degrees
    pub divergence_angle: f64,
    /// Maximum number of spiral points
    pub num_points: usize,
    /// Concentric base spacing is `hole_radius * (3 + spacing_factor)`
    pub spacing_factor: f64,
    /// Concentric ring-to-ring multiplier factor
    pub ring_spacing_factor: f64,
    /// Concentric along-ring multiplier factor
    pub point_spacing_factor: f64,
    /// Explicit ring-to-ring spacing, overriding the factor curve
    pub concentric_spacing: Option<f64>,
    /// Position-dependent spacing override
    pub spacing_fn: Option<&'a dyn SpacingFn>,
}

impl<'a> PatternConfig<'a> {
    /// Config with the stock defaults: spacing of one hole diameter,
    /// golden divergence angle, 2000-point cap.
    pub fn new(radius: f64, hole_radius: f64, min_clearance: f64) -> Self {
        Self {
            radius,
            hole_radius,
            min_clearance,
            inner_radius: 0.0,
            center_hole: false,
            spacing: hole_radius * 2.0,
            divergence_angle: DEFAULT_DIVERGENCE_ANGLE,
            num_points: DEFAULT_NUM_POINTS,
            spacing_factor: 0.0,
            ring_spacing_factor: 0.0,
            point_spacing_factor: 0.0,
            concentric_spacing: None,
            spacing_fn: None,
        }
    }

    /// Config for `pattern` on a grille with a center exclusion.
    ///
    /// The exclusion becomes the inner radius. Concentric rings get the
    /// optimal ring spacing; spirals get a point cap that shrinks with the
    /// excluded area.
    pub fn for_pattern(
        pattern: OuterPattern,
        radius: f64,
        hole_radius: f64,
        min_clearance: f64,
        exclusion: f64,
    ) -> Self {
        let base = Self::new(radius, hole_radius, min_clearance).with_inner_radius(exclusion.max(0.0));

        match pattern {
            OuterPattern::Concentric => {
                base.with_concentric_spacing(Some(optimal_ring_spacing(hole_radius, min_clearance)))
            }
            _ if exclusion > 0.0 && radius > 0.0 => {
                let kept = 1.0 - (exclusion / radius).powi(2);
                base.with_num_points((DEFAULT_NUM_POINTS as f64 * kept).floor().max(0.0) as usize)
            }
            _ => base,
        }
    }

    pub fn with_inner_radius(mut self, inner_radius: f64) -> Self {
        self.inner_radius = inner_radius;
        self
    }

    pub fn with_center_hole(mut self, center_hole: bool) -> Self {
        self.center_hole = center_hole;
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_divergence_angle(mut self, degrees: f64) -> Self {
        self.divergence_angle = degrees;
        self
    }

    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    pub fn with_spacing_factor(mut self, factor: f64) -> Self {
        self.spacing_factor = factor;
        self
    }

    pub fn with_ring_spacing_factor(mut self, factor: f64) -> Self {
        self.ring_spacing_factor = factor;
        self
    }

    pub fn with_point_spacing_factor(mut self, factor: f64) -> Self {
        self.point_spacing_factor = factor;
        self
    }

    pub fn with_concentric_spacing(mut self, spacing: Option<f64>) -> Self {
        self.concentric_spacing = spacing;
        self
    }

    pub fn with_spacing_fn(mut self, spacing_fn: &'a dyn SpacingFn) -> Self {
        self.spacing_fn = Some(spacing_fn);
        self
    }

    /// Center-to-center distance two holes need.
    #[inline]
    pub fn min_spacing(&self) -> f64 {
        min_spacing(self.hole_radius, self.min_clearance)
    }

    /// Spacing near `(x, y)`: the override if there is one, else `base`.
    #[inline]
    pub fn spacing_at(&self, x: f64, y: f64, base: f64) -> f64 {
        match self.spacing_fn {
            Some(f) => f.spacing_at(x, y, base),
            None => base,
        }
    }

    /// Radius below which no non-origin point may sit.
    ///
    /// A center hole claims its own clearance on top of the inner radius.
    #[inline]
    pub fn exclusion_radius(&self) -> f64 {
        if self.center_hole {
            self.inner_radius.max(self.min_spacing())
        } else {
            self.inner_radius
        }
    }
}

impl Default for PatternConfig<'_> {
    fn default() -> Self {
        Self::new(100.0, 2.0, 1.0)
    }
}

impl fmt::Debug for PatternConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternConfig")
            .field("radius", &self.radius)
            .field("hole_radius", &self.hole_radius)
            .field("min_clearance", &self.min_clearance)
            .field("inner_radius", &self.inner_radius)
            .field("center_hole", &self.center_hole)
            .field("spacing", &self.spacing)
            .field("divergence_angle", &self.divergence_angle)
            .field("num_points", &self.num_points)
            .field("spacing_factor", &self.spacing_factor)
            .field("ring_spacing_factor", &self.ring_spacing_factor)
            .field("point_spacing_factor", &self.point_spacing_factor)
            .field("concentric_spacing", &self.concentric_spacing)
            .field("spacing_fn", &self.spacing_fn.map(|_| "<fn>"))
            .finish()
    }
}

/// Available outer patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OuterPattern {
    Phyllotaxis,
    Fermat,
    Concentric,
    Hex,
}

impl OuterPattern {
    /// Get all available patterns.
    pub fn all() -> &'static [OuterPattern] {
        &[
            OuterPattern::Phyllotaxis,
            OuterPattern::Fermat,
            OuterPattern::Concentric,
            OuterPattern::Hex,
        ]
    }

    /// Get pattern name as string.
    pub fn name(&self) -> &'static str {
        match self {
            OuterPattern::Phyllotaxis => "phyllotaxis",
            OuterPattern::Fermat => "fermat",
            OuterPattern::Concentric => "concentric",
            OuterPattern::Hex => "hex",
        }
    }

    /// Brief description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            OuterPattern::Phyllotaxis => "Sunflower spiral, r = spacing * sqrt(i)",
            OuterPattern::Fermat => "Dense multi-arm spiral with local overlap rejection",
            OuterPattern::Concentric => "Evenly filled concentric rings",
            OuterPattern::Hex => "Hexagonal lattice",
        }
    }

    /// Parse pattern from string.
    pub fn from_name(name: &str) -> Result<OuterPattern> {
        match name.to_lowercase().as_str() {
            "phyllotaxis" | "sunflower" => Ok(OuterPattern::Phyllotaxis),
            "fermat" => Ok(OuterPattern::Fermat),
            "concentric" | "rings" => Ok(OuterPattern::Concentric),
            "hex" | "hexagonal" => Ok(OuterPattern::Hex),
            _ => Err(GrilleError::UnknownPattern(name.to_string())),
        }
    }

    /// Generate the pattern's points for `config`.
    pub fn generate(&self, config: &PatternConfig) -> Vec<Point> {
        let points = match self {
            OuterPattern::Phyllotaxis => generate_phyllotaxis(config),
            OuterPattern::Fermat => generate_fermat(config),
            OuterPattern::Concentric => generate_concentric(config),
            OuterPattern::Hex => generate_hex(config),
        };
        log::debug!("{} pattern produced {} points", self.name(), points.len());
        points
    }
}

/// Generate an outer pattern by name.
///
/// Unknown names are a caller bug and come back as [`GrilleError::UnknownPattern`].
pub fn generate_outer_pattern(name: &str, config: &PatternConfig) -> Result<Vec<Point>> {
    Ok(OuterPattern::from_name(name)?.generate(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for p in OuterPattern::all() {
            assert_eq!(OuterPattern::from_name(p.name()), Ok(*p));
        }
        assert_eq!(OuterPattern::from_name("SUNFLOWER"), Ok(OuterPattern::Phyllotaxis));
    }

    #[test]
    fn unknown_name_fails_loudly() {
        let config = PatternConfig::default();
        let err = generate_outer_pattern("voronoi", &config).unwrap_err();
        assert_eq!(err, GrilleError::UnknownPattern("voronoi".to_string()));
    }

    #[test]
    fn factory_defaults() {
        let config = PatternConfig::for_pattern(OuterPattern::Phyllotaxis, 100.0, 2.0, 1.0, 50.0);
        assert_eq!(config.inner_radius, 50.0);
        assert_eq!(config.num_points, 1500);
        assert_eq!(config.spacing, 4.0);
        assert_eq!(config.divergence_angle, DEFAULT_DIVERGENCE_ANGLE);

        let config = PatternConfig::for_pattern(OuterPattern::Fermat, 100.0, 2.0, 1.0, 0.0);
        assert_eq!(config.num_points, DEFAULT_NUM_POINTS);

        let config = PatternConfig::for_pattern(OuterPattern::Concentric, 100.0, 2.0, 1.0, 10.0);
        let ring = config.concentric_spacing.unwrap();
        assert!((ring - 5.5).abs() < 1e-12);
        assert_eq!(config.inner_radius, 10.0);
    }

    #[test]
    fn center_hole_claims_clearance() {
        let config = PatternConfig::new(100.0, 2.0, 1.0).with_center_hole(true);
        assert_eq!(config.exclusion_radius(), 5.0);
        let config = config.with_inner_radius(20.0);
        assert_eq!(config.exclusion_radius(), 20.0);
    }

    #[test]
    fn spacing_override_is_used() {
        let double = |_x: f64, _y: f64, base: f64| base * 2.0;
        let config = PatternConfig::default().with_spacing_fn(&double);
        assert_eq!(config.spacing_at(1.0, 1.0, 3.0), 6.0);
        assert_eq!(PatternConfig::default().spacing_at(1.0, 1.0, 3.0), 3.0);
    }

    #[test]
    fn degenerate_radius_is_empty_for_every_pattern() {
        for p in OuterPattern::all() {
            let config = PatternConfig::new(0.0, 2.0, 1.0).with_center_hole(true);
            assert!(p.generate(&config).is_empty(), "{} should be empty", p.name());
            let config = PatternConfig::new(-5.0, 2.0, 1.0);
            assert!(p.generate(&config).is_empty(), "{} should be empty", p.name());
        }
    }
}
