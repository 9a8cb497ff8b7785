//! Whole-grille assembly.
//!
//! Runs the outer pattern, picks out the outer points bordering the center
//! exclusion as obstacles, fills the exclusion, and turns the combined point
//! set into sized holes.

use crate::analysis::LayoutStats;
use crate::center::{CenterFillAlgorithm, CenterFillConfig};
use crate::geometry::{min_spacing, Point};
use crate::patterns::{OuterPattern, PatternConfig};
use crate::spacing::{scaled_hole_radius, RadialSpacing, ScaleType};

/// Every knob of a grille, in the caller's length unit (millimetres by default).
#[derive(Debug, Clone, PartialEq)]
pub struct GrilleParams {
    pub radius: f64,
    pub hole_radius: f64,
    pub min_clearance: f64,
    /// Radius of the center disk handed to the center fill (0 = none)
    pub center_exclusion: f64,
    pub center_hole: bool,
    pub pattern: OuterPattern,
    pub fill: CenterFillAlgorithm,
    /// Spiral divergence angle, degrees
    pub divergence_angle: f64,
    /// Spiral spacing is `hole_radius * (1.5 + spacing_factor)`
    pub spacing_factor: f64,
    pub ring_spacing_factor: f64,
    pub point_spacing_factor: f64,
    /// Concentric ring spacing; follows `ring_spacing_factor` when unset
    pub concentric_spacing: Option<f64>,
    /// Radial hole-size scaling strength (0 = uniform holes)
    pub size_scaling: f64,
    /// Radial spacing scaling strength for the outer pattern (0 = uniform)
    pub density_scaling: f64,
    pub scale_type: ScaleType,
    pub density_factor: f64,
    pub force_strength: f64,
    pub max_iterations: usize,
    pub seed: u64,
    /// Keep holes that cross the outer edge
    pub allow_partial_holes: bool,
}

impl Default for GrilleParams {
    fn default() -> Self {
        Self {
            radius: 200.0,
            hole_radius: 6.0,
            min_clearance: 1.0,
            center_exclusion: 0.0,
            center_hole: false,
            pattern: OuterPattern::Phyllotaxis,
            fill: CenterFillAlgorithm::Force,
            divergence_angle: 137.5,
            spacing_factor: 0.0,
            ring_spacing_factor: 0.0,
            point_spacing_factor: 0.0,
            concentric_spacing: None,
            size_scaling: 0.0,
            density_scaling: 0.0,
            scale_type: ScaleType::Linear,
            density_factor: 0.0,
            force_strength: 1.0,
            max_iterations: 150,
            seed: 0,
            allow_partial_holes: false,
        }
    }
}

impl GrilleParams {
    /// Center-to-center distance two holes need.
    pub fn min_spacing(&self) -> f64 {
        min_spacing(self.hole_radius, self.min_clearance)
    }

    /// Spiral spacing: `hole_radius * (1.5 + spacing_factor)`.
    pub fn spiral_spacing(&self) -> f64 {
        self.hole_radius * (1.5 + self.spacing_factor)
    }

    /// Spiral point cap: roughly how many spacing-sized cells fit in the radius.
    pub fn spiral_point_cap(&self) -> usize {
        let s = self.spiral_spacing();
        if s <= 0.0 {
            return 0;
        }
        ((self.radius * self.radius) / (s * s)).round() as usize
    }

    /// Outer edge of the obstacle ring around the exclusion.
    pub fn buffer_radius(&self) -> f64 {
        self.center_exclusion + self.min_spacing()
    }

    /// Outer pattern configuration for these parameters.
    ///
    /// With a center exclusion the center hole belongs to the center fill,
    /// so the outer pattern doesn't emit one.
    pub fn pattern_config<'a>(&self, profile: Option<&'a RadialSpacing>) -> PatternConfig<'a> {
        let mut config = PatternConfig::for_pattern(
            self.pattern,
            self.radius,
            self.hole_radius,
            self.min_clearance,
            self.center_exclusion,
        )
        .with_center_hole(self.center_hole && self.center_exclusion <= 0.0)
        .with_spacing(self.spiral_spacing())
        .with_divergence_angle(self.divergence_angle)
        .with_num_points(self.spiral_point_cap())
        .with_spacing_factor(self.spacing_factor)
        .with_ring_spacing_factor(self.ring_spacing_factor)
        .with_point_spacing_factor(self.point_spacing_factor)
        .with_concentric_spacing(self.concentric_spacing);

        if let Some(profile) = profile {
            config = config.with_spacing_fn(profile);
        }
        config
    }

    /// Radial spacing profile, when density scaling is on.
    pub fn spacing_profile(&self) -> Option<RadialSpacing> {
        (self.density_scaling != 0.0)
            .then(|| RadialSpacing::new(self.radius, self.density_scaling, self.scale_type))
    }
}

/// Outer points inside the ring `exclusion <= |p| <= buffer`.
///
/// These are the points a center fill has to keep clear of.
pub fn obstacle_ring(points: &[Point], exclusion: f64, buffer: f64) -> Vec<Point> {
    points
        .iter()
        .copied()
        .filter(|p| p.is_within_annulus(exclusion, buffer))
        .collect()
}

/// One hole: where and how big.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hole {
    pub center: Point,
    pub radius: f64,
}

/// A generated grille.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub outer: Vec<Point>,
    pub center: Vec<Point>,
    pub radius: f64,
    pub hole_radius: f64,
    pub min_spacing: f64,
    pub size_scaling: f64,
    pub scale_type: ScaleType,
    pub allow_partial_holes: bool,
}

impl Layout {
    /// Every hole center, outer points first.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.outer.iter().chain(&self.center).copied()
    }

    /// Sized holes, ready to draw.
    ///
    /// Hole radii follow the radial size scaling. Holes of zero size are
    /// dropped, and so are holes that cross the outer edge unless partial
    /// holes are allowed.
    pub fn holes(&self) -> Vec<Hole> {
        self.points()
            .filter_map(|center| {
                let radius = scaled_hole_radius(
                    center.x,
                    center.y,
                    self.hole_radius,
                    self.radius,
                    self.size_scaling,
                    self.scale_type,
                );
                if radius <= 0.0 {
                    return None;
                }
                if !self.allow_partial_holes && center.norm() > self.radius - radius {
                    return None;
                }
                Some(Hole { center, radius })
            })
            .collect()
    }

    /// Spacing and containment measurements.
    pub fn stats(&self) -> LayoutStats {
        LayoutStats::measure(&self.outer, &self.center, self.min_spacing)
    }
}

/// Generate a whole grille.
pub fn generate_layout(params: &GrilleParams) -> Layout {
    let profile = params.spacing_profile();
    let config = params.pattern_config(profile.as_ref());
    let outer = params.pattern.generate(&config);

    let center = if params.center_exclusion > 0.0 {
        fill_center(params, &config, &outer)
    } else {
        Vec::new()
    };

    log::debug!(
        "layout: {} outer ({}), {} center ({})",
        outer.len(),
        params.pattern.name(),
        center.len(),
        params.fill.name()
    );

    Layout {
        outer,
        center,
        radius: params.radius,
        hole_radius: params.hole_radius,
        min_spacing: params.min_spacing(),
        size_scaling: params.size_scaling,
        scale_type: params.scale_type,
        allow_partial_holes: params.allow_partial_holes,
    }
}

fn fill_center(params: &GrilleParams, outer_config: &PatternConfig, outer: &[Point]) -> Vec<Point> {
    let exclusion = params.center_exclusion;
    let buffer = params.buffer_radius();
    let obstacles = obstacle_ring(outer, exclusion, buffer);

    // The adaptive fill perturbs the outer pattern continued into the disk.
    let seeds: Vec<Point> = if params.fill == CenterFillAlgorithm::AdaptiveForce {
        let continued = outer_config.with_inner_radius(0.0).with_center_hole(false);
        params
            .pattern
            .generate(&continued)
            .into_iter()
            .filter(|p| p.norm() < exclusion)
            .collect()
    } else {
        Vec::new()
    };

    let config = CenterFillConfig::new(exclusion, params.hole_radius, params.min_clearance)
        .with_obstacles(&obstacles)
        .with_seed_points(&seeds)
        .with_center_hole(params.center_hole)
        .with_density_factor(params.density_factor)
        .with_force_strength(params.force_strength)
        .with_max_iterations(params.max_iterations)
        .with_buffer_radius(buffer)
        .with_seed(params.seed);

    log::debug!("layout: {} obstacles, {} seeds", obstacles.len(), seeds.len());
    params.fill.generate(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_ui() {
        let params = GrilleParams::default();
        assert_eq!(params.spiral_spacing(), 9.0);
        assert_eq!(params.spiral_point_cap(), 494);
        assert_eq!(params.min_spacing(), 13.0);
    }

    #[test]
    fn no_exclusion_no_center() {
        let layout = generate_layout(&GrilleParams::default());
        assert!(!layout.outer.is_empty());
        assert!(layout.center.is_empty());
        assert_eq!(layout.points().count(), layout.outer.len());
    }

    #[test]
    fn exclusion_gets_filled() {
        let params = GrilleParams {
            radius: 100.0,
            hole_radius: 2.0,
            center_exclusion: 30.0,
            ..GrilleParams::default()
        };
        let layout = generate_layout(&params);
        assert!(layout.outer.iter().all(|p| p.norm() >= 30.0));
        assert!(!layout.center.is_empty());
        assert!(layout.center.iter().all(|p| p.is_within(30.0 + 1e-9)));
    }

    #[test]
    fn center_hole_goes_to_the_fill() {
        let params = GrilleParams {
            radius: 100.0,
            hole_radius: 2.0,
            center_exclusion: 30.0,
            center_hole: true,
            fill: CenterFillAlgorithm::Hex,
            ..GrilleParams::default()
        };
        let layout = generate_layout(&params);
        assert_eq!(layout.points().filter(|p| *p == Point::ORIGIN).count(), 1);
        assert_eq!(layout.center[0], Point::ORIGIN);
    }

    #[test]
    fn adaptive_fill_starts_from_continued_pattern() {
        let params = GrilleParams {
            radius: 100.0,
            hole_radius: 2.0,
            center_exclusion: 30.0,
            fill: CenterFillAlgorithm::AdaptiveForce,
            force_strength: 0.0,
            ..GrilleParams::default()
        };
        let layout = generate_layout(&params);
        let config = params.pattern_config(None).with_inner_radius(0.0);
        let expected: Vec<Point> = params
            .pattern
            .generate(&config)
            .into_iter()
            .filter(|p| p.norm() < 30.0)
            .collect();
        assert_eq!(layout.center, expected);
    }

    #[test]
    fn obstacle_ring_filters_to_annulus() {
        let points = [Point::new(5.0, 0.0), Point::new(12.0, 0.0), Point::new(20.0, 0.0)];
        assert_eq!(obstacle_ring(&points, 10.0, 15.0), vec![Point::new(12.0, 0.0)]);
    }

    #[test]
    fn partial_holes_filtered_unless_allowed() {
        let mut layout = Layout {
            outer: vec![Point::new(0.0, 0.0), Point::new(97.0, 0.0)],
            center: Vec::new(),
            radius: 100.0,
            hole_radius: 5.0,
            min_spacing: 11.0,
            size_scaling: 0.0,
            scale_type: ScaleType::Linear,
            allow_partial_holes: false,
        };
        assert_eq!(layout.holes().len(), 1);
        layout.allow_partial_holes = true;
        assert_eq!(layout.holes().len(), 2);
    }

    #[test]
    fn holes_follow_size_scaling() {
        let layout = Layout {
            outer: vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0)],
            center: Vec::new(),
            radius: 100.0,
            hole_radius: 4.0,
            min_spacing: 9.0,
            size_scaling: 0.5,
            scale_type: ScaleType::Linear,
            allow_partial_holes: false,
        };
        let holes = layout.holes();
        assert_eq!(holes[0].radius, 6.0);
        assert_eq!(holes[1].radius, 4.0);
    }

    fn ring_radii(layout: &Layout) -> Vec<f64> {
        let mut radii: Vec<f64> = layout.outer.iter().map(|p| (p.norm() * 1e6).round() / 1e6).collect();
        radii.dedup();
        radii
    }

    #[test]
    fn ring_factor_moves_concentric_rings() {
        let params = GrilleParams {
            radius: 80.0,
            hole_radius: 2.0,
            pattern: OuterPattern::Concentric,
            ..GrilleParams::default()
        };
        // Base spacing 3h = 6, multiplier 1 at factor 0 and 3 at factor 1
        let tight = ring_radii(&generate_layout(&params));
        let loose = ring_radii(&generate_layout(&GrilleParams { ring_spacing_factor: 1.0, ..params.clone() }));
        assert_eq!(tight[..3], [0.0, 6.0, 12.0]);
        assert_eq!(loose[..3], [0.0, 18.0, 36.0]);
        assert!(loose.len() < tight.len());
    }

    #[test]
    fn explicit_ring_spacing_beats_factor() {
        let params = GrilleParams {
            radius: 50.0,
            hole_radius: 2.0,
            pattern: OuterPattern::Concentric,
            ring_spacing_factor: 1.0,
            concentric_spacing: Some(10.0),
            ..GrilleParams::default()
        };
        assert_eq!(ring_radii(&generate_layout(&params)), vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0]);
    }

    #[test]
    fn density_profile_only_when_scaling() {
        assert!(GrilleParams::default().spacing_profile().is_none());
        let params = GrilleParams { density_scaling: 0.3, ..GrilleParams::default() };
        assert!(params.spacing_profile().is_some());
    }
}
