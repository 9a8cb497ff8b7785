//! Density and spacing adapters.
//!
//! Pure functions that turn a point's radial position, or a normalized
//! density knob in roughly [-1, 1], into a local spacing, hole size or
//! point count. Generators call these many times per point, so none of them
//! may have side effects.
//!
//! The density mappings differ per algorithm: linear, exponential,
//! power-law and piecewise.

use crate::error::{GrilleError, Result};
use crate::geometry::Point;

/// Smallest multiplier a radial spacing profile may produce.
const MIN_SPACING_SCALE: f64 = 0.1;

/// Position-dependent spacing override.
///
/// `spacing_at(x, y, base)` returns the spacing to use near `(x, y)` when the
/// nominal spacing is `base`. Any `Fn(f64, f64, f64) -> f64` closure works.
///
/// ## Rust Lesson #12: Blanket impls
///
/// `impl<F: Fn(..)> SpacingFn for F` makes every matching closure a
/// `SpacingFn` for free, while named strategies like [`RadialSpacing`] can
/// still implement the trait by hand.
pub trait SpacingFn {
    fn spacing_at(&self, x: f64, y: f64, base: f64) -> f64;
}

impl<F> SpacingFn for F
where
    F: Fn(f64, f64, f64) -> f64,
{
    #[inline]
    fn spacing_at(&self, x: f64, y: f64, base: f64) -> f64 {
        self(x, y, base)
    }
}

/// Shape of a radial scaling curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleType {
    #[default]
    Linear,
    Exponential,
}

impl ScaleType {
    pub fn all() -> &'static [ScaleType] {
        &[ScaleType::Linear, ScaleType::Exponential]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScaleType::Linear => "linear",
            ScaleType::Exponential => "exponential",
        }
    }

    pub fn from_name(name: &str) -> Result<ScaleType> {
        match name.to_lowercase().as_str() {
            "linear" | "lin" => Ok(ScaleType::Linear),
            "exponential" | "exp" => Ok(ScaleType::Exponential),
            _ => Err(GrilleError::UnknownScaleType(name.to_string())),
        }
    }
}

/// Radial scaling multiplier at `(x, y)` for a grille of `radius`.
///
/// With `d = |p| / radius`, linear gives `1 + s(1 - 2d)` and exponential
/// `exp(s(1 - 2d))`. Positive `scaling` enlarges toward the center and shrinks
/// toward the rim; the curve crosses 1 halfway out.
pub fn radial_scale(x: f64, y: f64, radius: f64, scaling: f64, scale_type: ScaleType) -> f64 {
    if scaling == 0.0 || radius <= 0.0 {
        return 1.0;
    }
    let d = Point::new(x, y).norm() / radius;
    let t = scaling * (1.0 - 2.0 * d);
    match scale_type {
        ScaleType::Linear => 1.0 + t,
        ScaleType::Exponential => t.exp(),
    }
}

/// Hole radius at `(x, y)` after radial size scaling. Never negative.
pub fn scaled_hole_radius(
    x: f64,
    y: f64,
    hole_radius: f64,
    radius: f64,
    scaling: f64,
    scale_type: ScaleType,
) -> f64 {
    (hole_radius * radial_scale(x, y, radius, scaling, scale_type)).max(0.0)
}

/// Spacing profile that follows the radial scaling curve.
///
/// Positive `scaling` loosens the center and tightens the rim; negative does
/// the opposite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialSpacing {
    pub radius: f64,
    pub scaling: f64,
    pub scale_type: ScaleType,
}

impl RadialSpacing {
    pub fn new(radius: f64, scaling: f64, scale_type: ScaleType) -> Self {
        Self { radius, scaling, scale_type }
    }
}

impl SpacingFn for RadialSpacing {
    fn spacing_at(&self, x: f64, y: f64, base: f64) -> f64 {
        let scale = radial_scale(x, y, self.radius, self.scaling, self.scale_type);
        base * scale.max(MIN_SPACING_SCALE)
    }
}

/// Ring/point spacing multiplier for a factor in roughly [-1, 1].
///
/// `f >= 0` grows linearly (`1 + 2f`); `f < 0` shrinks hyperbolically
/// (`1 / (1 + 0.5|f|)`) so the multiplier never reaches zero.
pub fn spacing_multiplier(factor: f64) -> f64 {
    if factor >= 0.0 {
        1.0 + 2.0 * factor
    } else {
        1.0 / (1.0 + 0.5 * factor.abs())
    }
}

/// Hex packing spacing multiple for a density factor.
///
/// 1.6 at zero, ramping linearly to 3.0 at -1 and down to 1.001 at +1. The
/// floor stays just above 1.0 so neighbours never sit exactly at the
/// touching distance.
pub fn hex_spacing_multiple(density: f64) -> f64 {
    const DEFAULT: f64 = 1.6;
    const SPARSEST: f64 = 3.0;
    const DENSEST: f64 = 1.001;

    let density = density.clamp(-1.0, 1.0);
    if density <= 0.0 {
        DEFAULT + (SPARSEST - DEFAULT) * density.abs()
    } else {
        (DEFAULT - (DEFAULT - DENSEST) * density).max(DENSEST)
    }
}

/// Power-law warp used by concentric rings.
///
/// The factor is halved, then negative values map through `-(|x|^0.7)` and
/// positive ones through `x^1.5`.
pub fn concentric_density_warp(density: f64) -> f64 {
    let scaled = density * 0.5;
    if scaled < 0.0 {
        -(-scaled).powf(0.7)
    } else {
        scaled.powf(1.5)
    }
}

/// Ring spacing for concentric fills: `base * (1 - warp(density))`.
pub fn concentric_ring_spacing(base: f64, density: f64) -> f64 {
    base * (1.0 - concentric_density_warp(density))
}

/// Exponential count target: `raw * 2^density`.
pub fn exponential_target(raw: f64, density: f64) -> f64 {
    raw * 2f64.powf(density)
}

/// Linear count target: `round(count * (1 + density))`, at least 1.
pub fn linear_target(count: usize, density: f64) -> usize {
    ((count as f64 * (1.0 + density)).round() as usize).max(1)
}
