//! Shared random number generation utilities.
//!
//! Center fills that sample or jitter draw from this generator so a layout is
//! reproducible from its seed.

use std::f64::consts::PI;

use crate::geometry::Point;

/// A fast, deterministic pseudo-random number generator.
///
/// Uses a Linear Congruential Generator (LCG) with parameters from
/// Numerical Recipes for good statistical properties while being
/// extremely fast.
///
/// # Example
/// ```
/// use grille::rng::Rng;
///
/// let mut rng = Rng::new(12345);
/// let value = rng.next_f64(); // Returns value in [0, 1)
/// ```
#[derive(Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    ///
    /// The same seed will always produce the same sequence of numbers.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { state: seed.wrapping_add(1) }
    }

    /// Get the next raw u64 value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self.state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Get a random f64 in the range [0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        // Use high bits for better distribution
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Get a random f64 in the range [min, max).
    #[inline]
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Get a random angle in [0, 2π).
    #[inline]
    pub fn next_angle(&mut self) -> f64 {
        self.next_f64() * PI * 2.0
    }

    /// Get a random index in the range [0, len).
    #[inline]
    pub fn next_index(&mut self, len: usize) -> usize {
        ((self.next_f64() * len as f64) as usize).min(len.saturating_sub(1))
    }

    /// Uniform sample from the annulus `min_r <= |p| < max_r`.
    ///
    /// Sampling the squared radius keeps the area density flat; sampling `r`
    /// directly would crowd the center.
    pub fn point_in_annulus(&mut self, min_r: f64, max_r: f64) -> Point {
        let r2 = self.next_range(min_r * min_r, max_r * max_r);
        Point::polar(r2.max(0.0).sqrt(), self.next_angle())
    }

    /// Uniform sample from the disk of `radius` at the origin.
    #[inline]
    pub fn point_in_disk(&mut self, radius: f64) -> Point {
        self.point_in_annulus(0.0, radius)
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut rng1 = Rng::new(1);
        let mut rng2 = Rng::new(2);

        let vals1: Vec<_> = (0..10).map(|_| rng1.next_u64()).collect();
        let vals2: Vec<_> = (0..10).map(|_| rng2.next_u64()).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn f64_in_range() {
        let mut rng = Rng::new(12345);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn index_in_bounds() {
        let mut rng = Rng::new(12345);
        for _ in 0..1000 {
            assert!(rng.next_index(10) < 10);
        }
    }

    #[test]
    fn annulus_samples_stay_in_ring() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let p = rng.point_in_annulus(5.0, 10.0);
            let r = p.norm();
            assert!(r >= 5.0 - 1e-9 && r <= 10.0 + 1e-9, "radius {} outside ring", r);
        }
    }

    #[test]
    fn disk_samples_are_area_uniform() {
        // Half the area of a unit disk lies inside r = 1/sqrt(2).
        let mut rng = Rng::new(99);
        let n = 20_000;
        let inner = (0..n)
            .filter(|_| rng.point_in_disk(1.0).norm() < std::f64::consts::FRAC_1_SQRT_2)
            .count();
        let frac = inner as f64 / n as f64;
        assert!((frac - 0.5).abs() < 0.02, "inner fraction {}", frac);
    }
}
