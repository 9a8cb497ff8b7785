//! Core geometry types for grille.
//!
//! Every layout lives in a plane centered on the grille's origin, so most
//! predicates here are "distance from origin" checks against a disk or an
//! annulus.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! `#[derive(Debug, Clone, Copy, PartialEq)]` gives a plain-old-data type:
//! printable with `{:?}`, copied implicitly (no `.clone()` noise when passing
//! points around), and comparable with `==`.

/// A 2D point, in the same units as the grille radius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The grille center.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` along `angle` (radians) from the origin.
    #[inline]
    pub fn polar(radius: f64, angle: f64) -> Self {
        Self::new(radius * angle.cos(), radius * angle.sin())
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Squared distance, for comparisons that don't need the root.
    #[inline]
    pub fn distance_sq(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Distance from the origin.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// True when the point lies inside (or on) the disk of `radius` at the origin.
    #[inline]
    pub fn is_within(&self, radius: f64) -> bool {
        self.norm_sq() <= radius * radius
    }

    /// True when `inner <= |p| <= outer`.
    #[inline]
    pub fn is_within_annulus(&self, inner: f64, outer: f64) -> bool {
        let d = self.norm_sq();
        d >= inner * inner && d <= outer * outer
    }

    /// Scale the point toward (or away from) the origin so `|p| == radius`.
    ///
    /// The origin itself has no direction and is returned unchanged.
    #[inline]
    pub fn with_norm(&self, radius: f64) -> Point {
        let n = self.norm();
        if n == 0.0 {
            return *self;
        }
        let scale = radius / n;
        Point::new(self.x * scale, self.y * scale)
    }

    /// True if any of `others` is strictly closer than `min_dist`.
    #[inline]
    pub fn conflicts_with(&self, others: &[Point], min_dist: f64) -> bool {
        let min_sq = min_dist * min_dist;
        others.iter().any(|o| self.distance_sq(*o) < min_sq)
    }
}

/// Center-to-center distance two holes need: one diameter plus clearance.
#[inline]
pub fn min_spacing(hole_radius: f64, clearance: f64) -> f64 {
    hole_radius * 2.0 + clearance
}

/// Area of a disk.
#[inline]
pub fn disk_area(radius: f64) -> f64 {
    std::f64::consts::PI * radius * radius
}

/// Area of the ring between `inner` and `outer`.
#[inline]
pub fn annulus_area(inner: f64, outer: f64) -> f64 {
    disk_area(outer) - disk_area(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.distance(p2), 5.0); // 3-4-5 triangle
        assert_eq!(p1.distance_sq(p2), 25.0);
    }

    #[test]
    fn containment() {
        let p = Point::new(3.0, 4.0);
        assert!(p.is_within(5.0));
        assert!(!p.is_within(4.99));
        assert!(p.is_within_annulus(4.0, 6.0));
        assert!(!p.is_within_annulus(5.5, 6.0));
    }

    #[test]
    fn with_norm_rescales() {
        let p = Point::new(3.0, 4.0).with_norm(10.0);
        assert!((p.x - 6.0).abs() < 1e-12);
        assert!((p.y - 8.0).abs() < 1e-12);
        assert_eq!(Point::ORIGIN.with_norm(3.0), Point::ORIGIN);
    }

    #[test]
    fn polar_round_trip() {
        let p = Point::polar(2.0, std::f64::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn conflicts() {
        let others = [Point::new(10.0, 0.0), Point::new(0.0, 3.0)];
        assert!(Point::ORIGIN.conflicts_with(&others, 3.5));
        assert!(!Point::ORIGIN.conflicts_with(&others, 3.0));
        assert!(!Point::ORIGIN.conflicts_with(&[], 100.0));
    }

    #[test]
    fn spacing_and_areas() {
        assert_eq!(min_spacing(2.0, 1.0), 5.0);
        assert!((annulus_area(1.0, 2.0) - 3.0 * std::f64::consts::PI).abs() < 1e-12);
    }
}
