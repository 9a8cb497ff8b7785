//! # grille
//!
//! Hole layouts for speaker grilles: non-overlapping points inside a disk.
//!
//! An outer pattern (spiral, rings or hex lattice) covers the disk outside
//! an optional center exclusion; a center fill then packs the excluded
//! middle while keeping clear of the outer points around it.
//!
//! ```
//! use grille::{generate_layout, GrilleParams};
//!
//! let params = GrilleParams { radius: 60.0, hole_radius: 2.0, center_exclusion: 15.0, ..Default::default() };
//! let layout = generate_layout(&params);
//! assert!(layout.points().all(|p| p.is_within(60.0)));
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Every module has to be declared explicitly.

pub mod analysis;
pub mod center;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod patterns;
pub mod rng;
pub mod spacing;

// Re-export common types at crate root for convenience.
pub use analysis::LayoutStats;
pub use center::{generate_center_fill, CenterFillAlgorithm, CenterFillConfig};
pub use error::{GrilleError, Result};
pub use geometry::Point;
pub use layout::{generate_layout, obstacle_ring, GrilleParams, Hole, Layout};
pub use patterns::{generate_outer_pattern, OuterPattern, PatternConfig};
pub use spacing::{RadialSpacing, ScaleType, SpacingFn};
