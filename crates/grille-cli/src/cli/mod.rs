//! CLI command implementations.
//!
//! This module contains the implementations for the CLI subcommands:
//! - `generate` - Generate a grille layout from flags
//! - `recipe` - Generate a grille layout from a YAML recipe
//! - `benchmark` - Time every center fill on one layout

pub mod common;
pub mod generate;
pub mod recipe;
pub mod benchmark;

pub use generate::cmd_generate;
pub use recipe::cmd_recipe;
pub use benchmark::cmd_benchmark;
