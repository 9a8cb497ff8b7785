//! Grille recipes: a whole layout and its styling in one YAML file.
//!
//! Every field is optional; missing ones take the same defaults as
//! `grille generate`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use grille::{generate_layout, CenterFillAlgorithm, GrilleParams, OuterPattern, ScaleType};

use super::common::{layout_to_json, layout_to_svg, pick_seed, write_output, SvgStyle};
use super::generate::fail;

/// A complete recipe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe name/title
    #[serde(default)]
    pub name: Option<String>,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub grille: GrilleSection,

    #[serde(default)]
    pub style: StyleSection,
}

/// Layout parameters, mirroring `GrilleParams`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrilleSection {
    pub radius: f64,
    pub hole_radius: f64,
    pub min_clearance: f64,
    pub center_exclusion: f64,
    pub center_hole: bool,
    pub pattern: String,
    pub fill: String,
    pub divergence_angle: f64,
    pub spacing_factor: f64,
    pub ring_spacing_factor: f64,
    pub point_spacing_factor: f64,
    pub concentric_spacing: Option<f64>,
    pub size_scaling: f64,
    pub density_scaling: f64,
    pub scale_type: String,
    pub density_factor: f64,
    pub force_strength: f64,
    pub max_iterations: usize,
    /// Fresh seed when unset
    pub seed: Option<u64>,
    pub allow_partial_holes: bool,
}

impl Default for GrilleSection {
    fn default() -> Self {
        let params = GrilleParams::default();
        Self {
            radius: params.radius,
            hole_radius: params.hole_radius,
            min_clearance: params.min_clearance,
            center_exclusion: params.center_exclusion,
            center_hole: params.center_hole,
            pattern: params.pattern.name().to_string(),
            fill: params.fill.name().to_string(),
            divergence_angle: params.divergence_angle,
            spacing_factor: params.spacing_factor,
            ring_spacing_factor: params.ring_spacing_factor,
            point_spacing_factor: params.point_spacing_factor,
            concentric_spacing: params.concentric_spacing,
            size_scaling: params.size_scaling,
            density_scaling: params.density_scaling,
            scale_type: params.scale_type.name().to_string(),
            density_factor: params.density_factor,
            force_strength: params.force_strength,
            max_iterations: params.max_iterations,
            seed: None,
            allow_partial_holes: params.allow_partial_holes,
        }
    }
}

impl GrilleSection {
    /// Resolve names into a parameter set. The seed is left at zero.
    pub fn to_params(&self) -> Result<GrilleParams, String> {
        Ok(GrilleParams {
            radius: self.radius,
            hole_radius: self.hole_radius,
            min_clearance: self.min_clearance,
            center_exclusion: self.center_exclusion,
            center_hole: self.center_hole,
            pattern: OuterPattern::from_name(&self.pattern).map_err(|e| e.to_string())?,
            fill: CenterFillAlgorithm::from_name(&self.fill).map_err(|e| e.to_string())?,
            divergence_angle: self.divergence_angle,
            spacing_factor: self.spacing_factor,
            ring_spacing_factor: self.ring_spacing_factor,
            point_spacing_factor: self.point_spacing_factor,
            concentric_spacing: self.concentric_spacing,
            size_scaling: self.size_scaling,
            density_scaling: self.density_scaling,
            scale_type: ScaleType::from_name(&self.scale_type).map_err(|e| e.to_string())?,
            density_factor: self.density_factor,
            force_strength: self.force_strength,
            max_iterations: self.max_iterations,
            seed: 0,
            allow_partial_holes: self.allow_partial_holes,
        })
    }
}

/// Output styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSection {
    pub colour: String,
    pub strokes: bool,
    pub invert: bool,
    pub marks: bool,
}

impl Default for StyleSection {
    fn default() -> Self {
        let style = SvgStyle::default();
        Self {
            colour: style.colour,
            strokes: style.strokes,
            invert: style.invert,
            marks: style.marks,
        }
    }
}

impl From<&StyleSection> for SvgStyle {
    fn from(section: &StyleSection) -> Self {
        SvgStyle {
            colour: section.colour.clone(),
            strokes: section.strokes,
            invert: section.invert,
            marks: section.marks,
        }
    }
}

impl Recipe {
    /// Load a recipe from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read recipe file: {}", e))?;
        Self::parse(&content)
    }

    /// Parse a recipe from YAML text.
    pub fn parse(content: &str) -> Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| format!("Failed to parse recipe YAML: {}", e))
    }
}

/// Execute the recipe command.
pub fn cmd_recipe(args: &[String]) {
    if args.is_empty() {
        print_usage();
        return;
    }

    let mut recipe_path: Option<String> = None;
    let mut output_path = "output.svg".to_string();
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = args[i].clone();
                }
            }
            "--json" => {
                json = true;
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "--example" => {
                print_example();
                return;
            }
            arg if !arg.starts_with('-') => {
                recipe_path = Some(arg.to_string());
            }
            _ => {}
        }
        i += 1;
    }

    let recipe_path = match recipe_path {
        Some(p) => p,
        None => {
            eprintln!("Error: No recipe file specified");
            print_usage();
            std::process::exit(1);
        }
    };

    eprintln!("Loading recipe: {}", recipe_path);

    let recipe = Recipe::load(&recipe_path).unwrap_or_else(|e| fail(&e));
    let mut params = recipe.grille.to_params().unwrap_or_else(|e| fail(&e));
    params.seed = pick_seed(recipe.grille.seed);

    if let Some(name) = &recipe.name {
        eprintln!("Recipe: {}", name);
    }
    eprintln!(
        "Grille: {} + {}, radius {}, hole {}",
        params.pattern.name(),
        params.fill.name(),
        params.radius,
        params.hole_radius
    );

    let layout = generate_layout(&params);
    eprintln!("Generated {} outer and {} center holes", layout.outer.len(), layout.center.len());

    let content = if json {
        layout_to_json(&layout, params.seed).unwrap_or_else(|e| fail(&e))
    } else {
        layout_to_svg(&layout, &SvgStyle::from(&recipe.style))
    };

    if let Err(e) = write_output(Some(output_path.as_str()), &content) {
        fail(&e);
    }
}

fn print_usage() {
    eprintln!("grille recipe - Generate a grille from a YAML recipe");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    grille recipe <recipe.yaml> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -o, --output <file>    Output file (- for stdout, default: output.svg)");
    eprintln!("    --json                 Write JSON point sets instead of SVG");
    eprintln!("    --example              Print an example recipe YAML");
    eprintln!("    -h, --help             Show this help");
    eprintln!();
    eprintln!("EXAMPLE:");
    eprintln!("    grille recipe woofer.yaml -o woofer.svg");
}

const EXAMPLE: &str = r##"# Example grille recipe
name: "8 inch woofer"
description: "Sunflower spiral with a hex-packed center"

grille:
  radius: 100           # millimetres
  hole_radius: 3
  min_clearance: 1
  center_exclusion: 30
  center_hole: true
  pattern: phyllotaxis
  fill: hex
  divergence_angle: 137.5
  density_factor: 0.2
  size_scaling: 0.2
  scale_type: linear
  seed: 42

style:
  colour: "#222222"
  strokes: false
  invert: false
  marks: true
"##;

fn print_example() {
    print!("{}", EXAMPLE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_recipe_parses() {
        let recipe = Recipe::parse(EXAMPLE).unwrap();
        assert_eq!(recipe.name.as_deref(), Some("8 inch woofer"));
        assert_eq!(recipe.grille.seed, Some(42));
        assert!(recipe.style.marks);

        let params = recipe.grille.to_params().unwrap();
        assert_eq!(params.pattern, OuterPattern::Phyllotaxis);
        assert_eq!(params.fill, CenterFillAlgorithm::Hex);
        assert_eq!(params.center_exclusion, 30.0);
        // Unset fields keep the generate defaults
        assert_eq!(params.max_iterations, GrilleParams::default().max_iterations);
    }

    #[test]
    fn empty_recipe_is_the_default_grille() {
        let recipe = Recipe::parse("{}").unwrap();
        let params = recipe.grille.to_params().unwrap();
        assert_eq!(params, GrilleParams::default());
    }

    #[test]
    fn unknown_names_are_reported() {
        let recipe = Recipe::parse("grille:\n  fill: lloyd\n").unwrap();
        let err = recipe.grille.to_params().unwrap_err();
        assert!(err.contains("lloyd"));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(Recipe::parse("grille: [1, 2").is_err());
    }
}
