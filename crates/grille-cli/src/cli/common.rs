//! Common utilities shared across CLI commands.

use std::fs;
use std::str::FromStr;

use serde::Serialize;

use grille::{Layout, LayoutStats, Point};

/// Output format for generated layouts.
#[derive(Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Svg,
    Json,
}

/// How holes are drawn in SVG output.
#[derive(Debug, Clone)]
pub struct SvgStyle {
    /// Hole colour (background colour when inverted)
    pub colour: String,
    /// Outline holes instead of filling them
    pub strokes: bool,
    /// Solid disk with holes knocked out in white
    pub invert: bool,
    /// Outer circle and cross-hair for lining up a drill template
    pub marks: bool,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            colour: "black".to_string(),
            strokes: false,
            invert: false,
            marks: false,
        }
    }
}

const STROKE_WIDTH: f64 = 0.5;

/// Read the value after a flag, exiting with a message when it is missing
/// or doesn't parse.
pub fn flag_value<T: FromStr>(args: &[String], i: &mut usize, flag: &str) -> T {
    *i += 1;
    let Some(raw) = args.get(*i) else {
        eprintln!("Error: {} needs a value", flag);
        std::process::exit(1);
    };
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Error: invalid value for {}: {}", flag, raw);
        std::process::exit(1);
    })
}

/// Fresh seed for a run without `--seed`, reported so the layout can be
/// reproduced.
pub fn pick_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        let seed = rand::random::<u64>();
        eprintln!("Seed: {}", seed);
        seed
    })
}

/// Convert a layout to SVG output (one `<circle>` per hole).
///
/// The view box is centred on the grille: `-r -r 2r 2r`.
pub fn layout_to_svg(layout: &Layout, style: &SvgStyle) -> String {
    let r = layout.radius;
    let (hole_colour, mark_colour) = if style.invert {
        ("white", "white")
    } else {
        (style.colour.as_str(), style.colour.as_str())
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.3} {:.3} {:.3} {:.3}">
"#,
        -r, -r, 2.0 * r, 2.0 * r
    ));

    if style.invert {
        svg.push_str(&format!(
            "<rect x=\"{:.3}\" y=\"{:.3}\" width=\"{:.3}\" height=\"{:.3}\" fill=\"{}\"/>\n",
            -r, -r, 2.0 * r, 2.0 * r, style.colour
        ));
    }

    if style.strokes {
        svg.push_str(&format!(
            "<g id=\"holes\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\">\n",
            hole_colour, STROKE_WIDTH
        ));
    } else {
        svg.push_str(&format!("<g id=\"holes\" fill=\"{}\">\n", hole_colour));
    }
    for hole in layout.holes() {
        svg.push_str(&format!(
            "  <circle cx=\"{:.3}\" cy=\"{:.3}\" r=\"{:.3}\"/>\n",
            hole.center.x, hole.center.y, hole.radius
        ));
    }
    svg.push_str("</g>\n");

    if style.marks {
        svg.push_str(&format!(
            "<g id=\"marks\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\">\n",
            mark_colour, STROKE_WIDTH
        ));
        svg.push_str(&format!("  <circle cx=\"0\" cy=\"0\" r=\"{:.3}\"/>\n", r));
        svg.push_str(&format!(
            "  <line x1=\"{:.3}\" y1=\"0\" x2=\"{:.3}\" y2=\"0\"/>\n",
            -r, r
        ));
        svg.push_str(&format!(
            "  <line x1=\"0\" y1=\"{:.3}\" x2=\"0\" y2=\"{:.3}\"/>\n",
            -r, r
        ));
        svg.push_str("</g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

/// A point in JSON output format.
#[derive(Serialize)]
struct JsonPoint {
    x: f64,
    y: f64,
}

impl From<&Point> for JsonPoint {
    fn from(p: &Point) -> Self {
        JsonPoint { x: p.x, y: p.y }
    }
}

/// Layout measurements in JSON output format.
#[derive(Serialize)]
pub struct JsonStats {
    outer_count: usize,
    center_count: usize,
    min_distance: Option<f64>,
    outer_overlaps: usize,
    center_overlaps: usize,
    seam_conflicts: usize,
    max_radius: f64,
    clean: bool,
}

impl From<&LayoutStats> for JsonStats {
    fn from(stats: &LayoutStats) -> Self {
        JsonStats {
            outer_count: stats.outer_count,
            center_count: stats.center_count,
            min_distance: stats.min_distance,
            outer_overlaps: stats.outer_overlaps,
            center_overlaps: stats.center_overlaps,
            seam_conflicts: stats.seam_conflicts,
            max_radius: stats.max_radius,
            clean: stats.is_clean(),
        }
    }
}

/// JSON output: both point sets plus their measurements.
#[derive(Serialize)]
struct JsonLayout {
    radius: f64,
    hole_radius: f64,
    seed: u64,
    outer: Vec<JsonPoint>,
    center: Vec<JsonPoint>,
    stats: JsonStats,
}

/// Convert a layout to pretty-printed JSON.
pub fn layout_to_json(layout: &Layout, seed: u64) -> Result<String, String> {
    let output = JsonLayout {
        radius: layout.radius,
        hole_radius: layout.hole_radius,
        seed,
        outer: layout.outer.iter().map(JsonPoint::from).collect(),
        center: layout.center.iter().map(JsonPoint::from).collect(),
        stats: JsonStats::from(&layout.stats()),
    };
    serde_json::to_string_pretty(&output).map_err(|e| format!("Failed to serialize layout: {}", e))
}

/// Print layout measurements to stderr.
pub fn print_stats(stats: &LayoutStats) {
    eprintln!("Outer holes:     {}", stats.outer_count);
    eprintln!("Center holes:    {}", stats.center_count);
    match stats.min_distance {
        Some(d) => eprintln!("Min distance:    {:.3}", d),
        None => eprintln!("Min distance:    -"),
    }
    eprintln!("Outer overlaps:  {}", stats.outer_overlaps);
    eprintln!("Center overlaps: {}", stats.center_overlaps);
    eprintln!("Seam conflicts:  {}", stats.seam_conflicts);
    eprintln!("Max radius:      {:.3}", stats.max_radius);
}

/// Write output to a file, or stdout for `None` / `-`.
pub fn write_output(path: Option<&str>, content: &str) -> Result<(), String> {
    match path {
        None | Some("-") => {
            print!("{}", content);
            Ok(())
        }
        Some(path) => {
            fs::write(path, content).map_err(|e| format!("Failed to write {}: {}", path, e))?;
            eprintln!("Wrote: {}", path);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grille::{generate_layout, GrilleParams};

    fn small_layout() -> Layout {
        let params = GrilleParams { radius: 30.0, hole_radius: 2.0, ..GrilleParams::default() };
        generate_layout(&params)
    }

    #[test]
    fn svg_has_one_circle_per_hole() {
        let layout = small_layout();
        let svg = layout_to_svg(&layout, &SvgStyle::default());
        assert!(svg.contains("viewBox=\"-30.000 -30.000 60.000 60.000\""));
        assert_eq!(svg.matches("<circle").count(), layout.holes().len());
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn marks_and_inversion() {
        let layout = small_layout();
        let style = SvgStyle { invert: true, marks: true, ..SvgStyle::default() };
        let svg = layout_to_svg(&layout, &style);
        assert!(svg.contains("<rect"));
        assert_eq!(svg.matches("<line").count(), 2);
        assert_eq!(svg.matches("<circle").count(), layout.holes().len() + 1);
        assert!(svg.contains("fill=\"white\""));
    }

    #[test]
    fn strokes_draw_outlines() {
        let layout = small_layout();
        let style = SvgStyle { strokes: true, colour: "#336699".to_string(), ..SvgStyle::default() };
        let svg = layout_to_svg(&layout, &style);
        assert!(svg.contains("fill=\"none\" stroke=\"#336699\""));
    }

    #[test]
    fn json_carries_both_point_sets() {
        let layout = small_layout();
        let json = layout_to_json(&layout, 5).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["outer"].as_array().unwrap().len(), layout.outer.len());
        assert_eq!(value["center"].as_array().unwrap().len(), 0);
        assert_eq!(value["seed"], 5);
        assert_eq!(value["stats"]["outer_count"], layout.outer.len());
    }
}
