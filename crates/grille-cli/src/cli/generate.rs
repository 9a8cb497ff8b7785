//! Generate command implementation.

use std::time::Instant;

use grille::patterns::optimal_ring_spacing;
use grille::{generate_layout, CenterFillAlgorithm, GrilleParams, OuterPattern, ScaleType};

use super::common::{
    flag_value, layout_to_json, layout_to_svg, pick_seed, print_stats, write_output,
    OutputFormat, SvgStyle,
};

/// Execute the generate command.
pub fn cmd_generate(args: &[String]) {
    let mut params = GrilleParams::default();
    let mut seed: Option<u64> = None;
    let mut output_path: Option<String> = None;
    let mut format = OutputFormat::Svg;
    let mut style = SvgStyle::default();
    let mut show_stats = false;
    let mut auto_ring_spacing = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-p" | "--pattern" => {
                let name: String = flag_value(args, &mut i, "--pattern");
                params.pattern = OuterPattern::from_name(&name).unwrap_or_else(|e| fail(&e));
            }
            "-c" | "--center" => {
                let name: String = flag_value(args, &mut i, "--center");
                params.fill = CenterFillAlgorithm::from_name(&name).unwrap_or_else(|e| fail(&e));
            }
            "-r" | "--radius" => params.radius = flag_value(args, &mut i, "--radius"),
            "--hole" => params.hole_radius = flag_value(args, &mut i, "--hole"),
            "--clearance" => params.min_clearance = flag_value(args, &mut i, "--clearance"),
            "--exclusion" => params.center_exclusion = flag_value(args, &mut i, "--exclusion"),
            "--center-hole" => params.center_hole = true,
            "-a" | "--angle" => params.divergence_angle = flag_value(args, &mut i, "--angle"),
            "--spacing-factor" => {
                params.spacing_factor = flag_value(args, &mut i, "--spacing-factor")
            }
            "--ring-factor" => {
                params.ring_spacing_factor = flag_value(args, &mut i, "--ring-factor")
            }
            "--point-factor" => {
                params.point_spacing_factor = flag_value(args, &mut i, "--point-factor")
            }
            "--ring-spacing" => {
                let raw: String = flag_value(args, &mut i, "--ring-spacing");
                auto_ring_spacing = raw == "auto";
                params.concentric_spacing = if auto_ring_spacing {
                    None
                } else {
                    Some(raw.parse().unwrap_or_else(|_| {
                        eprintln!("Error: invalid value for --ring-spacing: {}", raw);
                        std::process::exit(1);
                    }))
                };
            }
            "-d" | "--density" => params.density_factor = flag_value(args, &mut i, "--density"),
            "--force" => params.force_strength = flag_value(args, &mut i, "--force"),
            "--iterations" => params.max_iterations = flag_value(args, &mut i, "--iterations"),
            "--seed" => seed = Some(flag_value(args, &mut i, "--seed")),
            "--scaling" => params.size_scaling = flag_value(args, &mut i, "--scaling"),
            "--density-scaling" => {
                params.density_scaling = flag_value(args, &mut i, "--density-scaling")
            }
            "--scale-type" => {
                let name: String = flag_value(args, &mut i, "--scale-type");
                params.scale_type = ScaleType::from_name(&name).unwrap_or_else(|e| fail(&e));
            }
            "--partial" => params.allow_partial_holes = true,
            "-o" | "--output" => output_path = Some(flag_value(args, &mut i, "--output")),
            "--json" => format = OutputFormat::Json,
            "--stats" => show_stats = true,
            "--colour" | "--color" => style.colour = flag_value(args, &mut i, "--colour"),
            "--strokes" => style.strokes = true,
            "--invert" => style.invert = true,
            "--marks" => style.marks = true,
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // Hole size and clearance may come after the flag
    if auto_ring_spacing {
        params.concentric_spacing = Some(optimal_ring_spacing(params.hole_radius, params.min_clearance));
    }
    params.seed = pick_seed(seed);

    let start = Instant::now();
    let layout = generate_layout(&params);
    log::info!(
        "generated {} holes in {:.1}ms",
        layout.outer.len() + layout.center.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let stats = layout.stats();
    if show_stats {
        print_stats(&stats);
    }
    if !stats.is_clean() {
        eprintln!(
            "Warning: {} spacing violations (outer {}, center {}, seam {})",
            stats.violations(),
            stats.outer_overlaps,
            stats.center_overlaps,
            stats.seam_conflicts
        );
    }

    let content = match format {
        OutputFormat::Svg => layout_to_svg(&layout, &style),
        OutputFormat::Json => layout_to_json(&layout, params.seed).unwrap_or_else(|e| fail(&e)),
    };

    if let Err(e) = write_output(output_path.as_deref(), &content) {
        fail(&e);
    }
}

/// Report an error and exit.
pub(crate) fn fail(err: &dyn std::fmt::Display) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

fn print_usage() {
    eprintln!("Usage: grille generate [options]");
    eprintln!();
    eprintln!("Layout:");
    eprintln!("  -p, --pattern <name>     Outer pattern (default: phyllotaxis)");
    eprintln!("  -c, --center <name>      Center fill (default: force)");
    eprintln!("  -r, --radius <mm>        Grille radius (default: 200)");
    eprintln!("  --hole <mm>              Hole radius (default: 6)");
    eprintln!("  --clearance <mm>         Minimum gap between holes (default: 1)");
    eprintln!("  --exclusion <mm>         Center fill radius, 0 for none (default: 0)");
    eprintln!("  --center-hole            Put a hole at the exact center");
    eprintln!("  -a, --angle <deg>        Spiral divergence angle (default: 137.5)");
    eprintln!("  --spacing-factor <n>     Spiral spacing and concentric base spacing (default: 0)");
    eprintln!("  --ring-factor <n>        Concentric ring spacing curve, -1..1 (default: 0)");
    eprintln!("  --point-factor <n>       Concentric point spacing curve, -1..1 (default: 0)");
    eprintln!("  --ring-spacing <mm|auto> Fixed concentric ring spacing, replacing --ring-factor;");
    eprintln!("                           auto is 1.1 x (hole diameter + clearance)");
    eprintln!("  -d, --density <n>        Center fill density, -1..1 (default: 0)");
    eprintln!("  --force <n>              Adaptive force strength (default: 1)");
    eprintln!("  --iterations <n>         Relaxation iterations (default: 150)");
    eprintln!("  --seed <n>               Random seed (default: fresh, printed to stderr)");
    eprintln!("  --scaling <n>            Hole size scaling toward the rim (default: 0)");
    eprintln!("  --density-scaling <n>    Outer spacing scaling toward the rim (default: 0)");
    eprintln!("  --scale-type <name>      linear or exponential (default: linear)");
    eprintln!("  --partial                Keep holes that cross the outer edge");
    eprintln!();
    eprintln!("Output:");
    eprintln!("  -o, --output <file>      Output file (- for stdout, default: stdout)");
    eprintln!("  --json                   JSON point sets instead of SVG");
    eprintln!("  --stats                  Print spacing measurements to stderr");
    eprintln!("  --colour <colour>        Hole colour (default: black)");
    eprintln!("  --strokes                Outline holes instead of filling them");
    eprintln!("  --invert                 Solid disk with white holes");
    eprintln!("  --marks                  Draw the outer circle and a cross-hair");
}
