//! Benchmark command implementation.

use std::time::Instant;

use grille::{generate_layout, CenterFillAlgorithm, GrilleParams, OuterPattern};

use super::common::flag_value;
use super::generate::fail;

/// Execute the benchmark command.
///
/// Runs the same grille once per center fill and reports timing and the
/// resulting hole counts.
pub fn cmd_benchmark(args: &[String]) {
    let mut params = GrilleParams {
        radius: 100.0,
        hole_radius: 2.0,
        center_exclusion: 35.0,
        seed: 1,
        ..GrilleParams::default()
    };
    let mut runs: usize = 3;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-p" | "--pattern" => {
                let name: String = flag_value(args, &mut i, "--pattern");
                params.pattern = OuterPattern::from_name(&name).unwrap_or_else(|e| fail(&e));
            }
            "-r" | "--radius" => params.radius = flag_value(args, &mut i, "--radius"),
            "--hole" => params.hole_radius = flag_value(args, &mut i, "--hole"),
            "--exclusion" => params.center_exclusion = flag_value(args, &mut i, "--exclusion"),
            "--iterations" => params.max_iterations = flag_value(args, &mut i, "--iterations"),
            "--seed" => params.seed = flag_value(args, &mut i, "--seed"),
            "--runs" => runs = flag_value::<usize>(args, &mut i, "--runs").max(1),
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

    let start = Instant::now();
    let outer = params.pattern.generate(&params.pattern_config(None));
    let outer_ms = start.elapsed().as_secs_f64() * 1000.0;

    println!("═══════════════════════════════════════════════");
    println!("  GRILLE BENCHMARK: {}", params.pattern.name().to_uppercase());
    println!("═══════════════════════════════════════════════");
    println!("  Radius: {}  Hole: {}  Exclusion: {}", params.radius, params.hole_radius, params.center_exclusion);
    println!("  Outer holes: {} in {:.2}ms", outer.len(), outer_ms);
    println!("  Runs per fill: {}", runs);
    println!();
    println!("  {:14}  {:>8}  {:>10}  {:>6}", "Fill", "Holes", "Time(ms)", "Clean");
    println!("  {:14}  {:>8}  {:>10}  {:>6}", "----", "-----", "--------", "-----");

    let mut total_ms = 0.0;
    for &fill in CenterFillAlgorithm::all() {
        let params = GrilleParams { fill, ..params.clone() };

        let start = Instant::now();
        let mut layout = generate_layout(&params);
        for _ in 1..runs {
            layout = generate_layout(&params);
        }
        let ms = start.elapsed().as_secs_f64() * 1000.0 / runs as f64;
        total_ms += ms;

        let clean = if layout.stats().is_clean() { "✓" } else { "✗" };
        println!("  {:14}  {:>8}  {:>10.2}  {:>6}", fill.name(), layout.center.len(), ms, clean);
    }

    println!("  {:14}  {:>8}  {:>10}  {:>6}", "----", "-----", "--------", "-----");
    println!("  {:14}  {:>8}  {:>10.2}", "TOTAL", "", total_ms);
    println!("═══════════════════════════════════════════════");
    println!("  Times include the outer pattern.");
}

fn print_usage() {
    eprintln!("Usage: grille benchmark [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -p, --pattern <name>    Outer pattern (default: phyllotaxis)");
    eprintln!("  -r, --radius <mm>       Grille radius (default: 100)");
    eprintln!("  --hole <mm>             Hole radius (default: 2)");
    eprintln!("  --exclusion <mm>        Center fill radius (default: 35)");
    eprintln!("  --iterations <n>        Relaxation iterations (default: 150)");
    eprintln!("  --seed <n>              Random seed (default: 1)");
    eprintln!("  --runs <n>              Runs averaged per fill (default: 3)");
    eprintln!();
    eprintln!("Times every center fill on the same grille.");
}
