//! grille - speaker grille hole layouts
//!
//! Usage:
//!   grille generate [options]          Generate a layout as SVG or JSON
//!   grille recipe <recipe.yaml>        Generate a layout from a YAML recipe
//!   grille benchmark [options]         Time every center fill
//!   grille patterns                    List patterns and fills

use std::env;

use grille::patterns::phyllotaxis::SUGGESTED_ANGLES;
use grille::{CenterFillAlgorithm, OuterPattern, ScaleType};

mod cli;

use cli::{cmd_benchmark, cmd_generate, cmd_recipe};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("grille");

    if args.len() < 2 {
        print_usage(prog);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "generate" | "gen" => cmd_generate(&args[2..]),
        "recipe" => cmd_recipe(&args[2..]),
        "benchmark" => cmd_benchmark(&args[2..]),
        "patterns" => cmd_patterns(),
        "help" | "--help" | "-h" => print_usage(prog),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage(prog);
            std::process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("grille - hole layouts for speaker grilles");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} generate [options]           Generate a layout (see generate --help)", prog);
    eprintln!("  {} recipe <recipe.yaml> [-o out] Generate from a YAML recipe", prog);
    eprintln!("  {} benchmark [options]          Time every center fill", prog);
    eprintln!("  {} patterns                     List outer patterns and center fills", prog);
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} generate -p fermat --exclusion 40 -c poisson -o grille.svg", prog);
    eprintln!("  {} generate -r 80 --hole 2 --json --stats", prog);
    eprintln!();
    eprintln!("Set RUST_LOG=grille=debug for generator diagnostics.");
}

fn cmd_patterns() {
    println!("Outer patterns:");
    for pattern in OuterPattern::all() {
        println!("  {:14} {}", pattern.name(), pattern.description());
    }
    println!();
    println!("Center fills:");
    for fill in CenterFillAlgorithm::all() {
        println!("  {:14} {}", fill.name(), fill.description());
    }
    println!();
    println!("Scale types:");
    for scale in ScaleType::all() {
        println!("  {}", scale.name());
    }
    println!();
    let angles: Vec<String> = SUGGESTED_ANGLES.iter().map(|a| a.to_string()).collect();
    println!("Suggested divergence angles: {}", angles.join(", "));
}
