//! leap_orbit — interactive entry point.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use leap_orbit::app::{run, AppConfig};
use orbit_control::OrbitConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG: &str = "leap_orbit=info,orbit_control=info";

#[derive(Parser, Debug)]
#[command(name = "leap_orbit", version, about = "Pinch to orbit and zoom a tabletop board")]
struct Cli {
    /// Start with defaults, no prompts.
    #[arg(long)]
    quick: bool,

    /// YAML controller configuration; skips the prompts.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter (overrides RUST_LOG), e.g. "orbit_control=debug".
    #[arg(long)]
    log: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let filter = match &cli.log {
        Some(f) => EnvFilter::new(f),
        None    => EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG.into()),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Leap Orbit — Tabletop Pinch Gesture Controller        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Keyboard/mouse simulation  (use --features leap for hardware)");
    println!();

    let cfg = if let Some(path) = &cli.config {
        match OrbitConfig::from_file(path) {
            Ok(orbit) => {
                info!(path = %path.display(), "loaded configuration");
                AppConfig { orbit, ..AppConfig::default() }
            }
            Err(e) => {
                eprintln!("Error: {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    } else if cli.quick {
        println!("  Quick-start: 300°/m, pitch ±70°, scale 0.05–2.0, 0.8 s reset hold\n");
        AppConfig::default()
    } else {
        configure_interactively()
    };

    println!();
    println!("  Opening visualizer window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure_interactively() -> AppConfig {
    let mut orbit = OrbitConfig::default();

    orbit.rotate.degrees_per_meter = parse_or(&read_line("  Rotation degrees per metre (default 300): "), 300.0)
        .clamp(10.0, 2000.0);

    let pitch = parse_or(&read_line("  Pitch limit in degrees (default 70): "), 70.0)
        .clamp(0.0, 89.0);
    orbit.rotate.pitch_min = -pitch;
    orbit.rotate.pitch_max =  pitch;

    orbit.zoom.scale_board = !matches!(
        read_line("  Two-hand pinch scales the board? (Y/n): ").trim(),
        "n" | "N" | "no"
    );
    if orbit.zoom.scale_board {
        let (min, max) = loop {
            let min = parse_or(&read_line("    Minimum scale (default 0.05): "), 0.05);
            let max = parse_or(&read_line("    Maximum scale (default 2.0): "), 2.0);
            if min > 0.0 && min <= max { break (min, max); }
            println!("    ⚠  need 0 < min ≤ max.");
        };
        orbit.zoom.min_scale = min;
        orbit.zoom.max_scale = max;
    }

    orbit.reset.hold_seconds = parse_or(&read_line("  Reset hold seconds (default 0.8): "), 0.8)
        .clamp(0.1, 10.0);

    AppConfig { orbit, ..AppConfig::default() }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}

/// Parsed prompt answer, or `default` when blank, malformed or non-finite.
fn parse_or(input: &str, default: f32) -> f32 {
    input.trim().parse::<f32>().ok().filter(|v| v.is_finite()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_answers_fall_back_to_default() {
        assert_eq!(parse_or("  450\n", 300.0), 450.0);
        assert_eq!(parse_or("\n", 300.0), 300.0);
        assert_eq!(parse_or("fast", 300.0), 300.0);
        for bad in ["nan", "NaN", "inf", "-inf", "infinity"] {
            assert_eq!(parse_or(bad, 0.8), 0.8);
        }
    }

    #[test]
    fn non_finite_answers_still_give_a_valid_config() {
        let pitch = parse_or("nan", 70.0).clamp(0.0, 89.0);
        let mut orbit = OrbitConfig::default();
        orbit.rotate.pitch_min = -pitch;
        orbit.rotate.pitch_max =  pitch;
        orbit.reset.hold_seconds = parse_or("inf", 0.8).clamp(0.1, 10.0);
        assert!(orbit.validate().is_ok());
    }
}
