//! Cleanbot CLI - Evolve cleaning robots from JSON configuration.

use std::fs;
use std::path::PathBuf;
use std::process;

use cleanbot::{
    EvolutionConfig, EvolutionEngine,
    compute::evolution::trace,
    schema::Direction,
};

fn print_usage(program: &str) {
    eprintln!("Usage: {} [config.json] [--out artifacts.json]", program);
    eprintln!();
    eprintln!("Evolve room-cleaning robots with a genetic algorithm.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json  Path to evolution configuration (default: built-in)");
    eprintln!("  --out PATH   Write best robots and rooms as JSON");
    eprintln!("  --example    Print the default configuration and exit");
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut out_path: Option<PathBuf> = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--example" => {
                print_example_config();
                return;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                return;
            }
            "--out" => match iter.next() {
                Some(path) => out_path = Some(PathBuf::from(path)),
                None => {
                    eprintln!("--out requires a path");
                    process::exit(1);
                }
            },
            path if config_path.is_none() => config_path = Some(PathBuf::from(path)),
            other => {
                eprintln!("Unexpected argument: {}", other);
                print_usage(&args[0]);
                process::exit(1);
            }
        }
    }

    // Load configuration
    let config: EvolutionConfig = match &config_path {
        Some(path) => {
            let config_str = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading config file: {}", e);
                process::exit(1);
            });
            serde_json::from_str(&config_str).unwrap_or_else(|e| {
                eprintln!("Error parsing config: {}", e);
                process::exit(1);
            })
        }
        None => EvolutionConfig::default(),
    };

    println!("Cleanbot Evolution");
    println!("==================");
    println!(
        "Rooms: {} of {}x{}",
        config.rooms.count, config.rooms.width, config.rooms.height
    );
    println!(
        "Population: {} robots of {} moves",
        config.population.size,
        config.genome_length()
    );
    println!("Generations: {}", config.population.generations);
    println!();

    let mut engine = EvolutionEngine::new(config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        process::exit(1);
    });

    let result = engine.run_with_callback(|progress| {
        println!(
            "Generation {:3} - {:6.2}% - ({:02})",
            progress.generation,
            progress.best_fraction * 100.0,
            progress.best_still_count
        );
    });

    println!();
    println!(
        "Best score: {:.4} of {:.4} ({:.2}%)",
        result.stats.best_score,
        result.stats.max_score,
        result.stats.best_score / result.stats.max_score.max(f64::MIN_POSITIVE) * 100.0
    );
    println!("Seed: {}", result.stats.random_seed);
    println!(
        "Time: {:.2}s ({} evaluations)",
        result.stats.elapsed_seconds, result.stats.total_evaluations
    );

    let artifacts = &result.artifacts;
    if let (Some(last), Some(room)) = (artifacts.best_per_generation.last(), artifacts.rooms.first())
    {
        let run = trace(last, room);
        let cleaned = run.room_at(run.len());
        let visited = cleaned.cells().iter().filter(|&&v| v == 0.0).count();
        println!(
            "Final robot on room 0: collected {:.4}, {} of {} cells clean, {} still moves",
            run.total(),
            visited,
            room.width() * room.height(),
            last.count(Direction::Still)
        );
    }

    if let Some(path) = out_path {
        if let Err(e) = artifacts.save_json(&path) {
            eprintln!("Error writing artifacts: {}", e);
            process::exit(1);
        }
        println!("Artifacts written to {}", path.display());
    }
}

fn print_example_config() {
    let config = EvolutionConfig::default();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
