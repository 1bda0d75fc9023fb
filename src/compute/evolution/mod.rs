//! Evolutionary search for room-cleaning robots.
//!
//! # Overview
//!
//! The evolutionary search system consists of:
//!
//! - **Genome Operations** (`genome`): Seeded random source, room and genome
//!   generation, crossover, and mutation
//! - **Fitness** (`fitness`): Simulating a robot over one or more rooms
//! - **Selection** (`selection`): Tournament selection over scored robots
//! - **Reproduction** (`reproduction`): Pairwise crossover and bulk mutation
//! - **Search** (`search`): The generational loop
//!
//! # Example
//!
//! ```rust,no_run
//! use cleanbot::compute::evolution::EvolutionEngine;
//! use cleanbot::schema::EvolutionConfig;
//!
//! let config = EvolutionConfig {
//!     random_seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let mut engine = EvolutionEngine::new(config).expect("valid config");
//! let result = engine.run_with_callback(|progress| {
//!     println!("Generation {}: best score = {:.3}",
//!         progress.generation, progress.best_score);
//! });
//!
//! println!("Best robots recorded: {}", result.artifacts.best_per_generation.len());
//! ```

mod fitness;
mod genome;
mod reproduction;
mod search;
mod selection;

pub use fitness::{CleaningTrace, FitnessEvaluator, score, score_over_rooms, trace};
pub use genome::GenomeRng;
pub use reproduction::{mutate, reproduce};
pub use search::EvolutionEngine;
pub use selection::{
    ScoredGenome, best, by_score_descending, sort_descending, tournament_selection,
};
