//! Cleanbot - Genetic evolution of room-cleaning movement programs.
//!
//! This crate evolves fixed-length sequences of moves ("robots") that
//! collect as much reward as possible from 2D grids of values ("rooms").
//! Every visited cell is consumed, so good robots avoid revisiting.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Directions, genomes, rooms, configuration and run artifacts
//! - `compute`: Fitness simulation, selection, crossover, mutation and the
//!   generational loop
//!
//! # Example
//!
//! ```rust,no_run
//! use cleanbot::{EvolutionConfig, EvolutionEngine};
//!
//! let config = EvolutionConfig {
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut engine = EvolutionEngine::new(config).unwrap();
//! let result = engine.run();
//!
//! println!("Best score: {:.3} of {:.3}", result.stats.best_score, result.stats.max_score);
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{EvolutionEngine, FitnessEvaluator, GenomeRng};
pub use schema::{Direction, EvolutionConfig, Genome, Room, RunArtifacts};
