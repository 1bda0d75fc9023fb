//! Compute module - Simulation and evolution of cleaning robots.

pub mod evolution;

pub use evolution::{EvolutionEngine, FitnessEvaluator, GenomeRng};
