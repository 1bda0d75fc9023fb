//! Evolution configuration and result types for robot search.
//!
//! This module provides types for configuring the generational genetic
//! algorithm and for the plain-data artifacts it hands back at the end of a
//! run (best robot per generation and the rooms it was scored on).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Genome, Room};

/// Top-level configuration for an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Room dimensions and count.
    #[serde(default)]
    pub rooms: RoomConfig,
    /// Population and generation settings.
    #[serde(default)]
    pub population: PopulationConfig,
    /// Extra genes beyond `width * height`.
    #[serde(default = "default_genome_margin")]
    pub genome_margin: usize,
    /// Tournament selection parameters.
    #[serde(default)]
    pub selection: SelectionConfig,
    /// Per-gene mutation probability (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            rooms: RoomConfig::default(),
            population: PopulationConfig::default(),
            genome_margin: default_genome_margin(),
            selection: SelectionConfig::default(),
            mutation_rate: default_mutation_rate(),
            random_seed: None,
        }
    }
}

fn default_genome_margin() -> usize {
    10
}
fn default_mutation_rate() -> f64 {
    0.005
}

impl EvolutionConfig {
    /// Number of genes in every robot of the run.
    #[inline]
    pub fn genome_length(&self) -> usize {
        self.rooms.width * self.rooms.height + self.genome_margin
    }
}

/// Room generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Grid width in cells.
    #[serde(default = "default_room_width")]
    pub width: usize,
    /// Grid height in cells.
    #[serde(default = "default_room_height")]
    pub height: usize,
    /// Number of rooms every robot is scored on.
    #[serde(default = "default_room_count")]
    pub count: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            width: default_room_width(),
            height: default_room_height(),
            count: default_room_count(),
        }
    }
}

fn default_room_width() -> usize {
    14
}
fn default_room_height() -> usize {
    8
}
fn default_room_count() -> usize {
    10
}

/// Population settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Robots per generation.
    #[serde(default = "default_population_size")]
    pub size: usize,
    /// Number of generations to run.
    #[serde(default = "default_generations")]
    pub generations: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_population_size(),
            generations: default_generations(),
        }
    }
}

fn default_population_size() -> usize {
    300
}
fn default_generations() -> usize {
    100
}

/// Tournament selection parameters.
///
/// Each round shuffles the population, splits it into buckets of
/// `bucket_size` and keeps the best `pick_n` robots of every bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    #[serde(default = "default_bucket_size")]
    pub bucket_size: usize,
    #[serde(default = "default_pick_n")]
    pub pick_n: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            rounds: default_rounds(),
            bucket_size: default_bucket_size(),
            pick_n: default_pick_n(),
        }
    }
}

fn default_rounds() -> usize {
    2
}
fn default_bucket_size() -> usize {
    4
}
fn default_pick_n() -> usize {
    2
}

impl SelectionConfig {
    /// Number of robots chosen from a population of `population` robots.
    pub fn output_len(&self, population: usize) -> usize {
        if self.bucket_size == 0 {
            return 0;
        }
        self.rounds * self.pick_n.min(self.bucket_size) * (population / self.bucket_size)
    }
}

// ============================================================================
// Progress and Results
// ============================================================================

/// Progress report emitted after every generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionProgress {
    /// Generation that was just evaluated (0-based).
    pub generation: usize,
    /// Total generations in the run.
    pub total_generations: usize,
    /// Score of the generation's best robot.
    pub best_score: f64,
    /// Mean score of the generation.
    pub avg_score: f64,
    /// Best score as a fraction of the attainable maximum.
    pub best_fraction: f64,
    /// `Still` genes in the generation's best robot.
    pub best_still_count: usize,
    /// Current phase.
    pub phase: EvolutionPhase,
}

/// Evolution history for plotting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EvolutionHistory {
    /// Best score per generation.
    pub best_score: Vec<f64>,
    /// Average score per generation.
    pub avg_score: Vec<f64>,
    /// `Still` genes in the best robot per generation.
    pub best_still_count: Vec<usize>,
}

/// Current phase of evolution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EvolutionPhase {
    /// Creating rooms and the initial population.
    #[default]
    Initializing,
    /// Scoring robots against every room.
    Evaluating,
    /// Tournament selection.
    Selecting,
    /// Crossover of selected parents.
    Reproducing,
    /// Mutating offspring.
    Mutating,
    /// Restoring the population size.
    Replenishing,
    /// All generations done.
    Complete,
}

/// Plain-data products of a run, handed to rendering/export collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunArtifacts {
    /// Best robot of every generation, in generation order.
    pub best_per_generation: Vec<Genome>,
    /// Rooms used for the whole run.
    pub rooms: Vec<Room>,
}

impl RunArtifacts {
    /// Write artifacts as pretty-printed JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ArtifactError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read artifacts written by [`RunArtifacts::save_json`].
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Final result of an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Best robots and rooms.
    pub artifacts: RunArtifacts,
    /// Statistics from the run.
    pub stats: EvolutionStats,
    /// Full history for analysis.
    pub history: EvolutionHistory,
}

/// Statistics from an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Total generations run.
    pub generations: usize,
    /// Total robot-room simulations performed.
    pub total_evaluations: u64,
    /// Best score seen in any generation.
    pub best_score: f64,
    /// Sum of every room's rewards.
    pub max_score: f64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Seed the run's random source was created from.
    pub random_seed: u64,
}

// ============================================================================
// Validation
// ============================================================================

/// Evolution configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionConfigError {
    #[error("Room dimensions (width, height) must be non-zero")]
    InvalidRoomDimensions,
    #[error("Room count must be non-zero")]
    NoRooms,
    #[error("Population size must be non-zero")]
    EmptyPopulation,
    #[error("Generation count must be non-zero")]
    NoGenerations,
    #[error("Selection rounds must be non-zero")]
    NoSelectionRounds,
    #[error("Bucket size {bucket_size} must be between 1 and the population size {population}")]
    InvalidBucketSize { bucket_size: usize, population: usize },
    #[error("Pick count {pick_n} must be between 1 and the bucket size {bucket_size}")]
    InvalidPickCount { pick_n: usize, bucket_size: usize },
    #[error("Mutation rate {0} must be within [0, 1]")]
    InvalidMutationRate(f64),
}

impl EvolutionConfig {
    /// Validate evolution configuration.
    pub fn validate(&self) -> Result<(), EvolutionConfigError> {
        if self.rooms.width == 0 || self.rooms.height == 0 {
            return Err(EvolutionConfigError::InvalidRoomDimensions);
        }
        if self.rooms.count == 0 {
            return Err(EvolutionConfigError::NoRooms);
        }
        if self.population.size == 0 {
            return Err(EvolutionConfigError::EmptyPopulation);
        }
        if self.population.generations == 0 {
            return Err(EvolutionConfigError::NoGenerations);
        }

        let selection = &self.selection;
        if selection.rounds == 0 {
            return Err(EvolutionConfigError::NoSelectionRounds);
        }
        if selection.bucket_size == 0 || selection.bucket_size > self.population.size {
            return Err(EvolutionConfigError::InvalidBucketSize {
                bucket_size: selection.bucket_size,
                population: self.population.size,
            });
        }
        if selection.pick_n == 0 || selection.pick_n > selection.bucket_size {
            return Err(EvolutionConfigError::InvalidPickCount {
                pick_n: selection.pick_n,
                bucket_size: selection.bucket_size,
            });
        }

        // NaN fails the range check too.
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EvolutionConfigError::InvalidMutationRate(self.mutation_rate));
        }

        Ok(())
    }
}

/// Artifact export errors.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
