//! Generational search loop.

use std::time::Instant;

use log::{debug, info, trace};

use crate::schema::{
    Direction, EvolutionConfig, EvolutionConfigError, EvolutionHistory, EvolutionPhase,
    EvolutionProgress, EvolutionResult, EvolutionStats, Genome, Room, RunArtifacts,
};

use super::fitness::FitnessEvaluator;
use super::genome::GenomeRng;
use super::reproduction::{mutate, reproduce};
use super::selection::{ScoredGenome, best, tournament_selection};

/// Evolution engine that runs the search.
///
/// Rooms are generated once in [`EvolutionEngine::new`] and stay fixed for
/// the run. The population is replaced wholesale every generation.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    seed: u64,
    rng: GenomeRng,
    rooms: Vec<Room>,
    population: Vec<Genome>,
    best_per_generation: Vec<Genome>,
    history: EvolutionHistory,
    generation: usize,
    phase: EvolutionPhase,
    max_score: f64,
}

impl EvolutionEngine {
    /// Create a new evolution engine, generating the run's rooms and
    /// initial population.
    pub fn new(config: EvolutionConfig) -> Result<Self, EvolutionConfigError> {
        config.validate()?;

        let seed = config.random_seed.unwrap_or_else(rand::random);
        let mut rng = GenomeRng::new(seed);

        let mut rooms = Vec::with_capacity(config.rooms.count);
        for _ in 0..config.rooms.count {
            let room = rng
                .random_room(config.rooms.width, config.rooms.height)
                .map_err(|_| EvolutionConfigError::InvalidRoomDimensions)?;
            rooms.push(room);
        }
        let max_score = rooms.iter().map(Room::total_value).sum();

        let length = config.genome_length();
        let population = (0..config.population.size)
            .map(|_| rng.random_genome(length))
            .collect();

        debug!(
            "Initialized {} rooms of {}x{} and {} robots of length {} (seed {})",
            config.rooms.count,
            config.rooms.width,
            config.rooms.height,
            config.population.size,
            length,
            seed
        );

        Ok(Self {
            config,
            seed,
            rng,
            rooms,
            population,
            best_per_generation: Vec::new(),
            history: EvolutionHistory::default(),
            generation: 0,
            phase: EvolutionPhase::Initializing,
            max_score,
        })
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    pub fn phase(&self) -> EvolutionPhase {
        self.phase
    }

    /// Generations completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn is_complete(&self) -> bool {
        self.generation >= self.config.population.generations
    }

    fn enter(&mut self, phase: EvolutionPhase) {
        trace!("Generation {}: {:?}", self.generation, phase);
        self.phase = phase;
    }

    /// Score the current population against every room.
    fn evaluate_population(&self) -> Vec<ScoredGenome> {
        let evaluator = FitnessEvaluator::new(&self.rooms);
        let scores = evaluator.evaluate_population(&self.population);

        scores
            .into_iter()
            .zip(self.population.iter().cloned())
            .map(|(score, genome)| ScoredGenome::new(score, genome))
            .collect()
    }

    /// Run a single generation: evaluate, record the best, select,
    /// reproduce, mutate and replenish.
    ///
    /// Returns `None` once the configured number of generations has run.
    pub fn step_generation(&mut self) -> Option<EvolutionProgress> {
        if self.is_complete() {
            return None;
        }

        self.enter(EvolutionPhase::Evaluating);
        let scored = self.evaluate_population();

        // Validation guarantees a non-empty population.
        debug_assert!(!scored.is_empty());
        let top = best(&scored)?;
        let (best_score, best_genome) = (top.score, top.genome.clone());
        let avg_score = scored.iter().map(|entry| entry.score).sum::<f64>() / scored.len() as f64;
        let best_still_count = best_genome.count(Direction::Still);

        self.history.best_score.push(best_score);
        self.history.avg_score.push(avg_score);
        self.history.best_still_count.push(best_still_count);
        self.best_per_generation.push(best_genome);

        self.enter(EvolutionPhase::Selecting);
        let chosen = tournament_selection(&scored, &self.config.selection, &mut self.rng);

        self.enter(EvolutionPhase::Reproducing);
        let mut offspring = reproduce(&chosen, &mut self.rng);

        self.enter(EvolutionPhase::Mutating);
        mutate(&mut offspring, self.config.mutation_rate, &mut self.rng);

        self.enter(EvolutionPhase::Replenishing);
        self.replenish(offspring);

        let generation = self.generation;
        self.generation += 1;
        if self.is_complete() {
            self.phase = EvolutionPhase::Complete;
        }

        let progress = EvolutionProgress {
            generation,
            total_generations: self.config.population.generations,
            best_score,
            avg_score,
            best_fraction: if self.max_score > 0.0 {
                best_score / self.max_score
            } else {
                0.0
            },
            best_still_count,
            phase: self.phase,
        };

        debug!(
            "Generation {:3} - {:6.2}% - ({:02})",
            progress.generation,
            progress.best_fraction * 100.0,
            progress.best_still_count
        );

        Some(progress)
    }

    /// Install `offspring` as the next population, trimmed or padded to the
    /// configured size.
    ///
    /// Padding robots are fresh random genomes. They skip selection and are
    /// first scored in the next generation.
    fn replenish(&mut self, mut offspring: Vec<Genome>) {
        let size = self.config.population.size;
        let length = self.config.genome_length();

        offspring.truncate(size);
        let padding = size - offspring.len();
        if padding > 0 {
            trace!("Padding population with {} fresh robots", padding);
        }
        while offspring.len() < size {
            offspring.push(self.rng.random_genome(length));
        }

        self.population = offspring;
    }

    /// Run evolution with progress callback.
    pub fn run_with_callback<F>(&mut self, callback: F) -> EvolutionResult
    where
        F: Fn(&EvolutionProgress),
    {
        let start_time = Instant::now();

        while let Some(progress) = self.step_generation() {
            callback(&progress);
        }

        self.finish(start_time)
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> EvolutionResult {
        self.run_with_callback(|_| {})
    }

    fn finish(&self, start_time: Instant) -> EvolutionResult {
        let elapsed = start_time.elapsed().as_secs_f64();
        let total_evaluations = self.generation as u64
            * self.config.population.size as u64
            * self.rooms.len() as u64;
        let best_score = self
            .history
            .best_score
            .iter()
            .copied()
            .fold(0.0, f64::max);

        info!(
            "Finished {} generations: best {:.4} of {:.4} ({:.2}%) in {:.2}s",
            self.generation,
            best_score,
            self.max_score,
            if self.max_score > 0.0 {
                best_score / self.max_score * 100.0
            } else {
                0.0
            },
            elapsed
        );

        EvolutionResult {
            artifacts: RunArtifacts {
                best_per_generation: self.best_per_generation.clone(),
                rooms: self.rooms.clone(),
            },
            stats: EvolutionStats {
                generations: self.generation,
                total_evaluations,
                best_score,
                max_score: self.max_score,
                elapsed_seconds: elapsed,
                random_seed: self.seed,
            },
            history: self.history.clone(),
        }
    }
}
