//! Random generation, crossover, and mutation of robot genomes.
//!
//! Every random draw of a run goes through a single [`GenomeRng`], so a
//! fixed seed reproduces the whole run.

use rand::prelude::*;

use crate::schema::{Direction, Genome, Room, RoomError};

/// Random number generator wrapper for genome and room operations.
pub struct GenomeRng {
    rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Independently seeded sub-source, for work split across threads.
    pub fn fork(&mut self) -> Self {
        Self::new(self.next_seed())
    }

    /// Generate a room whose cells are independent uniform draws in [0, 1).
    pub fn random_room(&mut self, width: usize, height: usize) -> Result<Room, RoomError> {
        let cells = (0..width * height)
            .map(|_| self.rng.r#gen::<f64>())
            .collect();
        Room::from_cells(width, height, cells)
    }

    /// Generate a genome of `length` uniformly drawn directions, `Still` included.
    pub fn random_genome(&mut self, length: usize) -> Genome {
        (0..length)
            .map(|_| self.pick(&Direction::ALL))
            .collect::<Vec<_>>()
            .into()
    }

    /// Uniform choice from a non-empty direction set.
    fn pick(&mut self, choices: &[Direction]) -> Direction {
        choices[self.rng.gen_range(0..choices.len())]
    }

    /// Uniform cutoff in `[0, length]`, both ends included.
    pub fn cutoff(&mut self, length: usize) -> usize {
        self.rng.gen_range(0..=length)
    }

    /// Single-point crossover at a random cutoff.
    ///
    /// Returns `(son, daughter, cutoff)` where the son takes the father's
    /// genes before the cutoff and the mother's after it, and the daughter
    /// the other way round.
    ///
    /// # Panics
    ///
    /// Panics if the parents differ in length.
    pub fn crossover(&mut self, father: &Genome, mother: &Genome) -> (Genome, Genome, usize) {
        assert_eq!(
            father.len(),
            mother.len(),
            "crossover parents must have equal length"
        );
        let cutoff = self.cutoff(father.len());

        let mut son = father.clone();
        let mut daughter = mother.clone();
        son[cutoff..].copy_from_slice(&mother[cutoff..]);
        daughter[cutoff..].copy_from_slice(&father[cutoff..]);

        (son, daughter, cutoff)
    }

    /// Replace each gene with probability `rate` by a random moving direction.
    pub fn mutate(&mut self, genome: &mut Genome, rate: f64) {
        for gene in genome.iter_mut() {
            if self.rng.r#gen::<f64>() < rate {
                *gene = self.pick(&Direction::MOVES);
            }
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Generate next u64 for seeding child RNGs.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.r#gen()
    }
}
