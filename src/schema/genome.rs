//! Robot genome: a fixed-length movement program.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use super::Direction;

/// Ordered sequence of directions executed by a cleaning robot.
///
/// The length never changes once a genome is created; crossover and
/// mutation only rewrite genes in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genome {
    genes: Vec<Direction>,
}

impl Genome {
    pub fn new(genes: Vec<Direction>) -> Self {
        Self { genes }
    }

    /// Genome of `length` `Still` genes.
    pub fn still(length: usize) -> Self {
        Self {
            genes: vec![Direction::Still; length],
        }
    }

    /// Number of genes equal to `direction`.
    pub fn count(&self, direction: Direction) -> usize {
        self.genes.iter().filter(|&&d| d == direction).count()
    }

    pub fn into_inner(self) -> Vec<Direction> {
        self.genes
    }
}

impl Deref for Genome {
    type Target = [Direction];

    fn deref(&self) -> &[Direction] {
        &self.genes
    }
}

// Slice access only, so the length stays fixed.
impl DerefMut for Genome {
    fn deref_mut(&mut self) -> &mut [Direction] {
        &mut self.genes
    }
}

impl From<Vec<Direction>> for Genome {
    fn from(genes: Vec<Direction>) -> Self {
        Self::new(genes)
    }
}
