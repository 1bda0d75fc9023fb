//! Tournament selection over a scored population.

use std::cmp::Ordering;

use crate::schema::{Genome, SelectionConfig};

use super::genome::GenomeRng;

/// A genome paired with its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredGenome {
    pub score: f64,
    pub genome: Genome,
}

impl ScoredGenome {
    pub fn new(score: f64, genome: Genome) -> Self {
        Self { score, genome }
    }
}

/// Descending order on score only; genome contents never break ties.
#[inline]
pub fn by_score_descending(a: &ScoredGenome, b: &ScoredGenome) -> Ordering {
    b.score.total_cmp(&a.score)
}

/// Sort best-first. The sort is stable, so equal scores keep their order.
pub fn sort_descending(scored: &mut [ScoredGenome]) {
    scored.sort_by(by_score_descending);
}

/// First maximal entry in population order.
pub fn best(scored: &[ScoredGenome]) -> Option<&ScoredGenome> {
    scored
        .iter()
        .reduce(|best, candidate| {
            if by_score_descending(candidate, best) == Ordering::Less {
                candidate
            } else {
                best
            }
        })
}

/// Tournament selection.
///
/// Each of `config.rounds` rounds shuffles the population, cuts it into
/// contiguous buckets of `config.bucket_size` (a short trailing bucket is
/// dropped) and copies the `config.pick_n` best genomes of every bucket.
/// Output length is `rounds * pick_n * floor(len / bucket_size)`; a bucket
/// larger than the population yields nothing.
pub fn tournament_selection(
    scored: &[ScoredGenome],
    config: &SelectionConfig,
    rng: &mut GenomeRng,
) -> Vec<Genome> {
    let mut chosen = Vec::with_capacity(config.output_len(scored.len()));
    if config.bucket_size == 0 {
        return chosen;
    }

    let mut order: Vec<usize> = (0..scored.len()).collect();
    let mut bucket: Vec<&ScoredGenome> = Vec::with_capacity(config.bucket_size);

    for _ in 0..config.rounds {
        rng.shuffle(&mut order);

        for indices in order.chunks_exact(config.bucket_size) {
            bucket.clear();
            bucket.extend(indices.iter().map(|&i| &scored[i]));
            bucket.sort_by(|a, b| by_score_descending(a, b));

            chosen.extend(
                bucket
                    .iter()
                    .take(config.pick_n)
                    .map(|entry| entry.genome.clone()),
            );
        }
    }

    chosen
}
