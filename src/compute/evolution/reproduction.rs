//! Crossover and mutation of selected parents.

use crate::schema::Genome;

use super::genome::GenomeRng;

/// Single-point crossover over consecutive parent pairs.
///
/// Parents are consumed as `(parents[0], parents[1])`, `(parents[2],
/// parents[3])`, ... and each pair yields a son and a daughter. An odd
/// trailing parent is dropped.
///
/// # Panics
///
/// Panics if the two parents of a pair differ in length. Genomes of one run
/// all share the configured length.
pub fn reproduce(parents: &[Genome], rng: &mut GenomeRng) -> Vec<Genome> {
    let mut offspring = Vec::with_capacity(parents.len() / 2 * 2);

    for pair in parents.chunks_exact(2) {
        let (son, daughter, _) = rng.crossover(&pair[0], &pair[1]);
        offspring.push(son);
        offspring.push(daughter);
    }

    offspring
}

/// Mutate every offspring in place with per-gene probability `rate`.
pub fn mutate(offspring: &mut [Genome], rate: f64, rng: &mut GenomeRng) {
    if rate <= 0.0 {
        return;
    }
    for child in offspring.iter_mut() {
        rng.mutate(child, rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Direction;
    use proptest::prelude::*;

    #[test]
    fn test_pairs_and_odd_parent() {
        let mut rng = GenomeRng::new(42);
        let parents: Vec<Genome> = (0..5).map(|_| rng.random_genome(12)).collect();

        let even = reproduce(&parents[..4], &mut rng);
        assert_eq!(even.len(), 4);

        let odd = reproduce(&parents, &mut rng);
        assert_eq!(odd.len(), 4);

        assert!(reproduce(&parents[..1], &mut rng).is_empty());
        assert!(reproduce(&[], &mut rng).is_empty());
    }

    #[test]
    fn test_children_mix_their_own_pair() {
        let mut rng = GenomeRng::new(42);
        let parents = vec![
            Genome::new(vec![Direction::Left; 8]),
            Genome::new(vec![Direction::Right; 8]),
            Genome::new(vec![Direction::Up; 8]),
            Genome::new(vec![Direction::Down; 8]),
        ];
        let offspring = reproduce(&parents, &mut rng);

        for child in &offspring[..2] {
            assert_eq!(child.count(Direction::Left) + child.count(Direction::Right), 8);
        }
        for child in &offspring[2..] {
            assert_eq!(child.count(Direction::Up) + child.count(Direction::Down), 8);
        }
        // Son and daughter are complementary.
        assert_eq!(
            offspring[0].count(Direction::Left),
            offspring[1].count(Direction::Right)
        );
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_mismatched_pair_panics() {
        let mut rng = GenomeRng::new(42);
        let parents = vec![Genome::still(12), Genome::still(11)];
        reproduce(&parents, &mut rng);
    }

    #[test]
    fn test_mutate_zero_rate_is_noop() {
        let mut rng = GenomeRng::new(42);
        let original: Vec<Genome> = (0..10).map(|_| rng.random_genome(50)).collect();
        let mut offspring = original.clone();
        mutate(&mut offspring, 0.0, &mut rng);
        assert_eq!(offspring, original);
    }

    #[test]
    fn test_mutate_full_rate_removes_still() {
        let mut rng = GenomeRng::new(42);
        let mut offspring = vec![Genome::still(50); 10];
        mutate(&mut offspring, 1.0, &mut rng);
        for child in &offspring {
            assert_eq!(child.len(), 50);
            assert_eq!(child.count(Direction::Still), 0);
        }
    }

    proptest! {
        #[test]
        fn prop_offspring_count(count in 0usize..40, seed in any::<u64>()) {
            let mut rng = GenomeRng::new(seed);
            let parents: Vec<Genome> = (0..count).map(|_| rng.random_genome(10)).collect();
            let offspring = reproduce(&parents, &mut rng);
            let expected = if count % 2 == 0 { count } else { count - 1 };
            prop_assert_eq!(offspring.len(), expected);
            prop_assert!(offspring.iter().all(|child| child.len() == 10));
        }

        #[test]
        fn prop_mutation_keeps_length(rate in 0.0f64..=1.0, seed in any::<u64>()) {
            let mut rng = GenomeRng::new(seed);
            let mut offspring: Vec<Genome> = (0..4).map(|_| rng.random_genome(30)).collect();
            mutate(&mut offspring, rate, &mut rng);
            prop_assert!(offspring.iter().all(|child| child.len() == 30));
        }
    }
}
