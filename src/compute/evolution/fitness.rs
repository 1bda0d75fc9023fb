//! Fitness evaluation: simulate a robot cleaning one or more rooms.
//!
//! A robot starts at the room's center cell. For every gene it collects the
//! current cell, zeroes it, then steps (clamped at the walls). One final
//! collection happens at the landing cell, so a genome of length `L` visits
//! `L + 1` cells. Rooms are never modified; each simulation works on its own
//! copy.

use rayon::prelude::*;

use crate::schema::{Genome, Room};

/// Score a genome on a single room.
pub fn score(genome: &Genome, room: &Room) -> f64 {
    let mut working = room.clone();
    let (width, height) = (room.width(), room.height());
    let (mut x, mut y) = room.center();
    let mut total = 0.0;

    for &direction in genome.iter() {
        total += working.take(x, y);
        (x, y) = direction.step(x, y, width, height);
    }
    total += working.take(x, y);

    total
}

/// Score a genome on every room and sum the results.
pub fn score_over_rooms(genome: &Genome, rooms: &[Room]) -> f64 {
    rooms.iter().map(|room| score(genome, room)).sum()
}

/// Evaluates populations against a fixed set of rooms.
pub struct FitnessEvaluator<'a> {
    rooms: &'a [Room],
}

impl<'a> FitnessEvaluator<'a> {
    /// Create a new fitness evaluator.
    pub fn new(rooms: &'a [Room]) -> Self {
        Self { rooms }
    }

    /// Score one genome against every room.
    pub fn evaluate(&self, genome: &Genome) -> f64 {
        score_over_rooms(genome, self.rooms)
    }

    /// Score every genome, preserving population order.
    ///
    /// Scoring draws no randomness, so the parallel result is identical to a
    /// sequential one.
    pub fn evaluate_population(&self, population: &[Genome]) -> Vec<f64> {
        population
            .par_iter()
            .map(|genome| self.evaluate(genome))
            .collect()
    }

    /// Highest score any robot could reach on these rooms.
    pub fn max_score(&self) -> f64 {
        self.rooms.iter().map(Room::total_value).sum()
    }
}

/// Step-by-step record of one robot cleaning one room.
///
/// This is the plain data a renderer needs to draw every frame of a run.
#[derive(Debug, Clone)]
pub struct CleaningTrace {
    /// Room before cleaning starts.
    pub initial: Room,
    /// Cell visited at each collection, `genome.len() + 1` entries.
    pub positions: Vec<(usize, usize)>,
    /// Reward collected at each visit.
    pub collected: Vec<f64>,
}

impl CleaningTrace {
    /// Total collected; equal to [`score`] for the same robot and room.
    pub fn total(&self) -> f64 {
        self.collected.iter().sum()
    }

    /// Number of collections (frames).
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Room state after the first `step` collections.
    ///
    /// `room_at(0)` is the untouched room and `room_at(self.len())` the
    /// final one. Steps past the end clamp to the final state.
    pub fn room_at(&self, step: usize) -> Room {
        let mut room = self.initial.clone();
        for &(x, y) in self.positions.iter().take(step) {
            room.take(x, y);
        }
        room
    }
}

/// Record the full cleaning run of `genome` in `room`.
pub fn trace(genome: &Genome, room: &Room) -> CleaningTrace {
    let mut working = room.clone();
    let (width, height) = (room.width(), room.height());
    let (mut x, mut y) = room.center();

    let mut positions = Vec::with_capacity(genome.len() + 1);
    let mut collected = Vec::with_capacity(genome.len() + 1);

    for &direction in genome.iter() {
        positions.push((x, y));
        collected.push(working.take(x, y));
        (x, y) = direction.step(x, y, width, height);
    }
    positions.push((x, y));
    collected.push(working.take(x, y));

    CleaningTrace {
        initial: room.clone(),
        positions,
        collected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::evolution::GenomeRng;
    use crate::schema::Direction;
    use proptest::prelude::*;

    fn test_room() -> Room {
        // 3x3, center (1, 1) holds 0.5
        Room::from_rows(vec![
            vec![0.1, 0.2, 0.3],
            vec![0.4, 0.5, 0.6],
            vec![0.7, 0.8, 0.9],
        ])
        .unwrap()
    }

    #[test]
    fn test_still_genome_scores_center() {
        let room = test_room();
        assert_eq!(score(&Genome::still(20), &room), 0.5);
        assert_eq!(score(&Genome::still(0), &room), 0.5);
    }

    #[test]
    fn test_zero_room_scores_zero() {
        let room = Room::zeroed(14, 8).unwrap();
        let mut rng = GenomeRng::new(42);
        for _ in 0..10 {
            assert_eq!(score(&rng.random_genome(122), &room), 0.0);
        }
    }

    #[test]
    fn test_walk_and_clamp() {
        let room = test_room();
        // center 0.5 -> right 0.6 -> wall, revisit 0 -> down 0.9 -> left 0.8
        let genome = Genome::new(vec![
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ]);
        let expected = 0.5 + 0.6 + 0.0 + 0.9 + 0.8;
        assert!((score(&genome, &room) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_revisits_collect_nothing() {
        let room = test_room();
        let genome = Genome::new(vec![Direction::Left, Direction::Right, Direction::Left]);
        assert!((score(&genome, &room) - (0.5 + 0.4)).abs() < 1e-12);
    }

    #[test]
    fn test_center_uses_floor_division() {
        let room = Room::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(room.center(), (1, 1));
        assert_eq!(score(&Genome::still(3), &room), 4.0);
    }

    #[test]
    fn test_room_untouched() {
        let room = test_room();
        let before = room.clone();
        let genome = Genome::new(vec![Direction::Up, Direction::Left, Direction::Down]);
        let first = score(&genome, &room);
        let second = score(&genome, &room);
        assert_eq!(first, second);
        assert_eq!(room, before);
    }

    #[test]
    fn test_evaluator_matches_sequential() {
        let mut rng = GenomeRng::new(9);
        let rooms: Vec<Room> = (0..3).map(|_| rng.random_room(6, 4).unwrap()).collect();
        let population: Vec<Genome> = (0..32).map(|_| rng.random_genome(34)).collect();

        let evaluator = FitnessEvaluator::new(&rooms);
        let scores = evaluator.evaluate_population(&population);

        assert_eq!(scores.len(), population.len());
        for (genome, &s) in population.iter().zip(&scores) {
            assert_eq!(s, score_over_rooms(genome, &rooms));
        }
        let max: f64 = rooms.iter().map(Room::total_value).sum();
        assert_eq!(evaluator.max_score(), max);
    }

    #[test]
    fn test_trace_matches_score() {
        let mut rng = GenomeRng::new(5);
        let room = rng.random_room(7, 5).unwrap();
        let genome = rng.random_genome(45);

        let run = trace(&genome, &room);
        assert_eq!(run.len(), genome.len() + 1);
        assert_eq!(run.positions[0], room.center());
        assert!((run.total() - score(&genome, &room)).abs() < 1e-9);

        assert_eq!(run.room_at(0), room);
        let cleaned = run.room_at(run.len());
        assert!((room.total_value() - cleaned.total_value() - run.total()).abs() < 1e-9);
        for &(x, y) in &run.positions {
            assert_eq!(cleaned.get(x, y), 0.0);
        }
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    fn genome_strategy(max_len: usize) -> impl Strategy<Value = Genome> {
        prop::collection::vec(direction_strategy(), 0..max_len).prop_map(Genome::new)
    }

    fn room_strategy() -> impl Strategy<Value = Room> {
        (1usize..8, 1usize..8).prop_flat_map(|(w, h)| {
            prop::collection::vec(0.0f64..1.0, w * h)
                .prop_map(move |cells| Room::from_cells(w, h, cells).unwrap())
        })
    }

    proptest! {
        #[test]
        fn prop_score_bounded(genome in genome_strategy(80), room in room_strategy()) {
            let s = score(&genome, &room);
            prop_assert!(s >= 0.0);
            prop_assert!(s <= room.total_value() + 1e-9);
        }

        #[test]
        fn prop_score_deterministic(genome in genome_strategy(80), room in room_strategy()) {
            let before = room.clone();
            prop_assert_eq!(score(&genome, &room), score(&genome, &room));
            prop_assert_eq!(room, before);
        }

        #[test]
        fn prop_rooms_additive(
            genome in genome_strategy(80),
            first in room_strategy(),
            second in room_strategy(),
        ) {
            let rooms = vec![first.clone(), second.clone()];
            let combined = score_over_rooms(&genome, &rooms);
            let separate = score(&genome, &first) + score(&genome, &second);
            prop_assert!((combined - separate).abs() < 1e-12);

            let reversed = vec![second, first];
            prop_assert!((score_over_rooms(&genome, &reversed) - combined).abs() < 1e-12);
        }
    }
}
