//! RNG module - bag randomizer piece supply
//!
//! The supply keeps a queue of upcoming kinds. Whenever the queue would hold
//! seven or fewer kinds, a freshly shuffled set of all seven is appended, so
//! each kind appears exactly once per bag and the queue always has a preview.
//!
//! Also provides a simple LCG so a seed fully determines the sequence.

use std::collections::VecDeque;

use crate::pieces::Piece;
use crate::types::{PieceId, PieceKind, BAG_SIZE};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Seeded bag-randomizer piece dispenser
#[derive(Debug, Clone)]
pub struct PieceSupply {
    queue: VecDeque<PieceKind>,
    rng: SimpleRng,
    seed: u32,
    next_id: PieceId,
}

impl PieceSupply {
    /// Create a supply whose whole draw sequence is fixed by `seed`
    pub fn new(seed: u32) -> Self {
        let mut supply = Self {
            queue: VecDeque::with_capacity(2 * BAG_SIZE),
            rng: SimpleRng::new(seed),
            seed,
            next_id: 0,
        };
        supply.refill();
        supply
    }

    /// Append shuffled bags until more than one bag's worth is queued
    fn refill(&mut self) {
        while self.queue.len() <= BAG_SIZE {
            let mut bag = PieceKind::ALL;
            self.rng.shuffle(&mut bag);
            self.queue.extend(bag);
        }
    }

    /// Restart the sequence from a new seed; piece ids keep counting up
    pub fn reseed(&mut self, seed: u32) {
        self.queue.clear();
        self.rng = SimpleRng::new(seed);
        self.seed = seed;
        self.refill();
    }

    /// Kind of the piece the next `next()` call will return
    pub fn peek(&self) -> PieceKind {
        // refill() keeps at least BAG_SIZE + 1 kinds queued
        self.queue[0]
    }

    /// Draw the next kind, keeping the queue topped up
    pub fn next_kind(&mut self) -> PieceKind {
        self.refill();
        let kind = self.queue.pop_front().unwrap_or(PieceKind::I);
        self.refill();
        kind
    }

    /// Draw the next piece with a fresh id, anchored at the origin
    pub fn next(&mut self) -> Piece {
        let kind = self.next_kind();
        let piece = Piece::new(self.next_id, kind);
        self.next_id = self.next_id.wrapping_add(1);
        piece
    }

    /// Seed the current sequence was started from
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Number of kinds currently queued
    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

impl Default for PieceSupply {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_supply_starts_with_two_bags() {
        let supply = PieceSupply::new(1);
        assert_eq!(supply.queued(), 2 * BAG_SIZE);
    }

    #[test]
    fn test_every_bag_holds_each_kind_once() {
        let mut supply = PieceSupply::new(99);

        for _ in 0..5 {
            let mut drawn: Vec<PieceKind> = (0..BAG_SIZE).map(|_| supply.next_kind()).collect();
            drawn.sort();
            let mut all = PieceKind::ALL.to_vec();
            all.sort();
            assert_eq!(drawn, all);
        }
    }

    #[test]
    fn test_queue_never_drops_to_one_bag() {
        let mut supply = PieceSupply::new(3);
        for _ in 0..50 {
            supply.next();
            assert!(supply.queued() > BAG_SIZE);
        }
    }

    #[test]
    fn test_peek_matches_next() {
        let mut supply = PieceSupply::new(1);
        for _ in 0..20 {
            let peeked = supply.peek();
            assert_eq!(supply.next().kind(), peeked);
        }
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut supply = PieceSupply::new(1);
        let ids: Vec<PieceId> = (0..10).map(|_| supply.next().id()).collect();
        assert_eq!(ids, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_reseed_reproduces_sequence() {
        let mut a = PieceSupply::new(42);
        let first: Vec<PieceKind> = (0..21).map(|_| a.next_kind()).collect();

        a.reseed(42);
        let again: Vec<PieceKind> = (0..21).map(|_| a.next_kind()).collect();
        assert_eq!(first, again);

        let mut b = PieceSupply::new(42);
        let other: Vec<PieceKind> = (0..21).map(|_| b.next_kind()).collect();
        assert_eq!(first, other);
    }
}
