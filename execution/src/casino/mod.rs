//! Solo game resolution.
//!
//! Every game resolves a bet in a single call:
//! - Slots
//! - Roulette
//! - Blackjack (automatic play)
//! - Crash
//! - Mines (batch reveal)
//! - Baccarat
//! - Keno
//! - Dice, Slot Dice, Rock-Paper-Scissors, Number Guess, Lucky Wheel

pub mod baccarat;
pub mod blackjack;
pub mod cards;
pub mod crash;
pub mod dice;
pub mod display;
#[cfg(test)]
mod integration_tests;
pub mod keno;
pub mod lucky_wheel;
pub mod mines;
pub mod number_guess;
pub mod paytable;
pub mod rock_paper_scissors;
pub mod roulette;
pub mod slot_dice;
pub mod slots;

use commonware_cryptography::sha256::Sha256;
use commonware_cryptography::Hasher;
use luckybot_types::casino::{GameConfig, GameOutcome, GameType, DECK_SIZE, DIE_FACES, ROULETTE_POCKETS};
use thiserror::Error;

/// Deterministic random number generator for a single round.
///
/// Uses SHA256 hash chains seeded from a 32-byte seed, the player and the
/// round number, so a round can be replayed from those three values.
#[derive(Clone)]
pub struct GameRng {
    state: [u8; 32],
    index: usize,
}

impl GameRng {
    /// Create a new RNG from a seed, user ID, and round number.
    pub fn new(seed: &[u8; 32], user_id: u64, round: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(seed);
        hasher.update(&user_id.to_be_bytes());
        hasher.update(&round.to_be_bytes());
        Self {
            state: hasher.finalize().0,
            index: 0,
        }
    }

    /// Create an RNG from a fresh OS-provided seed.
    pub fn from_entropy(user_id: u64) -> Self {
        let seed: [u8; 32] = rand::random();
        Self::new(&seed, user_id, 0)
    }

    /// Get the next random byte.
    fn next_byte(&mut self) -> u8 {
        if self.index >= 32 {
            // Rehash to get more bytes
            let mut hasher = Sha256::new();
            hasher.update(&self.state);
            self.state = hasher.finalize().0;
            self.index = 0;
        }
        let result = self.state[self.index];
        self.index += 1;
        result
    }

    /// Get a random u8 value.
    pub fn next_u8(&mut self) -> u8 {
        self.next_byte()
    }

    /// Get a random u16 value.
    pub fn next_u16(&mut self) -> u16 {
        let a = self.next_byte() as u16;
        let b = self.next_byte() as u16;
        (a << 8) | b
    }

    /// Get a random u32 value.
    pub fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        bytes.iter_mut().for_each(|b| *b = self.next_byte());
        u32::from_be_bytes(bytes)
    }

    /// Get a random u64 value.
    pub fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        bytes.iter_mut().for_each(|b| *b = self.next_byte());
        u64::from_be_bytes(bytes)
    }

    /// Get a random f64 value in range [0.0, 1.0) with 53 bits of precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Get a random value in range [0, max).
    pub fn next_bounded(&mut self, max: u8) -> u8 {
        if max == 0 {
            return 0;
        }
        // Simple rejection sampling for unbiased distribution
        let limit = u8::MAX - (u8::MAX % max);
        loop {
            let value = self.next_u8();
            if value < limit {
                return value % max;
            }
        }
    }

    /// Get a random value in range [0, max).
    pub fn next_bounded_u32(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        let limit = u32::MAX - (u32::MAX % max);
        loop {
            let value = self.next_u32();
            if value < limit {
                return value % max;
            }
        }
    }

    /// Pick an index with probability proportional to its weight.
    pub fn weighted_index(&mut self, weights: &[u32]) -> usize {
        let total: u32 = weights.iter().sum();
        let mut roll = self.next_bounded_u32(total);
        for (i, &weight) in weights.iter().enumerate() {
            if roll < weight {
                return i;
            }
            roll -= weight;
        }
        weights.len().saturating_sub(1)
    }

    /// Shuffle a slice in place using Fisher-Yates.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_bounded_u32((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Create a shuffled deck of 52 cards.
    /// Cards are 0-51: suit = card/13, rank = card%13.
    pub fn create_deck(&mut self) -> Vec<u8> {
        let mut deck: Vec<u8> = (0..DECK_SIZE).collect();
        self.shuffle(&mut deck);
        deck
    }

    /// Draw `count` distinct values from `0..population`, in draw order.
    pub fn sample_distinct(&mut self, population: u8, count: u8) -> Vec<u8> {
        let count = count.min(population);
        let mut pool: Vec<u8> = (0..population).collect();
        // Partial Fisher-Yates: only the first `count` slots are settled.
        for i in 0..count {
            let j = i + self.next_bounded(population - i);
            pool.swap(i as usize, j as usize);
        }
        pool.truncate(count as usize);
        pool
    }

    /// Roll a single die (1-6).
    pub fn roll_die(&mut self) -> u8 {
        self.next_bounded(DIE_FACES) + 1
    }

    /// Spin roulette wheel (0-36).
    pub fn spin_roulette(&mut self) -> u8 {
        self.next_bounded(ROULETTE_POCKETS)
    }
}

/// Error during game resolution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Malformed or out-of-range bet parameters.
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    /// Missing or unusable configuration for a game.
    #[error("{game} is misconfigured: {reason}")]
    Configuration { game: GameType, reason: String },
    /// An injected deck ran out of cards.
    #[error("deck exhausted")]
    DeckExhausted,
}

impl EngineError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn config(game: GameType, reason: impl Into<String>) -> Self {
        EngineError::Configuration {
            game,
            reason: reason.into(),
        }
    }
}

/// A resolved round before the stake is applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Total-return multiplier (0 = stake lost, 1 = stake returned).
    pub multiplier: f64,
    pub outcome: GameOutcome,
}

impl Resolution {
    pub fn new(multiplier: f64, outcome: GameOutcome) -> Self {
        Self {
            multiplier,
            outcome,
        }
    }
}

/// Trait for solo game implementations.
pub trait SoloGame {
    /// Bet parameters specific to this game.
    type Params;
    /// Payout data derived once from the game's config.
    type Table;

    const GAME_TYPE: GameType;

    /// Build the payout table for a validated config.
    fn build(config: &GameConfig) -> Result<Self::Table, EngineError>;

    /// Resolve one round.
    fn resolve(
        table: &Self::Table,
        params: &Self::Params,
        rng: &mut GameRng,
    ) -> Result<Resolution, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::test_rng;

    #[test]
    fn test_game_rng_deterministic() {
        let mut rng1 = test_rng(1);
        let mut rng2 = test_rng(1);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u8(), rng2.next_u8());
        }
    }

    #[test]
    fn test_game_rng_different_rounds() {
        let mut rng1 = test_rng(1);
        let mut rng2 = test_rng(2);

        let seq1: Vec<u8> = (0..10).map(|_| rng1.next_u8()).collect();
        let seq2: Vec<u8> = (0..10).map(|_| rng2.next_u8()).collect();
        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_game_rng_different_users() {
        let seed = [9u8; 32];
        let mut rng1 = GameRng::new(&seed, 1, 0);
        let mut rng2 = GameRng::new(&seed, 2, 0);
        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_game_rng_bounded() {
        let mut rng = test_rng(1);

        for _ in 0..1000 {
            assert!(rng.next_bounded(52) < 52);
            assert!(rng.next_bounded_u32(1_000) < 1_000);
        }
        assert_eq!(rng.next_bounded(0), 0);
        assert_eq!(rng.next_bounded_u32(0), 0);
    }

    #[test]
    fn test_game_rng_f64_range() {
        let mut rng = test_rng(1);
        let mut sum = 0.0;
        for _ in 0..10_000 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value));
            sum += value;
        }
        let mean = sum / 10_000.0;
        assert!((mean - 0.5).abs() < 0.02, "mean {mean}");
    }

    #[test]
    fn test_game_rng_deck() {
        let mut rng = test_rng(1);
        let deck = rng.create_deck();

        assert_eq!(deck.len(), 52);

        let mut seen = [false; 52];
        for card in &deck {
            assert!(!seen[*card as usize], "Duplicate card: {}", card);
            seen[*card as usize] = true;
        }
    }

    #[test]
    fn test_sample_distinct() {
        let mut rng = test_rng(3);
        for _ in 0..200 {
            let sample = rng.sample_distinct(80, 20);
            assert_eq!(sample.len(), 20);
            let mut sorted = sample.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 20);
            assert!(sample.iter().all(|&v| v < 80));
        }
        assert_eq!(rng.sample_distinct(5, 9).len(), 5);
    }

    #[test]
    fn test_weighted_index() {
        let mut rng = test_rng(4);
        let weights = [0, 3, 1];
        let mut counts = [0u32; 3];
        for _ in 0..8_000 {
            counts[rng.weighted_index(&weights)] += 1;
        }
        assert_eq!(counts[0], 0);
        let ratio = counts[1] as f64 / counts[2] as f64;
        assert!((ratio - 3.0).abs() < 0.3, "ratio {ratio}");
    }

    #[test]
    fn test_game_rng_dice_and_wheel() {
        let mut rng = test_rng(1);
        for _ in 0..1000 {
            let roll = rng.roll_die();
            assert!((1..=6).contains(&roll));
            assert!(rng.spin_roulette() <= 36);
        }
    }
}
