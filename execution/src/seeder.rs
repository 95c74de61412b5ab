//! Per-process randomness source.

use crate::casino::GameRng;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out one [GameRng] per round.
///
/// Rounds are numbered by an atomic counter, so a shared `Seeder` needs no
/// lock and no two calls ever see the same `(seed, user, round)` triple.
#[derive(Debug)]
pub struct Seeder {
    seed: [u8; 32],
    round: AtomicU64,
}

impl Seeder {
    pub fn new(seed: [u8; 32]) -> Self {
        Self {
            seed,
            round: AtomicU64::new(0),
        }
    }

    /// Seed from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> &[u8; 32] {
        &self.seed
    }

    /// Rounds handed out so far.
    pub fn rounds(&self) -> u64 {
        self.round.load(Ordering::Relaxed)
    }

    /// Generator for the next round played by `user_id`.
    pub fn next_rng(&self, user_id: u64) -> GameRng {
        let round = self.round.fetch_add(1, Ordering::Relaxed);
        GameRng::new(&self.seed, user_id, round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_rounds_advance() {
        let seeder = Seeder::new([1u8; 32]);
        let mut first = seeder.next_rng(5);
        let mut second = seeder.next_rng(5);
        assert_eq!(seeder.rounds(), 2);
        assert_ne!(first.next_u64(), second.next_u64());
    }

    #[test]
    fn test_replay_from_seed() {
        let seeder = Seeder::new([2u8; 32]);
        let _ = seeder.next_rng(1);
        let mut live = seeder.next_rng(1);
        let mut replay = GameRng::new(seeder.seed(), 1, 1);
        assert_eq!(live.next_u64(), replay.next_u64());
    }

    #[test]
    fn test_shared_across_threads() {
        let seeder = Arc::new(Seeder::new([3u8; 32]));
        let handles: Vec<_> = (0..4)
            .map(|user| {
                let seeder = Arc::clone(&seeder);
                thread::spawn(move || {
                    for _ in 0..250 {
                        seeder.next_rng(user).next_u8();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(seeder.rounds(), 1_000);
    }
}
