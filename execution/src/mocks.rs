use crate::casino::GameRng;
use crate::engine::SoloEngine;
use luckybot_types::casino::GameConfigs;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// User id used by tests that don't care about the player.
pub const TEST_USER: u64 = 42;

/// Creates a fixed 32-byte seed
pub fn create_seed(seed: u64) -> [u8; 32] {
    let mut rng = StdRng::seed_from_u64(seed);
    rng.gen()
}

/// Creates a deterministic generator for one round of [TEST_USER]
pub fn test_rng(round: u64) -> GameRng {
    GameRng::new(&create_seed(0), TEST_USER, round)
}

/// Creates an engine over the default config table
pub fn test_engine() -> SoloEngine {
    SoloEngine::new(GameConfigs::default()).expect("default configs are valid")
}
