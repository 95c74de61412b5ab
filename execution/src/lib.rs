pub mod casino;
pub mod engine;
pub mod seeder;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use casino::{EngineError, GameRng, Resolution, SoloGame};
pub use engine::SoloEngine;
pub use seeder::Seeder;
