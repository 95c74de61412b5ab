//! Shared data model for the luckybot solo-game payout engine.
//!
//! Everything in this crate is plain data: the bet a caller submits, the
//! configuration the engine reads, and the result record it returns. Game logic
//! lives in `luckybot-execution`.

pub mod casino;

pub use casino::{
    BetRequest, GameConfig, GameConfigs, GameOutcome, GameParams, GameResult, GameType, Volatility,
};
