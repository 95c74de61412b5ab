use super::GameType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// How swingy a game's payouts are. Informational; surfaced in game menus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Volatility {
    Low,
    Medium,
    High,
}

/// Static per-game limits and tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub min_bet: u64,
    pub max_bet: u64,
    /// Fraction of each bet the house expects to keep, in [0, 1).
    pub house_edge: f64,
    /// Largest total-return multiplier a single round may pay.
    pub max_multiplier: f64,
    pub volatility: Volatility,
}

/// A bet amount outside the configured limits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BetLimitError {
    #[error("bet {amount} is below the minimum of {min}")]
    BelowMinimum { amount: u64, min: u64 },
    #[error("bet {amount} is above the maximum of {max}")]
    AboveMaximum { amount: u64, max: u64 },
}

impl GameConfig {
    pub const fn new(
        min_bet: u64,
        max_bet: u64,
        house_edge: f64,
        max_multiplier: f64,
        volatility: Volatility,
    ) -> Self {
        Self {
            min_bet,
            max_bet,
            house_edge,
            max_multiplier,
            volatility,
        }
    }

    /// Expected fraction of each bet returned to the player.
    pub fn return_to_player(&self) -> f64 {
        1.0 - self.house_edge
    }

    /// Check a bet against the configured limits.
    ///
    /// Callers run this before deducting a stake; the engine itself only
    /// rejects zero bets.
    pub fn check_bet(&self, amount: u64) -> Result<(), BetLimitError> {
        if amount < self.min_bet {
            return Err(BetLimitError::BelowMinimum {
                amount,
                min: self.min_bet,
            });
        }
        if amount > self.max_bet {
            return Err(BetLimitError::AboveMaximum {
                amount,
                max: self.max_bet,
            });
        }
        Ok(())
    }

    /// Largest amount a single round can return for `bet`.
    pub fn max_payout(&self, bet: u64) -> u64 {
        (bet as f64 * self.max_multiplier).round() as u64
    }
}

/// Configuration table keyed by game, loaded once at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameConfigs(BTreeMap<GameType, GameConfig>);

impl GameConfigs {
    pub fn new(configs: BTreeMap<GameType, GameConfig>) -> Self {
        Self(configs)
    }

    pub fn get(&self, game: GameType) -> Option<&GameConfig> {
        self.0.get(&game)
    }

    /// Replace (or add) the config for one game.
    pub fn with(mut self, game: GameType, config: GameConfig) -> Self {
        self.0.insert(game, config);
        self
    }

    /// Drop the config for one game.
    pub fn without(mut self, game: GameType) -> Self {
        self.0.remove(&game);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GameType, &GameConfig)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for GameConfigs {
    fn default() -> Self {
        use Volatility::*;

        let table = [
            (GameType::Slots, GameConfig::new(10, 100_000, 0.05, 250.0, High)),
            // Edge fixed by the single zero: 1/37.
            (GameType::Roulette, GameConfig::new(10, 100_000, 0.027, 36.0, Medium)),
            // Mimic-the-dealer auto-play with 3:2 naturals.
            (GameType::Blackjack, GameConfig::new(10, 100_000, 0.058, 2.5, Low)),
            (GameType::Crash, GameConfig::new(10, 100_000, 0.03, 100.0, High)),
            (GameType::Mines, GameConfig::new(10, 100_000, 0.03, 1_000.0, High)),
            // Player bet; banker is ~1.0%, tie ~14%.
            (GameType::Baccarat, GameConfig::new(10, 100_000, 0.0124, 9.0, Low)),
            (GameType::Keno, GameConfig::new(10, 50_000, 0.08, 1_000.0, High)),
            (GameType::Dice, GameConfig::new(10, 100_000, 0.03, 6.0, Medium)),
            (GameType::SlotDice, GameConfig::new(10, 100_000, 0.05, 50.0, High)),
            (GameType::RockPaperScissors, GameConfig::new(10, 100_000, 0.03, 2.0, Low)),
            (GameType::NumberGuess, GameConfig::new(10, 100_000, 0.05, 100.0, High)),
            (GameType::LuckyWheel, GameConfig::new(10, 100_000, 0.05, 20.0, Medium)),
        ];
        Self(table.into_iter().collect())
    }
}
