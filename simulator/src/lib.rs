//! Monte Carlo house-edge simulation.
//!
//! Runs many rounds of a representative bet per game through [SoloEngine] and
//! compares the realized return with the configured house edge.

use commonware_utils::from_hex_formatted;
use luckybot_execution::{EngineError, GameRng, SoloEngine};
use luckybot_types::casino::{
    BaccaratSide, BetRequest, BlackjackStrategy, DiceBet, GameConfigs, GameParams, GameType,
    RouletteBet, RpsChoice,
};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::Level;

/// User id attached to simulated rounds.
pub const SIMULATED_USER: u64 = 0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be hex: {value}")]
    InvalidHex { field: &'static str, value: String },
    #[error("seed must be 32 bytes (got {len})")]
    InvalidSeedLength { len: usize },
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
}

/// Parse a 32-byte hex seed (an optional `0x` prefix is accepted).
pub fn parse_seed(value: &str) -> Result<[u8; 32], ConfigError> {
    let bytes = from_hex_formatted(value).ok_or(ConfigError::InvalidHex {
        field: "seed",
        value: value.to_string(),
    })?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| ConfigError::InvalidSeedLength { len })
}

pub fn parse_log_level(value: &str) -> Result<Level, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidLogLevel {
        value: value.to_string(),
    })
}

pub fn non_zero(field: &'static str, value: u64) -> Result<u64, ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidNonZero { field, value });
    }
    Ok(value)
}

/// Apply YAML overrides on top of the default config table.
pub fn load_configs(yaml: &str) -> Result<GameConfigs, serde_yaml::Error> {
    let overrides: GameConfigs = serde_yaml::from_str(yaml)?;
    Ok(overrides
        .iter()
        .fold(GameConfigs::default(), |configs, (game, config)| {
            configs.with(*game, config.clone())
        }))
}

/// The bet simulated for each game.
pub fn representative_params(game: GameType) -> GameParams {
    match game {
        GameType::Slots => GameParams::Slots,
        GameType::Roulette => GameParams::Roulette {
            bet: RouletteBet::Red,
        },
        GameType::Blackjack => GameParams::Blackjack {
            strategy: BlackjackStrategy::default(),
        },
        GameType::Crash => GameParams::Crash {
            cashout_target: 2.0,
        },
        GameType::Mines => GameParams::Mines {
            mine_count: 3,
            pick_count: 3,
        },
        GameType::Baccarat => GameParams::Baccarat {
            choice: BaccaratSide::Player,
        },
        GameType::Keno => GameParams::Keno {
            numbers: [3, 17, 28, 44, 61].into_iter().collect(),
        },
        GameType::Dice => GameParams::Dice {
            bet: DiceBet::Exact(6),
        },
        GameType::SlotDice => GameParams::SlotDice,
        GameType::RockPaperScissors => GameParams::RockPaperScissors {
            choice: Some(RpsChoice::Rock),
        },
        GameType::NumberGuess => GameParams::NumberGuess { guess: 50 },
        GameType::LuckyWheel => GameParams::LuckyWheel,
    }
}

/// Running totals for one game.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stats {
    pub trials: u64,
    pub total_wagered: u128,
    pub total_returned: u128,
    /// Sum of squared per-round return ratios (`win / bet`).
    pub total_ratio_sq: f64,
}

impl Stats {
    pub fn add(&mut self, bet: u64, win_amount: u64) {
        let ratio = win_amount as f64 / bet as f64;
        self.trials += 1;
        self.total_wagered += bet as u128;
        self.total_returned += win_amount as u128;
        self.total_ratio_sq += ratio * ratio;
    }

    pub fn merge(&mut self, other: &Stats) {
        self.trials += other.trials;
        self.total_wagered += other.total_wagered;
        self.total_returned += other.total_returned;
        self.total_ratio_sq += other.total_ratio_sq;
    }

    /// Realized return to player.
    pub fn rtp(&self) -> f64 {
        if self.total_wagered == 0 {
            0.0
        } else {
            self.total_returned as f64 / self.total_wagered as f64
        }
    }

    pub fn house_edge(&self) -> f64 {
        1.0 - self.rtp()
    }

    /// Standard error of the return estimate.
    ///
    /// Exact when every round uses the same bet, which is how [simulate] runs.
    pub fn stderr(&self) -> f64 {
        if self.trials <= 1 {
            return 0.0;
        }
        let n = self.trials as f64;
        let mean = self.rtp();
        let var = (self.total_ratio_sq / n - mean * mean).max(0.0);
        (var / n).sqrt()
    }
}

/// Simulation summary for one game.
#[derive(Clone, Debug, Serialize)]
pub struct GameReport {
    pub game: GameType,
    pub trials: u64,
    pub rtp: f64,
    pub realized_edge: f64,
    pub configured_edge: f64,
    pub stderr: f64,
}

impl GameReport {
    pub fn new(game: GameType, configured_edge: f64, stats: &Stats) -> Self {
        Self {
            game,
            trials: stats.trials,
            rtp: stats.rtp(),
            realized_edge: stats.house_edge(),
            configured_edge,
            stderr: stats.stderr(),
        }
    }

    /// Distance between realized and configured edge, in standard errors.
    pub fn deviation(&self) -> f64 {
        if self.stderr == 0.0 {
            return 0.0;
        }
        (self.realized_edge - self.configured_edge).abs() / self.stderr
    }
}

/// Play `trials` rounds of `game` in parallel.
///
/// Round `i` always draws from `GameRng::new(seed, SIMULATED_USER, i)`, so the
/// totals depend only on the seed and not on how work is split across threads.
pub fn simulate(
    engine: &SoloEngine,
    game: GameType,
    trials: u64,
    bet: u64,
    seed: &[u8; 32],
) -> Result<Stats, EngineError> {
    let request = BetRequest::new(SIMULATED_USER, bet, representative_params(game));
    (0..trials)
        .into_par_iter()
        .try_fold(Stats::default, |mut stats, round| {
            let mut rng = GameRng::new(seed, SIMULATED_USER, round);
            let result = engine.play(&request, &mut rng)?;
            stats.add(bet, result.win_amount);
            Ok::<_, EngineError>(stats)
        })
        .try_reduce(Stats::default, |mut a, b| {
            a.merge(&b);
            Ok(a)
        })
}

/// Simulate every configured game.
pub fn simulate_all(
    engine: &SoloEngine,
    games: &[GameType],
    trials: u64,
    bet: u64,
    seed: &[u8; 32],
) -> Result<Vec<GameReport>, EngineError> {
    games
        .iter()
        .map(|&game| {
            let configured_edge = engine.config(game)?.house_edge;
            let stats = simulate(engine, game, trials, bet, seed)?;
            Ok(GameReport::new(game, configured_edge, &stats))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use luckybot_execution::mocks::{create_seed, test_engine};

    #[test]
    fn test_stats() {
        let mut stats = Stats::default();
        stats.add(100, 0);
        stats.add(100, 200);
        assert_eq!(stats.trials, 2);
        assert_eq!(stats.rtp(), 1.0);
        assert_eq!(stats.house_edge(), 0.0);
        // Ratios 0 and 2: variance 1, stderr sqrt(1/2).
        assert!((stats.stderr() - 0.5f64.sqrt()).abs() < 1e-12);

        let mut merged = Stats::default();
        merged.merge(&stats);
        merged.merge(&stats);
        assert_eq!(merged.trials, 4);
        assert_eq!(merged.total_returned, 400);
    }

    #[test]
    fn test_empty_stats() {
        let stats = Stats::default();
        assert_eq!(stats.rtp(), 0.0);
        assert_eq!(stats.stderr(), 0.0);
    }

    #[test]
    fn test_parse_seed() {
        let hex = "ab".repeat(32);
        assert_eq!(parse_seed(&hex).unwrap(), [0xab; 32]);
        assert_eq!(parse_seed(&format!("0x{hex}")).unwrap(), [0xab; 32]);
        assert!(matches!(
            parse_seed("abcd"),
            Err(ConfigError::InvalidSeedLength { len: 2 })
        ));
        assert!(matches!(
            parse_seed("zz"),
            Err(ConfigError::InvalidHex { .. })
        ));
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert!(parse_log_level("chatty").is_err());
        assert!(non_zero("trials", 0).is_err());
        assert_eq!(non_zero("trials", 5).unwrap(), 5);
    }

    #[test]
    fn test_load_configs_overrides_defaults() {
        let yaml = "dice:\n  min_bet: 1\n  max_bet: 10\n  house_edge: 0.1\n  max_multiplier: 6.0\n  volatility: medium\n";
        let configs = load_configs(yaml).unwrap();
        assert_eq!(configs.len(), GameType::ALL.len());
        assert_eq!(configs.get(GameType::Dice).unwrap().house_edge, 0.1);
        assert_eq!(
            configs.get(GameType::Slots),
            GameConfigs::default().get(GameType::Slots)
        );
    }

    #[test]
    fn test_simulate_is_deterministic() {
        let engine = test_engine();
        let seed = create_seed(1);
        let first = simulate(&engine, GameType::Roulette, 5_000, 100, &seed).unwrap();
        let second = simulate(&engine, GameType::Roulette, 5_000, 100, &seed).unwrap();
        assert_eq!(first.trials, 5_000);
        assert_eq!(first.total_returned, second.total_returned);
        assert_eq!(first.total_wagered, 500_000);
    }

    #[test]
    fn test_simulate_all_tracks_configured_edge() {
        let engine = test_engine();
        let seed = create_seed(2);
        let reports = simulate_all(&engine, &GameType::ALL, 20_000, 1_000, &seed).unwrap();
        assert_eq!(reports.len(), GameType::ALL.len());
        for report in reports {
            assert_eq!(report.trials, 20_000);
            assert!(report.deviation() < 6.0, "{report:?}");
        }
    }
}
