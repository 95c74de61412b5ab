//! Rock-paper-scissors against a uniformly random bot.
//!
//! A draw returns the stake. A win pays `2 - 3 * edge`, which makes the
//! expected return `1 - edge` for any player choice.

use super::{EngineError, GameRng, Resolution, SoloGame};
use luckybot_types::casino::{GameConfig, GameOutcome, GameType, RpsChoice, RpsOutcome, RpsResult};

pub fn judge(player: RpsChoice, bot: RpsChoice) -> RpsResult {
    if player == bot {
        RpsResult::Draw
    } else if player.beats() == bot {
        RpsResult::Win
    } else {
        RpsResult::Loss
    }
}

fn random_choice(rng: &mut GameRng) -> RpsChoice {
    RpsChoice::ALL[rng.next_bounded(RpsChoice::ALL.len() as u8) as usize]
}

#[derive(Clone, Debug)]
pub struct RpsTable {
    win: f64,
}

impl RpsTable {
    pub fn multiplier(&self, result: RpsResult) -> f64 {
        match result {
            RpsResult::Win => self.win,
            RpsResult::Draw => 1.0,
            RpsResult::Loss => 0.0,
        }
    }
}

pub struct RockPaperScissors;

impl SoloGame for RockPaperScissors {
    type Params = Option<RpsChoice>;
    type Table = RpsTable;

    const GAME_TYPE: GameType = GameType::RockPaperScissors;

    fn build(config: &GameConfig) -> Result<RpsTable, EngineError> {
        let win = (2.0 - 3.0 * config.house_edge).min(config.max_multiplier);
        if win <= 1.0 {
            return Err(EngineError::config(
                Self::GAME_TYPE,
                format!("a win would only pay {win:.3}x"),
            ));
        }
        Ok(RpsTable { win })
    }

    fn resolve(
        table: &RpsTable,
        choice: &Option<RpsChoice>,
        rng: &mut GameRng,
    ) -> Result<Resolution, EngineError> {
        let player = match choice {
            Some(choice) => *choice,
            None => random_choice(rng),
        };
        let bot = random_choice(rng);
        let result = judge(player, bot);
        Ok(Resolution::new(
            table.multiplier(result),
            GameOutcome::RockPaperScissors(RpsOutcome {
                player,
                bot,
                result,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::test_rng;
    use luckybot_types::casino::Volatility;

    #[test]
    fn test_judge() {
        use RpsChoice::*;
        assert_eq!(judge(Rock, Scissors), RpsResult::Win);
        assert_eq!(judge(Scissors, Rock), RpsResult::Loss);
        assert_eq!(judge(Paper, Paper), RpsResult::Draw);
        assert_eq!(judge(Paper, Rock), RpsResult::Win);
        assert_eq!(judge(Scissors, Paper), RpsResult::Win);
    }

    #[test]
    fn test_expected_return() {
        let config = GameConfig::new(10, 100, 0.03, 2.0, Volatility::Low);
        let table = RockPaperScissors::build(&config).unwrap();
        let rtp: f64 = RpsChoice::ALL
            .iter()
            .map(|&bot| table.multiplier(judge(RpsChoice::Rock, bot)) / 3.0)
            .sum();
        assert!((rtp - 0.97).abs() < 1e-12);
    }

    #[test]
    fn test_edge_too_large() {
        let config = GameConfig::new(10, 100, 0.4, 2.0, Volatility::Low);
        assert!(RockPaperScissors::build(&config).is_err());
    }

    #[test]
    fn test_random_player_choice() {
        let config = GameConfig::new(10, 100, 0.03, 2.0, Volatility::Low);
        let table = RockPaperScissors::build(&config).unwrap();
        let mut seen = Vec::new();
        for round in 0..100 {
            let mut rng = test_rng(round);
            let resolution = RockPaperScissors::resolve(&table, &None, &mut rng).unwrap();
            if let GameOutcome::RockPaperScissors(outcome) = resolution.outcome {
                assert_eq!(outcome.result, judge(outcome.player, outcome.bot));
                if !seen.contains(&outcome.player) {
                    seen.push(outcome.player);
                }
            }
        }
        assert_eq!(seen.len(), 3);
    }
}
