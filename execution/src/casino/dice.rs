//! Single six-sided die.
//!
//! Exact-face bets pay 6x and the even-money bets (low, high, even, odd) pay
//! 2x, both scaled by `1 - edge`.

use super::{EngineError, GameRng, Resolution, SoloGame};
use luckybot_types::casino::{DiceBet, DiceOutcome, GameConfig, GameOutcome, GameType, DIE_FACES};

/// Faces covered by a bet.
pub fn winning_faces(bet: DiceBet) -> u8 {
    match bet {
        DiceBet::Exact(_) => 1,
        DiceBet::Low | DiceBet::High | DiceBet::Even | DiceBet::Odd => DIE_FACES / 2,
    }
}

pub fn bet_wins(bet: DiceBet, roll: u8) -> bool {
    match bet {
        DiceBet::Exact(face) => roll == face,
        DiceBet::Low => roll <= 3,
        DiceBet::High => roll >= 4,
        DiceBet::Even => roll % 2 == 0,
        DiceBet::Odd => roll % 2 == 1,
    }
}

#[derive(Clone, Debug)]
pub struct DiceTable {
    rtp: f64,
    cap: f64,
}

impl DiceTable {
    pub fn new(rtp: f64, cap: f64) -> Self {
        Self { rtp, cap }
    }

    pub fn multiplier(&self, bet: DiceBet) -> f64 {
        let fair = DIE_FACES as f64 / winning_faces(bet) as f64;
        (fair * self.rtp).min(self.cap)
    }
}

pub struct Dice;

impl SoloGame for Dice {
    type Params = DiceBet;
    type Table = DiceTable;

    const GAME_TYPE: GameType = GameType::Dice;

    fn build(config: &GameConfig) -> Result<DiceTable, EngineError> {
        Ok(DiceTable::new(
            config.return_to_player(),
            config.max_multiplier,
        ))
    }

    fn resolve(table: &DiceTable, bet: &DiceBet, rng: &mut GameRng) -> Result<Resolution, EngineError> {
        if let DiceBet::Exact(face) = bet {
            if !(1..=DIE_FACES).contains(face) {
                return Err(EngineError::invalid(
                    "dice face",
                    format!("{face} is not on a die (1-{DIE_FACES})"),
                ));
            }
        }
        let roll = rng.roll_die();
        let multiplier = if bet_wins(*bet, roll) {
            table.multiplier(*bet)
        } else {
            0.0
        };
        Ok(Resolution::new(
            multiplier,
            GameOutcome::Dice(DiceOutcome { roll, bet: *bet }),
        ))
    }
}
